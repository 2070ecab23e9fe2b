use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

use crate::error::Result;
use crate::model::SampleRecord;

/// Builds the synthetic rows for the write test: ids 1..=count with titles
/// `Task 1` .. `Task N`, all stamped with the generation time.
pub fn generate_sample_data(count: usize) -> Result<Vec<SampleRecord>> {
    let created_at = OffsetDateTime::now_utc().format(&Rfc3339)?;
    let mut records = Vec::with_capacity(count);
    for i in 1..=count {
        records.push(SampleRecord {
            id: i as i64,
            title: format!("Task {i}"),
            description: format!("This is a sample task description for task {i}"),
            created_at: created_at.clone(),
        });
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_request_yields_no_records() {
        assert!(generate_sample_data(0).unwrap().is_empty());
    }

    #[test]
    fn titles_follow_the_index() {
        let records = generate_sample_data(3).unwrap();
        let titles: Vec<_> = records.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, ["Task 1", "Task 2", "Task 3"]);
    }
}
