use std::fs;
use std::path::{Path, PathBuf};

use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

use crate::error::Result;
use crate::model::BenchmarkResults;
use crate::runner::BenchOptions;

/// Writes the results document as pretty-printed JSON into `dir` and
/// returns the path. Called exactly once per run, whether the run
/// completed or died partway.
pub fn write_results(
    dir: &Path,
    results: &BenchmarkResults,
    options: &BenchOptions,
) -> Result<PathBuf> {
    let stamp = OffsetDateTime::now_utc().format(&Rfc3339)?;
    let rows = options.rows_in_file_name.then_some(options.rows);
    let path = dir.join(results_file_name(rows, &stamp));
    let json = serde_json::to_string_pretty(results)?;
    fs::write(&path, json)?;
    Ok(path)
}

/// Colons and dots in the timestamp are filesystem-hostile; both become
/// dashes, as they always have in this file family.
fn results_file_name(rows: Option<usize>, timestamp: &str) -> String {
    let stamp = timestamp.replace([':', '.'], "-");
    match rows {
        Some(rows) => format!("benchmark-results-{rows}-rows-{stamp}.json"),
        None => format!("benchmark-results-{stamp}.json"),
    }
}
