//! Runner behavior against instant in-memory backends.

use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use edgebench::backend::{Connector, SqlBackend};
use edgebench::error::{BenchError, Result};
use edgebench::model::SampleRecord;
use edgebench::{report, BenchHarness, BenchOptions};
use serde_json::Value;
use tempfile::TempDir;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

#[derive(Clone, Default)]
struct Calls {
    connects: Arc<AtomicUsize>,
    inserts: Arc<AtomicUsize>,
}

struct MockConnector {
    label: &'static str,
    calls: Calls,
    fail_create: bool,
}

impl MockConnector {
    fn new(label: &'static str) -> Self {
        Self {
            label,
            calls: Calls::default(),
            fail_create: false,
        }
    }

    fn failing(label: &'static str) -> Self {
        Self {
            fail_create: true,
            ..Self::new(label)
        }
    }
}

#[async_trait]
impl Connector for MockConnector {
    fn label(&self) -> &'static str {
        self.label
    }

    async fn connect(&self) -> Result<Box<dyn SqlBackend>> {
        self.calls.connects.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(MockBackend {
            calls: self.calls.clone(),
            fail_create: self.fail_create,
        }))
    }
}

struct MockBackend {
    calls: Calls,
    fail_create: bool,
}

#[async_trait]
impl SqlBackend for MockBackend {
    async fn create_table(&self) -> Result<()> {
        if self.fail_create {
            return Err(BenchError::Io(io::Error::new(
                io::ErrorKind::Other,
                "simulated backend outage",
            )));
        }
        Ok(())
    }

    async fn drop_table(&self) -> Result<()> {
        Ok(())
    }

    async fn insert_row(&self, _record: &SampleRecord) -> Result<()> {
        self.calls.inserts.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn select_all(&self) -> Result<u64> {
        Ok(0)
    }

    async fn select_filtered(&self, _pattern: &str) -> Result<u64> {
        Ok(0)
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}

fn options(rows: usize, per_row_averages: bool) -> BenchOptions {
    BenchOptions {
        rows,
        per_row_averages,
        rows_in_file_name: true,
    }
}

#[tokio::test]
async fn instant_backends_record_nonnegative_timings() {
    let neon = MockConnector::new("Neon");
    let turso = MockConnector::new("Turso");
    let neon_calls = neon.calls.clone();
    let turso_calls = turso.calls.clone();

    let mut harness =
        BenchHarness::new(Box::new(neon), Box::new(turso), options(5, true)).unwrap();
    harness.run().await.unwrap();

    let results = harness.results();
    for timing in [
        results.cold_start.neon,
        results.cold_start.turso,
        results.write_test.neon,
        results.write_test.turso,
        results.read_test.simple_query.neon,
        results.read_test.simple_query.turso,
        results.read_test.filter_query.neon,
        results.read_test.filter_query.turso,
    ] {
        let ms = timing.expect("timing recorded after a successful phase");
        assert!(ms >= 0.0);
        assert!(ms < 1_000.0, "instant mock took {ms}ms");
    }

    assert_eq!(results.write_test.row_count, Some(5));
    assert!(results.write_test.neon_avg_per_row.unwrap() >= 0.0);
    assert!(results.write_test.turso_avg_per_row.unwrap() >= 0.0);

    assert_eq!(neon_calls.inserts.load(Ordering::SeqCst), 5);
    assert_eq!(turso_calls.inserts.load(Ordering::SeqCst), 5);
    // One connection from setup plus a fresh one for cold start.
    assert_eq!(neon_calls.connects.load(Ordering::SeqCst), 2);
    assert_eq!(turso_calls.connects.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn zero_rows_performs_no_inserts_and_omits_averages() {
    let neon = MockConnector::new("Neon");
    let turso = MockConnector::new("Turso");
    let neon_calls = neon.calls.clone();
    let turso_calls = turso.calls.clone();

    let mut harness =
        BenchHarness::new(Box::new(neon), Box::new(turso), options(0, true)).unwrap();
    harness.run().await.unwrap();

    assert_eq!(neon_calls.inserts.load(Ordering::SeqCst), 0);
    assert_eq!(turso_calls.inserts.load(Ordering::SeqCst), 0);

    let results = harness.results();
    assert_eq!(results.write_test.row_count, Some(0));
    assert_eq!(results.write_test.neon_avg_per_row, None);
    assert_eq!(results.write_test.turso_avg_per_row, None);
}

#[tokio::test]
async fn averages_are_skipped_when_not_requested() {
    let neon = MockConnector::new("Neon");
    let turso = MockConnector::new("Turso");

    let mut harness =
        BenchHarness::new(Box::new(neon), Box::new(turso), options(3, false)).unwrap();
    harness.run().await.unwrap();

    let results = harness.results();
    assert_eq!(results.write_test.row_count, Some(3));
    assert_eq!(results.write_test.neon_avg_per_row, None);
    assert_eq!(results.write_test.turso_avg_per_row, None);
}

#[tokio::test]
async fn setup_failure_still_yields_a_saveable_empty_document() {
    let neon = MockConnector::failing("Neon");
    let turso = MockConnector::new("Turso");
    let opts = options(5, true);

    let mut harness = BenchHarness::new(Box::new(neon), Box::new(turso), opts.clone()).unwrap();
    assert!(harness.run().await.is_err());

    // The caller saves whatever accumulated, exactly as the binaries do.
    let dir = TempDir::new().unwrap();
    let path = report::write_results(dir.path(), harness.results(), &opts).unwrap();
    let json: Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(json["coldStart"], serde_json::json!({}));
    assert_eq!(json["writeTest"], serde_json::json!({}));
    assert_eq!(json["readTest"]["simpleQuery"], serde_json::json!({}));
    assert_eq!(json["readTest"]["filterQuery"], serde_json::json!({}));
}

#[tokio::test]
async fn results_timestamp_is_rfc3339() {
    let harness = BenchHarness::new(
        Box::new(MockConnector::new("Neon")),
        Box::new(MockConnector::new("Turso")),
        options(1, true),
    )
    .unwrap();
    OffsetDateTime::parse(&harness.results().timestamp, &Rfc3339).expect("rfc3339 timestamp");
}
