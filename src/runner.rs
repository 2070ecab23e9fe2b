//! Sequential benchmark phases, driven over both backends in a fixed
//! order: setup, cold start, write, read. Phases never overlap and the
//! two backends are never exercised concurrently, so one sample never
//! disturbs another.

use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;
use tracing::debug;

use crate::backend::{Connector, SqlBackend};
use crate::error::Result;
use crate::model::{BackendTimings, BenchmarkResults, SampleRecord};
use crate::sample::generate_sample_data;
use crate::timing::measure;

const FILTER_PATTERN: &str = "%Task 1%";

/// Knobs distinguishing the two workload variants.
#[derive(Debug, Clone)]
pub struct BenchOptions {
    /// Rows inserted during the write test.
    pub rows: usize,
    /// Record per-row write averages alongside the loop total.
    pub per_row_averages: bool,
    /// Include the row count in the results file name.
    pub rows_in_file_name: bool,
}

pub struct BenchHarness {
    neon: Box<dyn Connector>,
    turso: Box<dyn Connector>,
    options: BenchOptions,
    results: BenchmarkResults,
}

impl BenchHarness {
    pub fn new(
        neon: Box<dyn Connector>,
        turso: Box<dyn Connector>,
        options: BenchOptions,
    ) -> Result<Self> {
        let timestamp = OffsetDateTime::now_utc().format(&Rfc3339)?;
        let results = BenchmarkResults::new(timestamp, options.rows as u64);
        Ok(Self {
            neon,
            turso,
            options,
            results,
        })
    }

    /// Whatever the phases have recorded so far; callers save this even
    /// when [`run`](Self::run) failed partway.
    pub fn results(&self) -> &BenchmarkResults {
        &self.results
    }

    pub async fn run(&mut self) -> Result<()> {
        println!("Setting up databases...");
        let (neon, turso) = self.setup_databases().await?;
        let data = generate_sample_data(self.options.rows)?;
        self.cold_start_test().await?;
        self.write_test(neon.as_ref(), turso.as_ref(), &data).await?;
        self.read_test(neon.as_ref(), turso.as_ref()).await?;
        Ok(())
    }

    async fn setup_databases(&self) -> Result<(Box<dyn SqlBackend>, Box<dyn SqlBackend>)> {
        let neon = self.neon.connect().await?;
        let turso = self.turso.connect().await?;

        // Best-effort cleanup of leftovers from earlier runs.
        if let Err(err) = drop_existing(neon.as_ref(), turso.as_ref()).await {
            debug!("table drop failed: {err}");
            println!("Tables did not exist, proceeding with creation...");
        }

        neon.create_table().await?;
        turso.create_table().await?;
        Ok((neon, turso))
    }

    async fn cold_start_test(&mut self) -> Result<()> {
        println!("\n=== Cold Start Test ===");

        let connector = self.neon.as_ref();
        let neon_ms = measure(|| async move {
            let fresh = connector.connect().await?;
            fresh.ping().await
        })
        .await?;
        println!("{} Cold Start Time: {neon_ms:.2}ms", self.neon.label());
        self.results.cold_start.neon = Some(neon_ms);

        let connector = self.turso.as_ref();
        let turso_ms = measure(|| async move {
            let fresh = connector.connect().await?;
            fresh.ping().await
        })
        .await?;
        println!("{} Cold Start Time: {turso_ms:.2}ms", self.turso.label());
        self.results.cold_start.turso = Some(turso_ms);

        Ok(())
    }

    async fn write_test(
        &mut self,
        neon: &dyn SqlBackend,
        turso: &dyn SqlBackend,
        data: &[SampleRecord],
    ) -> Result<()> {
        println!("\n=== Write Test ({} rows) ===", data.len());

        let neon_ms = measure(|| async move {
            for record in data {
                neon.insert_row(record).await?;
            }
            Ok(())
        })
        .await?;
        println!("{} Write Time: {neon_ms:.2}ms", self.neon.label());

        let turso_ms = measure(|| async move {
            for record in data {
                turso.insert_row(record).await?;
            }
            Ok(())
        })
        .await?;
        println!("{} Write Time: {turso_ms:.2}ms", self.turso.label());

        let write = &mut self.results.write_test;
        write.neon = Some(neon_ms);
        write.turso = Some(turso_ms);
        write.row_count = Some(data.len() as u64);
        // Guarded division: a zero-row run leaves the averages unset
        // instead of recording NaN.
        if self.options.per_row_averages && !data.is_empty() {
            write.neon_avg_per_row = Some(neon_ms / data.len() as f64);
            write.turso_avg_per_row = Some(turso_ms / data.len() as f64);
        }
        Ok(())
    }

    async fn read_test(&mut self, neon: &dyn SqlBackend, turso: &dyn SqlBackend) -> Result<()> {
        println!("\n=== Read Test ===");

        println!("\nSimple Query (SELECT * LIMIT 100):");
        let neon_ms = measure(|| async move { neon.select_all().await.map(|_| ()) }).await?;
        println!("{} Query Time: {neon_ms:.2}ms", self.neon.label());
        let turso_ms = measure(|| async move { turso.select_all().await.map(|_| ()) }).await?;
        println!("{} Query Time: {turso_ms:.2}ms", self.turso.label());
        self.results.read_test.simple_query = BackendTimings {
            neon: Some(neon_ms),
            turso: Some(turso_ms),
        };

        println!("\nFilter Query (WHERE title LIKE):");
        let neon_ms =
            measure(|| async move { neon.select_filtered(FILTER_PATTERN).await.map(|_| ()) }).await?;
        println!("{} Filter Time: {neon_ms:.2}ms", self.neon.label());
        let turso_ms =
            measure(|| async move { turso.select_filtered(FILTER_PATTERN).await.map(|_| ()) }).await?;
        println!("{} Filter Time: {turso_ms:.2}ms", self.turso.label());
        self.results.read_test.filter_query = BackendTimings {
            neon: Some(neon_ms),
            turso: Some(turso_ms),
        };

        Ok(())
    }
}

async fn drop_existing(neon: &dyn SqlBackend, turso: &dyn SqlBackend) -> Result<()> {
    neon.drop_table().await?;
    turso.drop_table().await?;
    Ok(())
}
