//! Fixed-size variant of the latency comparison: always 10,000 rows,
//! loop totals only, no row count in the results file name.

use std::path::Path;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use edgebench::backend::neon::NeonConnector;
use edgebench::backend::turso::TursoConnector;
use edgebench::{report, BenchHarness, BenchOptions, Result};

const ROWS: usize = 10_000;

#[derive(Parser, Debug)]
#[command(name = "bulk-bench")]
struct Args {
    /// Connection string for the Postgres-compatible backend.
    #[arg(long, env = "NEON_DATABASE_URL", hide_env_values = true)]
    neon_url: String,

    /// URL of the libSQL backend.
    #[arg(long, env = "TURSO_DATABASE_URL")]
    turso_url: String,

    /// Auth token for the libSQL backend; may be empty for public databases.
    #[arg(long, env = "TURSO_AUTH_TOKEN", hide_env_values = true, default_value = "")]
    turso_auth_token: String,
}

#[tokio::main]
async fn main() {
    if let Err(err) = try_main().await {
        eprintln!("bulk-bench failed: {err}");
        std::process::exit(1);
    }
}

async fn try_main() -> Result<()> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();
    let args = Args::parse();

    println!("Running benchmark with {ROWS} records...");

    let options = BenchOptions {
        rows: ROWS,
        per_row_averages: false,
        rows_in_file_name: false,
    };
    let mut harness = BenchHarness::new(
        Box::new(NeonConnector::new(args.neon_url)),
        Box::new(TursoConnector::new(args.turso_url, args.turso_auth_token)),
        options.clone(),
    )?;

    let completed = match harness.run().await {
        Ok(()) => true,
        Err(err) => {
            eprintln!("Error during benchmark: {err}");
            false
        }
    };

    let path = report::write_results(Path::new("."), harness.results(), &options)?;
    println!("\nResults saved to {}", path.display());
    if completed {
        println!("\nBenchmark completed successfully!");
    }
    Ok(())
}
