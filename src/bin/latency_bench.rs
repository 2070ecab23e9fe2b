//! Latency comparison between the two hosted backends with a
//! configurable row count (positional argument, default 100). Records
//! per-row write averages alongside the loop totals.

use std::path::Path;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use edgebench::backend::neon::NeonConnector;
use edgebench::backend::turso::TursoConnector;
use edgebench::{report, BenchHarness, BenchOptions, Result};

#[derive(Parser, Debug)]
#[command(name = "latency-bench")]
struct Args {
    /// Rows inserted during the write test.
    #[arg(default_value_t = 100)]
    rows: usize,

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
        eprintln!("latency-bench failed: {err}");
        std::process::exit(1);
    }
}

async fn try_main() -> Result<()> {
    // .env must load before clap resolves env-backed flags.
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();
    let args = Args::parse();

    println!("Running benchmark with {} records...", args.rows);

    let options = BenchOptions {
        rows: args.rows,
        per_row_averages: true,
        rows_in_file_name: true,
    };
    let mut harness = BenchHarness::new(
        Box::new(NeonConnector::new(args.neon_url)),
        Box::new(TursoConnector::new(args.turso_url, args.turso_auth_token)),
        options.clone(),
    )?;

    // One catch for every phase: log, flush partial results, exit 0.
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
