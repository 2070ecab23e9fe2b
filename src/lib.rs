//! Latency comparison harness for two hosted SQL database services.

pub mod backend;
pub mod error;
pub mod model;
pub mod report;
pub mod runner;
pub mod sample;
pub mod timing;

pub use error::{BenchError, Result};
pub use model::BenchmarkResults;
pub use runner::{BenchHarness, BenchOptions};
