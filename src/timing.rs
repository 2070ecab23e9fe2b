use std::future::Future;
use std::time::Instant;

use crate::error::Result;

/// Awaits one action between two monotonic clock reads and returns the
/// elapsed wall-clock time in milliseconds. A single sample, no warm-up,
/// no repetition; a failed action discards the sample.
pub async fn measure<F, Fut>(action: F) -> Result<f64>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<()>>,
{
    let start = Instant::now();
    action().await?;
    Ok(start.elapsed().as_secs_f64() * 1_000.0)
}
