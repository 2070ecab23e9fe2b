//! Capability interface over the two hosted backends.
//!
//! Both services are consumed as opaque collaborators; everything the
//! runner needs from either of them fits in [`SqlBackend`]. [`Connector`]
//! produces fresh connected instances so the cold-start phase can measure
//! handshake overhead on a brand-new client.

pub mod neon;
pub mod turso;

use async_trait::async_trait;

use crate::error::Result;
use crate::model::SampleRecord;

#[async_trait]
pub trait SqlBackend: Send + Sync {
    async fn create_table(&self) -> Result<()>;
    async fn drop_table(&self) -> Result<()>;
    async fn insert_row(&self, record: &SampleRecord) -> Result<()>;
    /// Runs the unfiltered `SELECT * .. LIMIT 100` query, draining the
    /// result set. Returns the number of rows fetched.
    async fn select_all(&self) -> Result<u64>;
    /// Runs the `LIKE`-filtered select, draining the result set.
    async fn select_filtered(&self, pattern: &str) -> Result<u64>;
    /// One trivial `SELECT 1` round trip.
    async fn ping(&self) -> Result<()>;
}

#[async_trait]
pub trait Connector: Send + Sync {
    /// Display name used in console output.
    fn label(&self) -> &'static str;
    async fn connect(&self) -> Result<Box<dyn SqlBackend>>;
}
