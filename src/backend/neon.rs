//! Postgres-wire backend, driven through tokio-postgres over rustls.

use async_trait::async_trait;
use tokio_postgres::Client;
use tokio_postgres_rustls::MakeRustlsConnect;
use tracing::warn;

use crate::backend::{Connector, SqlBackend};
use crate::error::Result;
use crate::model::SampleRecord;

pub struct NeonConnector {
    url: String,
}

impl NeonConnector {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

#[async_trait]
impl Connector for NeonConnector {
    fn label(&self) -> &'static str {
        "Neon"
    }

    async fn connect(&self) -> Result<Box<dyn SqlBackend>> {
        Ok(Box::new(NeonBackend::connect(&self.url).await?))
    }
}

pub struct NeonBackend {
    client: Client,
}

impl NeonBackend {
    pub async fn connect(url: &str) -> Result<Self> {
        let tls = MakeRustlsConnect::new(client_tls_config());
        let (client, connection) = tokio_postgres::connect(url, tls).await?;
        // The connection object drives the socket; it lives until the
        // client drops.
        tokio::spawn(async move {
            if let Err(err) = connection.await {
                warn!("postgres connection closed: {err}");
            }
        });
        Ok(Self { client })
    }
}

fn client_tls_config() -> rustls::ClientConfig {
    let mut roots = rustls::RootCertStore::empty();
    roots.extend(webpki_roots::TLS_SERVER_ROOTS.iter().cloned());
    rustls::ClientConfig::builder()
        .with_root_certificates(roots)
        .with_no_client_auth()
}

#[async_trait]
impl SqlBackend for NeonBackend {
    async fn create_table(&self) -> Result<()> {
        self.client
            .batch_execute(
                "CREATE TABLE IF NOT EXISTS neon_tasks (
                    id SERIAL PRIMARY KEY,
                    title TEXT NOT NULL,
                    description TEXT,
                    created_at TIMESTAMP WITH TIME ZONE DEFAULT CURRENT_TIMESTAMP
                )",
            )
            .await?;
        Ok(())
    }

    async fn drop_table(&self) -> Result<()> {
        self.client
            .batch_execute("DROP TABLE IF EXISTS neon_tasks")
            .await?;
        Ok(())
    }

    async fn insert_row(&self, record: &SampleRecord) -> Result<()> {
        // created_at binds as text and converts server-side; the RFC 3339
        // string is not a binary timestamptz.
        self.client
            .execute(
                "INSERT INTO neon_tasks (title, description, created_at)
                 VALUES ($1, $2, $3::text::timestamptz)",
                &[&record.title, &record.description, &record.created_at],
            )
            .await?;
        Ok(())
    }

    async fn select_all(&self) -> Result<u64> {
        let rows = self
            .client
            .query("SELECT * FROM neon_tasks LIMIT 100", &[])
            .await?;
        Ok(rows.len() as u64)
    }

    async fn select_filtered(&self, pattern: &str) -> Result<u64> {
        let rows = self
            .client
            .query("SELECT * FROM neon_tasks WHERE title LIKE $1", &[&pattern])
            .await?;
        Ok(rows.len() as u64)
    }

    async fn ping(&self) -> Result<()> {
        self.client.query_one("SELECT 1", &[]).await?;
        Ok(())
    }
}
