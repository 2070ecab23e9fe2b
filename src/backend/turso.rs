//! libSQL remote backend for the edge database service.

use async_trait::async_trait;
use libsql::{params, Builder, Connection, Database};

use crate::backend::{Connector, SqlBackend};
use crate::error::Result;
use crate::model::SampleRecord;

pub struct TursoConnector {
    url: String,
    auth_token: String,
}

impl TursoConnector {
    /// The token may be empty for databases that allow public access.
    pub fn new(url: impl Into<String>, auth_token: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            auth_token: auth_token.into(),
        }
    }
}

#[async_trait]
impl Connector for TursoConnector {
    fn label(&self) -> &'static str {
        "Turso"
    }

    async fn connect(&self) -> Result<Box<dyn SqlBackend>> {
        Ok(Box::new(
            TursoBackend::connect(&self.url, &self.auth_token).await?,
        ))
    }
}

pub struct TursoBackend {
    conn: Connection,
    _db: Database,
}

impl TursoBackend {
    pub async fn connect(url: &str, auth_token: &str) -> Result<Self> {
        let db = Builder::new_remote(url.to_owned(), auth_token.to_owned())
            .build()
            .await?;
        let conn = db.connect()?;
        Ok(Self { conn, _db: db })
    }

    async fn drain(&self, mut rows: libsql::Rows) -> Result<u64> {
        let mut count = 0;
        while rows.next().await?.is_some() {
            count += 1;
        }
        Ok(count)
    }
}

#[async_trait]
impl SqlBackend for TursoBackend {
    async fn create_table(&self) -> Result<()> {
        self.conn
            .execute(
                "CREATE TABLE IF NOT EXISTS turso_tasks (
                    id INTEGER PRIMARY KEY,
                    title TEXT NOT NULL,
                    description TEXT,
                    created_at TEXT
                )",
                (),
            )
            .await?;
        Ok(())
    }

    async fn drop_table(&self) -> Result<()> {
        self.conn
            .execute("DROP TABLE IF EXISTS turso_tasks", ())
            .await?;
        Ok(())
    }

    async fn insert_row(&self, record: &SampleRecord) -> Result<()> {
        self.conn
            .execute(
                "INSERT INTO turso_tasks (title, description, created_at) VALUES (?1, ?2, ?3)",
                params![
                    record.title.as_str(),
                    record.description.as_str(),
                    record.created_at.as_str()
                ],
            )
            .await?;
        Ok(())
    }

    async fn select_all(&self) -> Result<u64> {
        let rows = self
            .conn
            .query("SELECT * FROM turso_tasks LIMIT 100", ())
            .await?;
        self.drain(rows).await
    }

    async fn select_filtered(&self, pattern: &str) -> Result<u64> {
        let rows = self
            .conn
            .query(
                "SELECT * FROM turso_tasks WHERE title LIKE ?1",
                params![pattern],
            )
            .await?;
        self.drain(rows).await
    }

    async fn ping(&self) -> Result<()> {
        self.conn.query("SELECT 1", ()).await?;
        Ok(())
    }
}
