use async_trait::async_trait;
use chrono::NaiveDate;
use iam_core::{MemoryStore, StatusEntry, StatusStore};
use sqlx::{postgres::PgPoolOptions, Pool, Postgres};
use std::sync::Arc;

use crate::{models::StatusRecord, Error, Result};

#[derive(Clone)]
pub struct Database {
    pool: Pool<Postgres>,
}

impl Database {
    /// Create new database connection
    pub async fn new(database_url: &str) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(database_url)
            .await?;

        Ok(Self { pool })
    }

    /// Initialize database schema
    pub async fn init_schema(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS status_entries (
                user_id VARCHAR(255) NOT NULL,
                entry_date DATE NOT NULL,
                status VARCHAR(16) NOT NULL,
                user_name TEXT NOT NULL,
                updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                PRIMARY KEY (user_id, entry_date)
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_status_entries_date ON status_entries(entry_date)",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Save entry, last write wins per (user_id, entry_date)
    pub async fn save_entry(&self, entry: &StatusEntry) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO status_entries (user_id, entry_date, status, user_name, updated_at)
            VALUES ($1, $2, $3, $4, NOW())
            ON CONFLICT (user_id, entry_date) DO UPDATE SET
                status = EXCLUDED.status,
                user_name = EXCLUDED.user_name,
                updated_at = NOW()
            "#,
        )
        .bind(&entry.user_id)
        .bind(entry.date)
        .bind(entry.status.as_str())
        .bind(&entry.user_name)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Get entries for a single date
    pub async fn get_entries_on(&self, date: NaiveDate) -> Result<Vec<StatusRecord>> {
        let records = sqlx::query_as::<_, StatusRecord>(
            "SELECT * FROM status_entries WHERE entry_date = $1 ORDER BY user_name",
        )
        .bind(date)
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }

    /// Get entries between two dates (inclusive)
    pub async fn get_entries_between(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<StatusRecord>> {
        let records = sqlx::query_as::<_, StatusRecord>(
            r#"
            SELECT * FROM status_entries
            WHERE entry_date >= $1 AND entry_date <= $2
            ORDER BY entry_date, user_name
            "#,
        )
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }

    /// Get one user's entries between two dates (inclusive)
    pub async fn get_user_entries_between(
        &self,
        user_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<StatusRecord>> {
        let records = sqlx::query_as::<_, StatusRecord>(
            r#"
            SELECT * FROM status_entries
            WHERE user_id = $1 AND entry_date >= $2 AND entry_date <= $3
            ORDER BY entry_date
            "#,
        )
        .bind(user_id)
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }
}

fn into_entries(records: Vec<StatusRecord>) -> Result<Vec<StatusEntry>> {
    records.into_iter().map(StatusEntry::try_from).collect()
}

#[async_trait]
impl StatusStore for Database {
    async fn upsert(&self, entry: &StatusEntry) -> iam_core::Result<()> {
        Ok(self.save_entry(entry).await?)
    }

    async fn entries_on(&self, date: NaiveDate) -> iam_core::Result<Vec<StatusEntry>> {
        Ok(into_entries(self.get_entries_on(date).await?)?)
    }

    async fn entries_between(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> iam_core::Result<Vec<StatusEntry>> {
        Ok(into_entries(self.get_entries_between(start, end).await?)?)
    }

    async fn user_entries_between(
        &self,
        user_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> iam_core::Result<Vec<StatusEntry>> {
        Ok(into_entries(
            self.get_user_entries_between(user_id, start, end).await?,
        )?)
    }
}

/// Connect to PostgreSQL and make sure the schema exists.
pub async fn connect_store(database_url: Option<&str>) -> Result<Arc<dyn StatusStore>> {
    let url = database_url.ok_or(Error::MissingDatabaseUrl)?;

    let database = Database::new(url).await?;
    database.init_schema().await?;
    tracing::info!("Connected to status database");

    Ok(Arc::new(database))
}

/// Like [`connect_store`], but falls back to an in-memory store when no URL
/// is given. Only the API server may use this: statuses then live as long as
/// the server process.
pub async fn open_store(database_url: Option<&str>) -> Result<Arc<dyn StatusStore>> {
    if database_url.is_none() {
        tracing::warn!("No DATABASE_URL provided, running without persistence");
        return Ok(Arc::new(MemoryStore::new()));
    }

    connect_store(database_url).await
}
