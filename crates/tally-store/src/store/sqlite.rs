//! SqliteUsageStore - SQLite-based usage storage

use super::helpers::{format_timestamp, row_to_record, to_sql_count};
use super::traits::UsageStore;
use crate::error::{Error, Result};
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use std::path::Path;
use tally_core::{PruneFilter, UsageQuery, UsageRecord};
use tracing::{debug, info, instrument};

/// Usage store persisting records to SQLite
#[derive(Clone)]
pub struct SqliteUsageStore {
    pool: SqlitePool,
}

impl SqliteUsageStore {
    /// Create a new store from a database path
    ///
    /// This will create the database file if it doesn't exist and run migrations.
    pub async fn from_path(db_path: &Path) -> Result<Self> {
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| Error::Database(format!("failed to create directory: {e}")))?;
        }

        let db_url = format!("sqlite:{}?mode=rwc", db_path.display());
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect(&db_url)
            .await
            .map_err(|e| Error::Database(e.to_string()))?;

        let store = Self { pool };
        store.run_migrations().await?;

        info!("SQLite usage store initialized at {}", db_path.display());
        Ok(store)
    }

    /// Create a new in-memory store (for testing)
    pub async fn in_memory() -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .map_err(|e| Error::Database(e.to_string()))?;

        let store = Self { pool };
        store.run_migrations().await?;

        debug!("In-memory SQLite usage store initialized");
        Ok(store)
    }

    async fn run_migrations(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS usage_records (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                provider TEXT NOT NULL,
                model TEXT NOT NULL,
                prompt_tokens INTEGER NOT NULL,
                completion_tokens INTEGER NOT NULL,
                total_tokens INTEGER NOT NULL,
                cost REAL NOT NULL,
                timestamp TEXT NOT NULL,
                notes TEXT
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(|e| Error::Database(e.to_string()))?;

        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_usage_timestamp
            ON usage_records(timestamp DESC)
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(|e| Error::Database(e.to_string()))?;

        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_usage_provider
            ON usage_records(provider, timestamp)
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(|e| Error::Database(e.to_string()))?;

        debug!("Database migrations completed");
        Ok(())
    }

    /// Get a reference to the underlying connection pool
    #[must_use]
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Count all stored records
    #[instrument(skip(self))]
    pub async fn count(&self) -> Result<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM usage_records")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| Error::Database(e.to_string()))?;

        u64::try_from(count).map_err(|e| Error::Serialization(e.to_string()))
    }
}

#[async_trait::async_trait]
impl UsageStore for SqliteUsageStore {
    #[instrument(skip(self, record), fields(provider = %record.provider, model = %record.model))]
    async fn insert(&self, record: &UsageRecord) -> Result<i64> {
        let result = sqlx::query(
            r#"
            INSERT INTO usage_records (
                provider, model, prompt_tokens, completion_tokens, total_tokens,
                cost, timestamp, notes
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
        )
        .bind(&record.provider)
        .bind(&record.model)
        .bind(to_sql_count(record.prompt_tokens, "prompt_tokens")?)
        .bind(to_sql_count(record.completion_tokens, "completion_tokens")?)
        .bind(to_sql_count(record.total_tokens, "total_tokens")?)
        .bind(record.cost)
        .bind(format_timestamp(record.timestamp))
        .bind(&record.notes)
        .execute(&self.pool)
        .await
        .map_err(|e| Error::Database(e.to_string()))?;

        let id = result.last_insert_rowid();
        debug!("Inserted usage record {}", id);
        Ok(id)
    }

    #[instrument(skip(self))]
    async fn query(&self, query: &UsageQuery) -> Result<Vec<UsageRecord>> {
        // SQLite treats a negative LIMIT as "no limit".
        let limit = query
            .limit
            .map_or(-1, |limit| i64::try_from(limit).unwrap_or(i64::MAX));

        let rows = sqlx::query(
            r#"
            SELECT id, provider, model, prompt_tokens, completion_tokens, total_tokens,
                   cost, timestamp, notes
            FROM usage_records
            WHERE (?1 IS NULL OR provider = ?1)
              AND (?2 IS NULL OR timestamp >= ?2)
              AND (?3 IS NULL OR timestamp <= ?3)
            ORDER BY timestamp DESC, id DESC
            LIMIT ?4
            "#,
        )
        .bind(&query.provider)
        .bind(query.start.map(format_timestamp))
        .bind(query.end.map(format_timestamp))
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| Error::Database(e.to_string()))?;

        rows.into_iter().map(row_to_record).collect()
    }

    #[instrument(skip(self))]
    async fn delete_matching(&self, filter: &PruneFilter) -> Result<u64> {
        let result = sqlx::query(
            r#"
            DELETE FROM usage_records
            WHERE (?1 IS NULL OR provider = ?1)
              AND (?2 IS NULL OR timestamp < ?2)
            "#,
        )
        .bind(&filter.provider)
        .bind(filter.before.map(format_timestamp))
        .execute(&self.pool)
        .await
        .map_err(|e| Error::Database(e.to_string()))?;

        let deleted = result.rows_affected();
        debug!("Deleted {} usage records", deleted);
        Ok(deleted)
    }

    fn name(&self) -> &str {
        "sqlite"
    }
}
