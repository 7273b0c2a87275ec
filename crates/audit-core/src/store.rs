//! SQLite log store for audit records
//!
//! Provides persistence for finalized audit records and the read
//! path used by the records API.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{sqlite::SqlitePoolOptions, FromRow, SqlitePool};
use thiserror::Error;

use crate::record::AuditRecord;

/// Store error types
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// A persisted audit record as read back from the store
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AuditLogRow {
    pub id: i64,
    pub remote_addr: String,
    pub method: String,
    pub path: String,
    pub user_agent: String,
    pub request_body: String,
    pub user_id: i64,
    pub status: i32,
    pub latency_ns: i64,
    pub response_body: String,
    pub error_message: String,
    pub created_at: DateTime<Utc>,
}

/// Durable sink for finalized audit records.
///
/// One `create` per record; idempotency is not required. Callers treat
/// a failed create as non-fatal to the request being audited.
#[async_trait]
pub trait AuditStore: Send + Sync {
    /// Persist one finalized record, returning its row id
    async fn create(&self, record: &AuditRecord) -> StoreResult<i64>;

    /// Most recent records, newest first
    async fn recent(&self, limit: i64) -> StoreResult<Vec<AuditLogRow>>;
}

/// SQLite-backed audit store
#[derive(Clone)]
pub struct SqliteAuditStore {
    pool: SqlitePool,
}

impl SqliteAuditStore {
    /// Create a new store with the given database URL
    pub async fn new(database_url: &str) -> StoreResult<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect(database_url)
            .await?;

        let store = Self { pool };
        store.run_migrations().await?;
        Ok(store)
    }

    /// Create an in-memory store for testing
    pub async fn in_memory() -> StoreResult<Self> {
        Self::new("sqlite::memory:").await
    }

    /// Run database migrations
    async fn run_migrations(&self) -> StoreResult<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS audit_log (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                remote_addr TEXT NOT NULL,
                method TEXT NOT NULL,
                path TEXT NOT NULL,
                user_agent TEXT NOT NULL DEFAULT '',
                request_body TEXT NOT NULL DEFAULT '',
                user_id INTEGER NOT NULL DEFAULT 0,
                status INTEGER NOT NULL,
                latency_ns INTEGER NOT NULL,
                response_body TEXT NOT NULL DEFAULT '',
                error_message TEXT NOT NULL DEFAULT '',
                created_at TEXT NOT NULL DEFAULT (datetime('now'))
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_audit_log_created_at ON audit_log(created_at)
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Get the underlying pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl AuditStore for SqliteAuditStore {
    async fn create(&self, record: &AuditRecord) -> StoreResult<i64> {
        let latency_ns = i64::try_from(record.latency.as_nanos()).unwrap_or(i64::MAX);

        let result = sqlx::query(
            r#"
            INSERT INTO audit_log
                (remote_addr, method, path, user_agent, request_body, user_id,
                 status, latency_ns, response_body, error_message, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&record.remote_addr)
        .bind(&record.method)
        .bind(&record.path)
        .bind(&record.user_agent)
        .bind(&record.request_body)
        .bind(record.user_id)
        .bind(i32::from(record.status))
        .bind(latency_ns)
        .bind(&record.response_body)
        .bind(&record.error_message)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        Ok(result.last_insert_rowid())
    }

    async fn recent(&self, limit: i64) -> StoreResult<Vec<AuditLogRow>> {
        let rows = sqlx::query_as::<_, AuditLogRow>(
            r#"
            SELECT id, remote_addr, method, path, user_agent, request_body, user_id,
                   status, latency_ns, response_body, error_message, created_at
            FROM audit_log
            ORDER BY id DESC
            LIMIT ?
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn record(path: &str, status: u16) -> AuditRecord {
        AuditRecord {
            remote_addr: "127.0.0.1:5000".to_string(),
            method: "GET".to_string(),
            path: path.to_string(),
            user_agent: "test-agent".to_string(),
            request_body: String::new(),
            user_id: 3,
            status,
            latency: Duration::from_micros(250),
            error_message: String::new(),
            response_body: "ok".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_and_read_back() {
        let store = SqliteAuditStore::in_memory().await.unwrap();

        let id = store.create(&record("/api/v1/projects", 200)).await.unwrap();
        assert!(id > 0);

        let rows = store.recent(10).await.unwrap();
        assert_eq!(rows.len(), 1);

        let row = &rows[0];
        assert_eq!(row.id, id);
        assert_eq!(row.remote_addr, "127.0.0.1:5000");
        assert_eq!(row.method, "GET");
        assert_eq!(row.path, "/api/v1/projects");
        assert_eq!(row.user_agent, "test-agent");
        assert_eq!(row.user_id, 3);
        assert_eq!(row.status, 200);
        assert_eq!(row.latency_ns, 250_000);
        assert_eq!(row.response_body, "ok");
        assert!(row.error_message.is_empty());
    }

    #[tokio::test]
    async fn test_recent_is_newest_first_and_limited() {
        let store = SqliteAuditStore::in_memory().await.unwrap();

        store.create(&record("/first", 200)).await.unwrap();
        store.create(&record("/second", 404)).await.unwrap();
        store.create(&record("/third", 500)).await.unwrap();

        let rows = store.recent(2).await.unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].path, "/third");
        assert_eq!(rows[1].path, "/second");
    }

    #[tokio::test]
    async fn test_error_message_round_trips() {
        let store = SqliteAuditStore::in_memory().await.unwrap();

        let mut failed = record("/api/v1/projects", 500);
        failed.error_message = "upstream unavailable".to_string();
        store.create(&failed).await.unwrap();

        let rows = store.recent(1).await.unwrap();
        assert_eq!(rows[0].status, 500);
        assert_eq!(rows[0].error_message, "upstream unavailable");
    }
}
