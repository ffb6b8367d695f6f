//! CV record store: the storage collaborator of the generation workflow.
//!
//! `AppState` holds an `Arc<dyn CvStore>`; the default backend is Postgres
//! via sqlx. Failures are classified so the fetch loop knows what to retry:
//! not-found, rejected (4xx-like) and unavailable (network) are retryable,
//! backend (5xx-like) failures are not.

use async_trait::async_trait;
use serde_json::Value;
use sqlx::PgPool;
use thiserror::Error;
use tracing::debug;
use uuid::Uuid;

use crate::models::cv::CvRow;

#[derive(Debug, Clone, Error)]
pub enum StoreError {
    #[error("CV record not found: {0}")]
    NotFound(String),

    /// 4xx-style refusal from an HTTP-fronted record store. Postgres never
    /// produces it.
    #[error("Store rejected request (status {status}): {message}")]
    #[allow(dead_code)]
    Rejected { status: u16, message: String },

    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error("Store backend error: {0}")]
    Backend(String),
}

impl StoreError {
    /// Whether the content fetch loop may try again after this failure.
    pub fn is_retryable(&self) -> bool {
        !matches!(self, StoreError::Backend(_))
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        match e {
            sqlx::Error::RowNotFound => StoreError::NotFound("no matching row".to_string()),
            sqlx::Error::Io(io) => StoreError::Unavailable(io.to_string()),
            sqlx::Error::PoolTimedOut => StoreError::Unavailable("connection pool timed out".to_string()),
            sqlx::Error::PoolClosed => StoreError::Unavailable("connection pool closed".to_string()),
            other => StoreError::Backend(other.to_string()),
        }
    }
}

#[async_trait]
pub trait CvStore: Send + Sync {
    /// Creates an empty, active CV record. Not idempotent.
    async fn create_record(&self, user_id: Uuid) -> Result<Uuid, StoreError>;

    /// Persists raw generated content verbatim.
    async fn put_content(&self, id: Uuid, content: &Value) -> Result<(), StoreError>;

    /// Raw content; `None` when the record exists but has no content yet.
    async fn get_content(&self, id: Uuid) -> Result<Option<Value>, StoreError>;

    async fn get_rendered_html(&self, id: Uuid) -> Result<Option<String>, StoreError>;

    async fn put_rendered_html(&self, id: Uuid, html: &str) -> Result<(), StoreError>;

    /// The user's most recently created active record.
    async fn latest_record_for_user(&self, user_id: Uuid) -> Result<Option<Uuid>, StoreError>;
}

// ────────────────────────────────────────────────────────────────────────────
// Postgres backend
// ────────────────────────────────────────────────────────────────────────────

pub struct PgCvStore {
    pool: PgPool,
}

impl PgCvStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn fetch_row(&self, id: Uuid) -> Result<CvRow, StoreError> {
        sqlx::query_as::<_, CvRow>("SELECT * FROM cvs WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| StoreError::NotFound(format!("CV {id}")))
    }
}

#[async_trait]
impl CvStore for PgCvStore {
    async fn create_record(&self, user_id: Uuid) -> Result<Uuid, StoreError> {
        let id = Uuid::new_v4();
        sqlx::query("INSERT INTO cvs (id, user_id, active) VALUES ($1, $2, TRUE)")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        debug!("Created CV record {id} for user {user_id}");
        Ok(id)
    }

    async fn put_content(&self, id: Uuid, content: &Value) -> Result<(), StoreError> {
        let result = sqlx::query(
            "UPDATE cvs SET raw_content = $1, rendered_html = NULL, updated_at = NOW() WHERE id = $2",
        )
        .bind(content)
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(format!("CV {id}")));
        }
        Ok(())
    }

    async fn get_content(&self, id: Uuid) -> Result<Option<Value>, StoreError> {
        Ok(self.fetch_row(id).await?.raw_content)
    }

    async fn get_rendered_html(&self, id: Uuid) -> Result<Option<String>, StoreError> {
        Ok(self.fetch_row(id).await?.rendered_html)
    }

    async fn put_rendered_html(&self, id: Uuid, html: &str) -> Result<(), StoreError> {
        let result =
            sqlx::query("UPDATE cvs SET rendered_html = $1, updated_at = NOW() WHERE id = $2")
                .bind(html)
                .bind(id)
                .execute(&self.pool)
                .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(format!("CV {id}")));
        }
        Ok(())
    }

    async fn latest_record_for_user(&self, user_id: Uuid) -> Result<Option<Uuid>, StoreError> {
        let id = sqlx::query_scalar::<_, Uuid>(
            "SELECT id FROM cvs WHERE user_id = $1 AND active ORDER BY created_at DESC LIMIT 1",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(id)
    }
}
