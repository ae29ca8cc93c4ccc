use std::future::Future;
use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Row};
use thiserror::Error;

/// Errors that can occur when querying bookmark state
#[derive(Debug, Error)]
pub enum BookmarkError {
    #[error("SQLx error: {0}")]
    Sqlx(#[from] sqlx::Error),
}

/// Answers whether a user has bookmarked a service. The engine depends on
/// this seam rather than the Postgres-backed store.
pub trait BookmarkLookup: Send + Sync {
    fn exists(
        &self,
        user_id: i64,
        service_id: &str,
    ) -> impl Future<Output = Result<bool, BookmarkError>> + Send;
}

/// Read-only view over the bookmarks table.
///
/// Bookmark writes belong to another service; this store only answers
/// whether a user has bookmarked a given service so results can be
/// annotated.
pub struct BookmarkStore {
    pool: PgPool,
}

impl BookmarkStore {
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self, BookmarkError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(Duration::from_secs(5))
            .idle_timeout(Duration::from_secs(600))
            .test_before_acquire(true)
            .connect(database_url)
            .await?;

        Ok(Self { pool })
    }

    /// Health check for the database connection
    pub async fn health_check(&self) -> Result<bool, BookmarkError> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| true)
            .map_err(Into::into)
    }
}

impl BookmarkLookup for BookmarkStore {
    async fn exists(&self, user_id: i64, service_id: &str) -> Result<bool, BookmarkError> {
        let query = r#"
            SELECT EXISTS(
                SELECT 1 FROM bookmarks
                WHERE user_id = $1 AND service_id = $2
            ) AS bookmarked
        "#;

        let row = sqlx::query(query)
            .bind(user_id)
            .bind(service_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(row.get("bookmarked"))
    }
}
