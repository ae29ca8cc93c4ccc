use std::future::Future;
use std::sync::Arc;

use redis::aio::ConnectionManager;
use thiserror::Error;

/// Errors that can occur with search history operations
#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),
}

/// Read/write access to a user's recent search terms. The engine and the
/// enricher depend on this seam rather than the Redis-backed store.
pub trait SearchHistory: Send + Sync {
    fn record(
        &self,
        user_id: i64,
        term: &str,
    ) -> impl Future<Output = Result<(), HistoryError>> + Send;

    fn list_recent(
        &self,
        user_id: i64,
    ) -> impl Future<Output = Result<Vec<String>, HistoryError>> + Send;
}

/// Per-user recent search terms, newest first.
///
/// Backed by a Redis list per user. The list is kept short and expires as a
/// whole; recording the same term again moves it to the front instead of
/// duplicating it.
pub struct SearchHistoryStore {
    // ConnectionManager needs interior mutability for command execution
    redis: Arc<tokio::sync::Mutex<ConnectionManager>>,
    max_entries: usize,
    ttl_secs: u64,
}

impl SearchHistoryStore {
    pub async fn new(redis_url: &str, max_entries: usize, ttl_secs: u64) -> Result<Self, HistoryError> {
        let client = redis::Client::open(redis_url)?;
        let redis = redis::aio::ConnectionManager::new(client).await?;

        Ok(Self {
            redis: Arc::new(tokio::sync::Mutex::new(redis)),
            max_entries,
            ttl_secs,
        })
    }

    fn key(user_id: i64) -> String {
        format!("searchHistory:{}", user_id)
    }
}

impl SearchHistory for SearchHistoryStore {
    /// Record a search term for a user. Blank terms are ignored.
    async fn record(&self, user_id: i64, term: &str) -> Result<(), HistoryError> {
        let term = term.trim();
        if term.is_empty() {
            return Ok(());
        }

        let key = Self::key(user_id);
        let mut conn = self.redis.lock().await;

        // Move-to-front: drop earlier occurrences before pushing.
        redis::cmd("LREM")
            .arg(&key)
            .arg(0)
            .arg(term)
            .query_async::<()>(&mut *conn)
            .await?;
        redis::cmd("LPUSH")
            .arg(&key)
            .arg(term)
            .query_async::<()>(&mut *conn)
            .await?;
        redis::cmd("LTRIM")
            .arg(&key)
            .arg(0)
            .arg((self.max_entries as i64) - 1)
            .query_async::<()>(&mut *conn)
            .await?;
        redis::cmd("EXPIRE")
            .arg(&key)
            .arg(self.ttl_secs)
            .query_async::<()>(&mut *conn)
            .await?;
        drop(conn);

        tracing::trace!("Recorded search term for user {}", user_id);
        Ok(())
    }

    /// Most recent search terms, newest first.
    async fn list_recent(&self, user_id: i64) -> Result<Vec<String>, HistoryError> {
        let key = Self::key(user_id);
        let mut conn = self.redis.lock().await;
        let terms: Vec<String> = redis::cmd("LRANGE")
            .arg(&key)
            .arg(0)
            .arg(-1)
            .query_async(&mut *conn)
            .await?;
        Ok(terms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_history_key_format() {
        assert_eq!(SearchHistoryStore::key(42), "searchHistory:42");
    }

    #[tokio::test]
    #[ignore = "Requires Redis"]
    async fn test_record_and_list() {
        let store = SearchHistoryStore::new("redis://127.0.0.1:6379", 6, 60)
            .await
            .expect("Failed to connect to Redis");

        store.record(9001, "청년 월세").await.unwrap();
        store.record(9001, "창업").await.unwrap();
        store.record(9001, "청년 월세").await.unwrap();

        let recent = store.list_recent(9001).await.unwrap();
        assert_eq!(recent, vec!["청년 월세", "창업"]);
    }

    #[tokio::test]
    #[ignore = "Requires Redis"]
    async fn test_blank_term_is_ignored() {
        let store = SearchHistoryStore::new("redis://127.0.0.1:6379", 6, 60)
            .await
            .expect("Failed to connect to Redis");

        store.record(9002, "   ").await.unwrap();
        assert!(store.list_recent(9002).await.unwrap().is_empty());
    }
}
