use std::time::Duration;

/// In-memory cache for autocomplete suggestions, keyed by prefix.
///
/// Autocomplete is the hottest endpoint (one request per keystroke) and its
/// results change only when the service catalog does, so a short TTL plus an
/// explicit refresh hook keeps the backend load flat.
pub struct SuggestionCache {
    cache: moka::future::Cache<String, Vec<String>>,
}

impl SuggestionCache {
    pub fn new(capacity: u64, ttl_secs: u64) -> Self {
        let cache = moka::future::CacheBuilder::new(capacity)
            .time_to_live(Duration::from_secs(ttl_secs))
            .build();

        Self { cache }
    }

    pub async fn get(&self, prefix: &str) -> Option<Vec<String>> {
        self.cache.get(prefix).await
    }

    pub async fn insert(&self, prefix: String, suggestions: Vec<String>) {
        self.cache.insert(prefix, suggestions).await;
    }

    /// Drop every cached entry. Called when the service catalog is reloaded.
    pub fn invalidate_all(&self) {
        self.cache.invalidate_all();
        tracing::debug!("Invalidated all cached suggestions");
    }
}
