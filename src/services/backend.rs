use std::time::Duration;

use serde_json::Value;
use thiserror::Error;

use crate::core::{assemble, clause::SearchClause, query};
use crate::models::domain::{ScoredCandidate, SearchCriteria, UserContext};
use crate::models::tags::ServiceCategory;

/// Errors that can occur when talking to the search backend
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("search backend returned error: {0}")]
    Api(String),

    #[error("invalid response format: {0}")]
    InvalidResponse(String),
}

/// HTTP client for the document search backend.
///
/// The backend evaluates aggregation pipelines over the service collection
/// and returns relevance-scored JSON documents. The client is cheap to
/// share: `reqwest::Client` is internally pooled and safe for concurrent
/// use, and request timeouts bound every call.
pub struct SearchBackend {
    base_url: String,
    collection: String,
    client: reqwest::Client,
}

impl SearchBackend {
    pub fn new(base_url: String, collection: String, timeout_secs: u64) -> Result<Self, BackendError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;

        Ok(Self {
            base_url,
            collection,
            client,
        })
    }

    /// Run an aggregation pipeline and return the raw result documents.
    pub async fn run_pipeline(&self, stages: &[Value]) -> Result<Vec<Value>, BackendError> {
        let url = format!(
            "{}/collections/{}/aggregate",
            self.base_url.trim_end_matches('/'),
            self.collection
        );

        let response = self
            .client
            .post(&url)
            .json(&serde_json::json!({"pipeline": stages}))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(BackendError::Api(format!(
                "aggregation failed: {}",
                response.status()
            )));
        }

        let json: Value = response.json().await?;

        json.get("documents")
            .and_then(|d| d.as_array())
            .cloned()
            .ok_or_else(|| BackendError::InvalidResponse("missing documents array".into()))
    }
}

/// Executes compound queries against the backend and parses raw hits.
///
/// Does not rank beyond the backend's relevance ordering and performs no
/// retries; a failed call surfaces as a single [`BackendError`].
pub struct SearchExecutor {
    backend: SearchBackend,
    search_index: String,
    autocomplete_index: String,
}

impl SearchExecutor {
    pub fn new(backend: SearchBackend, search_index: String, autocomplete_index: String) -> Self {
        Self {
            backend,
            search_index,
            autocomplete_index,
        }
    }

    /// Execute a search-mode query with pagination and a parallel count.
    pub async fn search(
        &self,
        criteria: &SearchCriteria,
    ) -> Result<(Vec<ScoredCandidate>, u64), BackendError> {
        let clauses = query::search_clauses(criteria);
        let filter = category_filter(criteria.category_filter);
        let search = query::search_stage(&self.search_index, &clauses, &filter);

        let mut stages = vec![search.clone(), query::projection_stage()];
        stages.extend(query::paginate_stages(&criteria.page));

        let count_stages = vec![search, query::count_stage()];

        let (docs, count_docs) = tokio::try_join!(
            self.backend.run_pipeline(&stages),
            self.backend.run_pipeline(&count_stages),
        )?;

        let hits = parse_hits(docs);
        let total = parse_count(&count_docs);

        tracing::debug!("search returned {} hits (total: {})", hits.len(), total);

        Ok((hits, total))
    }

    /// Execute a recommend-mode query. Over-fetches `fetch` candidates so
    /// the in-process match-count filter can still fill the requested size.
    pub async fn recommend(
        &self,
        keywords: &[String],
        user: &UserContext,
        fetch: usize,
    ) -> Result<Vec<ScoredCandidate>, BackendError> {
        let clauses = query::recommend_clauses(keywords, user);
        let stages = vec![
            query::search_stage(&self.search_index, &clauses, &[]),
            query::projection_stage(),
            query::limit_stage(fetch),
        ];

        let docs = self.backend.run_pipeline(&stages).await?;
        Ok(parse_hits(docs))
    }

    /// Fuzzy prefix suggestions on the service name field. Prefixes shorter
    /// than two characters return empty without touching the backend.
    pub async fn autocomplete(&self, prefix: &str, limit: usize) -> Result<Vec<String>, BackendError> {
        let prefix = prefix.trim();
        if prefix.chars().count() < 2 {
            return Ok(Vec::new());
        }

        let stages = vec![
            query::autocomplete_stage(&self.autocomplete_index, prefix),
            serde_json::json!({"$project": {query::FIELD_NAME: 1}}),
            query::limit_stage(limit),
        ];

        let docs = self.backend.run_pipeline(&stages).await?;

        let mut suggestions: Vec<String> = Vec::with_capacity(docs.len());
        for doc in docs {
            if let Some(name) = doc.get(query::FIELD_NAME).and_then(|n| n.as_str()) {
                if !suggestions.iter().any(|s| s == name) {
                    suggestions.push(name.to_string());
                }
            }
        }

        Ok(suggestions)
    }
}

fn category_filter(category: Option<ServiceCategory>) -> Vec<SearchClause> {
    match category {
        Some(category) => vec![SearchClause::Equals {
            path: query::FIELD_CATEGORY,
            value: category.label().to_string(),
        }],
        None => Vec::new(),
    }
}

/// Parse hit documents, dropping any the projection contract doesn't cover.
fn parse_hits(docs: Vec<Value>) -> Vec<ScoredCandidate> {
    assemble::dedup_by_id(
        docs.into_iter()
            .filter_map(|doc| serde_json::from_value(doc).ok())
            .collect(),
    )
}

fn parse_count(docs: &[Value]) -> u64 {
    docs.first()
        .and_then(|doc| doc.get("count"))
        .and_then(|count| count.as_u64())
        .unwrap_or(0)
}
