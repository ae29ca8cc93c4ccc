use std::sync::Arc;

use thiserror::Error;

use crate::core::{assemble, recommend};
use crate::models::domain::{ResultPage, ScoredCandidate, SearchCriteria};
use crate::models::responses::{FilterOptionsResponse, ServiceSummary};
use crate::models::tags::{FamilyType, ServiceCategory, SpecialGroup};
use crate::services::backend::{BackendError, SearchExecutor};
use crate::services::bookmarks::BookmarkLookup;
use crate::services::cache::SuggestionCache;
use crate::services::enrich::{EnrichError, ProfileEnricher};
use crate::services::history::SearchHistory;

const AUTOCOMPLETE_LIMIT: usize = 8;

/// Errors surfaced by the search engine
#[derive(Debug, Error)]
pub enum SearchError {
    #[error(transparent)]
    Backend(#[from] BackendError),

    #[error(transparent)]
    Enrich(#[from] EnrichError),

    #[error("invalid filter value: {0}")]
    InvalidFilter(String),
}

/// Orchestrates search, recommendation and autocomplete.
///
/// Owns the ranking policy end to end: the executor runs queries, the
/// enricher personalizes them, and this type decides degradation. Bookmark
/// and history failures degrade the response; profile and backend failures
/// fail the request.
pub struct SearchEngine<H, B> {
    executor: SearchExecutor,
    enricher: ProfileEnricher<H>,
    history: Arc<H>,
    bookmarks: Arc<B>,
    suggestions: SuggestionCache,
    matched_fetch_multiplier: usize,
}

impl<H: SearchHistory, B: BookmarkLookup> SearchEngine<H, B> {
    pub fn new(
        executor: SearchExecutor,
        enricher: ProfileEnricher<H>,
        history: Arc<H>,
        bookmarks: Arc<B>,
        suggestions: SuggestionCache,
        matched_fetch_multiplier: usize,
    ) -> Self {
        Self {
            executor,
            enricher,
            history,
            bookmarks,
            suggestions,
            matched_fetch_multiplier,
        }
    }

    /// Anonymous search. A blank term short-circuits to an empty page.
    pub async fn search(
        &self,
        criteria: SearchCriteria,
    ) -> Result<ResultPage<ServiceSummary>, SearchError> {
        if !criteria.has_term() {
            return Ok(ResultPage::empty(criteria.page));
        }

        let (hits, total) = self.executor.search(&criteria).await?;
        let items = self.assemble_page(hits, None).await;
        Ok(ResultPage::of(items, total, criteria.page))
    }

    /// Personalized search: records the term in history, enriches the
    /// criteria from the user's profile, annotates bookmark state.
    pub async fn search_personalized(
        &self,
        criteria: SearchCriteria,
        user_id: i64,
    ) -> Result<ResultPage<ServiceSummary>, SearchError> {
        if !criteria.has_term() {
            return Ok(ResultPage::empty(criteria.page));
        }

        if let Err(e) = self.history.record(user_id, &criteria.search_term).await {
            tracing::warn!("Failed to record search history for user {}: {}", user_id, e);
        }

        let enriched = self.enricher.enrich(criteria, user_id).await?;
        let (hits, total) = self.executor.search(&enriched).await?;
        let items = self.assemble_page(hits, Some(user_id)).await;
        Ok(ResultPage::of(items, total, enriched.page))
    }

    /// Recommendations for a user, ranked by keyword-to-tag match count.
    /// An empty keyword set returns empty without a backend call.
    pub async fn matched(
        &self,
        user_id: i64,
        size: usize,
    ) -> Result<Vec<ServiceSummary>, SearchError> {
        // One profile round trip each; run them concurrently.
        let (keywords, context) = tokio::try_join!(
            self.enricher.keywords(user_id),
            self.enricher.context(user_id),
        )?;

        if keywords.is_empty() {
            tracing::debug!("User {} has no keywords; skipping recommendation", user_id);
            return Ok(Vec::new());
        }

        let fetch = size * self.matched_fetch_multiplier;
        let candidates = self.executor.recommend(&keywords, &context, fetch).await?;

        let ranked = recommend::rank(assemble::dedup_by_id(candidates), &keywords, size);
        Ok(self.assemble_page(ranked, Some(user_id)).await)
    }

    /// Cached name-prefix suggestions.
    pub async fn autocomplete(&self, prefix: &str) -> Result<Vec<String>, SearchError> {
        let prefix = prefix.trim();
        if prefix.chars().count() < 2 {
            return Ok(Vec::new());
        }

        if let Some(cached) = self.suggestions.get(prefix).await {
            tracing::trace!("Suggestion cache hit: {}", prefix);
            return Ok(cached);
        }

        let suggestions = self.executor.autocomplete(prefix, AUTOCOMPLETE_LIMIT).await?;
        if !suggestions.is_empty() {
            self.suggestions
                .insert(prefix.to_string(), suggestions.clone())
                .await;
        }

        Ok(suggestions)
    }

    /// Drop cached suggestions after a catalog reload.
    pub fn invalidate_suggestions(&self) {
        self.suggestions.invalidate_all();
    }

    pub fn filter_options(&self) -> FilterOptionsResponse {
        FilterOptionsResponse {
            categories: ServiceCategory::ALL.iter().map(|c| c.label()).collect(),
            special_groups: SpecialGroup::ALL.iter().map(|g| g.label()).collect(),
            family_types: FamilyType::ALL.iter().map(|f| f.label()).collect(),
        }
    }

    /// Strict filter-token resolution; unknown tokens are caller errors.
    pub fn resolve_category(&self, token: &str) -> Result<ServiceCategory, SearchError> {
        ServiceCategory::from_label(token)
            .ok_or_else(|| SearchError::InvalidFilter(token.to_string()))
    }

    /// Convert candidates to summaries, annotating bookmark state when a
    /// user is known. Bookmark lookup failures degrade to `false`.
    async fn assemble_page(
        &self,
        candidates: Vec<ScoredCandidate>,
        user_id: Option<i64>,
    ) -> Vec<ServiceSummary> {
        let mut items = Vec::with_capacity(candidates.len());
        for candidate in candidates {
            let bookmarked = match user_id {
                Some(user_id) => self
                    .bookmarks
                    .exists(user_id, &candidate.record.service_id)
                    .await
                    .unwrap_or_else(|e| {
                        tracing::warn!(
                            "Bookmark lookup failed for service {}: {}",
                            candidate.record.service_id,
                            e
                        );
                        false
                    }),
                None => false,
            };
            items.push(ServiceSummary::from_candidate(candidate, bookmarked));
        }
        items
    }
}
