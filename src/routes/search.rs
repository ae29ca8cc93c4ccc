use std::sync::Arc;

use actix_web::{web, HttpResponse, Responder};
use validator::Validate;

use crate::models::{
    AutocompleteQuery, ErrorResponse, HealthResponse, MatchedServicesQuery, PageRequest,
    SearchCriteria, SearchServicesQuery,
};
use crate::services::{BookmarkStore, SearchEngine, SearchError, SearchHistoryStore};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<SearchEngine<SearchHistoryStore, BookmarkStore>>,
    pub bookmarks: Arc<BookmarkStore>,
}

/// Configure all search-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check))
        .route("/search/services", web::get().to(search_services))
        .route(
            "/search/services/autocomplete",
            web::get().to(autocomplete),
        )
        .route("/search/services/matched", web::get().to(matched_services))
        .route("/search/filters", web::get().to(filter_options))
        .route("/internal/cache/refresh", web::post().to(refresh_cache));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let db_healthy = state.bookmarks.health_check().await.unwrap_or(false);
    let status = if db_healthy { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Service search endpoint
///
/// GET /api/v1/search/services?searchTerm=청년&page=0&size=9&userId=42&category=생활안정
///
/// With `userId` present the query is personalized from the user's profile;
/// without it the search is anonymous.
async fn search_services(
    state: web::Data<AppState>,
    query: web::Query<SearchServicesQuery>,
) -> impl Responder {
    if let Err(errors) = query.validate() {
        tracing::info!("Validation failed for search request: {:?}", errors);
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let page = PageRequest::new(query.page, query.size);
    let mut criteria = SearchCriteria::new(query.search_term.clone(), page);

    if let Some(token) = query.category.as_deref() {
        match state.engine.resolve_category(token) {
            Ok(category) => criteria = criteria.with_category_filter(category),
            Err(e) => return error_response(e),
        }
    }

    tracing::info!(
        "Searching services: term={:?}, page={}, user={:?}",
        query.search_term,
        query.page,
        query.user_id
    );

    let result = match query.user_id {
        Some(user_id) => state.engine.search_personalized(criteria, user_id).await,
        None => state.engine.search(criteria).await,
    };

    match result {
        Ok(page) => HttpResponse::Ok().json(page),
        Err(e) => error_response(e),
    }
}

/// Autocomplete endpoint
///
/// GET /api/v1/search/services/autocomplete?word=청년
async fn autocomplete(
    state: web::Data<AppState>,
    query: web::Query<AutocompleteQuery>,
) -> impl Responder {
    match state.engine.autocomplete(&query.word).await {
        Ok(suggestions) => HttpResponse::Ok().json(suggestions),
        Err(e) => error_response(e),
    }
}

/// Matched-service recommendation endpoint
///
/// GET /api/v1/search/services/matched?userId=42&size=10
async fn matched_services(
    state: web::Data<AppState>,
    query: web::Query<MatchedServicesQuery>,
) -> impl Responder {
    if let Err(errors) = query.validate() {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    tracing::info!(
        "Matching services for user {}, size {}",
        query.user_id,
        query.size
    );

    match state.engine.matched(query.user_id, query.size as usize).await {
        Ok(services) => HttpResponse::Ok().json(services),
        Err(e) => error_response(e),
    }
}

/// Filter vocabulary endpoint
///
/// GET /api/v1/search/filters
async fn filter_options(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(state.engine.filter_options())
}

/// Drop cached suggestions after a catalog reload. Called by the ingest
/// pipeline, not by clients.
async fn refresh_cache(state: web::Data<AppState>) -> impl Responder {
    state.engine.invalidate_suggestions();
    HttpResponse::Ok().json(serde_json::json!({"refreshed": true}))
}

fn error_response(error: SearchError) -> HttpResponse {
    match &error {
        SearchError::InvalidFilter(token) => {
            tracing::info!("Rejected invalid filter token: {}", token);
            HttpResponse::BadRequest().json(ErrorResponse {
                error: "Invalid filter".to_string(),
                message: error.to_string(),
                status_code: 400,
            })
        }
        SearchError::Backend(e) => {
            tracing::error!("Search backend failure: {}", e);
            HttpResponse::BadGateway().json(ErrorResponse {
                error: "Search backend unavailable".to_string(),
                message: error.to_string(),
                status_code: 502,
            })
        }
        SearchError::Enrich(e) => {
            tracing::error!("Profile enrichment failure: {}", e);
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to personalize request".to_string(),
                message: error.to_string(),
                status_code: 500,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_check_response() {
        let response = HealthResponse {
            status: "healthy".to_string(),
            version: "0.1.0".to_string(),
            timestamp: chrono::Utc::now(),
        };

        assert_eq!(response.status, "healthy");
    }

    #[test]
    fn test_error_response_status_codes() {
        let bad_filter = error_response(SearchError::InvalidFilter("없는분야".to_string()));
        assert_eq!(bad_filter.status(), actix_web::http::StatusCode::BAD_REQUEST);
    }
}
