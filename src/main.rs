mod config;
mod core;
mod models;
mod routes;
mod services;

use actix_cors::Cors;
use actix_web::{error, http::StatusCode, middleware, web, App, HttpResponse, HttpServer};
use config::Settings;
use routes::search::AppState;
use services::{
    BookmarkStore, ProfileClient, ProfileEnricher, SearchBackend, SearchEngine, SearchExecutor,
    SearchHistoryStore, SuggestionCache,
};
use std::sync::Arc;
use tracing::{error, info};

/// JSON error response for payload errors
#[derive(Debug, serde::Serialize)]
pub struct JsonError {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

impl std::fmt::Display for JsonError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error, self.message)
    }
}

impl std::error::Error for JsonError {}

impl error::ResponseError for JsonError {
    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::BAD_REQUEST))
            .content_type("application/json")
            .body(serde_json::to_string(self).unwrap())
    }
}

/// Handle JSON payload errors
pub fn handle_json_payload_error(
    err: error::JsonPayloadError,
    req: &actix_web::HttpRequest,
) -> actix_web::Error {
    tracing::info!("JSON payload error on {}: {}", req.path(), err);
    JsonError {
        error: "invalid_json".to_string(),
        message: format!("Invalid JSON: {}", err),
        status_code: 400,
    }
    .into()
}

/// Handle query payload errors
pub fn handle_query_payload_error(
    err: error::QueryPayloadError,
    _req: &actix_web::HttpRequest,
) -> actix_web::Error {
    JsonError {
        error: "invalid_query".to_string(),
        message: format!("Invalid query: {}", err),
        status_code: 400,
    }
    .into()
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    // Initialize logging
    let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "json".to_string());

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(log_level))
        .with_target(false)
        .with_level(true);

    if log_format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.init();
    }

    info!("Starting welfare service search engine...");

    // Load configuration
    let settings = Settings::load().unwrap_or_else(|e| {
        error!("Failed to load configuration: {}", e);
        panic!("Configuration error: {}", e);
    });

    info!("Configuration loaded successfully");

    // Initialize search backend client
    let backend_timeout = settings.backend.timeout_secs.unwrap_or(30);
    let backend = SearchBackend::new(
        settings.backend.endpoint,
        settings.backend.collection,
        backend_timeout,
    )
    .unwrap_or_else(|e| {
        error!("Failed to build search backend client: {}", e);
        panic!("Search backend client error: {}", e);
    });

    let executor = SearchExecutor::new(
        backend,
        settings.backend.search_index,
        settings.backend.autocomplete_index,
    );

    info!("Search backend client initialized");

    // Initialize profile client
    let profile_timeout = settings.profile.timeout_secs.unwrap_or(10);
    let profiles = Arc::new(
        ProfileClient::new(
            settings.profile.endpoint,
            settings.profile.api_key,
            profile_timeout,
        )
        .unwrap_or_else(|e| {
            error!("Failed to build profile client: {}", e);
            panic!("Profile client error: {}", e);
        }),
    );

    info!("Profile client initialized");

    // Initialize search history store (Redis)
    let history_ttl_secs = settings.search.history_ttl_days * 24 * 60 * 60;
    let history = Arc::new(
        SearchHistoryStore::new(
            &settings.cache.redis_url,
            settings.search.history_max_entries,
            history_ttl_secs,
        )
        .await
        .unwrap_or_else(|e| {
            error!("Failed to connect to Redis: {}", e);
            panic!("Redis connection error: {}", e);
        }),
    );

    info!(
        "Search history store initialized (max {} entries, TTL {} days)",
        settings.search.history_max_entries, settings.search.history_ttl_days
    );

    // Initialize bookmark store (PostgreSQL)
    let db_max_conn = settings.database.max_connections.unwrap_or(10);
    let db_min_conn = settings.database.min_connections.unwrap_or(1);

    let bookmarks = Arc::new(
        BookmarkStore::new(&settings.database.url, db_max_conn, db_min_conn)
            .await
            .unwrap_or_else(|e| {
                error!("Failed to connect to PostgreSQL: {}", e);
                panic!("PostgreSQL connection error: {}", e);
            }),
    );

    info!("Bookmark store initialized (max: {} connections)", db_max_conn);

    // Initialize suggestion cache
    let suggestion_capacity = settings.cache.suggestion_capacity.unwrap_or(10_000);
    let suggestion_ttl = settings.cache.suggestion_ttl_secs.unwrap_or(300);
    let suggestions = SuggestionCache::new(suggestion_capacity, suggestion_ttl);

    info!(
        "Suggestion cache initialized ({} entries, TTL: {}s)",
        suggestion_capacity, suggestion_ttl
    );

    // Build the engine
    let enricher = ProfileEnricher::new(profiles, Arc::clone(&history));
    let engine = Arc::new(SearchEngine::new(
        executor,
        enricher,
        Arc::clone(&history),
        Arc::clone(&bookmarks),
        suggestions,
        settings.search.matched_fetch_multiplier,
    ));

    // Build application state
    let app_state = AppState { engine, bookmarks };

    // Configure HTTP server
    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(web::JsonConfig::default().error_handler(handle_json_payload_error))
            .app_data(web::QueryConfig::default().error_handler(handle_query_payload_error))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
