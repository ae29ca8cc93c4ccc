//! Welfare Search - personalized search engine for public welfare services
//!
//! This library builds weighted compound queries over a document search
//! backend, personalizes them from user profiles, and ranks recommendations
//! by keyword-to-tag match count.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{
    dedup_by_id, income_cascade, match_count, rank, recommend_clauses, search_clauses,
};
pub use models::{
    IncomeBracket, PageRequest, ResultPage, ScoredCandidate, SearchCriteria, ServiceCategory,
    ServiceRecord, ServiceSummary, UserContext,
};
pub use services::{SearchEngine, SearchError};
