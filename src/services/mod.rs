// Service exports
pub mod backend;
pub mod bookmarks;
pub mod cache;
pub mod engine;
pub mod enrich;
pub mod history;
pub mod profile;

pub use backend::{BackendError, SearchBackend, SearchExecutor};
pub use bookmarks::{BookmarkError, BookmarkLookup, BookmarkStore};
pub use cache::SuggestionCache;
pub use engine::{SearchEngine, SearchError};
pub use enrich::{EnrichError, ProfileEnricher};
pub use history::{HistoryError, SearchHistory, SearchHistoryStore};
pub use profile::{ProfileClient, ProfileError};
