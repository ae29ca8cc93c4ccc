// Core algorithm exports
pub mod assemble;
pub mod clause;
pub mod income;
pub mod query;
pub mod recommend;

pub use assemble::dedup_by_id;
pub use clause::SearchClause;
pub use query::{income_cascade, recommend_clauses, search_clauses, QueryMode};
pub use recommend::{match_count, rank};
