//! Result assembly: duplicate suppression and page wrapping.
//!
//! A candidate can satisfy several should-clauses and some backend
//! configurations emit it once per match path, so the raw hit list may
//! contain the same service id more than once.

use std::collections::HashSet;

use crate::models::domain::ScoredCandidate;

/// Keep the first occurrence of each service id, preserving arrival order.
/// Idempotent: running it over already-deduplicated input is a no-op.
pub fn dedup_by_id(candidates: Vec<ScoredCandidate>) -> Vec<ScoredCandidate> {
    let mut seen: HashSet<String> = HashSet::with_capacity(candidates.len());
    let before = candidates.len();

    let deduped: Vec<ScoredCandidate> = candidates
        .into_iter()
        .filter(|candidate| seen.insert(candidate.record.service_id.clone()))
        .collect();

    let removed = before - deduped.len();
    if removed > 0 {
        tracing::warn!("removed {} duplicate hits from search results", removed);
    }

    deduped
}
