//! Match-count ranking for recommend mode.
//!
//! Relevance score breaks ties only; the number of keyword-to-tag
//! intersections is the primary sort key.

use crate::models::domain::{ScoredCandidate, ServiceRecord};

/// Keyword intersections with the record's tag fields:
/// special groups + family types, plus one if the category is a keyword.
pub fn match_count(record: &ServiceRecord, keywords: &[String]) -> usize {
    let tag_hits = |tags: &[String]| {
        tags.iter()
            .filter(|tag| keywords.iter().any(|k| k == *tag))
            .count()
    };

    let mut count = tag_hits(&record.special_groups) + tag_hits(&record.family_types);
    if let Some(category) = &record.service_category {
        if keywords.iter().any(|k| k == category) {
            count += 1;
        }
    }
    count
}

/// Compute match counts, drop zero-match candidates, sort by
/// (match_count desc, relevance_score desc), truncate to `size`.
pub fn rank(
    candidates: Vec<ScoredCandidate>,
    keywords: &[String],
    size: usize,
) -> Vec<ScoredCandidate> {
    let mut ranked: Vec<ScoredCandidate> = candidates
        .into_iter()
        .map(|mut candidate| {
            candidate.match_count = match_count(&candidate.record, keywords);
            candidate
        })
        .filter(|candidate| candidate.match_count > 0)
        .collect();

    ranked.sort_by(|a, b| {
        b.match_count.cmp(&a.match_count).then_with(|| {
            b.relevance_score
                .partial_cmp(&a.relevance_score)
                .unwrap_or(std::cmp::Ordering::Equal)
        })
    });

    ranked.truncate(size);
    ranked
}
