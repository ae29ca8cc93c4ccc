// Integration tests over the ranking and assembly pipeline

use welfare_search::core::{assemble, income, recommend};
use welfare_search::models::{
    IncomeBracket, PageRequest, ResultPage, ScoredCandidate, ServiceRecord, ServiceSummary,
};

fn record(id: &str, category: &str, special_groups: &[&str], family_types: &[&str]) -> ServiceRecord {
    ServiceRecord {
        service_id: id.to_string(),
        service_name: format!("서비스 {id}"),
        summary: Some("요약".to_string()),
        service_category: Some(category.to_string()),
        special_groups: special_groups.iter().map(|s| s.to_string()).collect(),
        family_types: family_types.iter().map(|s| s.to_string()).collect(),
        occupations: Vec::new(),
        business_types: Vec::new(),
        target_gender_male: None,
        target_gender_female: None,
        target_age_start: None,
        target_age_end: None,
        income_bracket: None,
    }
}

fn candidate(
    id: &str,
    category: &str,
    special_groups: &[&str],
    family_types: &[&str],
    score: f64,
) -> ScoredCandidate {
    ScoredCandidate {
        record: record(id, category, special_groups, family_types),
        relevance_score: score,
        match_count: 0,
    }
}

#[test]
fn test_recommendation_pipeline_end_to_end() {
    // Over-fetched raw hits, duplicates included, as a backend would return.
    let hits = vec![
        candidate("housing", "주거·자립", &["1인가구"], &["무주택세대"], 6.0),
        candidate("life", "생활안정", &["1인가구"], &[], 7.5),
        candidate("housing", "주거·자립", &["1인가구"], &["무주택세대"], 2.0),
        candidate("farming", "농림축산어업", &[], &[], 9.0),
        candidate("multi", "생활안정", &["1인가구", "장애인"], &["다자녀가구"], 1.0),
    ];
    let keywords = vec![
        "생활안정".to_string(),
        "1인가구".to_string(),
        "무주택세대".to_string(),
        "다자녀가구".to_string(),
    ];

    let ranked = recommend::rank(assemble::dedup_by_id(hits), &keywords, 10);

    // "farming" has zero keyword hits and is dropped. "multi" leads with
    // three tag hits despite the lowest relevance; "life" and "housing" tie
    // at two hits and fall back to relevance order.
    let ids: Vec<&str> = ranked.iter().map(|c| c.record.service_id.as_str()).collect();
    assert_eq!(ids, vec!["multi", "life", "housing"]);

    assert_eq!(ranked[0].match_count, 3);
    assert_eq!(ranked[1].match_count, 2);
    for window in ranked.windows(2) {
        let (a, b) = (&window[0], &window[1]);
        assert!(
            a.match_count > b.match_count
                || (a.match_count == b.match_count && a.relevance_score >= b.relevance_score)
        );
    }
}

#[test]
fn test_dedup_then_rank_keeps_first_scores() {
    let hits = vec![
        candidate("a", "생활안정", &["1인가구"], &[], 9.0),
        candidate("a", "생활안정", &["1인가구"], &[], 1.0),
    ];
    let ranked = recommend::rank(
        assemble::dedup_by_id(hits),
        &["1인가구".to_string()],
        10,
    );
    assert_eq!(ranked.len(), 1);
    assert_eq!(ranked[0].relevance_score, 9.0);
}

#[test]
fn test_summary_assembly_preserves_tag_fields() {
    let c = candidate("x", "생활안정", &["1인가구"], &["다자녀가구"], 5.0);
    let summary = ServiceSummary::from_candidate(c, true);

    assert_eq!(summary.service_id, "x");
    assert_eq!(summary.special_groups, vec!["1인가구"]);
    assert_eq!(summary.family_types, vec!["다자녀가구"]);
    assert!(summary.bookmarked);
}

#[test]
fn test_result_page_boundaries() {
    // 25 results, size 9: pages 0 and 1 have next, page 2 is last.
    for (page, expect_next) in [(0u32, true), (1, true), (2, false)] {
        let result: ResultPage<u32> = ResultPage::of(Vec::new(), 25, PageRequest::new(page, 9));
        assert_eq!(result.has_next, expect_next, "page {page}");
    }

    let empty: ResultPage<u32> = ResultPage::empty(PageRequest::new(0, 9));
    assert_eq!(empty.total, 0);
    assert!(!empty.has_next);
    assert!(empty.items.is_empty());
}

#[test]
fn test_income_estimation_feeds_cascade() {
    // A university student lands in MiddleLow, whose cascade only boosts Low.
    let bracket = income::estimate("대학생/대학원생");
    assert_eq!(bracket, IncomeBracket::MiddleLow);

    let cascade = welfare_search::core::income_cascade(bracket);
    assert_eq!(cascade.len(), 1);
    assert_eq!(cascade[0].0, IncomeBracket::Low);
}
