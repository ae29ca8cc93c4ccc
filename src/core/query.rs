//! Compound-query construction.
//!
//! Everything here is pure: a [`SearchCriteria`] (search mode) or a keyword
//! list plus user context (recommend mode) goes in, an ordered clause list
//! and ready-to-send pipeline stages come out. The ranking policy lives in
//! the weight tables below and must stay stable; reordering or reweighting
//! clauses changes result order for every user.

use serde_json::{json, Value};

use crate::core::clause::SearchClause;
use crate::models::domain::{IncomeBracket, PageRequest, SearchCriteria, UserContext};

// Document field paths.
pub const FIELD_NAME: &str = "serviceName";
pub const FIELD_SUMMARY: &str = "summary";
pub const FIELD_CATEGORY: &str = "serviceCategory";
pub const FIELD_SPECIAL_GROUPS: &str = "specialGroups";
pub const FIELD_FAMILY_TYPES: &str = "familyTypes";
pub const FIELD_OCCUPATIONS: &str = "occupations";
pub const FIELD_BUSINESS_TYPES: &str = "businessTypes";
pub const FIELD_GENDER_MALE: &str = "targetGenderMale";
pub const FIELD_GENDER_FEMALE: &str = "targetGenderFemale";
pub const FIELD_AGE_START: &str = "targetAgeStart";
pub const FIELD_AGE_END: &str = "targetAgeEnd";
pub const FIELD_INCOME: &str = "incomeBracket";

// Search-mode field weights, applied per non-empty search term.
const W_NAME_PRIMARY: f32 = 5.0;
const W_NAME_SECONDARY: f32 = 4.5;
const W_CATEGORY: f32 = 4.5;
const W_SPECIAL_GROUP: f32 = 4.0;
const W_FAMILY_TYPE: f32 = 4.0;
const W_SUMMARY: f32 = 3.5;
const W_OCCUPATION: f32 = 3.0;
const W_BUSINESS_TYPE: f32 = 3.0;
const W_NAME_PREFIX: f32 = 4.0;

// Interest/history expansion weight (search mode).
const W_INTEREST: f32 = 3.5;

// Recommend-mode keyword weights: tag fields dominate text fields so that
// relevance score tracks tag hits even before match-count sorting.
const W_RECOMMEND_TEXT: f32 = 3.5;
const W_RECOMMEND_TAG: f32 = 5.0;

// Eligibility boosts.
const W_GENDER_SEARCH: f32 = 5.0;
const W_GENDER_RECOMMEND: f32 = 5.5;
const W_AGE_BOUND: f32 = 4.5;
const W_JOB: f32 = 3.0;
const W_INCOME_EXACT: f32 = 2.8;
const W_INCOME_ANY: f32 = 1.0;

/// Which of the two ranking regimes a query serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryMode {
    Search,
    Recommend,
}

/// Cascading lower-bracket boosts for a user's income bracket.
///
/// Public-assistance eligibility is typically "income at or below X", so a
/// user in a higher bracket also matches services targeting every lower
/// bracket, at decreasing weight. The exact-bracket boost (2.8) stays above
/// every cascaded entry.
pub fn income_cascade(bracket: IncomeBracket) -> &'static [(IncomeBracket, f32)] {
    match bracket {
        IncomeBracket::High => &[
            (IncomeBracket::MiddleHigh, 2.5),
            (IncomeBracket::Middle, 2.0),
            (IncomeBracket::MiddleLow, 1.5),
            (IncomeBracket::Low, 1.0),
        ],
        IncomeBracket::MiddleHigh => &[
            (IncomeBracket::Middle, 2.5),
            (IncomeBracket::MiddleLow, 2.0),
            (IncomeBracket::Low, 1.5),
        ],
        IncomeBracket::Middle => &[
            (IncomeBracket::MiddleLow, 2.0),
            (IncomeBracket::Low, 1.5),
        ],
        IncomeBracket::MiddleLow => &[(IncomeBracket::Low, 2.0)],
        IncomeBracket::Low | IncomeBracket::Any => &[],
    }
}

/// Build the ordered should-clause list for a free-text search.
pub fn search_clauses(criteria: &SearchCriteria) -> Vec<SearchClause> {
    let mut clauses = Vec::new();

    let term = criteria.search_term.trim();
    if !term.is_empty() {
        push_term_clauses(&mut clauses, term);
    }

    let mut seen_interests: Vec<&str> = Vec::new();
    for interest in &criteria.user_interests {
        let interest = interest.trim();
        if interest.is_empty() || seen_interests.contains(&interest) {
            continue;
        }
        seen_interests.push(interest);
        clauses.push(SearchClause::text(FIELD_CATEGORY, interest, W_INTEREST, 0));
        clauses.push(SearchClause::text(FIELD_SPECIAL_GROUPS, interest, W_INTEREST, 0));
        clauses.push(SearchClause::text(FIELD_FAMILY_TYPES, interest, W_INTEREST, 0));
    }

    push_user_boosts(
        &mut clauses,
        QueryMode::Search,
        criteria.user_gender.as_deref(),
        criteria.user_age,
        criteria.user_income_bracket,
        criteria.user_job.as_deref(),
    );

    clauses
}

fn push_term_clauses(clauses: &mut Vec<SearchClause>, term: &str) {
    clauses.push(SearchClause::text(FIELD_NAME, term, W_NAME_PRIMARY, 1));
    clauses.push(SearchClause::text(FIELD_NAME, term, W_NAME_SECONDARY, 2));
    clauses.push(SearchClause::text(FIELD_SUMMARY, term, W_SUMMARY, 0));
    clauses.push(SearchClause::text(FIELD_CATEGORY, term, W_CATEGORY, 1));
    clauses.push(SearchClause::text(FIELD_SPECIAL_GROUPS, term, W_SPECIAL_GROUP, 1));
    clauses.push(SearchClause::text(FIELD_FAMILY_TYPES, term, W_FAMILY_TYPE, 1));
    clauses.push(SearchClause::text(FIELD_OCCUPATIONS, term, W_OCCUPATION, 0));
    clauses.push(SearchClause::text(FIELD_BUSINESS_TYPES, term, W_BUSINESS_TYPE, 0));
    clauses.push(SearchClause::prefix_regex(FIELD_NAME, term, W_NAME_PREFIX));
}

/// Build the ordered should-clause list for recommend mode. Fuzzy and regex
/// clauses are dropped; every keyword carries the same weights.
pub fn recommend_clauses(keywords: &[String], user: &UserContext) -> Vec<SearchClause> {
    let mut clauses = Vec::new();

    for keyword in keywords {
        let keyword = keyword.trim();
        if keyword.is_empty() {
            continue;
        }
        clauses.push(SearchClause::text(FIELD_NAME, keyword, W_RECOMMEND_TEXT, 0));
        clauses.push(SearchClause::text(FIELD_SUMMARY, keyword, W_RECOMMEND_TEXT, 0));
        clauses.push(SearchClause::text(FIELD_CATEGORY, keyword, W_RECOMMEND_TAG, 0));
        clauses.push(SearchClause::text(FIELD_SPECIAL_GROUPS, keyword, W_RECOMMEND_TAG, 0));
        clauses.push(SearchClause::text(FIELD_FAMILY_TYPES, keyword, W_RECOMMEND_TAG, 0));
    }

    push_user_boosts(
        &mut clauses,
        QueryMode::Recommend,
        user.gender.as_deref(),
        user.age,
        Some(user.income_bracket),
        user.job.as_deref(),
    );

    clauses
}

/// Demographic boosts shared by both modes. Every clause lands in the
/// should-set: missing eligibility data on a record can lower its score but
/// never filters it out.
fn push_user_boosts(
    clauses: &mut Vec<SearchClause>,
    mode: QueryMode,
    gender: Option<&str>,
    age: Option<i32>,
    income: Option<IncomeBracket>,
    job: Option<&str>,
) {
    if let Some(gender) = gender.filter(|g| !g.trim().is_empty()) {
        let field = if gender.eq_ignore_ascii_case("MALE") {
            FIELD_GENDER_MALE
        } else {
            FIELD_GENDER_FEMALE
        };
        let boost = match mode {
            QueryMode::Search => W_GENDER_SEARCH,
            QueryMode::Recommend => W_GENDER_RECOMMEND,
        };
        clauses.push(SearchClause::absent_or(
            field,
            SearchClause::Equals {
                path: field,
                value: "Y".to_string(),
            },
            boost,
        ));
    }

    if let Some(age) = age {
        match mode {
            QueryMode::Search => {
                // Independent per-bound boosts: a record may carry only one
                // bound and still collect the other bound's boost.
                clauses.push(SearchClause::absent_or(
                    FIELD_AGE_START,
                    SearchClause::Range {
                        paths: vec![FIELD_AGE_START],
                        gte: None,
                        lte: Some(age as i64),
                        boost: None,
                    },
                    W_AGE_BOUND,
                ));
                clauses.push(SearchClause::absent_or(
                    FIELD_AGE_END,
                    SearchClause::Range {
                        paths: vec![FIELD_AGE_END],
                        gte: Some(age as i64),
                        lte: None,
                        boost: None,
                    },
                    W_AGE_BOUND,
                ));
            }
            QueryMode::Recommend => {
                clauses.push(SearchClause::Range {
                    paths: vec![FIELD_AGE_START, FIELD_AGE_END],
                    gte: Some(0),
                    lte: Some(age as i64),
                    boost: Some(W_AGE_BOUND),
                });
            }
        }
    }

    if let Some(job) = job.filter(|j| !j.trim().is_empty()) {
        clauses.push(SearchClause::text(FIELD_OCCUPATIONS, job, W_JOB, 0));
        clauses.push(SearchClause::text(FIELD_BUSINESS_TYPES, job, W_JOB, 0));
    }

    if let Some(bracket) = income {
        clauses.push(SearchClause::text(FIELD_INCOME, bracket.as_code(), W_INCOME_EXACT, 0));
        clauses.push(SearchClause::text(FIELD_INCOME, IncomeBracket::Any.as_code(), W_INCOME_ANY, 0));
        for (lower, weight) in income_cascade(bracket) {
            clauses.push(SearchClause::text(FIELD_INCOME, lower.as_code(), *weight, 0));
        }
    }
}

/// Wrap a clause list into the `$search` pipeline stage. The disjunction
/// requires at least one satisfied clause; ranking is the cumulative boost
/// across all satisfied clauses.
pub fn search_stage(index: &str, clauses: &[SearchClause], filter: &[SearchClause]) -> Value {
    let compound = SearchClause::Compound {
        should: clauses.to_vec(),
        must_not: Vec::new(),
        filter: filter.to_vec(),
        minimum_should_match: 1,
        boost: None,
    };
    let Value::Object(body) = compound.to_json() else {
        unreachable!("compound serializes to an object");
    };
    let mut stage = serde_json::Map::new();
    stage.insert("index".to_string(), json!(index));
    stage.extend(body);
    json!({"$search": Value::Object(stage)})
}

/// Autocomplete stage: fuzzy (1 edit) prefix lookup on the service name.
pub fn autocomplete_stage(index: &str, prefix: &str) -> Value {
    json!({
        "$search": {
            "index": index,
            "autocomplete": {
                "query": prefix,
                "path": FIELD_NAME,
                "fuzzy": {"maxEdits": 1},
            }
        }
    })
}

/// Projection keeping the public document fields plus the relevance score.
pub fn projection_stage() -> Value {
    json!({
        "$project": {
            "serviceId": 1,
            "serviceName": 1,
            "summary": 1,
            "serviceCategory": 1,
            "specialGroups": 1,
            "familyTypes": 1,
            "occupations": 1,
            "businessTypes": 1,
            "targetGenderMale": 1,
            "targetGenderFemale": 1,
            "targetAgeStart": 1,
            "targetAgeEnd": 1,
            "incomeBracket": 1,
            "score": {"$meta": "searchScore"},
        }
    })
}

pub fn paginate_stages(page: &PageRequest) -> [Value; 2] {
    [
        json!({"$skip": page.offset()}),
        json!({"$limit": page.size}),
    ]
}

pub fn limit_stage(limit: usize) -> Value {
    json!({"$limit": limit})
}

pub fn count_stage() -> Value {
    json!({"$count": "count"})
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::domain::SearchCriteria;

    fn criteria_with_term(term: &str) -> SearchCriteria {
        SearchCriteria::new(term, PageRequest::new(0, 9))
    }

    fn text_boost(clauses: &[SearchClause], path: &str, query: &str) -> Option<f32> {
        clauses
            .iter()
            .find(|c| {
                matches!(c, SearchClause::Text { path: p, query: q, .. }
                    if *p == path && q == query)
            })
            .and_then(SearchClause::boost)
    }

    #[test]
    fn test_search_term_weight_table() {
        let clauses = search_clauses(&criteria_with_term("청년"));

        assert_eq!(text_boost(&clauses, FIELD_NAME, "청년"), Some(5.0));
        assert_eq!(text_boost(&clauses, FIELD_SUMMARY, "청년"), Some(3.5));
        assert_eq!(text_boost(&clauses, FIELD_CATEGORY, "청년"), Some(4.5));
        assert_eq!(text_boost(&clauses, FIELD_SPECIAL_GROUPS, "청년"), Some(4.0));
        assert_eq!(text_boost(&clauses, FIELD_OCCUPATIONS, "청년"), Some(3.0));

        // Secondary name pass with a wider edit budget.
        let secondary = clauses.iter().any(|c| {
            matches!(c, SearchClause::Text { path, boost, fuzzy_edits, .. }
                if *path == FIELD_NAME && *boost == 4.5 && *fuzzy_edits == 2)
        });
        assert!(secondary);

        // Prefix regex on the name field.
        let regex = clauses.iter().any(|c| {
            matches!(c, SearchClause::Regex { path, boost, .. }
                if *path == FIELD_NAME && *boost == 4.0)
        });
        assert!(regex);
    }

    #[test]
    fn test_blank_term_produces_no_term_clauses() {
        let clauses = search_clauses(&criteria_with_term("   "));
        assert!(clauses.is_empty());
    }

    #[test]
    fn test_interest_expansion_preserves_order() {
        let criteria = criteria_with_term("주거").with_user_info(
            vec![
                "1인가구".to_string(),
                "다문화가족".to_string(),
                "1인가구".to_string(),
            ],
            None,
            None,
            None,
            None,
        );
        let clauses = search_clauses(&criteria);

        let interest_queries: Vec<&str> = clauses
            .iter()
            .filter_map(|c| match c {
                SearchClause::Text { path, query, boost, .. }
                    if *path == FIELD_CATEGORY && *boost == 3.5 =>
                {
                    Some(query.as_str())
                }
                _ => None,
            })
            .collect();
        assert_eq!(interest_queries, vec!["1인가구", "다문화가족"]);
    }

    #[test]
    fn test_income_cascade_monotonic() {
        for bracket in [
            IncomeBracket::Low,
            IncomeBracket::MiddleLow,
            IncomeBracket::Middle,
            IncomeBracket::MiddleHigh,
            IncomeBracket::High,
        ] {
            for (lower, weight) in income_cascade(bracket) {
                assert!(
                    *weight < W_INCOME_EXACT,
                    "cascade boost {weight} for {lower:?} must stay below the exact boost"
                );
                assert!(lower.rank() < bracket.rank());
            }
        }
    }

    #[test]
    fn test_income_cascade_rows() {
        assert_eq!(income_cascade(IncomeBracket::High).len(), 4);
        assert_eq!(income_cascade(IncomeBracket::MiddleLow), &[(IncomeBracket::Low, 2.0)]);
        assert!(income_cascade(IncomeBracket::Low).is_empty());
    }

    #[test]
    fn test_gender_weight_differs_by_mode() {
        let criteria = criteria_with_term("주거").with_user_info(
            Vec::new(),
            Some("FEMALE".to_string()),
            None,
            None,
            None,
        );
        let search = search_clauses(&criteria);
        let search_boost = search
            .iter()
            .find(|c| matches!(c, SearchClause::Compound { .. }))
            .and_then(SearchClause::boost)
            .unwrap();
        assert_eq!(search_boost, 5.0);

        let user = UserContext {
            gender: Some("FEMALE".to_string()),
            age: None,
            income_bracket: IncomeBracket::Any,
            job: None,
        };
        let recommend = recommend_clauses(&["청년".to_string()], &user);
        let recommend_boost = recommend
            .iter()
            .find(|c| matches!(c, SearchClause::Compound { .. }))
            .and_then(SearchClause::boost)
            .unwrap();
        assert_eq!(recommend_boost, 5.5);
    }

    #[test]
    fn test_recommend_mode_has_no_fuzzy_or_regex() {
        let user = UserContext {
            gender: None,
            age: None,
            income_bracket: IncomeBracket::Middle,
            job: None,
        };
        let clauses = recommend_clauses(&["청년".to_string(), "1인가구".to_string()], &user);

        for clause in &clauses {
            match clause {
                SearchClause::Regex { .. } => panic!("recommend mode must not emit regex clauses"),
                SearchClause::Text { fuzzy_edits, .. } => assert_eq!(*fuzzy_edits, 0),
                _ => {}
            }
        }
        assert_eq!(text_boost(&clauses, FIELD_NAME, "청년"), Some(3.5));
        assert_eq!(text_boost(&clauses, FIELD_SPECIAL_GROUPS, "청년"), Some(5.0));
    }

    #[test]
    fn test_age_boosts_are_should_clauses() {
        let criteria = criteria_with_term("주거").with_user_info(
            Vec::new(),
            None,
            Some(27),
            None,
            None,
        );
        let clauses = search_clauses(&criteria);
        let stage = search_stage("searchIndex", &clauses, &[]);

        // Both age-bound compounds live in the should set; nothing about
        // age appears as a hard filter.
        assert!(stage["$search"]["compound"].get("filter").is_none());
        assert_eq!(stage["$search"]["compound"]["minimumShouldMatch"], 1);
    }

    #[test]
    fn test_category_filter_is_non_scoring() {
        let filter = [SearchClause::Equals {
            path: FIELD_CATEGORY,
            value: "생활안정".to_string(),
        }];
        let stage = search_stage("searchIndex", &[SearchClause::text(FIELD_NAME, "x", 5.0, 1)], &filter);
        assert_eq!(
            stage["$search"]["compound"]["filter"][0]["equals"]["value"],
            "생활안정"
        );
    }

    #[test]
    fn test_paginate_stages_offset() {
        let [skip, limit] = paginate_stages(&PageRequest::new(2, 10));
        assert_eq!(skip["$skip"], 20);
        assert_eq!(limit["$limit"], 10);
    }
}
