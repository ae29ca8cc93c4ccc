//! Typed compound-query clause tree.
//!
//! Scoring policy is built and tested over these values; the backend wire
//! format only appears in [`SearchClause::to_json`], so the query shape
//! stays inspectable without string parsing.

use serde_json::{json, Value};

#[derive(Debug, Clone, PartialEq)]
pub enum SearchClause {
    /// Analyzed text match with an optional fuzzy edit budget.
    Text {
        path: &'static str,
        query: String,
        boost: f32,
        fuzzy_edits: u8,
    },
    /// Prefix regex over an analyzed field.
    Regex {
        path: &'static str,
        query: String,
        boost: f32,
    },
    /// Numeric range over one or more paths.
    Range {
        paths: Vec<&'static str>,
        gte: Option<i64>,
        lte: Option<i64>,
        boost: Option<f32>,
    },
    /// Exact value match.
    Equals { path: &'static str, value: String },
    /// Field presence test; meaningful inside `must_not`.
    Exists { path: &'static str },
    /// Nested boolean combination.
    Compound {
        should: Vec<SearchClause>,
        must_not: Vec<SearchClause>,
        filter: Vec<SearchClause>,
        minimum_should_match: u32,
        boost: Option<f32>,
    },
}

impl SearchClause {
    pub fn text(path: &'static str, query: impl Into<String>, boost: f32, fuzzy_edits: u8) -> Self {
        SearchClause::Text {
            path,
            query: query.into(),
            boost,
            fuzzy_edits,
        }
    }

    pub fn prefix_regex(path: &'static str, prefix: &str, boost: f32) -> Self {
        SearchClause::Regex {
            path,
            query: format!("{prefix}.*"),
            boost,
        }
    }

    /// Boosted "field absent OR condition holds" clause. This shape keeps
    /// eligibility data additive: a record missing the field still matches
    /// through the `must_not exists` arm, so absence never excludes.
    pub fn absent_or(path: &'static str, condition: SearchClause, boost: f32) -> Self {
        SearchClause::Compound {
            should: vec![
                SearchClause::Compound {
                    should: Vec::new(),
                    must_not: vec![SearchClause::Exists { path }],
                    filter: Vec::new(),
                    minimum_should_match: 0,
                    boost: None,
                },
                condition,
            ],
            must_not: Vec::new(),
            filter: Vec::new(),
            minimum_should_match: 0,
            boost: Some(boost),
        }
    }

    /// The boost this clause contributes when satisfied, if any.
    pub fn boost(&self) -> Option<f32> {
        match self {
            SearchClause::Text { boost, .. } | SearchClause::Regex { boost, .. } => Some(*boost),
            SearchClause::Range { boost, .. } | SearchClause::Compound { boost, .. } => *boost,
            SearchClause::Equals { .. } | SearchClause::Exists { .. } => None,
        }
    }

    /// Serialize to the backend's aggregation syntax.
    pub fn to_json(&self) -> Value {
        match self {
            SearchClause::Text {
                path,
                query,
                boost,
                fuzzy_edits,
            } => {
                let mut body = json!({
                    "query": query,
                    "path": path,
                    "score": {"boost": {"value": boost}},
                });
                if *fuzzy_edits > 0 {
                    body["fuzzy"] = json!({"maxEdits": fuzzy_edits});
                }
                json!({"text": body})
            }
            SearchClause::Regex { path, query, boost } => json!({
                "regex": {
                    "query": query,
                    "path": path,
                    "allowAnalyzedField": true,
                    "score": {"boost": {"value": boost}},
                }
            }),
            SearchClause::Range {
                paths,
                gte,
                lte,
                boost,
            } => {
                let path: Value = if paths.len() == 1 {
                    json!(paths[0])
                } else {
                    json!(paths)
                };
                let mut body = json!({"path": path});
                if let Some(gte) = gte {
                    body["gte"] = json!(gte);
                }
                if let Some(lte) = lte {
                    body["lte"] = json!(lte);
                }
                if let Some(boost) = boost {
                    body["score"] = json!({"boost": {"value": boost}});
                }
                json!({"range": body})
            }
            SearchClause::Equals { path, value } => json!({
                "equals": {"path": path, "value": value}
            }),
            SearchClause::Exists { path } => json!({
                "exists": {"path": path}
            }),
            SearchClause::Compound {
                should,
                must_not,
                filter,
                minimum_should_match,
                boost,
            } => {
                let mut body = json!({});
                if !should.is_empty() {
                    body["should"] = Value::Array(should.iter().map(|c| c.to_json()).collect());
                }
                if !must_not.is_empty() {
                    body["mustNot"] = Value::Array(must_not.iter().map(|c| c.to_json()).collect());
                }
                if !filter.is_empty() {
                    body["filter"] = Value::Array(filter.iter().map(|c| c.to_json()).collect());
                }
                if *minimum_should_match > 0 {
                    body["minimumShouldMatch"] = json!(minimum_should_match);
                }
                if let Some(boost) = boost {
                    body["score"] = json!({"boost": {"value": boost}});
                }
                json!({"compound": body})
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_clause_with_fuzzy() {
        let clause = SearchClause::text("serviceName", "청년", 5.0, 1);
        let json = clause.to_json();
        assert_eq!(json["text"]["query"], "청년");
        assert_eq!(json["text"]["fuzzy"]["maxEdits"], 1);
        assert_eq!(json["text"]["score"]["boost"]["value"], 5.0);
    }

    #[test]
    fn test_text_clause_without_fuzzy() {
        let clause = SearchClause::text("summary", "주거", 3.5, 0);
        let json = clause.to_json();
        assert!(json["text"].get("fuzzy").is_none());
    }

    #[test]
    fn test_prefix_regex_shape() {
        let clause = SearchClause::prefix_regex("serviceName", "청년", 4.0);
        let json = clause.to_json();
        assert_eq!(json["regex"]["query"], "청년.*");
        assert_eq!(json["regex"]["allowAnalyzedField"], true);
    }

    #[test]
    fn test_absent_or_never_excludes() {
        // The absence arm must be a should-branch, not a filter.
        let clause = SearchClause::absent_or(
            "targetGenderFemale",
            SearchClause::Equals {
                path: "targetGenderFemale",
                value: "Y".to_string(),
            },
            5.0,
        );
        let json = clause.to_json();
        let should = json["compound"]["should"].as_array().unwrap();
        assert_eq!(should.len(), 2);
        assert_eq!(
            should[0]["compound"]["mustNot"][0]["exists"]["path"],
            "targetGenderFemale"
        );
        assert!(json["compound"].get("filter").is_none());
        assert_eq!(json["compound"]["score"]["boost"]["value"], 5.0);
    }

    #[test]
    fn test_range_multi_path() {
        let clause = SearchClause::Range {
            paths: vec!["targetAgeStart", "targetAgeEnd"],
            gte: Some(0),
            lte: Some(34),
            boost: Some(4.5),
        };
        let json = clause.to_json();
        assert!(json["range"]["path"].is_array());
        assert_eq!(json["range"]["lte"], 34);
    }
}
