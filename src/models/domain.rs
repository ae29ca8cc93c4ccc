use serde::{Deserialize, Serialize};

use crate::models::tags::ServiceCategory;

/// Ordinal income bracket used for eligibility boosting.
///
/// `Any` marks services open to every income level and sits outside the
/// `Low < MiddleLow < Middle < MiddleHigh < High` order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IncomeBracket {
    Low,
    MiddleLow,
    Middle,
    MiddleHigh,
    High,
    Any,
}

impl IncomeBracket {
    /// Wire code stored on service documents.
    pub fn as_code(&self) -> &'static str {
        match self {
            IncomeBracket::Low => "LOW",
            IncomeBracket::MiddleLow => "MIDDLE_LOW",
            IncomeBracket::Middle => "MIDDLE",
            IncomeBracket::MiddleHigh => "MIDDLE_HIGH",
            IncomeBracket::High => "HIGH",
            IncomeBracket::Any => "ANY",
        }
    }

    /// Position in the ordinal scale; `None` for `Any`.
    pub fn rank(&self) -> Option<u8> {
        match self {
            IncomeBracket::Low => Some(0),
            IncomeBracket::MiddleLow => Some(1),
            IncomeBracket::Middle => Some(2),
            IncomeBracket::MiddleHigh => Some(3),
            IncomeBracket::High => Some(4),
            IncomeBracket::Any => None,
        }
    }
}

/// Welfare service document as projected out of the search index.
///
/// Eligibility fields are optional on purpose: an absent gender/age/income
/// field means the service is unrestricted on that dimension, never excluded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceRecord {
    #[serde(rename = "serviceId")]
    pub service_id: String,
    #[serde(rename = "serviceName")]
    pub service_name: String,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(rename = "serviceCategory", default)]
    pub service_category: Option<String>,
    #[serde(rename = "specialGroups", default)]
    pub special_groups: Vec<String>,
    #[serde(rename = "familyTypes", default)]
    pub family_types: Vec<String>,
    #[serde(default)]
    pub occupations: Vec<String>,
    #[serde(rename = "businessTypes", default)]
    pub business_types: Vec<String>,
    #[serde(rename = "targetGenderMale", default)]
    pub target_gender_male: Option<String>,
    #[serde(rename = "targetGenderFemale", default)]
    pub target_gender_female: Option<String>,
    #[serde(rename = "targetAgeStart", default)]
    pub target_age_start: Option<i32>,
    #[serde(rename = "targetAgeEnd", default)]
    pub target_age_end: Option<i32>,
    #[serde(rename = "incomeBracket", default)]
    pub income_bracket: Option<String>,
}

/// A raw search hit: the document plus the backend's relevance score.
/// `match_count` stays zero outside recommend mode.
#[derive(Debug, Clone, Deserialize)]
pub struct ScoredCandidate {
    #[serde(flatten)]
    pub record: ServiceRecord,
    #[serde(rename = "score", default)]
    pub relevance_score: f64,
    #[serde(rename = "matchCount", default)]
    pub match_count: usize,
}

/// Zero-based page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub size: u32,
}

impl PageRequest {
    pub fn new(page: u32, size: u32) -> Self {
        Self { page, size }
    }

    pub fn offset(&self) -> u64 {
        self.page as u64 * self.size as u64
    }
}

/// One page of results with total-count metadata.
#[derive(Debug, Clone, Serialize)]
pub struct ResultPage<T> {
    pub items: Vec<T>,
    pub total: u64,
    #[serde(rename = "pageNumber")]
    pub page_number: u32,
    #[serde(rename = "pageSize")]
    pub page_size: u32,
    #[serde(rename = "hasNext")]
    pub has_next: bool,
}

impl<T> ResultPage<T> {
    pub fn of(items: Vec<T>, total: u64, page: PageRequest) -> Self {
        let has_next = (page.page as u64 + 1) * (page.size as u64) < total;
        Self {
            items,
            total,
            page_number: page.page,
            page_size: page.size,
            has_next,
        }
    }

    pub fn empty(page: PageRequest) -> Self {
        Self::of(Vec::new(), 0, page)
    }
}

/// Search input, optionally enriched with the requesting user's profile.
#[derive(Debug, Clone)]
pub struct SearchCriteria {
    pub search_term: String,
    pub user_interests: Vec<String>,
    pub user_gender: Option<String>,
    pub user_age: Option<i32>,
    pub user_income_bracket: Option<IncomeBracket>,
    pub user_job: Option<String>,
    pub category_filter: Option<ServiceCategory>,
    pub page: PageRequest,
}

impl SearchCriteria {
    pub fn new(search_term: impl Into<String>, page: PageRequest) -> Self {
        Self {
            search_term: search_term.into(),
            user_interests: Vec::new(),
            user_gender: None,
            user_age: None,
            user_income_bracket: None,
            user_job: None,
            category_filter: None,
            page,
        }
    }

    pub fn with_category_filter(mut self, category: ServiceCategory) -> Self {
        self.category_filter = Some(category);
        self
    }

    /// Produce an enriched copy; the original criteria stays untouched.
    pub fn with_user_info(
        &self,
        user_interests: Vec<String>,
        user_gender: Option<String>,
        user_age: Option<i32>,
        user_income_bracket: Option<IncomeBracket>,
        user_job: Option<String>,
    ) -> Self {
        Self {
            search_term: self.search_term.clone(),
            user_interests,
            user_gender,
            user_age,
            user_income_bracket,
            user_job,
            category_filter: self.category_filter,
            page: self.page,
        }
    }

    pub fn has_term(&self) -> bool {
        !self.search_term.trim().is_empty()
    }
}

/// Minimal user profile fetched from the profile service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(rename = "birthDate", default)]
    pub birth_date: Option<chrono::NaiveDate>,
    #[serde(default)]
    pub job: Option<String>,
}

/// Demographic context threaded into recommend-mode queries.
#[derive(Debug, Clone)]
pub struct UserContext {
    pub gender: Option<String>,
    pub age: Option<i32>,
    pub income_bracket: IncomeBracket,
    pub job: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_income_bracket_codes_are_distinct() {
        let mut codes: Vec<&str> = [
            IncomeBracket::Low,
            IncomeBracket::MiddleLow,
            IncomeBracket::Middle,
            IncomeBracket::MiddleHigh,
            IncomeBracket::High,
            IncomeBracket::Any,
        ]
        .iter()
        .map(IncomeBracket::as_code)
        .collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), 6);
    }

    #[test]
    fn test_rank_order() {
        assert!(IncomeBracket::Low.rank() < IncomeBracket::MiddleLow.rank());
        assert!(IncomeBracket::MiddleHigh.rank() < IncomeBracket::High.rank());
        assert_eq!(IncomeBracket::Any.rank(), None);
    }

    #[test]
    fn test_page_offset() {
        assert_eq!(PageRequest::new(2, 10).offset(), 20);
        assert_eq!(PageRequest::new(0, 9).offset(), 0);
    }

    #[test]
    fn test_result_page_has_next() {
        let page: ResultPage<u32> = ResultPage::of(vec![1, 2, 3], 25, PageRequest::new(1, 10));
        assert!(page.has_next);

        // (2+1)*10 = 30 is not < 30
        let last: ResultPage<u32> = ResultPage::of(vec![1], 30, PageRequest::new(2, 10));
        assert!(!last.has_next);
    }

    #[test]
    fn test_with_user_info_does_not_mutate() {
        let base = SearchCriteria::new("청년 주거", PageRequest::new(0, 9));
        let enriched = base.with_user_info(
            vec!["1인가구".to_string()],
            Some("FEMALE".to_string()),
            Some(27),
            Some(IncomeBracket::MiddleLow),
            Some("대학생/대학원생".to_string()),
        );

        assert!(base.user_interests.is_empty());
        assert_eq!(enriched.search_term, base.search_term);
        assert_eq!(enriched.user_age, Some(27));
    }
}
