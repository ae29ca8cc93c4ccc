use serde::Deserialize;
use validator::Validate;

/// Query parameters for the service search endpoint.
///
/// `user_id` is resolved by the authentication layer in front of this
/// service; when present the search is personalized.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SearchServicesQuery {
    #[serde(default, alias = "search_term", rename = "searchTerm")]
    pub search_term: String,
    #[serde(default)]
    pub page: u32,
    #[serde(default = "default_page_size")]
    #[validate(range(min = 1, max = 50))]
    pub size: u32,
    #[serde(default, alias = "user_id", rename = "userId")]
    pub user_id: Option<i64>,
    #[serde(default)]
    pub category: Option<String>,
}

fn default_page_size() -> u32 {
    9
}

/// Query parameters for the matched-service recommendation endpoint.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct MatchedServicesQuery {
    #[serde(alias = "user_id", rename = "userId")]
    #[validate(range(min = 1))]
    pub user_id: i64,
    #[serde(default = "default_matched_size")]
    #[validate(range(min = 1, max = 20))]
    pub size: u32,
}

fn default_matched_size() -> u32 {
    10
}

/// Query parameters for autocomplete.
#[derive(Debug, Clone, Deserialize)]
pub struct AutocompleteQuery {
    pub word: String,
}
