use serde::{Deserialize, Serialize};

use crate::models::domain::ScoredCandidate;

/// Service list entry returned by search and recommendation endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceSummary {
    #[serde(rename = "serviceId")]
    pub service_id: String,
    #[serde(rename = "serviceName")]
    pub service_name: String,
    pub summary: Option<String>,
    #[serde(rename = "serviceCategory")]
    pub service_category: Option<String>,
    #[serde(rename = "specialGroups")]
    pub special_groups: Vec<String>,
    #[serde(rename = "familyTypes")]
    pub family_types: Vec<String>,
    pub bookmarked: bool,
}

impl ServiceSummary {
    pub fn from_candidate(candidate: ScoredCandidate, bookmarked: bool) -> Self {
        let record = candidate.record;
        Self {
            service_id: record.service_id,
            service_name: record.service_name,
            summary: record.summary,
            service_category: record.service_category,
            special_groups: record.special_groups,
            family_types: record.family_types,
            bookmarked,
        }
    }
}

/// Valid filter tokens exposed to clients.
#[derive(Debug, Clone, Serialize)]
pub struct FilterOptionsResponse {
    pub categories: Vec<&'static str>,
    #[serde(rename = "specialGroups")]
    pub special_groups: Vec<&'static str>,
    #[serde(rename = "familyTypes")]
    pub family_types: Vec<&'static str>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
