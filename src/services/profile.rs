use std::time::Duration;

use serde_json::Value;
use thiserror::Error;

use crate::models::domain::UserProfile;

/// Errors that can occur when talking to the user profile service
#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("profile service returned error: {0}")]
    Api(String),

    #[error("profile not found for user {0}")]
    NotFound(i64),

    #[error("invalid response format: {0}")]
    InvalidResponse(String),
}

/// Client for the user profile service.
///
/// Supplies the demographic fields (gender, birth date, job) and the
/// interest list that personalize queries. Callers decide how to degrade
/// when a lookup fails; this client only reports.
pub struct ProfileClient {
    base_url: String,
    api_key: String,
    client: reqwest::Client,
}

impl ProfileClient {
    pub fn new(base_url: String, api_key: String, timeout_secs: u64) -> Result<Self, ProfileError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;

        Ok(Self {
            base_url,
            api_key,
            client,
        })
    }

    pub async fn get_profile(&self, user_id: i64) -> Result<UserProfile, ProfileError> {
        let url = format!(
            "{}/users/{}/profile",
            self.base_url.trim_end_matches('/'),
            user_id
        );

        tracing::debug!("Fetching profile for user {}", user_id);

        let response = self
            .client
            .get(&url)
            .header("X-Api-Key", &self.api_key)
            .send()
            .await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(ProfileError::NotFound(user_id));
        }
        if !response.status().is_success() {
            return Err(ProfileError::Api(format!(
                "failed to fetch profile: {}",
                response.status()
            )));
        }

        let json: Value = response.json().await?;
        serde_json::from_value(json)
            .map_err(|e| ProfileError::InvalidResponse(format!("failed to parse profile: {e}")))
    }

    pub async fn list_interests(&self, user_id: i64) -> Result<Vec<String>, ProfileError> {
        let url = format!(
            "{}/users/{}/interests",
            self.base_url.trim_end_matches('/'),
            user_id
        );

        let response = self
            .client
            .get(&url)
            .header("X-Api-Key", &self.api_key)
            .send()
            .await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(ProfileError::NotFound(user_id));
        }
        if !response.status().is_success() {
            return Err(ProfileError::Api(format!(
                "failed to fetch interests: {}",
                response.status()
            )));
        }

        let json: Value = response.json().await?;

        let interests = json
            .get("interests")
            .and_then(|i| i.as_array())
            .ok_or_else(|| ProfileError::InvalidResponse("missing interests array".into()))?;

        Ok(interests
            .iter()
            .filter_map(|i| i.as_str())
            .map(|i| i.to_string())
            .collect())
    }
}
