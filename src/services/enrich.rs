use std::sync::Arc;

use chrono::NaiveDate;
use thiserror::Error;

use crate::core::income;
use crate::models::domain::{SearchCriteria, UserContext};
use crate::services::history::SearchHistory;
use crate::services::profile::{ProfileClient, ProfileError};

/// Errors that can occur while personalizing a query
#[derive(Debug, Error)]
pub enum EnrichError {
    #[error(transparent)]
    Profile(#[from] ProfileError),
}

/// Turns a user id into the demographic context and keyword set that
/// personalize queries.
///
/// Profile lookups are required and their failures propagate; history reads
/// only widen the keyword set and degrade to empty on failure.
pub struct ProfileEnricher<H> {
    profiles: Arc<ProfileClient>,
    history: Arc<H>,
}

impl<H: SearchHistory> ProfileEnricher<H> {
    pub fn new(profiles: Arc<ProfileClient>, history: Arc<H>) -> Self {
        Self { profiles, history }
    }

    /// Demographic context for query boosts. The income bracket is always
    /// estimated from the job label, blank meaning "no job on file".
    pub async fn context(&self, user_id: i64) -> Result<UserContext, EnrichError> {
        let profile = self.profiles.get_profile(user_id).await?;

        let today = chrono::Utc::now().date_naive();
        let age = profile
            .birth_date
            .and_then(|birth| age_on(birth, today));
        let income_bracket = income::estimate(profile.job.as_deref().unwrap_or(""));

        Ok(UserContext {
            gender: profile.gender,
            age,
            income_bracket,
            job: profile.job,
        })
    }

    /// Personalize search criteria with the user's interests and context.
    pub async fn enrich(
        &self,
        criteria: SearchCriteria,
        user_id: i64,
    ) -> Result<SearchCriteria, EnrichError> {
        let interests = self.profiles.list_interests(user_id).await?;
        let context = self.context(user_id).await?;

        Ok(criteria.with_user_info(
            interests,
            context.gender,
            context.age,
            Some(context.income_bracket),
            context.job,
        ))
    }

    /// Keyword set for recommendations: interests first, then recent search
    /// terms, blank entries dropped, insertion-order deduplicated. History
    /// failures shrink the set instead of failing the request.
    pub async fn keywords(&self, user_id: i64) -> Result<Vec<String>, EnrichError> {
        let interests = self.profiles.list_interests(user_id).await?;

        let recent = match self.history.list_recent(user_id).await {
            Ok(terms) => terms,
            Err(e) => {
                tracing::warn!("Failed to load search history for user {}: {}", user_id, e);
                Vec::new()
            }
        };

        let mut keywords: Vec<String> = Vec::new();
        for word in interests.into_iter().chain(recent) {
            let word = word.trim().to_string();
            if !word.is_empty() && !keywords.contains(&word) {
                keywords.push(word);
            }
        }

        Ok(keywords)
    }
}

/// Completed years between `birth` and `today`. Future dates yield `None`.
fn age_on(birth: NaiveDate, today: NaiveDate) -> Option<i32> {
    today.years_since(birth).map(|years| years as i32)
}
