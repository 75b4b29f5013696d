use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::models::Tier;
use crate::services::scoring::CategoryAverages;

/// Response containing basic developer information
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DeveloperResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub bio: Option<String>,
    pub github_url: String,
    pub created_at: DateTime<Utc>,
}

/// One entry of the ranked developer listing
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DeveloperSummary {
    pub id: Uuid,
    pub bio: Option<String>,
    pub github_url: String,
    pub user: UserInfo,
    pub average_score: f64,
    pub review_count: i64,
    pub tier: Tier,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserInfo {
    pub name: Option<String>,
    pub image: Option<String>,
}

/// Detailed developer response with reviews and score aggregates
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DeveloperDetailResponse {
    pub id: Uuid,
    pub bio: Option<String>,
    pub github_url: String,
    pub created_at: DateTime<Utc>,
    pub user: UserRef,
    pub reviews: Vec<ReviewWithReviewer>,
    pub review_count: i64,
    pub category_averages: CategoryAverages,
    pub average_score: f64,
    pub tier: Tier,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserRef {
    pub id: Uuid,
    pub name: Option<String>,
    pub image: Option<String>,
}

/// One review in the developer detail, with its author's public profile
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ReviewWithReviewer {
    pub id: Uuid,
    pub documentation: i16,
    pub speed: i16,
    pub code_quality: i16,
    pub communication: i16,
    pub planning: i16,
    pub personality: i16,
    pub comment: String,
    pub created_at: DateTime<Utc>,
    pub reviewer: UserRef,
}

impl ReviewWithReviewer {
    pub fn scores(&self) -> crate::models::CategoryScores {
        crate::models::CategoryScores {
            documentation: self.documentation,
            speed: self.speed,
            code_quality: self.code_quality,
            communication: self.communication,
            planning: self.planning,
            personality: self.personality,
        }
    }
}

/// The caller's own developer profile with its aggregate
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MyDeveloperResponse {
    pub id: Uuid,
    pub bio: Option<String>,
    pub average_score: f64,
    pub review_count: i64,
    pub tier: Tier,
}

/// Request payload for registering the caller as a developer
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateDeveloperRequest {
    #[validate(length(max = 500, message = "Bio must be at most 500 characters"))]
    pub bio: Option<String>,

    #[validate(length(min = 1, max = 255, message = "GitHub URL is required"))]
    #[validate(custom(function = "validate_github_url"))]
    pub github_url: String,
}

// Validation helper
fn validate_github_url(url: &str) -> Result<(), validator::ValidationError> {
    let path = url
        .strip_prefix("https://github.com/")
        .or_else(|| url.strip_prefix("http://github.com/"));

    match path {
        Some(rest) if !rest.is_empty() => Ok(()),
        _ => Err(validator::ValidationError::new("invalid_github_url")),
    }
}

/// Tier filter for the developer listing. `all` disables tier filtering.
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, ToSchema)]
pub enum TierFilter {
    #[default]
    #[serde(rename = "all")]
    All,
    SSS,
    S,
    A,
    B,
    C,
    D,
}

impl TierFilter {
    pub fn as_tier(&self) -> Option<Tier> {
        match self {
            Self::All => None,
            Self::SSS => Some(Tier::SSS),
            Self::S => Some(Tier::S),
            Self::A => Some(Tier::A),
            Self::B => Some(Tier::B),
            Self::C => Some(Tier::C),
            Self::D => Some(Tier::D),
        }
    }

    pub fn matches(&self, tier: Tier) -> bool {
        match self.as_tier() {
            None => true,
            Some(wanted) => wanted == tier,
        }
    }
}

#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct DeveloperListQuery {
    /// Case-insensitive substring match on the developer's display name
    pub search: Option<String>,
    #[serde(default)]
    pub tier: TierFilter,
}

impl DeveloperListQuery {
    /// Whether a developer with the given display name and tier passes both
    /// filters. A developer without a display name never matches a non-empty
    /// search term.
    pub fn matches(&self, name: Option<&str>, tier: Tier) -> bool {
        if !self.tier.matches(tier) {
            return false;
        }

        match self.search.as_deref() {
            None => true,
            Some(term) if term.is_empty() => true,
            Some(term) => match name {
                Some(name) => name.to_lowercase().contains(&term.to_lowercase()),
                None => false,
            },
        }
    }
}

impl From<crate::models::Developer> for DeveloperResponse {
    fn from(developer: crate::models::Developer) -> Self {
        Self {
            id: developer.id,
            user_id: developer.user_id,
            bio: developer.bio,
            github_url: developer.github_url,
            created_at: developer.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(github_url: &str) -> CreateDeveloperRequest {
        CreateDeveloperRequest {
            bio: None,
            github_url: github_url.to_string(),
        }
    }

    #[test]
    fn accepts_github_profile_urls() {
        assert!(request("https://github.com/octocat").validate().is_ok());
        assert!(request("http://github.com/octocat").validate().is_ok());
    }

    #[test]
    fn rejects_non_github_urls() {
        assert!(request("https://gitlab.com/octocat").validate().is_err());
        assert!(request("https://github.com/").validate().is_err());
        assert!(request("octocat").validate().is_err());
        assert!(request("").validate().is_err());
    }

    fn query(search: Option<&str>, tier: TierFilter) -> DeveloperListQuery {
        DeveloperListQuery {
            search: search.map(String::from),
            tier,
        }
    }

    #[test]
    fn search_is_case_insensitive_substring() {
        let q = query(Some("aLi"), TierFilter::All);
        assert!(q.matches(Some("Alice"), Tier::B));
        assert!(!q.matches(Some("Bob"), Tier::B));
    }

    #[test]
    fn nameless_developer_never_matches_a_term() {
        let q = query(Some("a"), TierFilter::All);
        assert!(!q.matches(None, Tier::A));
    }

    #[test]
    fn empty_term_matches_everyone() {
        let q = query(Some(""), TierFilter::All);
        assert!(q.matches(None, Tier::D));
        assert!(q.matches(Some("Alice"), Tier::D));
    }

    #[test]
    fn filters_compose_with_and() {
        let q = query(Some("ali"), TierFilter::S);
        assert!(q.matches(Some("Alice"), Tier::S));
        assert!(!q.matches(Some("Alice"), Tier::A));
        assert!(!q.matches(Some("Bob"), Tier::S));
    }

    #[test]
    fn all_tier_filter_passes_every_tier() {
        let q = query(None, TierFilter::All);
        for tier in [Tier::SSS, Tier::S, Tier::A, Tier::B, Tier::C, Tier::D] {
            assert!(q.matches(Some("Alice"), tier));
        }
    }

    #[test]
    fn tier_filter_deserializes_from_query_values() {
        let filter: TierFilter = serde_json::from_str("\"all\"").unwrap();
        assert!(filter.as_tier().is_none());
        let filter: TierFilter = serde_json::from_str("\"SSS\"").unwrap();
        assert_eq!(filter.as_tier(), Some(Tier::SSS));
    }
}
