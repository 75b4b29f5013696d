use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::Review;

/// Request payload for submitting a review
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateReviewRequest {
    pub developer_id: Uuid,

    #[validate(range(min = 1, max = 10, message = "Scores must be between 1 and 10"))]
    pub documentation: i16,

    #[validate(range(min = 1, max = 10, message = "Scores must be between 1 and 10"))]
    pub speed: i16,

    #[validate(range(min = 1, max = 10, message = "Scores must be between 1 and 10"))]
    pub code_quality: i16,

    #[validate(range(min = 1, max = 10, message = "Scores must be between 1 and 10"))]
    pub communication: i16,

    #[validate(range(min = 1, max = 10, message = "Scores must be between 1 and 10"))]
    pub planning: i16,

    #[validate(range(min = 1, max = 10, message = "Scores must be between 1 and 10"))]
    pub personality: i16,

    #[validate(length(min = 1, message = "Comment is required"))]
    pub comment: String,
}

/// Request payload for editing an existing review
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateReviewRequest {
    #[validate(range(min = 1, max = 10))]
    pub documentation: i16,

    #[validate(range(min = 1, max = 10))]
    pub speed: i16,

    #[validate(range(min = 1, max = 10))]
    pub code_quality: i16,

    #[validate(range(min = 1, max = 10))]
    pub communication: i16,

    #[validate(range(min = 1, max = 10))]
    pub planning: i16,

    #[validate(range(min = 1, max = 10))]
    pub personality: i16,

    #[validate(length(min = 1))]
    pub comment: String,
}

/// Response containing one review row
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ReviewResponse {
    pub id: Uuid,
    pub reviewer_id: Uuid,
    pub developer_id: Uuid,
    pub documentation: i16,
    pub speed: i16,
    pub code_quality: i16,
    pub communication: i16,
    pub planning: i16,
    pub personality: i16,
    pub comment: String,
    pub created_at: DateTime<Utc>,
}

/// Review with the reviewed developer attached, for the edit form
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ReviewDetailResponse {
    pub id: Uuid,
    pub reviewer_id: Uuid,
    pub developer_id: Uuid,
    pub documentation: i16,
    pub speed: i16,
    pub code_quality: i16,
    pub communication: i16,
    pub planning: i16,
    pub personality: i16,
    pub comment: String,
    pub created_at: DateTime<Utc>,
    pub developer: DeveloperInfo,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DeveloperInfo {
    pub id: Uuid,
    pub user: DeveloperOwner,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DeveloperOwner {
    pub name: Option<String>,
}

/// One of the caller's reviews with the reviewed developer attached
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MyReviewEntry {
    pub id: Uuid,
    pub reviewer_id: Uuid,
    pub developer_id: Uuid,
    pub documentation: i16,
    pub speed: i16,
    pub code_quality: i16,
    pub communication: i16,
    pub planning: i16,
    pub personality: i16,
    pub comment: String,
    pub created_at: DateTime<Utc>,
    pub developer: ReviewedDeveloper,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ReviewedDeveloper {
    pub id: Uuid,
    pub user: super::developer::UserInfo,
}

impl From<Review> for ReviewResponse {
    fn from(review: Review) -> Self {
        Self {
            id: review.id,
            reviewer_id: review.reviewer_id,
            developer_id: review.developer_id,
            documentation: review.documentation,
            speed: review.speed,
            code_quality: review.code_quality,
            communication: review.communication,
            planning: review.planning,
            personality: review.personality,
            comment: review.comment,
            created_at: review.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(documentation: i16, comment: &str) -> CreateReviewRequest {
        CreateReviewRequest {
            developer_id: Uuid::new_v4(),
            documentation,
            speed: 6,
            code_quality: 7,
            communication: 9,
            planning: 5,
            personality: 7,
            comment: comment.to_string(),
        }
    }

    #[test]
    fn accepts_scores_within_range() {
        assert!(request(1, "solid work").validate().is_ok());
        assert!(request(10, "solid work").validate().is_ok());
    }

    #[test]
    fn rejects_out_of_range_scores() {
        assert!(request(0, "solid work").validate().is_err());
        assert!(request(11, "solid work").validate().is_err());
    }

    #[test]
    fn rejects_empty_comment() {
        assert!(request(8, "").validate().is_err());
    }

    #[test]
    fn update_applies_the_same_score_rules() {
        let req = UpdateReviewRequest {
            documentation: 0,
            speed: 6,
            code_quality: 7,
            communication: 9,
            planning: 5,
            personality: 7,
            comment: "updated".to_string(),
        };
        assert!(req.validate().is_err());
    }
}
