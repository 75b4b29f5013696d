use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Review {
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

impl Review {
    pub fn scores(&self) -> CategoryScores {
        CategoryScores {
            documentation: self.documentation,
            speed: self.speed,
            code_quality: self.code_quality,
            communication: self.communication,
            planning: self.planning,
            personality: self.personality,
        }
    }
}

/// The six category scores of one review, detached from its metadata.
///
/// Everything that feeds the aggregation engine converts into this type, so
/// full `Review` rows and the lean score projections share one code path.
/// Values are assumed already validated to [1,10] at the request boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct CategoryScores {
    pub documentation: i16,
    pub speed: i16,
    pub code_quality: i16,
    pub communication: i16,
    pub planning: i16,
    pub personality: i16,
}

impl CategoryScores {
    pub fn as_array(&self) -> [i16; 6] {
        [
            self.documentation,
            self.speed,
            self.code_quality,
            self.communication,
            self.planning,
            self.personality,
        ]
    }

    /// Mean of this review's own six scores.
    pub fn mean(&self) -> f64 {
        let total: i32 = self.as_array().iter().map(|&s| i32::from(s)).sum();
        f64::from(total) / 6.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn review_detaches_its_scores_in_category_order() {
        let review = Review {
            id: Uuid::new_v4(),
            reviewer_id: Uuid::new_v4(),
            developer_id: Uuid::new_v4(),
            documentation: 8,
            speed: 6,
            code_quality: 7,
            communication: 9,
            planning: 5,
            personality: 7,
            comment: "solid work".to_string(),
            created_at: Utc::now(),
        };

        assert_eq!(review.scores().as_array(), [8, 6, 7, 9, 5, 7]);
    }

    #[test]
    fn mean_averages_all_six_categories() {
        let scores = CategoryScores {
            documentation: 8,
            speed: 6,
            code_quality: 7,
            communication: 9,
            planning: 5,
            personality: 7,
        };

        assert_eq!(scores.mean(), 7.0);
    }
}
