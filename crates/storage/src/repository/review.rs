use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::dto::developer::{ReviewWithReviewer, UserInfo, UserRef};
use crate::dto::review::{
    CreateReviewRequest, DeveloperInfo, DeveloperOwner, MyReviewEntry, ReviewDetailResponse,
    ReviewedDeveloper, UpdateReviewRequest,
};
use crate::error::{Result, StorageError};
use crate::models::{CategoryScores, Review};

/// One review's scores tagged with the developer it targets, from the
/// full-table scan backing the ranked listing.
#[derive(FromRow)]
pub struct DeveloperScoreRow {
    pub developer_id: Uuid,
    pub documentation: i16,
    pub speed: i16,
    pub code_quality: i16,
    pub communication: i16,
    pub planning: i16,
    pub personality: i16,
}

impl DeveloperScoreRow {
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

#[derive(FromRow)]
struct ReviewerRow {
    id: Uuid,
    documentation: i16,
    speed: i16,
    code_quality: i16,
    communication: i16,
    planning: i16,
    personality: i16,
    comment: String,
    created_at: DateTime<Utc>,
    reviewer_id: Uuid,
    reviewer_name: Option<String>,
    reviewer_image: Option<String>,
}

#[derive(FromRow)]
struct MyReviewRow {
    id: Uuid,
    reviewer_id: Uuid,
    developer_id: Uuid,
    documentation: i16,
    speed: i16,
    code_quality: i16,
    communication: i16,
    planning: i16,
    personality: i16,
    comment: String,
    created_at: DateTime<Utc>,
    owner_name: Option<String>,
    owner_image: Option<String>,
}

#[derive(FromRow)]
struct ReviewOwnerRow {
    id: Uuid,
    owner_name: Option<String>,
}

pub struct ReviewRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ReviewRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert a review. A second review by the same reviewer for the same
    /// developer trips the unique key and surfaces as a conflict; a
    /// developer row deleted between the caller's check and the insert
    /// trips the foreign key and surfaces as `NotFound`.
    pub async fn create(&self, reviewer_id: Uuid, req: &CreateReviewRequest) -> Result<Review> {
        let review = sqlx::query_as::<_, Review>(
            r#"
            INSERT INTO reviews (reviewer_id, developer_id, documentation, speed, code_quality,
                                 communication, planning, personality, comment)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING id, reviewer_id, developer_id, documentation, speed, code_quality,
                      communication, planning, personality, comment, created_at
            "#,
        )
        .bind(reviewer_id)
        .bind(req.developer_id)
        .bind(req.documentation)
        .bind(req.speed)
        .bind(req.code_quality)
        .bind(req.communication)
        .bind(req.planning)
        .bind(req.personality)
        .bind(&req.comment)
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            let e = StorageError::from(e);
            if e.is_foreign_key_violation() {
                return StorageError::NotFound;
            }
            e.map_unique_violation("You have already reviewed this developer")
        })?;

        Ok(review)
    }

    /// Find review by ID
    pub async fn find_by_id(&self, id: Uuid) -> Result<Review> {
        let review = sqlx::query_as::<_, Review>(
            r#"
            SELECT id, reviewer_id, developer_id, documentation, speed, code_quality,
                   communication, planning, personality, comment, created_at
            FROM reviews
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(review)
    }

    /// Review with the reviewed developer and its owner's name attached
    pub async fn find_detailed(&self, id: Uuid) -> Result<ReviewDetailResponse> {
        let review = self.find_by_id(id).await?;

        let developer = sqlx::query_as::<_, ReviewOwnerRow>(
            r#"
            SELECT d.id, u.name AS owner_name
            FROM developers d
            JOIN users u ON u.id = d.user_id
            WHERE d.id = $1
            "#,
        )
        .bind(review.developer_id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(ReviewDetailResponse {
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
            developer: DeveloperInfo {
                id: developer.id,
                user: DeveloperOwner {
                    name: developer.owner_name,
                },
            },
        })
    }

    /// Duplicate pre-check for review submission
    pub async fn find_by_reviewer_and_developer(
        &self,
        reviewer_id: Uuid,
        developer_id: Uuid,
    ) -> Result<Option<Review>> {
        let review = sqlx::query_as::<_, Review>(
            r#"
            SELECT id, reviewer_id, developer_id, documentation, speed, code_quality,
                   communication, planning, personality, comment, created_at
            FROM reviews
            WHERE reviewer_id = $1 AND developer_id = $2
            "#,
        )
        .bind(reviewer_id)
        .bind(developer_id)
        .fetch_optional(self.pool)
        .await?;

        Ok(review)
    }

    /// A developer's reviews with each author's public profile, newest first
    pub async fn list_for_developer(&self, developer_id: Uuid) -> Result<Vec<ReviewWithReviewer>> {
        let rows = sqlx::query_as::<_, ReviewerRow>(
            r#"
            SELECT r.id, r.documentation, r.speed, r.code_quality, r.communication,
                   r.planning, r.personality, r.comment, r.created_at,
                   u.id AS reviewer_id, u.name AS reviewer_name, u.image AS reviewer_image
            FROM reviews r
            JOIN users u ON u.id = r.reviewer_id
            WHERE r.developer_id = $1
            ORDER BY r.created_at DESC
            "#,
        )
        .bind(developer_id)
        .fetch_all(self.pool)
        .await?;

        let reviews = rows
            .into_iter()
            .map(|row| ReviewWithReviewer {
                id: row.id,
                documentation: row.documentation,
                speed: row.speed,
                code_quality: row.code_quality,
                communication: row.communication,
                planning: row.planning,
                personality: row.personality,
                comment: row.comment,
                created_at: row.created_at,
                reviewer: UserRef {
                    id: row.reviewer_id,
                    name: row.reviewer_name,
                    image: row.reviewer_image,
                },
            })
            .collect();

        Ok(reviews)
    }

    /// Lean score rows of one developer, for aggregation
    pub async fn list_scores_for_developer(
        &self,
        developer_id: Uuid,
    ) -> Result<Vec<CategoryScores>> {
        let scores = sqlx::query_as::<_, CategoryScores>(
            r#"
            SELECT documentation, speed, code_quality, communication, planning, personality
            FROM reviews
            WHERE developer_id = $1
            "#,
        )
        .bind(developer_id)
        .fetch_all(self.pool)
        .await?;

        Ok(scores)
    }

    /// Score rows of every review in the system, for the ranked listing
    pub async fn list_all_scores(&self) -> Result<Vec<DeveloperScoreRow>> {
        let scores = sqlx::query_as::<_, DeveloperScoreRow>(
            r#"
            SELECT developer_id, documentation, speed, code_quality, communication,
                   planning, personality
            FROM reviews
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        Ok(scores)
    }

    /// Reviews written by one user with each reviewed developer attached,
    /// newest first
    pub async fn list_by_reviewer(&self, reviewer_id: Uuid) -> Result<Vec<MyReviewEntry>> {
        let rows = sqlx::query_as::<_, MyReviewRow>(
            r#"
            SELECT r.id, r.reviewer_id, r.developer_id, r.documentation, r.speed,
                   r.code_quality, r.communication, r.planning, r.personality,
                   r.comment, r.created_at,
                   u.name AS owner_name, u.image AS owner_image
            FROM reviews r
            JOIN developers d ON d.id = r.developer_id
            JOIN users u ON u.id = d.user_id
            WHERE r.reviewer_id = $1
            ORDER BY r.created_at DESC
            "#,
        )
        .bind(reviewer_id)
        .fetch_all(self.pool)
        .await?;

        let reviews = rows
            .into_iter()
            .map(|row| MyReviewEntry {
                id: row.id,
                reviewer_id: row.reviewer_id,
                developer_id: row.developer_id,
                documentation: row.documentation,
                speed: row.speed,
                code_quality: row.code_quality,
                communication: row.communication,
                planning: row.planning,
                personality: row.personality,
                comment: row.comment,
                created_at: row.created_at,
                developer: ReviewedDeveloper {
                    id: row.developer_id,
                    user: UserInfo {
                        name: row.owner_name,
                        image: row.owner_image,
                    },
                },
            })
            .collect();

        Ok(reviews)
    }

    /// Update the scores and comment of an existing review
    pub async fn update(&self, id: Uuid, req: &UpdateReviewRequest) -> Result<Review> {
        let review = sqlx::query_as::<_, Review>(
            r#"
            UPDATE reviews
            SET documentation = $2, speed = $3, code_quality = $4,
                communication = $5, planning = $6, personality = $7, comment = $8
            WHERE id = $1
            RETURNING id, reviewer_id, developer_id, documentation, speed, code_quality,
                      communication, planning, personality, comment, created_at
            "#,
        )
        .bind(id)
        .bind(req.documentation)
        .bind(req.speed)
        .bind(req.code_quality)
        .bind(req.communication)
        .bind(req.planning)
        .bind(req.personality)
        .bind(&req.comment)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(review)
    }

    /// Delete a review by ID
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM reviews WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }
}
