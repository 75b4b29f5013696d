use std::cmp::Ordering;
use std::collections::HashMap;

use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::dto::developer::{
    CreateDeveloperRequest, DeveloperDetailResponse, DeveloperSummary, UserInfo, UserRef,
};
use crate::error::{Result, StorageError};
use crate::models::{CategoryScores, Developer, Tier};
use crate::repository::review::ReviewRepository;
use crate::services::scoring::compute_aggregate;

#[derive(FromRow)]
struct DeveloperUserRow {
    id: Uuid,
    bio: Option<String>,
    github_url: String,
    user_name: Option<String>,
    user_image: Option<String>,
}

#[derive(FromRow)]
struct OwnerRow {
    id: Uuid,
    name: Option<String>,
    image: Option<String>,
}

pub struct DeveloperRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> DeveloperRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Register a user as a developer. The unique key on `user_id` caps
    /// registrations at one per user.
    pub async fn create(&self, user_id: Uuid, req: &CreateDeveloperRequest) -> Result<Developer> {
        let developer = sqlx::query_as::<_, Developer>(
            r#"
            INSERT INTO developers (user_id, bio, github_url)
            VALUES ($1, $2, $3)
            RETURNING id, user_id, bio, github_url, created_at
            "#,
        )
        .bind(user_id)
        .bind(&req.bio)
        .bind(&req.github_url)
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            StorageError::from(e).map_unique_violation("You are already registered as a developer")
        })?;

        Ok(developer)
    }

    /// Find developer by ID
    pub async fn find_by_id(&self, id: Uuid) -> Result<Developer> {
        let developer = sqlx::query_as::<_, Developer>(
            "SELECT id, user_id, bio, github_url, created_at FROM developers WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(developer)
    }

    /// The developer registration of a user, if any
    pub async fn find_by_user_id(&self, user_id: Uuid) -> Result<Option<Developer>> {
        let developer = sqlx::query_as::<_, Developer>(
            "SELECT id, user_id, bio, github_url, created_at FROM developers WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_optional(self.pool)
        .await?;

        Ok(developer)
    }

    /// Developer detail with owner, reviews and score aggregates
    pub async fn find_detailed(&self, id: Uuid) -> Result<DeveloperDetailResponse> {
        let developer = self.find_by_id(id).await?;

        let owner =
            sqlx::query_as::<_, OwnerRow>("SELECT id, name, image FROM users WHERE id = $1")
                .bind(developer.user_id)
                .fetch_optional(self.pool)
                .await?
                .ok_or(StorageError::NotFound)?;

        let reviews = ReviewRepository::new(self.pool)
            .list_for_developer(developer.id)
            .await?;

        let aggregate = compute_aggregate(reviews.iter().map(|r| r.scores()));
        let tier = Tier::from_score(aggregate.average_score);

        Ok(DeveloperDetailResponse {
            id: developer.id,
            bio: developer.bio,
            github_url: developer.github_url,
            created_at: developer.created_at,
            user: UserRef {
                id: owner.id,
                name: owner.name,
                image: owner.image,
            },
            reviews,
            review_count: aggregate.review_count,
            category_averages: aggregate.category_averages,
            average_score: aggregate.average_score,
            tier,
        })
    }

    /// Every developer with their aggregate, best average first. Ties keep
    /// registration order: the fetch is registration-ordered and the sort
    /// is stable.
    pub async fn list_ranked(&self) -> Result<Vec<DeveloperSummary>> {
        let developers = self.list_with_users().await?;
        let score_rows = ReviewRepository::new(self.pool).list_all_scores().await?;

        let mut scores_by_developer: HashMap<Uuid, Vec<CategoryScores>> = HashMap::new();
        for row in &score_rows {
            scores_by_developer
                .entry(row.developer_id)
                .or_default()
                .push(row.scores());
        }

        let mut entries: Vec<DeveloperSummary> = developers
            .into_iter()
            .map(|dev| {
                let scores = scores_by_developer.remove(&dev.id).unwrap_or_default();
                let aggregate = compute_aggregate(scores);
                DeveloperSummary {
                    id: dev.id,
                    bio: dev.bio,
                    github_url: dev.github_url,
                    user: UserInfo {
                        name: dev.user_name,
                        image: dev.user_image,
                    },
                    average_score: aggregate.average_score,
                    review_count: aggregate.review_count,
                    tier: Tier::from_score(aggregate.average_score),
                }
            })
            .collect();

        entries.sort_by(|a, b| {
            b.average_score
                .partial_cmp(&a.average_score)
                .unwrap_or(Ordering::Equal)
        });

        Ok(entries)
    }

    /// Registration-ordered fetch joining each developer's owner
    async fn list_with_users(&self) -> Result<Vec<DeveloperUserRow>> {
        let rows = sqlx::query_as::<_, DeveloperUserRow>(
            r#"
            SELECT d.id, d.bio, d.github_url,
                   u.name AS user_name, u.image AS user_image
            FROM developers d
            JOIN users u ON u.id = d.user_id
            ORDER BY d.created_at ASC
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }
}
