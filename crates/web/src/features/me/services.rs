use sqlx::PgPool;
use storage::{
    dto::developer::MyDeveloperResponse,
    dto::review::MyReviewEntry,
    error::Result,
    models::Tier,
    repository::{developer::DeveloperRepository, review::ReviewRepository},
    services::scoring::compute_aggregate,
};
use uuid::Uuid;

/// The caller's developer profile with its aggregate, if registered
pub async fn get_my_developer(pool: &PgPool, user_id: Uuid) -> Result<Option<MyDeveloperResponse>> {
    let repo = DeveloperRepository::new(pool);
    let Some(developer) = repo.find_by_user_id(user_id).await? else {
        return Ok(None);
    };

    let scores = ReviewRepository::new(pool)
        .list_scores_for_developer(developer.id)
        .await?;
    let aggregate = compute_aggregate(scores);

    Ok(Some(MyDeveloperResponse {
        id: developer.id,
        bio: developer.bio,
        average_score: aggregate.average_score,
        review_count: aggregate.review_count,
        tier: Tier::from_score(aggregate.average_score),
    }))
}

/// Reviews the caller has written, newest first
pub async fn list_my_reviews(pool: &PgPool, user_id: Uuid) -> Result<Vec<MyReviewEntry>> {
    let repo = ReviewRepository::new(pool);
    repo.list_by_reviewer(user_id).await
}
