use sqlx::PgPool;
use storage::{
    dto::developer::{
        CreateDeveloperRequest, DeveloperDetailResponse, DeveloperListQuery, DeveloperSummary,
    },
    error::Result,
    models::Developer,
    repository::developer::DeveloperRepository,
};
use uuid::Uuid;

/// Ranked developers, narrowed by the search term and tier filter
pub async fn list_developers(
    pool: &PgPool,
    query: &DeveloperListQuery,
) -> Result<Vec<DeveloperSummary>> {
    let repo = DeveloperRepository::new(pool);
    let developers = repo.list_ranked().await?;

    Ok(developers
        .into_iter()
        .filter(|developer| query.matches(developer.user.name.as_deref(), developer.tier))
        .collect())
}

/// Register the user as a developer
pub async fn register_developer(
    pool: &PgPool,
    user_id: Uuid,
    request: &CreateDeveloperRequest,
) -> Result<Developer> {
    let repo = DeveloperRepository::new(pool);
    repo.create(user_id, request).await
}

/// Developer detail with reviews and score aggregates
pub async fn get_developer_detailed(pool: &PgPool, id: Uuid) -> Result<DeveloperDetailResponse> {
    let repo = DeveloperRepository::new(pool);
    repo.find_detailed(id).await
}
