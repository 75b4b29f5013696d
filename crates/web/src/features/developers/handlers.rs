use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::developer::{
        CreateDeveloperRequest, DeveloperDetailResponse, DeveloperListQuery, DeveloperResponse,
        DeveloperSummary,
    },
};
use uuid::Uuid;
use validator::Validate;

use crate::error::WebError;
use crate::middleware::auth::CurrentUser;

use super::services;

#[utoipa::path(
    get,
    path = "/api/developers",
    params(DeveloperListQuery),
    responses(
        (status = 200, description = "Ranked developers matching the filters", body = Vec<DeveloperSummary>)
    ),
    tag = "developers"
)]
pub async fn list_developers(
    State(db): State<Database>,
    Query(query): Query<DeveloperListQuery>,
) -> Result<Response, WebError> {
    let developers = services::list_developers(db.pool(), &query).await?;

    Ok(Json(developers).into_response())
}

#[utoipa::path(
    post,
    path = "/api/developers",
    request_body = CreateDeveloperRequest,
    security(
        ("session_cookie" = [])
    ),
    responses(
        (status = 201, description = "Developer registered successfully", body = DeveloperResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 409, description = "Caller is already registered as a developer")
    ),
    tag = "developers"
)]
pub async fn register_developer(
    State(db): State<Database>,
    Extension(current_user): Extension<CurrentUser>,
    Json(req): Json<CreateDeveloperRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let developer = services::register_developer(db.pool(), current_user.id, &req).await?;

    Ok((StatusCode::CREATED, Json(DeveloperResponse::from(developer))).into_response())
}

#[utoipa::path(
    get,
    path = "/api/developers/{id}",
    params(
        ("id" = Uuid, Path, description = "Developer ID")
    ),
    responses(
        (status = 200, description = "Developer found", body = DeveloperDetailResponse),
        (status = 404, description = "Developer not found")
    ),
    tag = "developers"
)]
pub async fn get_developer(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
) -> Result<Response, WebError> {
    let developer = services::get_developer_detailed(db.pool(), id).await?;

    Ok(Json(developer).into_response())
}
