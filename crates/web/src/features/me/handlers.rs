use axum::{
    Extension, Json,
    extract::State,
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::{developer::MyDeveloperResponse, review::MyReviewEntry},
};

use crate::error::WebError;
use crate::middleware::auth::CurrentUser;

use super::services;

#[utoipa::path(
    get,
    path = "/api/me/developer",
    security(
        ("session_cookie" = [])
    ),
    responses(
        (status = 200, description = "The caller's developer profile, or null when not registered", body = Option<MyDeveloperResponse>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "me"
)]
pub async fn my_developer(
    State(db): State<Database>,
    Extension(current_user): Extension<CurrentUser>,
) -> Result<Response, WebError> {
    let developer = services::get_my_developer(db.pool(), current_user.id).await?;

    Ok(Json(developer).into_response())
}

#[utoipa::path(
    get,
    path = "/api/me/reviews",
    security(
        ("session_cookie" = [])
    ),
    responses(
        (status = 200, description = "Reviews the caller has written, newest first", body = Vec<MyReviewEntry>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "me"
)]
pub async fn my_reviews(
    State(db): State<Database>,
    Extension(current_user): Extension<CurrentUser>,
) -> Result<Response, WebError> {
    let reviews = services::list_my_reviews(db.pool(), current_user.id).await?;

    Ok(Json(reviews).into_response())
}
