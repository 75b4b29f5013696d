use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::review::{CreateReviewRequest, ReviewDetailResponse, ReviewResponse, UpdateReviewRequest},
};
use uuid::Uuid;
use validator::Validate;

use crate::error::WebError;
use crate::middleware::auth::CurrentUser;

use super::services;

#[utoipa::path(
    post,
    path = "/api/reviews",
    request_body = CreateReviewRequest,
    security(
        ("session_cookie" = [])
    ),
    responses(
        (status = 201, description = "Review submitted successfully", body = ReviewResponse),
        (status = 400, description = "Validation error or self-review"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Developer not found"),
        (status = 409, description = "Caller has already reviewed this developer")
    ),
    tag = "reviews"
)]
pub async fn create_review(
    State(db): State<Database>,
    Extension(current_user): Extension<CurrentUser>,
    Json(req): Json<CreateReviewRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let review = services::create_review(db.pool(), current_user.id, &req).await?;

    Ok((StatusCode::CREATED, Json(ReviewResponse::from(review))).into_response())
}

#[utoipa::path(
    get,
    path = "/api/reviews/{id}",
    params(
        ("id" = Uuid, Path, description = "Review ID")
    ),
    responses(
        (status = 200, description = "Review found", body = ReviewDetailResponse),
        (status = 404, description = "Review not found")
    ),
    tag = "reviews"
)]
pub async fn get_review(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
) -> Result<Response, WebError> {
    let review = services::get_review_detailed(db.pool(), id).await?;

    Ok(Json(review).into_response())
}

#[utoipa::path(
    put,
    path = "/api/reviews/{id}",
    params(
        ("id" = Uuid, Path, description = "Review ID")
    ),
    request_body = UpdateReviewRequest,
    security(
        ("session_cookie" = [])
    ),
    responses(
        (status = 200, description = "Review updated successfully", body = ReviewResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Caller is not the review's author"),
        (status = 404, description = "Review not found")
    ),
    tag = "reviews"
)]
pub async fn update_review(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
    Extension(current_user): Extension<CurrentUser>,
    Json(req): Json<UpdateReviewRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let review = services::update_review(db.pool(), id, current_user.id, &req).await?;

    Ok(Json(ReviewResponse::from(review)).into_response())
}

#[utoipa::path(
    delete,
    path = "/api/reviews/{id}",
    params(
        ("id" = Uuid, Path, description = "Review ID")
    ),
    security(
        ("session_cookie" = [])
    ),
    responses(
        (status = 204, description = "Review deleted successfully"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Caller is not the review's author"),
        (status = 404, description = "Review not found")
    ),
    tag = "reviews"
)]
pub async fn delete_review(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
    Extension(current_user): Extension<CurrentUser>,
) -> Result<Response, WebError> {
    services::delete_review(db.pool(), id, current_user.id).await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}
