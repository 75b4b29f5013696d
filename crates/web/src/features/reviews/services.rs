use sqlx::PgPool;
use storage::{
    dto::review::{CreateReviewRequest, ReviewDetailResponse, UpdateReviewRequest},
    models::{Developer, Review},
    repository::{developer::DeveloperRepository, review::ReviewRepository},
};
use uuid::Uuid;

use crate::error::WebError;

/// Submit a review. The target developer must exist, the reviewer must
/// not be the developer's own user, and each reviewer gets one review
/// per developer.
pub async fn create_review(
    pool: &PgPool,
    reviewer_id: Uuid,
    req: &CreateReviewRequest,
) -> Result<Review, WebError> {
    let developers = DeveloperRepository::new(pool);
    let developer = developers.find_by_id(req.developer_id).await?;

    ensure_not_self_review(&developer, reviewer_id)?;

    let reviews = ReviewRepository::new(pool);
    if reviews
        .find_by_reviewer_and_developer(reviewer_id, req.developer_id)
        .await?
        .is_some()
    {
        return Err(WebError::Conflict(
            "You have already reviewed this developer".to_string(),
        ));
    }

    // Concurrent submissions can slip past the pre-check; the unique key
    // on (reviewer_id, developer_id) settles the race as a conflict.
    Ok(reviews.create(reviewer_id, req).await?)
}

/// Review with the reviewed developer attached, for the edit form
pub async fn get_review_detailed(
    pool: &PgPool,
    id: Uuid,
) -> storage::error::Result<ReviewDetailResponse> {
    let repo = ReviewRepository::new(pool);
    repo.find_detailed(id).await
}

/// Rewrite the scores and comment of the caller's own review
pub async fn update_review(
    pool: &PgPool,
    id: Uuid,
    user_id: Uuid,
    req: &UpdateReviewRequest,
) -> Result<Review, WebError> {
    let repo = ReviewRepository::new(pool);
    let review = repo.find_by_id(id).await?;

    ensure_author(&review, user_id)?;

    Ok(repo.update(id, req).await?)
}

/// Delete the caller's own review
pub async fn delete_review(pool: &PgPool, id: Uuid, user_id: Uuid) -> Result<(), WebError> {
    let repo = ReviewRepository::new(pool);
    let review = repo.find_by_id(id).await?;

    ensure_author(&review, user_id)?;

    repo.delete(id).await?;
    Ok(())
}

fn ensure_not_self_review(developer: &Developer, reviewer_id: Uuid) -> Result<(), WebError> {
    if developer.user_id == reviewer_id {
        return Err(WebError::BadRequest(
            "You cannot review yourself".to_string(),
        ));
    }
    Ok(())
}

fn ensure_author(review: &Review, user_id: Uuid) -> Result<(), WebError> {
    if review.reviewer_id != user_id {
        return Err(WebError::Forbidden);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn developer(user_id: Uuid) -> Developer {
        Developer {
            id: Uuid::new_v4(),
            user_id,
            bio: None,
            github_url: "https://github.com/octocat".to_string(),
            created_at: Utc::now(),
        }
    }

    fn review(reviewer_id: Uuid) -> Review {
        Review {
            id: Uuid::new_v4(),
            reviewer_id,
            developer_id: Uuid::new_v4(),
            documentation: 8,
            speed: 6,
            code_quality: 7,
            communication: 9,
            planning: 5,
            personality: 7,
            comment: "solid work".to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn reviewing_your_own_profile_is_rejected() {
        let user_id = Uuid::new_v4();
        let result = ensure_not_self_review(&developer(user_id), user_id);
        assert!(matches!(result, Err(WebError::BadRequest(_))));
    }

    #[test]
    fn reviewing_someone_else_passes() {
        let result = ensure_not_self_review(&developer(Uuid::new_v4()), Uuid::new_v4());
        assert!(result.is_ok());
    }

    #[test]
    fn only_the_author_may_touch_a_review() {
        let result = ensure_author(&review(Uuid::new_v4()), Uuid::new_v4());
        assert!(matches!(result, Err(WebError::Forbidden)));
    }

    #[test]
    fn the_author_passes_the_guard() {
        let author = Uuid::new_v4();
        assert!(ensure_author(&review(author), author).is_ok());
    }
}
