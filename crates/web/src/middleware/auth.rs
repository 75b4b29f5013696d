use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::CookieJar;
use storage::{Database, error::StorageError, repository::session::SessionRepository};
use uuid::Uuid;

use crate::error::WebError;

/// Name of the cookie carrying the session token
pub const SESSION_COOKIE: &str = "session_token";

/// The authenticated caller. Inserted into request extensions by
/// `require_auth`; handlers receive it as `Extension<CurrentUser>`.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: Uuid,
    pub name: Option<String>,
    pub username: Option<String>,
    pub image: Option<String>,
}

/// Rejects requests without a valid session and attaches the caller's
/// identity to the request. Expired sessions count as absent.
pub async fn require_auth(
    State(db): State<Database>,
    jar: CookieJar,
    mut req: Request,
    next: Next,
) -> Result<Response, WebError> {
    let token = jar
        .get(SESSION_COOKIE)
        .map(|cookie| cookie.value().to_string())
        .ok_or(WebError::Unauthorized)?;

    let repo = SessionRepository::new(db.pool());
    let (_, user) = match repo.find_valid(&token).await {
        Ok(found) => found,
        Err(StorageError::NotFound) => {
            tracing::warn!("Rejected request carrying an invalid or expired session");
            return Err(WebError::Unauthorized);
        }
        Err(e) => return Err(WebError::Storage(e)),
    };

    req.extensions_mut().insert(CurrentUser {
        id: user.id,
        name: user.name,
        username: user.username,
        image: user.image,
    });

    Ok(next.run(req).await)
}
