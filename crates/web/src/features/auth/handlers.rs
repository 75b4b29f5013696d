use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::Deserialize;
use storage::{Database, dto::auth::SessionUser};
use uuid::Uuid;

use crate::config::Config;
use crate::error::WebError;
use crate::middleware::auth::SESSION_COOKIE;

use super::github::GithubOauthClient;
use super::services;

/// Name of the single-use cookie carrying the OAuth CSRF state
const OAUTH_STATE_COOKIE: &str = "oauth_state";

const OAUTH_STATE_TTL_MINUTES: i64 = 10;

#[derive(Debug, Deserialize)]
pub struct CallbackQuery {
    pub code: String,
    pub state: String,
}

#[utoipa::path(
    get,
    path = "/api/auth/login",
    responses(
        (status = 307, description = "Redirect to GitHub's authorize page")
    ),
    tag = "auth"
)]
pub async fn login(
    State(oauth): State<GithubOauthClient>,
    jar: CookieJar,
) -> Result<Response, WebError> {
    let state = Uuid::new_v4().simple().to_string();
    let authorize_url = oauth.authorize_url(&state);

    let state_cookie = Cookie::build((OAUTH_STATE_COOKIE, state))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(time::Duration::minutes(OAUTH_STATE_TTL_MINUTES))
        .build();

    Ok((jar.add(state_cookie), Redirect::temporary(&authorize_url)).into_response())
}

#[utoipa::path(
    get,
    path = "/api/auth/callback",
    params(
        ("code" = String, Query, description = "Authorization code issued by GitHub"),
        ("state" = String, Query, description = "CSRF state echoed back by GitHub")
    ),
    responses(
        (status = 303, description = "Login completed, redirect to the app"),
        (status = 400, description = "State mismatch or rejected authorization code")
    ),
    tag = "auth"
)]
pub async fn callback(
    State(db): State<Database>,
    State(oauth): State<GithubOauthClient>,
    State(config): State<Config>,
    Query(query): Query<CallbackQuery>,
    jar: CookieJar,
) -> Result<Response, WebError> {
    let expected_state = jar
        .get(OAUTH_STATE_COOKIE)
        .map(|cookie| cookie.value().to_string());
    if expected_state.as_deref() != Some(query.state.as_str()) {
        return Err(WebError::BadRequest("Invalid OAuth state".to_string()));
    }

    let access_token = oauth.exchange_code(&query.code).await?;
    let github_user = oauth.fetch_user(&access_token).await?;

    let user = services::find_or_create_user(db.pool(), &github_user).await?;
    let session = services::create_session(db.pool(), user.id).await?;

    tracing::info!("User {} logged in via GitHub", user.id);

    let session_cookie = Cookie::build((SESSION_COOKIE, session.token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(time::Duration::days(services::SESSION_TTL_DAYS))
        .build();

    let jar = jar
        .add(session_cookie)
        .remove(Cookie::build((OAUTH_STATE_COOKIE, "")).path("/").build());

    Ok((jar, Redirect::to(&config.public_url)).into_response())
}

#[utoipa::path(
    post,
    path = "/api/auth/logout",
    responses(
        (status = 204, description = "Session ended")
    ),
    tag = "auth"
)]
pub async fn logout(State(db): State<Database>, jar: CookieJar) -> Result<Response, WebError> {
    if let Some(cookie) = jar.get(SESSION_COOKIE) {
        services::delete_session(db.pool(), cookie.value()).await?;
    }

    let jar = jar.remove(Cookie::build((SESSION_COOKIE, "")).path("/").build());

    Ok((jar, StatusCode::NO_CONTENT).into_response())
}

#[utoipa::path(
    get,
    path = "/api/auth/session",
    responses(
        (status = 200, description = "The current user, or null when anonymous", body = Option<SessionUser>)
    ),
    tag = "auth"
)]
pub async fn session(State(db): State<Database>, jar: CookieJar) -> Result<Response, WebError> {
    let user = match jar.get(SESSION_COOKIE) {
        Some(cookie) => services::resolve_session(db.pool(), cookie.value()).await?,
        None => None,
    };

    Ok(Json(user.map(SessionUser::from)).into_response())
}
