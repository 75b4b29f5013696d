use chrono::Duration;
use sqlx::PgPool;
use storage::{
    dto::auth::OauthProfile,
    error::{Result, StorageError},
    models::{Session, User},
    repository::{session::SessionRepository, user::UserRepository},
};
use uuid::Uuid;

use super::github::GithubUser;

/// How long a login stays valid
pub const SESSION_TTL_DAYS: i64 = 30;

fn profile_from_github(github_user: &GithubUser) -> OauthProfile {
    OauthProfile {
        provider: "github".to_string(),
        provider_account_id: github_user.id.to_string(),
        // GitHub profiles may have no display name; fall back to the login.
        name: github_user
            .name
            .clone()
            .or_else(|| Some(github_user.login.clone())),
        username: Some(github_user.login.clone()),
        email: github_user.email.clone(),
        image: github_user.avatar_url.clone(),
    }
}

/// Find the user behind a GitHub profile, creating one on first login.
/// Returning users get their provider-owned profile fields refreshed.
pub async fn find_or_create_user(pool: &PgPool, github_user: &GithubUser) -> Result<User> {
    let profile = profile_from_github(github_user);

    let repo = UserRepository::new(pool);
    match repo
        .find_by_account(&profile.provider, &profile.provider_account_id)
        .await?
    {
        Some(user) => repo.refresh_profile(user.id, &profile).await,
        None => repo.create_from_oauth(&profile).await,
    }
}

/// Open a session for the user
pub async fn create_session(pool: &PgPool, user_id: Uuid) -> Result<Session> {
    let repo = SessionRepository::new(pool);
    repo.create(user_id, Duration::days(SESSION_TTL_DAYS)).await
}

/// Resolve a session token to its user. Unknown and expired tokens read
/// as anonymous rather than as errors.
pub async fn resolve_session(pool: &PgPool, token: &str) -> Result<Option<User>> {
    let repo = SessionRepository::new(pool);
    match repo.find_valid(token).await {
        Ok((_, user)) => Ok(Some(user)),
        Err(StorageError::NotFound) => Ok(None),
        Err(e) => Err(e),
    }
}

/// Drop a session token
pub async fn delete_session(pool: &PgPool, token: &str) -> Result<()> {
    let repo = SessionRepository::new(pool);
    repo.delete(token).await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn github_user(name: Option<&str>) -> GithubUser {
        GithubUser {
            id: 583231,
            login: "octocat".to_string(),
            name: name.map(String::from),
            email: None,
            avatar_url: Some("https://avatars.githubusercontent.com/u/583231".to_string()),
        }
    }

    #[test]
    fn display_name_falls_back_to_login() {
        let profile = profile_from_github(&github_user(None));
        assert_eq!(profile.name.as_deref(), Some("octocat"));
        assert_eq!(profile.username.as_deref(), Some("octocat"));
    }

    #[test]
    fn explicit_display_name_wins() {
        let profile = profile_from_github(&github_user(Some("The Octocat")));
        assert_eq!(profile.name.as_deref(), Some("The Octocat"));
        assert_eq!(profile.provider, "github");
        assert_eq!(profile.provider_account_id, "583231");
    }
}
