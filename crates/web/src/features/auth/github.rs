use std::time::Duration;

use anyhow::Context;
use reqwest::{Client, Url, header};
use serde::Deserialize;
use serde_json::json;

use crate::error::WebError;

const AUTHORIZE_URL: &str = "https://github.com/login/oauth/authorize";
const TOKEN_URL: &str = "https://github.com/login/oauth/access_token";
const USER_URL: &str = "https://api.github.com/user";

/// The slice of GitHub's user payload this service consumes
#[derive(Debug, Clone, Deserialize)]
pub struct GithubUser {
    pub id: i64,
    pub login: String,
    pub name: Option<String>,
    pub email: Option<String>,
    pub avatar_url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AccessTokenResponse {
    access_token: Option<String>,
    error_description: Option<String>,
}

/// Minimal GitHub client for the authorization-code flow
#[derive(Clone)]
pub struct GithubOauthClient {
    client: Client,
    authorize_endpoint: Url,
    client_id: String,
    client_secret: String,
    callback_url: String,
}

impl GithubOauthClient {
    pub fn new(
        client_id: String,
        client_secret: String,
        callback_url: String,
    ) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .context("Failed to build HTTP client")?;

        let authorize_endpoint =
            Url::parse(AUTHORIZE_URL).context("Invalid GitHub authorize endpoint")?;

        Ok(Self {
            client,
            authorize_endpoint,
            client_id,
            client_secret,
            callback_url,
        })
    }

    /// The GitHub authorize URL the login endpoint redirects to
    pub fn authorize_url(&self, state: &str) -> String {
        let mut url = self.authorize_endpoint.clone();
        url.query_pairs_mut()
            .append_pair("client_id", &self.client_id)
            .append_pair("redirect_uri", &self.callback_url)
            .append_pair("scope", "read:user user:email")
            .append_pair("state", state);
        url.to_string()
    }

    /// Exchange an authorization code for an access token
    pub async fn exchange_code(&self, code: &str) -> Result<String, WebError> {
        let response = self
            .client
            .post(TOKEN_URL)
            .header(header::ACCEPT, "application/json")
            .json(&json!({
                "client_id": self.client_id,
                "client_secret": self.client_secret,
                "code": code,
            }))
            .send()
            .await
            .map_err(|e| {
                WebError::InternalServerError(format!("GitHub token exchange failed: {e}"))
            })?;

        if !response.status().is_success() {
            return Err(WebError::InternalServerError(format!(
                "GitHub token exchange returned {}",
                response.status()
            )));
        }

        let token: AccessTokenResponse = response.json().await.map_err(|e| {
            WebError::InternalServerError(format!("Invalid token response from GitHub: {e}"))
        })?;

        match token.access_token {
            Some(access_token) => Ok(access_token),
            None => {
                tracing::warn!(
                    "GitHub rejected the authorization code: {}",
                    token.error_description.as_deref().unwrap_or("no detail")
                );
                Err(WebError::BadRequest(
                    "GitHub authorization failed".to_string(),
                ))
            }
        }
    }

    /// Fetch the authenticated user's profile. GitHub requires a
    /// `User-Agent` header on every API request.
    pub async fn fetch_user(&self, access_token: &str) -> Result<GithubUser, WebError> {
        let response = self
            .client
            .get(USER_URL)
            .header(header::USER_AGENT, "devrank")
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| WebError::InternalServerError(format!("GitHub user fetch failed: {e}")))?;

        if !response.status().is_success() {
            return Err(WebError::InternalServerError(format!(
                "GitHub user fetch returned {}",
                response.status()
            )));
        }

        response.json().await.map_err(|e| {
            WebError::InternalServerError(format!("Invalid user response from GitHub: {e}"))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn authorize_url_carries_client_and_state() {
        let client = GithubOauthClient::new(
            "client-id".to_string(),
            "secret".to_string(),
            "http://localhost:8080/api/auth/callback".to_string(),
        )
        .unwrap();

        let url = client.authorize_url("random-state");

        assert!(url.starts_with("https://github.com/login/oauth/authorize?"));
        assert!(url.contains("client_id=client-id"));
        assert!(url.contains("state=random-state"));
        assert!(url.contains("redirect_uri=http%3A%2F%2Flocalhost%3A8080%2Fapi%2Fauth%2Fcallback"));
    }
}
