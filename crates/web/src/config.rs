use anyhow::{Context, Result};

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub github_client_id: String,
    pub github_client_secret: String,
    pub public_url: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            host: std::env::var("HOST").context("Cannot load HOST env variable")?,
            port: std::env::var("PORT")
                .context("PORT must be a number")?
                .parse()?,
            database_url: std::env::var("DATABASE_URL")
                .context("Cannot load DATABASE_URL env variable")?,
            github_client_id: std::env::var("GITHUB_CLIENT_ID")
                .context("Cannot load GITHUB_CLIENT_ID env variable")?,
            github_client_secret: std::env::var("GITHUB_CLIENT_SECRET")
                .context("Cannot load GITHUB_CLIENT_SECRET env variable")?,
            public_url: std::env::var("PUBLIC_URL")
                .context("Cannot load PUBLIC_URL env variable")?,
        })
    }

    /// The OAuth callback address registered with GitHub
    pub fn callback_url(&self) -> String {
        format!("{}/api/auth/callback", self.public_url.trim_end_matches('/'))
    }
}
