use anyhow::Context;
use axum::{
    Router,
    extract::FromRef,
    http::{HeaderValue, Method, header},
};
use storage::Database;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod config;
mod error;
mod features;
mod middleware;

use config::Config;
use features::auth::github::GithubOauthClient;

#[derive(Clone, FromRef)]
pub struct AppState {
    db: Database,
    oauth: GithubOauthClient,
    config: Config,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        features::auth::handlers::login,
        features::auth::handlers::callback,
        features::auth::handlers::logout,
        features::auth::handlers::session,
        features::developers::handlers::list_developers,
        features::developers::handlers::register_developer,
        features::developers::handlers::get_developer,
        features::reviews::handlers::create_review,
        features::reviews::handlers::get_review,
        features::reviews::handlers::update_review,
        features::reviews::handlers::delete_review,
        features::me::handlers::my_developer,
        features::me::handlers::my_reviews,
    ),
    components(
        schemas(
            storage::dto::auth::SessionUser,
            storage::dto::developer::CreateDeveloperRequest,
            storage::dto::developer::DeveloperResponse,
            storage::dto::developer::DeveloperSummary,
            storage::dto::developer::DeveloperDetailResponse,
            storage::dto::developer::UserInfo,
            storage::dto::developer::UserRef,
            storage::dto::developer::ReviewWithReviewer,
            storage::dto::developer::MyDeveloperResponse,
            storage::dto::developer::TierFilter,
            storage::dto::review::CreateReviewRequest,
            storage::dto::review::UpdateReviewRequest,
            storage::dto::review::ReviewResponse,
            storage::dto::review::ReviewDetailResponse,
            storage::dto::review::DeveloperInfo,
            storage::dto::review::DeveloperOwner,
            storage::dto::review::MyReviewEntry,
            storage::dto::review::ReviewedDeveloper,
            storage::models::Tier,
            storage::services::scoring::CategoryAverages,
        )
    ),
    tags(
        (name = "auth", description = "GitHub OAuth login and session endpoints"),
        (name = "developers", description = "Developer directory and ranking endpoints"),
        (name = "reviews", description = "Peer review endpoints"),
        (name = "me", description = "Endpoints scoped to the signed-in user"),
    ),
    modifiers(&SecurityAddon)
)]
struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "session_cookie",
                utoipa::openapi::security::SecurityScheme::ApiKey(
                    utoipa::openapi::security::ApiKey::Cookie(
                        utoipa::openapi::security::ApiKeyValue::new(
                            middleware::auth::SESSION_COOKIE,
                        ),
                    ),
                ),
            )
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!("Starting DevRank API");

    let config = Config::from_env().context("Failed to load API configuration")?;
    tracing::info!("Configuration loaded successfully");

    tracing::info!(
        "Connecting to database at: {}",
        config
            .database_url
            .split('@')
            .next_back()
            .unwrap_or("unknown")
    );
    let db = Database::new(&config.database_url)
        .await
        .context("Failed to initialize database")?;
    tracing::info!("Database connection established");

    tracing::info!("Running database migrations");
    db.run_migrations()
        .await
        .context("Failed to run migrations")?;
    tracing::info!("Database migrations completed successfully");

    let oauth = GithubOauthClient::new(
        config.github_client_id.clone(),
        config.github_client_secret.clone(),
        config.callback_url(),
    )
    .context("Failed to build GitHub OAuth client")?;

    let cors = CorsLayer::new()
        .allow_origin(
            config
                .public_url
                .parse::<HeaderValue>()
                .context("PUBLIC_URL is not a valid origin")?,
        )
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(true);

    let bind_address = format!("{}:{}", config.host, config.port);

    let state = AppState {
        db: db.clone(),
        oauth,
        config,
    };

    let app = Router::new()
        .nest("/api/auth", features::auth::routes::routes())
        .nest(
            "/api/developers",
            features::developers::routes::routes(db.clone()),
        )
        .nest("/api/reviews", features::reviews::routes::routes(db.clone()))
        .nest("/api/me", features::me::routes::routes(db))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(cors)
        .with_state(state);

    tracing::info!("Starting server at http://{}", bind_address);
    tracing::info!(
        "Swagger UI available at http://{}/swagger-ui/",
        bind_address
    );

    let listener = TcpListener::bind(&bind_address)
        .await
        .context("Failed to bind server address")?;
    axum::serve(listener, app).await?;

    Ok(())
}
