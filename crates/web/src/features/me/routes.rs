use axum::{Router, middleware, routing::get};
use storage::Database;

use crate::AppState;
use crate::middleware::auth::require_auth;

use super::handlers::{my_developer, my_reviews};

pub fn routes(db: Database) -> Router<AppState> {
    Router::new()
        .route("/developer", get(my_developer))
        .route("/reviews", get(my_reviews))
        .route_layer(middleware::from_fn_with_state(db, require_auth))
}
