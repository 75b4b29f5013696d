use axum::{
    Router, middleware,
    routing::{get, post},
};
use storage::Database;

use super::handlers::{get_developer, list_developers, register_developer};
use crate::AppState;
use crate::middleware::auth::require_auth;

pub fn routes(db: Database) -> Router<AppState> {
    let protected = Router::new()
        .route("/", post(register_developer))
        .route_layer(middleware::from_fn_with_state(db, require_auth));

    Router::new()
        .route("/", get(list_developers))
        .route("/:id", get(get_developer))
        .merge(protected)
}
