use axum::{
    Router, middleware,
    routing::{delete, get, post, put},
};
use storage::Database;

use super::handlers::{create_review, delete_review, get_review, update_review};
use crate::AppState;
use crate::middleware::auth::require_auth;

pub fn routes(db: Database) -> Router<AppState> {
    let protected = Router::new()
        .route("/", post(create_review))
        .route("/:id", put(update_review))
        .route("/:id", delete(delete_review))
        .route_layer(middleware::from_fn_with_state(db, require_auth));

    Router::new().route("/:id", get(get_review)).merge(protected)
}
