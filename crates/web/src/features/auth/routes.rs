use axum::{
    Router,
    routing::{get, post},
};

use super::handlers::{callback, login, logout, session};
use crate::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/login", get(login))
        .route("/callback", get(callback))
        .route("/logout", post(logout))
        .route("/session", get(session))
}
