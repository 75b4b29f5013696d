pub mod github;
pub mod handlers;
pub mod routes;
pub mod services;
