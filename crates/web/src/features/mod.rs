pub mod auth;
pub mod developers;
pub mod me;
pub mod reviews;
