pub mod auth;
pub mod developer;
pub mod review;
