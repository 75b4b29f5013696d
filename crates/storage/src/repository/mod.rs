pub mod developer;
pub mod review;
pub mod session;
pub mod user;
