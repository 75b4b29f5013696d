mod developer;
mod review;
mod session;
mod tier;
mod user;

pub use developer::Developer;
pub use review::{CategoryScores, Review};
pub use session::Session;
pub use tier::Tier;
pub use user::User;
