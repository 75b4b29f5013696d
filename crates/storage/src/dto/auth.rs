use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::User;

/// Normalized profile handed to the user repository after a successful
/// OAuth exchange. Provider-specific fallbacks (e.g. GitHub's
/// `name || login`) are applied before this is constructed.
#[derive(Debug, Clone)]
pub struct OauthProfile {
    pub provider: String,
    pub provider_account_id: String,
    pub name: Option<String>,
    pub username: Option<String>,
    pub email: Option<String>,
    pub image: Option<String>,
}

/// The authenticated user as exposed by the session endpoint
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SessionUser {
    pub id: Uuid,
    pub name: Option<String>,
    pub username: Option<String>,
    pub email: Option<String>,
    pub image: Option<String>,
}

impl From<User> for SessionUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            username: user.username,
            email: user.email,
            image: user.image,
        }
    }
}
