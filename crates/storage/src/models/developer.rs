use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Developer {
    pub id: Uuid,
    pub user_id: Uuid,
    pub bio: Option<String>,
    pub github_url: String,
    pub created_at: DateTime<Utc>,
}
