use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct UserProfile {
    pub user_id: String,
    pub email: String,
    pub display_name: Option<String>,
    pub company_name: Option<String>,
    pub role: String,
    pub permissions: Vec<String>,
    pub subscription_tier: String,
    pub subscription_status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
