use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Per-user integration record. The only type currently written by the API
/// is "webhook", whose config blob holds the delivery URL.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct UserIntegration {
    pub user_id: String,
    pub integration_type: String,
    pub config: serde_json::Value,
    pub is_active: bool,
    pub updated_at: DateTime<Utc>,
}
