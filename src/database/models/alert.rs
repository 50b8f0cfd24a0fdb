use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Alert {
    pub id: Uuid,
    pub user_id: String,
    pub target_id: Uuid,
    pub channel: String,
    pub severity: String,
    pub title: String,
    pub message: Option<String>,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

/// Alert row joined with the metadata of the target that raised it,
/// as returned by the listing endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AlertWithTarget {
    pub id: Uuid,
    pub user_id: String,
    pub target_id: Uuid,
    pub channel: String,
    pub severity: String,
    pub title: String,
    pub message: Option<String>,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
    pub target_name: Option<String>,
    pub target_type: String,
    pub target_value: String,
}
