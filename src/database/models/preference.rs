use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct NotificationPreference {
    pub user_id: String,
    pub email_alerts: bool,
    pub webhook_alerts: bool,
    pub min_severity: String,
}

impl NotificationPreference {
    /// Defaults returned when a user has never saved preferences.
    pub fn defaults(user_id: &str) -> Self {
        Self {
            user_id: user_id.to_string(),
            email_alerts: true,
            webhook_alerts: false,
            min_severity: "low".to_string(),
        }
    }
}
