use sqlx::PgPool;

use crate::database::models::NotificationPreference;
use crate::types::Severity;

pub struct PreferenceService {
    pool: PgPool,
}

impl PreferenceService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn get(&self, user_id: &str) -> Result<Option<NotificationPreference>, sqlx::Error> {
        sqlx::query_as::<_, NotificationPreference>(
            r#"
            SELECT user_id, email_alerts, webhook_alerts, min_severity
            FROM notification_preferences
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
    }

    pub async fn upsert(
        &self,
        user_id: &str,
        email_alerts: bool,
        webhook_alerts: bool,
        min_severity: Severity,
    ) -> Result<NotificationPreference, sqlx::Error> {
        sqlx::query_as::<_, NotificationPreference>(
            r#"
            INSERT INTO notification_preferences
                (user_id, email_alerts, webhook_alerts, min_severity)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (user_id) DO UPDATE SET
                email_alerts = EXCLUDED.email_alerts,
                webhook_alerts = EXCLUDED.webhook_alerts,
                min_severity = EXCLUDED.min_severity
            RETURNING user_id, email_alerts, webhook_alerts, min_severity
            "#,
        )
        .bind(user_id)
        .bind(email_alerts)
        .bind(webhook_alerts)
        .bind(min_severity.as_str())
        .fetch_one(&self.pool)
        .await
    }
}
