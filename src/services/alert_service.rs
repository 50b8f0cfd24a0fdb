use sqlx::PgPool;
use uuid::Uuid;

use crate::database::models::AlertWithTarget;

/// Listing cap; the dashboard renders at most one page of alerts.
pub const MAX_ALERT_PAGE: i64 = 50;

pub struct AlertService {
    pool: PgPool,
}

impl AlertService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Newest alerts for a user, joined with the metadata of the target
    /// that raised each one.
    pub async fn list_for_user(&self, user_id: &str) -> Result<Vec<AlertWithTarget>, sqlx::Error> {
        sqlx::query_as::<_, AlertWithTarget>(
            r#"
            SELECT a.id, a.user_id, a.target_id, a.channel, a.severity,
                   a.title, a.message, a.is_read, a.created_at,
                   t.display_name AS target_name,
                   t.target_type,
                   t.value AS target_value
            FROM alerts a
            JOIN monitoring_targets t ON t.id = a.target_id
            WHERE a.user_id = $1
            ORDER BY a.created_at DESC
            LIMIT $2
            "#,
        )
        .bind(user_id)
        .bind(MAX_ALERT_PAGE)
        .fetch_all(&self.pool)
        .await
    }

    /// Mark unread alerts as read. Scoped to the exact
    /// (user, target, channel, unread) tuple; returns the affected count.
    pub async fn dismiss(
        &self,
        user_id: &str,
        target_id: Uuid,
        channel: &str,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            r#"
            UPDATE alerts
            SET is_read = TRUE
            WHERE user_id = $1 AND target_id = $2 AND channel = $3 AND is_read = FALSE
            "#,
        )
        .bind(user_id)
        .bind(target_id)
        .bind(channel)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }
}
