use sqlx::PgPool;

use crate::database::models::MonitoringTarget;

pub struct TargetService {
    pool: PgPool,
}

impl TargetService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list_for_user(&self, user_id: &str) -> Result<Vec<MonitoringTarget>, sqlx::Error> {
        sqlx::query_as::<_, MonitoringTarget>(
            r#"
            SELECT id, user_id, target_type, value, display_name, is_active, created_at
            FROM monitoring_targets
            WHERE user_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
    }

    pub async fn create(
        &self,
        user_id: &str,
        target_type: &str,
        value: &str,
        display_name: Option<&str>,
    ) -> Result<MonitoringTarget, sqlx::Error> {
        sqlx::query_as::<_, MonitoringTarget>(
            r#"
            INSERT INTO monitoring_targets (user_id, target_type, value, display_name, is_active)
            VALUES ($1, $2, $3, $4, TRUE)
            RETURNING id, user_id, target_type, value, display_name, is_active, created_at
            "#,
        )
        .bind(user_id)
        .bind(target_type)
        .bind(value)
        .bind(display_name)
        .fetch_one(&self.pool)
        .await
    }

    /// Pause monitoring for a watched value. Scoped to the owning user;
    /// returns None when the caller owns no matching target.
    pub async fn pause(
        &self,
        user_id: &str,
        value: &str,
    ) -> Result<Option<MonitoringTarget>, sqlx::Error> {
        sqlx::query_as::<_, MonitoringTarget>(
            r#"
            UPDATE monitoring_targets
            SET is_active = FALSE
            WHERE user_id = $1 AND value = $2
            RETURNING id, user_id, target_type, value, display_name, is_active, created_at
            "#,
        )
        .bind(user_id)
        .bind(value)
        .fetch_optional(&self.pool)
        .await
    }
}
