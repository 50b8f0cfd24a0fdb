use serde_json::json;
use sqlx::PgPool;

use crate::database::models::UserIntegration;

pub const WEBHOOK_INTEGRATION: &str = "webhook";

pub struct IntegrationService {
    pool: PgPool,
}

impl IntegrationService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn get_webhook(&self, user_id: &str) -> Result<Option<UserIntegration>, sqlx::Error> {
        sqlx::query_as::<_, UserIntegration>(
            r#"
            SELECT user_id, integration_type, config, is_active, updated_at
            FROM user_integrations
            WHERE user_id = $1 AND integration_type = $2
            "#,
        )
        .bind(user_id)
        .bind(WEBHOOK_INTEGRATION)
        .fetch_optional(&self.pool)
        .await
    }

    pub async fn upsert_webhook(
        &self,
        user_id: &str,
        url: &str,
        is_active: bool,
    ) -> Result<UserIntegration, sqlx::Error> {
        let config = json!({ "url": url });

        sqlx::query_as::<_, UserIntegration>(
            r#"
            INSERT INTO user_integrations (user_id, integration_type, config, is_active)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (user_id, integration_type) DO UPDATE SET
                config = EXCLUDED.config,
                is_active = EXCLUDED.is_active,
                updated_at = NOW()
            RETURNING user_id, integration_type, config, is_active, updated_at
            "#,
        )
        .bind(user_id)
        .bind(WEBHOOK_INTEGRATION)
        .bind(&config)
        .bind(is_active)
        .fetch_one(&self.pool)
        .await
    }
}
