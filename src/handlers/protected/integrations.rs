use axum::{Extension, Json};
use serde::Deserialize;
use url::Url;

use crate::database;
use crate::database::models::UserIntegration;
use crate::error::ApiError;
use crate::middleware::auth::AuthUser;
use crate::middleware::response::{ApiResponse, ApiResult};
use crate::services::integration_service::IntegrationService;

#[derive(Debug, Deserialize)]
pub struct UpdateWebhookRequest {
    pub url: String,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

/// GET /api/integrations/webhook - the caller's webhook delivery config
pub async fn webhook_get(Extension(user): Extension<AuthUser>) -> ApiResult<UserIntegration> {
    let pool = database::pool().await?;
    let integration = IntegrationService::new(pool)
        .get_webhook(&user.user_id)
        .await?
        .ok_or_else(|| ApiError::not_found("No webhook integration configured"))?;
    Ok(ApiResponse::success(integration))
}

/// PUT /api/integrations/webhook - insert-or-update the webhook delivery URL
pub async fn webhook_put(
    Extension(user): Extension<AuthUser>,
    Json(req): Json<UpdateWebhookRequest>,
) -> ApiResult<UserIntegration> {
    let url = validate_webhook_url(&req.url)?;

    let pool = database::pool().await?;
    let integration = IntegrationService::new(pool)
        .upsert_webhook(&user.user_id, url.as_str(), req.is_active)
        .await?;

    Ok(ApiResponse::success(integration))
}

/// Webhook URLs must parse and use http(s); anything else is rejected
/// before it reaches the database.
fn validate_webhook_url(raw: &str) -> Result<Url, ApiError> {
    let url = Url::parse(raw.trim()).map_err(|_| ApiError::bad_request("Invalid webhook URL"))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ApiError::bad_request("Webhook URL must use http or https"));
    }
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_https_urls() {
        assert!(validate_webhook_url("https://hooks.example.com/x/y").is_ok());
        assert!(validate_webhook_url(" http://10.0.0.5:8080/notify ").is_ok());
    }

    #[test]
    fn rejects_non_http_schemes_and_garbage() {
        assert!(validate_webhook_url("ftp://example.com/drop").is_err());
        assert!(validate_webhook_url("javascript:alert(1)").is_err());
        assert!(validate_webhook_url("not a url").is_err());
        assert!(validate_webhook_url("").is_err());
    }
}
