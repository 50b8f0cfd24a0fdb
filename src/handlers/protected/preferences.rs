use axum::{Extension, Json};
use serde::Deserialize;

use crate::database;
use crate::database::models::NotificationPreference;
use crate::error::ApiError;
use crate::middleware::auth::AuthUser;
use crate::middleware::response::{ApiResponse, ApiResult};
use crate::services::preference_service::PreferenceService;
use crate::types::Severity;

#[derive(Debug, Deserialize)]
pub struct UpdatePreferencesRequest {
    pub email_alerts: bool,
    pub webhook_alerts: bool,
    pub min_severity: String,
}

/// GET /api/preferences - notification preferences, falling back to
/// defaults when the caller has never saved any
pub async fn preferences_get(
    Extension(user): Extension<AuthUser>,
) -> ApiResult<NotificationPreference> {
    let pool = database::pool().await?;
    let preferences = PreferenceService::new(pool)
        .get(&user.user_id)
        .await?
        .unwrap_or_else(|| NotificationPreference::defaults(&user.user_id));
    Ok(ApiResponse::success(preferences))
}

/// PUT /api/preferences - insert-or-update notification preferences
pub async fn preferences_put(
    Extension(user): Extension<AuthUser>,
    Json(req): Json<UpdatePreferencesRequest>,
) -> ApiResult<NotificationPreference> {
    let min_severity: Severity = req
        .min_severity
        .parse()
        .map_err(ApiError::bad_request)?;

    let pool = database::pool().await?;
    let preferences = PreferenceService::new(pool)
        .upsert(
            &user.user_id,
            req.email_alerts,
            req.webhook_alerts,
            min_severity,
        )
        .await?;

    Ok(ApiResponse::success(preferences))
}
