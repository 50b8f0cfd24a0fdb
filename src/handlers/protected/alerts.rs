use axum::{Extension, Json};
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::database;
use crate::database::models::AlertWithTarget;
use crate::error::ApiError;
use crate::middleware::auth::AuthUser;
use crate::middleware::response::{ApiResponse, ApiResult};
use crate::services::alert_service::AlertService;

#[derive(Debug, Deserialize)]
pub struct DismissRequest {
    pub target_id: Uuid,
    pub channel: String,
}

/// GET /api/alerts - newest alerts for the caller, joined with target metadata
pub async fn alerts_get(Extension(user): Extension<AuthUser>) -> ApiResult<Vec<AlertWithTarget>> {
    let pool = database::pool().await?;
    let alerts = AlertService::new(pool).list_for_user(&user.user_id).await?;
    Ok(ApiResponse::success(alerts))
}

/// POST /api/alerts/dismiss - mark unread alerts for one (target, channel)
/// pair as read; returns the number of alerts affected
pub async fn alerts_dismiss(
    Extension(user): Extension<AuthUser>,
    Json(req): Json<DismissRequest>,
) -> ApiResult<Value> {
    if req.channel.trim().is_empty() {
        return Err(ApiError::bad_request("channel must not be empty"));
    }

    let pool = database::pool().await?;
    let dismissed = AlertService::new(pool)
        .dismiss(&user.user_id, req.target_id, &req.channel)
        .await?;

    Ok(ApiResponse::success(json!({ "dismissed": dismissed })))
}
