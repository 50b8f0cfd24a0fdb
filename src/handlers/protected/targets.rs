use axum::{Extension, Json};
use serde::Deserialize;

use crate::database;
use crate::database::models::MonitoringTarget;
use crate::error::ApiError;
use crate::middleware::auth::AuthUser;
use crate::middleware::response::{ApiResponse, ApiResult};
use crate::services::target_service::TargetService;

#[derive(Debug, Deserialize)]
pub struct CreateTargetRequest {
    pub target_type: String,
    pub value: String,
    pub display_name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PauseTargetRequest {
    pub value: String,
}

/// GET /api/targets - the caller's monitoring targets
pub async fn targets_get(Extension(user): Extension<AuthUser>) -> ApiResult<Vec<MonitoringTarget>> {
    let pool = database::pool().await?;
    let targets = TargetService::new(pool).list_for_user(&user.user_id).await?;
    Ok(ApiResponse::success(targets))
}

/// POST /api/targets - watch a new address/resource
pub async fn targets_post(
    Extension(user): Extension<AuthUser>,
    Json(req): Json<CreateTargetRequest>,
) -> ApiResult<MonitoringTarget> {
    if req.target_type.trim().is_empty() {
        return Err(ApiError::bad_request("target_type must not be empty"));
    }
    if req.value.trim().is_empty() {
        return Err(ApiError::bad_request("value must not be empty"));
    }

    let pool = database::pool().await?;
    let target = TargetService::new(pool)
        .create(
            &user.user_id,
            req.target_type.trim(),
            req.value.trim(),
            req.display_name.as_deref(),
        )
        .await?;

    Ok(ApiResponse::created(target))
}

/// POST /api/targets/pause - stop alerting on a watched value.
/// Only the owning user's target is affected.
pub async fn targets_pause(
    Extension(user): Extension<AuthUser>,
    Json(req): Json<PauseTargetRequest>,
) -> ApiResult<MonitoringTarget> {
    if req.value.trim().is_empty() {
        return Err(ApiError::bad_request("value must not be empty"));
    }

    let pool = database::pool().await?;
    let paused = TargetService::new(pool)
        .pause(&user.user_id, req.value.trim())
        .await?;

    match paused {
        Some(target) => Ok(ApiResponse::success(target)),
        None => Err(ApiError::not_found("No matching target for this account")),
    }
}
