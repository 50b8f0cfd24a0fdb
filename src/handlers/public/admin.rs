use axum::Json;
use serde::Deserialize;
use sha2::{Digest, Sha256};
use tracing::info;

use crate::config;
use crate::database;
use crate::database::models::UserProfile;
use crate::error::ApiError;
use crate::middleware::response::{ApiResponse, ApiResult};
use crate::services::profile_service::ProfileService;

#[derive(Debug, Deserialize)]
pub struct SetupRequest {
    pub email: String,
    pub password: String,
}

/// POST /admin/setup - bootstrap the admin profile.
///
/// Credentials are checked against the pair supplied via environment
/// configuration; any other email/password combination is rejected. A
/// deployment without configured credentials answers 503 so the route can
/// never be used accidentally.
pub async fn setup_post(Json(req): Json<SetupRequest>) -> ApiResult<UserProfile> {
    let security = &config::config().security;
    let (email, password) = match (&security.admin_email, &security.admin_password) {
        (Some(email), Some(password)) => (email, password),
        _ => {
            return Err(ApiError::service_unavailable(
                "Admin setup is not configured",
            ))
        }
    };

    if !digest_eq(&req.email, email) || !digest_eq(&req.password, password) {
        return Err(ApiError::unauthorized("Invalid setup credentials"));
    }

    let pool = database::pool().await?;
    let profile = ProfileService::new(pool).ensure_admin(email).await?;

    info!(email = %profile.email, "admin profile bootstrapped");
    Ok(ApiResponse::created(profile))
}

/// Digest comparison so the check does not leak match length via timing.
fn digest_eq(candidate: &str, expected: &str) -> bool {
    Sha256::digest(candidate.as_bytes()) == Sha256::digest(expected.as_bytes())
}
