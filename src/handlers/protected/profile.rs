use axum::{Extension, Json};
use serde::Deserialize;

use crate::database;
use crate::database::models::UserProfile;
use crate::error::ApiError;
use crate::middleware::auth::AuthUser;
use crate::middleware::response::{ApiResponse, ApiResult};
use crate::services::profile_service::{ProfileService, ProfileUpdate};

#[derive(Debug, Deserialize)]
pub struct UpdateProfileRequest {
    pub email: String,
    pub display_name: Option<String>,
    pub company_name: Option<String>,
}

/// GET /api/profile - the caller's profile row
pub async fn profile_get(Extension(user): Extension<AuthUser>) -> ApiResult<UserProfile> {
    let pool = database::pool().await?;
    let profile = ProfileService::new(pool)
        .get(&user.user_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Profile not found"))?;
    Ok(ApiResponse::success(profile))
}

/// PUT /api/profile - insert-or-update the caller's profile
pub async fn profile_put(
    Extension(user): Extension<AuthUser>,
    Json(req): Json<UpdateProfileRequest>,
) -> ApiResult<UserProfile> {
    let email = req.email.trim();
    if !is_plausible_email(email) {
        return Err(ApiError::bad_request("Invalid email address"));
    }

    let pool = database::pool().await?;
    let profile = ProfileService::new(pool)
        .upsert(
            &user.user_id,
            ProfileUpdate {
                email: email.to_string(),
                display_name: req.display_name,
                company_name: req.company_name,
            },
        )
        .await?;

    Ok(ApiResponse::success(profile))
}

/// Shape check only: one `@` with a non-empty local part and a dotted
/// domain. Deliverability is the mail provider's problem.
fn is_plausible_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.is_empty()
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !email.contains(char::is_whitespace)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_ordinary_addresses() {
        assert!(is_plausible_email("analyst@example.com"));
        assert!(is_plausible_email("a.b+tag@sub.example.io"));
    }

    #[test]
    fn rejects_malformed_addresses() {
        assert!(!is_plausible_email(""));
        assert!(!is_plausible_email("no-at-sign"));
        assert!(!is_plausible_email("@example.com"));
        assert!(!is_plausible_email("user@"));
        assert!(!is_plausible_email("user@nodots"));
        assert!(!is_plausible_email("user@.example.com"));
        assert!(!is_plausible_email("user@example.com."));
        assert!(!is_plausible_email("us er@example.com"));
    }
}
