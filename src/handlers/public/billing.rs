use axum::{http::HeaderMap, response::Json};
use serde_json::{json, Value};
use tracing::warn;

use crate::config;
use crate::error::ApiError;
use crate::services::billing;

pub const SIGNATURE_HEADER: &str = "billing-signature";

/// POST /webhooks/billing - payment provider lifecycle events.
///
/// The raw body is verified against the shared webhook secret before any
/// parsing. Responds `{"received": true}` once the event is handled; any
/// signature problem is a 400.
pub async fn billing_post(headers: HeaderMap, body: String) -> Result<Json<Value>, ApiError> {
    let billing_config = &config::config().billing;
    if billing_config.webhook_secret.is_empty() {
        return Err(ApiError::service_unavailable(
            "Billing webhook is not configured",
        ));
    }

    let signature = headers
        .get(SIGNATURE_HEADER)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| ApiError::bad_request("Missing billing signature header"))?;

    billing::verify_signature(
        &body,
        signature,
        &billing_config.webhook_secret,
        billing_config.timestamp_tolerance_secs,
    )
    .map_err(|e| {
        warn!("billing webhook rejected: {}", e);
        ApiError::bad_request("Invalid webhook signature")
    })?;

    let event = billing::parse_event(&body)
        .map_err(|e| ApiError::bad_request(format!("Invalid webhook payload: {}", e)))?;

    billing::handle_event(&event).await.map_err(|e| match e {
        billing::EventError::InvalidPayload(msg) => ApiError::bad_request(msg),
        billing::EventError::Database(db) => db.into(),
        billing::EventError::Sqlx(sqlx_err) => sqlx_err.into(),
    })?;

    Ok(Json(json!({ "received": true })))
}
