use hmac::{Hmac, Mac};
use serde::Deserialize;
use sha2::Sha256;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::database;
use crate::services::profile_service::ProfileService;

type HmacSha256 = Hmac<Sha256>;

const DEFAULT_PAID_TIER: &str = "pro";

#[derive(Debug, Error)]
pub enum SignatureError {
    #[error("malformed signature header")]
    MalformedHeader,
    #[error("signature timestamp outside tolerance")]
    StaleTimestamp,
    #[error("signature mismatch")]
    Mismatch,
}

#[derive(Debug, Error)]
pub enum EventError {
    #[error("invalid event payload: {0}")]
    InvalidPayload(String),
    #[error(transparent)]
    Database(#[from] database::DatabaseError),
    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// Billing provider lifecycle event. Only `id`, `type`, and the nested
/// object are read; everything else in the payload is ignored.
#[derive(Debug, Deserialize)]
pub struct BillingEvent {
    pub id: String,
    #[serde(rename = "type")]
    pub event_type: String,
    pub data: BillingEventData,
}

#[derive(Debug, Deserialize)]
pub struct BillingEventData {
    pub object: serde_json::Value,
}

/// Verify a `t=<unix>,v1=<hex>` signature header against the shared secret.
///
/// The signed message is `"{timestamp}.{payload}"`; the timestamp must be
/// within `tolerance_secs` of the current clock in either direction.
pub fn verify_signature(
    payload: &str,
    header: &str,
    secret: &str,
    tolerance_secs: i64,
) -> Result<(), SignatureError> {
    let mut timestamp: Option<i64> = None;
    let mut v1_signature: Option<&str> = None;

    for part in header.split(',') {
        match part.trim().split_once('=') {
            Some(("t", value)) => timestamp = value.parse().ok(),
            Some(("v1", value)) => v1_signature = Some(value),
            _ => {}
        }
    }

    let timestamp = timestamp.ok_or(SignatureError::MalformedHeader)?;
    let v1_signature = v1_signature.ok_or(SignatureError::MalformedHeader)?;
    let expected = hex::decode(v1_signature).map_err(|_| SignatureError::MalformedHeader)?;

    let now = chrono::Utc::now().timestamp();
    if (now - timestamp).abs() > tolerance_secs {
        return Err(SignatureError::StaleTimestamp);
    }

    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|_| SignatureError::MalformedHeader)?;
    mac.update(format!("{}.{}", timestamp, payload).as_bytes());
    mac.verify_slice(&expected)
        .map_err(|_| SignatureError::Mismatch)
}

/// Construct a signature header for a payload. Used by local tooling and
/// tests to produce requests the verifier accepts.
pub fn sign_payload(payload: &str, secret: &str, timestamp: i64) -> String {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .expect("HMAC accepts keys of any length");
    mac.update(format!("{}.{}", timestamp, payload).as_bytes());
    format!("t={},v1={}", timestamp, hex::encode(mac.finalize().into_bytes()))
}

pub fn parse_event(payload: &str) -> Result<BillingEvent, EventError> {
    serde_json::from_str(payload).map_err(|e| EventError::InvalidPayload(e.to_string()))
}

/// Dispatch a verified billing event. Checkout completion activates the
/// profile subscription, payment failure marks it past due; everything else
/// is logged and acknowledged. The database is only touched for event types
/// that mutate state.
pub async fn handle_event(event: &BillingEvent) -> Result<(), EventError> {
    match event.event_type.as_str() {
        "checkout.session.completed" => {
            let Some(user_id) = resolve_user_id(&event.data.object) else {
                warn!(event_id = %event.id, "checkout event carries no user reference");
                return Ok(());
            };
            let tier = event
                .data
                .object
                .pointer("/metadata/plan")
                .and_then(|v| v.as_str())
                .unwrap_or(DEFAULT_PAID_TIER);

            let pool = database::pool().await?;
            let updated = ProfileService::new(pool)
                .set_subscription(user_id, Some(tier), "active")
                .await?;
            if updated == 0 {
                warn!(event_id = %event.id, user_id, "checkout completed for unknown profile");
            } else {
                info!(event_id = %event.id, user_id, tier, "subscription activated");
            }
        }
        "invoice.payment_failed" => {
            let Some(user_id) = resolve_user_id(&event.data.object) else {
                warn!(event_id = %event.id, "payment failure carries no user reference");
                return Ok(());
            };

            let pool = database::pool().await?;
            let updated = ProfileService::new(pool)
                .set_subscription(user_id, None, "past_due")
                .await?;
            if updated == 0 {
                warn!(event_id = %event.id, user_id, "payment failed for unknown profile");
            } else {
                warn!(event_id = %event.id, user_id, "subscription marked past due");
            }
        }
        other => {
            debug!(event_id = %event.id, event_type = other, "unhandled billing event");
        }
    }

    Ok(())
}

/// The checkout session carries the dashboard user id either as the
/// client reference or inside the metadata blob.
fn resolve_user_id(object: &serde_json::Value) -> Option<&str> {
    object
        .get("client_reference_id")
        .and_then(|v| v.as_str())
        .or_else(|| object.pointer("/metadata/user_id").and_then(|v| v.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const SECRET: &str = "whsec_unit_test";
    const PAYLOAD: &str = r#"{"id":"evt_1","type":"checkout.session.completed","data":{"object":{}}}"#;

    #[test]
    fn accepts_correctly_signed_payload() {
        let now = chrono::Utc::now().timestamp();
        let header = sign_payload(PAYLOAD, SECRET, now);
        assert!(verify_signature(PAYLOAD, &header, SECRET, 300).is_ok());
    }

    #[test]
    fn rejects_tampered_payload() {
        let now = chrono::Utc::now().timestamp();
        let header = sign_payload(PAYLOAD, SECRET, now);
        let tampered = PAYLOAD.replace("evt_1", "evt_2");
        assert!(matches!(
            verify_signature(&tampered, &header, SECRET, 300),
            Err(SignatureError::Mismatch)
        ));
    }

    #[test]
    fn rejects_wrong_secret() {
        let now = chrono::Utc::now().timestamp();
        let header = sign_payload(PAYLOAD, SECRET, now);
        assert!(matches!(
            verify_signature(PAYLOAD, &header, "whsec_other", 300),
            Err(SignatureError::Mismatch)
        ));
    }

    #[test]
    fn rejects_stale_timestamp() {
        let stale = chrono::Utc::now().timestamp() - 3600;
        let header = sign_payload(PAYLOAD, SECRET, stale);
        assert!(matches!(
            verify_signature(PAYLOAD, &header, SECRET, 300),
            Err(SignatureError::StaleTimestamp)
        ));
    }

    #[test]
    fn rejects_garbage_headers() {
        for header in ["", "t=notanumber,v1=ab", "v1=ab", "t=123", "t=123,v1=zz"] {
            assert!(matches!(
                verify_signature(PAYLOAD, header, SECRET, i64::MAX),
                Err(SignatureError::MalformedHeader)
            ));
        }
    }

    #[test]
    fn parses_event_envelope() {
        let event = parse_event(PAYLOAD).unwrap();
        assert_eq!(event.id, "evt_1");
        assert_eq!(event.event_type, "checkout.session.completed");
    }

    #[test]
    fn resolves_user_from_client_reference_then_metadata() {
        let object = json!({"client_reference_id": "user_a", "metadata": {"user_id": "user_b"}});
        assert_eq!(resolve_user_id(&object), Some("user_a"));

        let object = json!({"metadata": {"user_id": "user_b"}});
        assert_eq!(resolve_user_id(&object), Some("user_b"));

        let object = json!({"metadata": {}});
        assert_eq!(resolve_user_id(&object), None);
    }
}
