mod common;

use anyhow::Result;
use reqwest::StatusCode;
use std::time::{SystemTime, UNIX_EPOCH};

use sentinel_api::services::billing::sign_payload;

const WEBHOOK_SECRET: &str = "whsec_integration_test";

fn configure_env() {
    std::env::set_var("BILLING_WEBHOOK_SECRET", WEBHOOK_SECRET);
}

fn now_unix() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock before epoch")
        .as_secs() as i64
}

// An event type the service does not act on, so no database is required
const PAYLOAD: &str = r#"{"id":"evt_test_1","type":"invoice.created","data":{"object":{}}}"#;

#[tokio::test]
async fn missing_signature_is_rejected() -> Result<()> {
    configure_env();
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/webhooks/billing", server.base_url))
        .body(PAYLOAD)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn invalid_signature_is_rejected() -> Result<()> {
    configure_env();
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let header = sign_payload(PAYLOAD, "whsec_wrong_secret", now_unix());
    let res = client
        .post(format!("{}/webhooks/billing", server.base_url))
        .header("billing-signature", header)
        .body(PAYLOAD)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn stale_signature_is_rejected() -> Result<()> {
    configure_env();
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let header = sign_payload(PAYLOAD, WEBHOOK_SECRET, now_unix() - 3600);
    let res = client
        .post(format!("{}/webhooks/billing", server.base_url))
        .header("billing-signature", header)
        .body(PAYLOAD)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn signed_event_is_acknowledged() -> Result<()> {
    configure_env();
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let header = sign_payload(PAYLOAD, WEBHOOK_SECRET, now_unix());
    let res = client
        .post(format!("{}/webhooks/billing", server.base_url))
        .header("billing-signature", header)
        .body(PAYLOAD)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["received"], true);
    Ok(())
}
