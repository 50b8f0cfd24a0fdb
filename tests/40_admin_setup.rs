mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::json;

const ADMIN_EMAIL: &str = "ops@sentinel.test";
const ADMIN_PASSWORD: &str = "correct-horse-battery";

fn configure_env() {
    std::env::set_var("ADMIN_SETUP_EMAIL", ADMIN_EMAIL);
    std::env::set_var("ADMIN_SETUP_PASSWORD", ADMIN_PASSWORD);
}

#[tokio::test]
async fn wrong_credentials_are_rejected() -> Result<()> {
    configure_env();
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let attempts = [
        json!({"email": ADMIN_EMAIL, "password": "wrong"}),
        json!({"email": "someone@else.test", "password": ADMIN_PASSWORD}),
        json!({"email": "", "password": ""}),
        json!({"email": ADMIN_EMAIL.to_uppercase(), "password": ADMIN_PASSWORD}),
    ];

    for attempt in attempts {
        let res = client
            .post(format!("{}/admin/setup", server.base_url))
            .json(&attempt)
            .send()
            .await?;
        assert_eq!(
            res.status(),
            StatusCode::UNAUTHORIZED,
            "attempt: {}",
            attempt
        );
    }
    Ok(())
}

#[tokio::test]
async fn correct_credentials_pass_the_check() -> Result<()> {
    configure_env();
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    // Without a database the upsert may answer 5xx, but the credential
    // check itself must pass
    let res = client
        .post(format!("{}/admin/setup", server.base_url))
        .json(&json!({"email": ADMIN_EMAIL, "password": ADMIN_PASSWORD}))
        .send()
        .await?;
    assert_ne!(res.status(), StatusCode::UNAUTHORIZED);
    assert_ne!(res.status(), StatusCode::BAD_REQUEST);
    Ok(())
}
