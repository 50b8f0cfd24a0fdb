mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::Value;

fn severity_rank(severity: &str) -> u8 {
    match severity {
        "critical" => 4,
        "high" => 3,
        "medium" => 2,
        "low" => 1,
        other => panic!("unexpected severity on the wire: {}", other),
    }
}

#[tokio::test]
async fn feed_contract_holds_across_requests() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    // The feed is random; exercise it a few times
    for _ in 0..5 {
        let res = client
            .get(format!("{}/demo/threat-feed", server.base_url))
            .send()
            .await?;
        assert_eq!(res.status(), StatusCode::OK);

        let body: Value = res.json().await?;
        let threats = body["threats"].as_array().expect("threats array");

        // Always 5-10 records
        assert!(
            (5..=10).contains(&threats.len()),
            "batch size out of bounds: {}",
            threats.len()
        );

        // Sorted by non-increasing severity rank
        let ranks: Vec<u8> = threats
            .iter()
            .map(|t| severity_rank(t["severity"].as_str().expect("severity string")))
            .collect();
        assert!(ranks.windows(2).all(|w| w[0] >= w[1]), "ranks: {:?}", ranks);

        // Aggregates match the batch
        assert_eq!(body["totalThreats"].as_u64().unwrap() as usize, threats.len());
        let blocked = threats
            .iter()
            .filter(|t| t["blocked"].as_bool().unwrap_or(false))
            .count();
        assert_eq!(body["blockedThreats"].as_u64().unwrap() as usize, blocked);

        // camelCase wire keys
        assert!(body.get("timestamp").is_some());
        for threat in threats {
            assert!(threat.get("sourceIp").is_some());
            assert!(threat.get("detectedAt").is_some());
            assert!(threat.get("type").is_some());
        }
    }

    Ok(())
}
