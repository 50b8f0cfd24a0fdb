use chrono::{DateTime, Utc};
use rand::Rng;
use serde::Serialize;
use uuid::Uuid;

use crate::types::{Severity, ThreatRecord};

/// Batch size bounds for a single feed request.
pub const MIN_BATCH: usize = 5;
pub const MAX_BATCH: usize = 10;

/// Threat catalog shown on the demo dashboard. These are labels, not
/// detections; the feed is presentational.
const THREAT_TYPES: &[&str] = &[
    "phishing",
    "wallet_drain",
    "suspicious_transaction",
    "brute_force_login",
    "malware_callback",
    "protocol_exploit",
];

/// Demo feed response. Wire keys are camelCase to match the frontend.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThreatFeed {
    pub threats: Vec<ThreatRecord>,
    pub timestamp: DateTime<Utc>,
    pub total_threats: usize,
    pub blocked_threats: usize,
}

/// Generate a synthetic threat batch: 5-10 records with random type, source
/// and severity, sorted by severity rank descending.
pub fn generate() -> ThreatFeed {
    let mut rng = rand::thread_rng();
    let count = rng.gen_range(MIN_BATCH..=MAX_BATCH);
    let now = Utc::now();

    let mut threats: Vec<ThreatRecord> = (0..count)
        .map(|_| ThreatRecord {
            id: Uuid::new_v4(),
            threat_type: THREAT_TYPES[rng.gen_range(0..THREAT_TYPES.len())].to_string(),
            source_ip: random_ipv4(&mut rng),
            severity: Severity::ALL[rng.gen_range(0..Severity::ALL.len())],
            blocked: rng.gen_bool(0.5),
            detected_at: now,
        })
        .collect();

    threats.sort_by(|a, b| b.severity.rank().cmp(&a.severity.rank()));

    let blocked_threats = threats.iter().filter(|t| t.blocked).count();

    ThreatFeed {
        total_threats: threats.len(),
        blocked_threats,
        threats,
        timestamp: now,
    }
}

/// An IPv4-looking public-ish source address.
fn random_ipv4(rng: &mut impl Rng) -> String {
    format!(
        "{}.{}.{}.{}",
        rng.gen_range(1..=223),
        rng.gen_range(0..=255),
        rng.gen_range(0..=255),
        rng.gen_range(1..=254)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv4Addr;

    #[test]
    fn batch_size_stays_within_bounds() {
        for _ in 0..100 {
            let feed = generate();
            assert!(feed.threats.len() >= MIN_BATCH);
            assert!(feed.threats.len() <= MAX_BATCH);
        }
    }

    #[test]
    fn threats_are_sorted_by_non_increasing_severity() {
        for _ in 0..50 {
            let feed = generate();
            let ranks: Vec<u8> = feed.threats.iter().map(|t| t.severity.rank()).collect();
            assert!(ranks.windows(2).all(|w| w[0] >= w[1]), "ranks: {:?}", ranks);
        }
    }

    #[test]
    fn aggregates_match_the_batch() {
        for _ in 0..50 {
            let feed = generate();
            assert_eq!(feed.total_threats, feed.threats.len());
            assert_eq!(
                feed.blocked_threats,
                feed.threats.iter().filter(|t| t.blocked).count()
            );
        }
    }

    #[test]
    fn source_addresses_parse_as_ipv4() {
        let feed = generate();
        for threat in &feed.threats {
            threat
                .source_ip
                .parse::<Ipv4Addr>()
                .unwrap_or_else(|_| panic!("not an IPv4 address: {}", threat.source_ip));
        }
    }

    #[test]
    fn threat_types_come_from_the_catalog() {
        let feed = generate();
        for threat in &feed.threats {
            assert!(THREAT_TYPES.contains(&threat.threat_type.as_str()));
        }
    }
}
