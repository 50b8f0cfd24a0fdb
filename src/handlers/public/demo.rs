use axum::response::Json;

use crate::services::threat_feed::{self, ThreatFeed};

/// GET /demo/threat-feed - synthetic threat batch for dashboard demos.
///
/// Returns the raw feed shape (`threats`, `timestamp`, `totalThreats`,
/// `blockedThreats`) rather than the success envelope; the frontend consumes
/// this contract directly.
pub async fn threat_feed_get() -> Json<ThreatFeed> {
    Json(threat_feed::generate())
}
