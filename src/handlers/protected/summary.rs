use axum::{Extension, Json};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;

use crate::middleware::auth::AuthUser;
use crate::middleware::response::{ApiResponse, ApiResult};
use crate::services::summarizer::Summarizer;
use crate::types::ThreatRecord;

#[derive(Debug, Deserialize)]
pub struct SummaryRequest {
    #[serde(default)]
    pub threats: Vec<ThreatRecord>,
}

/// POST /api/ai/summary - narrative summary of the submitted threats.
/// Always answers 200; failures surface as the fallback text.
pub async fn summary_post(
    Extension(user): Extension<AuthUser>,
    Json(req): Json<SummaryRequest>,
) -> ApiResult<Value> {
    debug!(
        user_id = %user.user_id,
        threats = req.threats.len(),
        "generating threat summary"
    );

    let summary = Summarizer::new().summarize(&req.threats).await;
    Ok(ApiResponse::success(json!({ "summary": summary })))
}
