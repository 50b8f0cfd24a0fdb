use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

use crate::config::{self, AiConfig};
use crate::types::ThreatRecord;

/// Returned whenever a summary cannot be produced, for any reason.
pub const FALLBACK_SUMMARY: &str =
    "Automated threat summary is currently unavailable. Review the live alert feed for the latest activity.";

/// Upstream requests never include more than this many records.
const MAX_SUMMARY_ITEMS: usize = 10;

const SYSTEM_PROMPT: &str = "You are a security analyst for a crypto monitoring platform. \
Summarize the provided threat activity in a professional tone, in exactly two short paragraphs: \
the first describing the overall picture, the second the most pressing items.";

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

/// Thin client around the chat-completions API used for threat narratives.
pub struct Summarizer {
    client: reqwest::Client,
}

impl Summarizer {
    pub fn new() -> Self {
        let timeout = config::config().ai.request_timeout_secs;
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout))
            .build()
            .unwrap_or_default();
        Self { client }
    }

    /// Produce a two-paragraph narrative for the given threats, truncated to
    /// the newest [`MAX_SUMMARY_ITEMS`]. Empty input and a missing API key
    /// short-circuit to the fallback without any network I/O; upstream
    /// failures also fall back.
    pub async fn summarize(&self, threats: &[ThreatRecord]) -> String {
        if threats.is_empty() {
            return FALLBACK_SUMMARY.to_string();
        }

        let ai = &config::config().ai;
        if ai.api_key.is_empty() {
            debug!("AI summary requested but no API key is configured");
            return FALLBACK_SUMMARY.to_string();
        }

        let window = &threats[..threats.len().min(MAX_SUMMARY_ITEMS)];
        match self.request_summary(ai, window).await {
            Ok(text) => text,
            Err(e) => {
                warn!("threat summary request failed: {}", e);
                FALLBACK_SUMMARY.to_string()
            }
        }
    }

    async fn request_summary(
        &self,
        ai: &AiConfig,
        threats: &[ThreatRecord],
    ) -> anyhow::Result<String> {
        let digest = threats
            .iter()
            .map(|t| {
                format!(
                    "- {} from {} (severity: {}, blocked: {})",
                    t.threat_type, t.source_ip, t.severity, t.blocked
                )
            })
            .collect::<Vec<_>>()
            .join("\n");

        let request = ChatRequest {
            model: &ai.model,
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: SYSTEM_PROMPT.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: format!("Recent threat activity:\n{}", digest),
                },
            ],
            temperature: 0.4,
            max_tokens: 400,
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", ai.base_url))
            .bearer_auth(&ai.api_key)
            .json(&request)
            .send()
            .await?
            .error_for_status()?;

        let body: ChatResponse = response.json().await?;
        body.choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or_else(|| anyhow::anyhow!("completion contained no content"))
    }
}

impl Default for Summarizer {
    fn default() -> Self {
        Self::new()
    }
}
