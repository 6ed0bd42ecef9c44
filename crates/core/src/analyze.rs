//! Critique generation via the Gemini generative-language API.
//!
//! This module provides the [`Analyst`] trait used by the orchestrator and
//! its HTTP implementation [`GeminiAnalyst`], which sends the scraped page
//! text to the `generateContent` endpoint with a response schema that forces
//! the reply into the [`AuditResult`] wire shape. One attempt per
//! submission; there is no retry or backoff.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::audit::AuditResult;
use crate::{Result, RoastError};

/// Default Gemini API endpoint.
const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Environment variable holding the Gemini API key.
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Configuration for the analysis client.
#[derive(Debug, Clone)]
pub struct AnalystConfig {
    /// Model name, e.g. `gemini-2.0-flash-lite`.
    pub model: String,
    /// Request timeout in seconds.
    pub timeout: u64,
    /// Upper bound on the generated critique.
    pub max_output_tokens: u32,
    /// Sampling temperature.
    pub temperature: f32,
}

impl Default for AnalystConfig {
    fn default() -> Self {
        Self {
            model: "gemini-2.0-flash-lite".to_string(),
            timeout: 60,
            max_output_tokens: 2048,
            temperature: 0.7,
        }
    }
}

/// Produces a structured critique from scraped page text.
#[async_trait]
pub trait Analyst: Send + Sync {
    /// Requests one critique of `text`, attributed to `url`.
    async fn analyze(&self, text: &str, url: &str) -> Result<AuditResult>;
}

/// Analyst backed by the Gemini REST API.
pub struct GeminiAnalyst {
    client: Client,
    base_url: String,
    api_key: String,
    config: AnalystConfig,
}

impl GeminiAnalyst {
    /// Creates an analyst with an explicit API key.
    ///
    /// # Errors
    ///
    /// Returns [`RoastError::HttpError`] if the HTTP client cannot be built.
    pub fn new(api_key: String, config: AnalystConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .build()
            .map_err(RoastError::HttpError)?;

        Ok(Self { client, base_url: DEFAULT_BASE_URL.to_string(), api_key, config })
    }

    /// Creates an analyst with the key from `GEMINI_API_KEY`.
    ///
    /// # Errors
    ///
    /// Returns [`RoastError::MissingApiKey`] if the variable is unset.
    pub fn from_env(config: AnalystConfig) -> Result<Self> {
        let api_key =
            std::env::var(API_KEY_ENV).map_err(|_| RoastError::MissingApiKey(API_KEY_ENV.to_string()))?;
        Self::new(api_key, config)
    }

    /// Overrides the API base URL. Intended for tests.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[async_trait]
impl Analyst for GeminiAnalyst {
    async fn analyze(&self, text: &str, url: &str) -> Result<AuditResult> {
        let endpoint = format!("{}/models/{}:generateContent", self.base_url, self.config.model);

        let request_body = GenerateRequest {
            contents: vec![Content { parts: vec![Part { text: build_prompt(text, url) }] }],
            generation_config: GenerationConfig {
                temperature: self.config.temperature,
                max_output_tokens: self.config.max_output_tokens,
                response_mime_type: "application/json".to_string(),
                response_schema: audit_schema(),
            },
        };

        let response = self
            .client
            .post(&endpoint)
            .header("x-goog-api-key", &self.api_key)
            .header("Content-Type", "application/json")
            .json(&request_body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    RoastError::Timeout { timeout: self.config.timeout }
                } else {
                    RoastError::HttpError(e)
                }
            })?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(RoastError::QuotaExceeded);
        }
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(RoastError::ServiceError {
                status: status.as_u16(),
                message: summarize(&message),
            });
        }

        let body: GenerateResponse = response
            .json()
            .await
            .map_err(|e| RoastError::MalformedResponse(e.to_string()))?;

        let reply = body
            .candidates
            .and_then(|candidates| candidates.into_iter().next())
            .and_then(|candidate| candidate.content)
            .and_then(|content| content.parts)
            .and_then(|parts| parts.into_iter().next())
            .and_then(|part| part.text)
            .ok_or_else(|| {
                RoastError::MalformedResponse("response carries no candidate text".to_string())
            })?;

        audit_from_reply(&reply, url)
    }
}

/// The roast prompt sent alongside the scraped copy.
fn build_prompt(text: &str, url: &str) -> String {
    format!(
        "You are a brutally honest conversion copywriter reviewing a landing page. \
         Roast the copy below: be specific, be harsh, and never pad the verdict \
         with compliments. Score the clarity of the offer from 0 to 100.\n\n\
         Landing page URL: {url}\n\n\
         Visible page text:\n{text}"
    )
}

/// Response schema mirroring [`AuditResult`], minus the locally-known URL.
fn audit_schema() -> serde_json::Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "clarity_score": { "type": "INTEGER", "description": "0-100" },
            "clarity_critique": { "type": "STRING" },
            "boring_headline_reason": { "type": "STRING" },
            "target_audience_analysis": { "type": "STRING" },
            "brutal_improvements": { "type": "ARRAY", "items": { "type": "STRING" } },
            "overall_roast": { "type": "STRING" }
        },
        "required": [
            "clarity_score",
            "clarity_critique",
            "boring_headline_reason",
            "target_audience_analysis",
            "brutal_improvements",
            "overall_roast"
        ]
    })
}

/// Decodes a model reply into a validated [`AuditResult`].
///
/// The `url` field always reflects the submitted URL, regardless of what
/// the model echoed back.
fn audit_from_reply(reply: &str, url: &str) -> Result<AuditResult> {
    let mut result: AuditResult = serde_json::from_str(strip_code_fence(reply))
        .map_err(|e| RoastError::MalformedResponse(e.to_string()))?;

    result.url = url.to_string();
    result.validate()?;

    Ok(result)
}

/// Removes a surrounding ```json fence when the model emits one anyway.
fn strip_code_fence(reply: &str) -> &str {
    let trimmed = reply.trim();
    trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .and_then(|rest| rest.strip_suffix("```"))
        .map(str::trim)
        .unwrap_or(trimmed)
}

/// First line of a service error body, capped for display.
fn summarize(message: &str) -> String {
    let line = message.lines().next().unwrap_or("").trim();
    match line.char_indices().nth(200) {
        Some((idx, _)) => format!("{}...", &line[..idx]),
        None => line.to_string(),
    }
}

#[derive(Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Serialize, Deserialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    max_output_tokens: u32,
    response_mime_type: String,
    response_schema: serde_json::Value,
}

#[derive(Deserialize)]
struct GenerateResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<ReplyContent>,
}

#[derive(Deserialize)]
struct ReplyContent {
    parts: Option<Vec<ReplyPart>>,
}

#[derive(Deserialize)]
struct ReplyPart {
    text: Option<String>,
}
