//! Audit data model: critique results, scrape outcomes, and lifecycle states.
//!
//! This module defines the [`AuditResult`] struct which represents the
//! structured critique returned by the analysis service, along with the
//! transient [`ScrapingResult`] and the [`AuditState`] lifecycle enum.

use serde::{Deserialize, Serialize};

use crate::{Result, RoastError};

/// The structured critique of a landing page.
///
/// Field names match the analysis service's wire contract exactly; the
/// renderer and PDF exporter both consume this shape as-is. An AuditResult
/// is immutable once produced: the orchestrator stores it and hands out
/// shared references until reset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditResult {
    /// The audited landing page URL.
    ///
    /// Absent from the analysis reply (the response schema omits it); the
    /// analysis client fills it in from the submitted URL after decoding.
    #[serde(default)]
    pub url: String,

    /// How clearly the page communicates its offer, 0 to 100.
    pub clarity_score: u8,

    /// Critique of the page's overall message clarity.
    pub clarity_critique: String,

    /// Why the headline fails to grab attention.
    pub boring_headline_reason: String,

    /// Who the copy actually speaks to, versus who it should.
    pub target_audience_analysis: String,

    /// Concrete rewrites, in priority order.
    pub brutal_improvements: Vec<String>,

    /// The closing verdict on the page.
    pub overall_roast: String,
}

impl AuditResult {
    /// Checks that the critique is complete and in range.
    ///
    /// The analysis client runs this on every decoded response before
    /// returning it, so downstream rendering never sees a partial critique.
    ///
    /// # Errors
    ///
    /// Returns [`RoastError::MalformedResponse`] naming the first offending
    /// field.
    pub fn validate(&self) -> Result<()> {
        if self.clarity_score > 100 {
            return Err(RoastError::MalformedResponse(format!(
                "clarity_score {} out of range (expected 0-100)",
                self.clarity_score
            )));
        }

        let required = [
            ("clarity_critique", &self.clarity_critique),
            ("boring_headline_reason", &self.boring_headline_reason),
            ("target_audience_analysis", &self.target_audience_analysis),
            ("overall_roast", &self.overall_roast),
        ];

        for (name, value) in required {
            if value.trim().is_empty() {
                return Err(RoastError::MalformedResponse(format!("missing field: {}", name)));
            }
        }

        if self.brutal_improvements.is_empty() {
            return Err(RoastError::MalformedResponse(
                "missing field: brutal_improvements".to_string(),
            ));
        }

        Ok(())
    }

    /// Gets the critique as structured JSON.
    pub fn to_json(&self) -> Result<serde_json::Value> {
        serde_json::to_value(self).map_err(|e| RoastError::MalformedResponse(e.to_string()))
    }
}

/// Outcome of a single scrape attempt.
///
/// Transient: the orchestrator consumes it immediately and never stores it.
/// Remote failures (blocked access, empty pages) are carried as
/// `success == false` with a reason rather than as errors, mirroring the
/// scrape service's own reply shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScrapingResult {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ScrapingResult {
    /// A successful scrape carrying the page's visible text.
    pub fn ok(text: impl Into<String>) -> Self {
        Self { success: true, text: Some(text.into()), error: None }
    }

    /// A failed scrape carrying a human-readable reason.
    pub fn failed(reason: impl Into<String>) -> Self {
        Self { success: false, text: None, error: Some(reason.into()) }
    }
}

/// Lifecycle of one audit, from submission to report.
///
/// `Complete` and `Error` are stable until the user resets; the three
/// in-flight states never expose a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuditState {
    Idle,
    Scraping,
    Analyzing,
    Complete,
    Error,
}
