//! Error types for Roastline operations.
//!
//! This module defines the main error type [`RoastError`] which represents
//! all possible errors that can occur while scraping a landing page,
//! requesting a critique, and exporting the report.
//!
//! # Example
//!
//! ```rust
//! use roastline_core::{RoastError, Result};
//!
//! fn check_score(score: u8) -> Result<()> {
//!     if score > 100 {
//!         return Err(RoastError::MalformedResponse("score out of range".to_string()));
//!     }
//!     Ok(())
//! }
//! ```

use thiserror::Error;

/// Main error type for audit operations.
///
/// This enum represents all possible errors that can occur during
/// page scraping, critique generation, and report export.
#[derive(Error, Debug)]
pub enum RoastError {
    /// HTTP request errors from reqwest.
    ///
    /// This variant wraps network errors, DNS failures, connection issues,
    /// and other HTTP-related problems.
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Request timeout.
    ///
    /// Returned when an HTTP request exceeds the configured timeout duration.
    #[error("Request timed out after {timeout} seconds")]
    Timeout { timeout: u64 },

    /// Invalid URL provided.
    ///
    /// Returned when a URL cannot be parsed or is malformed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The target page refused to serve content.
    ///
    /// Returned when the landing page responds with a non-success status,
    /// typically bot protection or an access restriction.
    #[error("Website blocked the request (HTTP {status})")]
    Blocked { status: u16 },

    /// The page was fetched but contained no visible text.
    #[error("Failed to access website content. It might be blocked or empty.")]
    EmptyContent,

    /// Analysis credential absent from the environment.
    #[error("API key not found in environment variable '{0}'")]
    MissingApiKey(String),

    /// The generative service rejected the request for quota reasons.
    #[error("quota exceeded")]
    QuotaExceeded,

    /// The generative service returned a non-success status.
    #[error("Analysis service error (HTTP {status}): {message}")]
    ServiceError { status: u16, message: String },

    /// The critique response could not be decoded.
    ///
    /// Returned when the service reply is not valid JSON, is missing
    /// required fields, or carries out-of-range values.
    #[error("Malformed analysis response: {0}")]
    MalformedResponse(String),

    /// File write errors.
    ///
    /// Wraps standard I/O errors for output operations.
    #[error("Failed to write output: {0}")]
    WriteError(#[from] std::io::Error),

    /// PDF generation failure.
    ///
    /// This variant is only available when the `pdf` feature is enabled.
    #[cfg(feature = "pdf")]
    #[error("PDF generation failed: {0}")]
    PdfError(String),
}

/// Result type alias for RoastError.
///
/// This is a convenience alias for `std::result::Result<T, RoastError>`.
pub type Result<T> = std::result::Result<T, RoastError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = RoastError::InvalidUrl("not a url".to_string());
        assert!(err.to_string().contains("Invalid URL"));
    }

    #[test]
    fn test_blocked_error() {
        let err = RoastError::Blocked { status: 403 };
        assert!(err.to_string().contains("403"));
    }

    #[test]
    fn test_timeout_error() {
        let err = RoastError::Timeout { timeout: 30 };
        assert!(err.to_string().contains("30"));
    }

    #[test]
    fn test_quota_error_message() {
        assert_eq!(RoastError::QuotaExceeded.to_string(), "quota exceeded");
    }

    #[test]
    fn test_missing_api_key_names_variable() {
        let err = RoastError::MissingApiKey("GEMINI_API_KEY".to_string());
        assert!(err.to_string().contains("GEMINI_API_KEY"));
    }
}
