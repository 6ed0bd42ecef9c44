//! Report rendering for audit results.
//!
//! Pure presentation over an already-validated [`AuditResult`]: nothing in
//! this module touches orchestrator state or can fail except JSON
//! serialization.

use std::str::FromStr;

use crate::audit::AuditResult;
use crate::{Result, RoastError};

/// Output format options for the rendered report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    /// Plain text with underlined section headers.
    Text,
    /// Markdown with a score line and ordered improvement list.
    Markdown,
    /// Pretty-printed JSON in the wire shape.
    Json,
}

impl FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(Self::Text),
            "markdown" | "md" => Ok(Self::Markdown),
            "json" => Ok(Self::Json),
            _ => Err(format!("Invalid format: {}. Valid options: text, markdown, json", s)),
        }
    }
}

/// Renders the critique in the requested format.
pub fn render(result: &AuditResult, format: ReportFormat) -> Result<String> {
    match format {
        ReportFormat::Text => Ok(render_text(result)),
        ReportFormat::Markdown => Ok(render_markdown(result)),
        ReportFormat::Json => render_json(result),
    }
}

/// One-word verdict for a clarity score.
pub fn score_verdict(score: u8) -> &'static str {
    match score {
        0..=39 => "rough",
        40..=69 => "mixed",
        _ => "solid",
    }
}

/// Plain text report, title underlined in the classic style.
pub fn render_text(result: &AuditResult) -> String {
    let title = "Landing Page Audit";
    let mut out = String::new();

    out.push_str(title);
    out.push('\n');
    out.push_str(&"=".repeat(title.len()));
    out.push('\n');
    out.push_str(&format!("URL: {}\n", result.url));
    out.push_str(&format!(
        "Clarity score: {}/100 ({})\n",
        result.clarity_score,
        score_verdict(result.clarity_score)
    ));

    let sections = [
        ("Clarity", result.clarity_critique.as_str()),
        ("Headline", result.boring_headline_reason.as_str()),
        ("Audience", result.target_audience_analysis.as_str()),
    ];

    for (name, body) in sections {
        out.push('\n');
        out.push_str(name);
        out.push('\n');
        out.push_str(&"-".repeat(name.len()));
        out.push('\n');
        out.push_str(body);
        out.push('\n');
    }

    out.push_str("\nImprovements\n------------\n");
    for (i, improvement) in result.brutal_improvements.iter().enumerate() {
        out.push_str(&format!("{}. {}\n", i + 1, improvement));
    }

    out.push_str("\nVerdict\n-------\n");
    out.push_str(&result.overall_roast);
    out.push('\n');

    out
}

/// Markdown report.
pub fn render_markdown(result: &AuditResult) -> String {
    let mut out = String::new();

    out.push_str("# Landing Page Audit\n\n");
    out.push_str(&format!("**URL:** {}\n\n", result.url));
    out.push_str(&format!(
        "**Clarity score:** {}/100 ({})\n\n",
        result.clarity_score,
        score_verdict(result.clarity_score)
    ));

    out.push_str("## Clarity\n\n");
    out.push_str(&result.clarity_critique);
    out.push_str("\n\n## Headline\n\n");
    out.push_str(&result.boring_headline_reason);
    out.push_str("\n\n## Audience\n\n");
    out.push_str(&result.target_audience_analysis);

    out.push_str("\n\n## Improvements\n\n");
    for (i, improvement) in result.brutal_improvements.iter().enumerate() {
        out.push_str(&format!("{}. {}\n", i + 1, improvement));
    }

    out.push_str("\n## Verdict\n\n");
    out.push_str(&result.overall_roast);
    out.push('\n');

    out
}

/// Pretty JSON in the wire shape.
pub fn render_json(result: &AuditResult) -> Result<String> {
    serde_json::to_string_pretty(result).map_err(|e| RoastError::MalformedResponse(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn sample() -> AuditResult {
        AuditResult {
            url: "https://example.com".to_string(),
            clarity_score: 42,
            clarity_critique: "Vague value proposition.".to_string(),
            boring_headline_reason: "Generic claim, zero tension.".to_string(),
            target_audience_analysis: "Speaks to nobody in particular.".to_string(),
            brutal_improvements: vec![
                "Lead with the outcome.".to_string(),
                "Cut the jargon.".to_string(),
            ],
            overall_roast: "A brochure, not a pitch.".to_string(),
        }
    }

    #[test]
    fn test_format_from_str() {
        assert_eq!("text".parse::<ReportFormat>().unwrap(), ReportFormat::Text);
        assert_eq!("md".parse::<ReportFormat>().unwrap(), ReportFormat::Markdown);
        assert_eq!("JSON".parse::<ReportFormat>().unwrap(), ReportFormat::Json);
        assert!("pdf2".parse::<ReportFormat>().is_err());
    }

    #[test]
    fn test_score_verdict_bands() {
        assert_eq!(score_verdict(0), "rough");
        assert_eq!(score_verdict(39), "rough");
        assert_eq!(score_verdict(40), "mixed");
        assert_eq!(score_verdict(70), "solid");
        assert_eq!(score_verdict(100), "solid");
    }

    #[rstest]
    #[case(ReportFormat::Text)]
    #[case(ReportFormat::Markdown)]
    #[case(ReportFormat::Json)]
    fn test_every_format_carries_the_critique(#[case] format: ReportFormat) {
        let rendered = render(&sample(), format).unwrap();
        assert!(rendered.contains("https://example.com"));
        assert!(rendered.contains("42"));
        assert!(rendered.contains("Lead with the outcome."));
        assert!(rendered.contains("A brochure, not a pitch."));
    }

    #[test]
    fn test_text_report_layout() {
        let text = render_text(&sample());
        assert!(text.starts_with("Landing Page Audit\n=================="));
        assert!(text.contains("Clarity score: 42/100 (mixed)"));
        assert!(text.contains("1. Lead with the outcome."));
        assert!(text.contains("2. Cut the jargon."));
    }

    #[test]
    fn test_markdown_report_sections() {
        let md = render_markdown(&sample());
        assert!(md.contains("# Landing Page Audit"));
        assert!(md.contains("## Improvements"));
        assert!(md.contains("**Clarity score:** 42/100"));
    }

    #[test]
    fn test_json_report_is_wire_shape() {
        let json = render_json(&sample()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["clarity_score"], 42);
        assert_eq!(value["brutal_improvements"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_rendering_does_not_mutate_result() {
        let result = sample();
        let before = result.clone();
        let _ = render_text(&result);
        let _ = render_markdown(&result);
        let _ = render_json(&result).unwrap();
        assert_eq!(result, before);
    }
}
