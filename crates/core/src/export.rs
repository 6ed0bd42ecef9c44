//! PDF export for audit results.
//!
//! Serializes a critique into a downloadable document via `printpdf`'s
//! HTML renderer. The report is first laid out as deliberately simple HTML
//! (headings and paragraphs only) so the renderer has nothing exotic to
//! trip over. Export is a pure side effect: the [`AuditResult`] is never
//! mutated, and repeated exports of the same result are equivalent.

use std::collections::BTreeMap;
use std::path::Path;

use printpdf::{GeneratePdfOptions, PdfDocument};

use crate::audit::AuditResult;
use crate::report::score_verdict;
use crate::{Result, RoastError};

/// Renders the critique as PDF bytes.
pub fn render_pdf(result: &AuditResult) -> Result<Vec<u8>> {
    let html = report_html(result);
    let mut warnings = Vec::new();

    let doc = PdfDocument::from_html(
        &html,
        &BTreeMap::new(),
        &BTreeMap::new(),
        &GeneratePdfOptions::default(),
        &mut warnings,
    )
    .map_err(|e| RoastError::PdfError(e.to_string()))?;

    Ok(doc.save(&Default::default(), &mut warnings))
}

/// Renders the critique and writes it to `path`.
pub fn write_pdf(result: &AuditResult, path: &Path) -> Result<()> {
    let bytes = render_pdf(result)?;
    std::fs::write(path, bytes).map_err(RoastError::from)
}

/// Minimal HTML rendition of the report for the PDF renderer.
fn report_html(result: &AuditResult) -> String {
    let mut html = String::new();

    html.push_str(
        "<!DOCTYPE html><html><head><style>body { font-family: sans-serif; }</style></head><body>",
    );
    html.push_str("<h1>Landing Page Audit</h1>");
    html.push_str(&format!("<p>URL: {}</p>", escape(&result.url)));
    html.push_str(&format!(
        "<p>Clarity score: {}/100 ({})</p>",
        result.clarity_score,
        score_verdict(result.clarity_score)
    ));

    let sections = [
        ("Clarity", result.clarity_critique.as_str()),
        ("Headline", result.boring_headline_reason.as_str()),
        ("Audience", result.target_audience_analysis.as_str()),
    ];

    for (name, body) in sections {
        html.push_str(&format!("<h2>{}</h2><p>{}</p>", name, escape(body)));
    }

    html.push_str("<h2>Improvements</h2><ol>");
    for improvement in &result.brutal_improvements {
        html.push_str(&format!("<li>{}</li>", escape(improvement)));
    }
    html.push_str("</ol>");

    html.push_str(&format!(
        "<h2>Verdict</h2><p>{}</p>",
        escape(&result.overall_roast)
    ));
    html.push_str("</body></html>");

    html
}

/// Escape text for embedding in the report HTML.
fn escape(text: &str) -> String {
    text.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> AuditResult {
        AuditResult {
            url: "https://example.com".to_string(),
            clarity_score: 42,
            clarity_critique: "Vague value proposition.".to_string(),
            boring_headline_reason: "Generic claim, zero tension.".to_string(),
            target_audience_analysis: "Speaks to <nobody> in particular.".to_string(),
            brutal_improvements: vec!["Lead with the outcome.".to_string()],
            overall_roast: "A brochure, not a pitch.".to_string(),
        }
    }

    #[test]
    fn test_report_html_structure() {
        let html = report_html(&sample());
        assert!(html.contains("<h1>Landing Page Audit</h1>"));
        assert!(html.contains("Clarity score: 42/100"));
        assert!(html.contains("<li>Lead with the outcome.</li>"));
    }

    #[test]
    fn test_report_html_escapes_critique_text() {
        let html = report_html(&sample());
        assert!(html.contains("&lt;nobody&gt;"));
        assert!(!html.contains("<nobody>"));
    }

    #[test]
    fn test_render_pdf_produces_document() {
        let bytes = render_pdf(&sample()).unwrap();
        assert!(!bytes.is_empty());
        assert_eq!(&bytes[..5], b"%PDF-");
    }

    #[test]
    fn test_render_pdf_does_not_mutate_result() {
        let result = sample();
        let before = result.clone();

        let first = render_pdf(&result).unwrap();
        let second = render_pdf(&result).unwrap();

        assert_eq!(result, before);
        assert!(!first.is_empty());
        assert!(!second.is_empty());
    }

    #[test]
    fn test_write_pdf() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("audit.pdf");

        write_pdf(&sample(), &path).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(&bytes[..5], b"%PDF-");
    }
}
