pub mod analyze;
pub mod audit;
pub mod error;
#[cfg(feature = "pdf")]
pub mod export;
pub mod orchestrator;
pub mod report;
pub mod scrape;

pub use analyze::{Analyst, AnalystConfig, GeminiAnalyst, API_KEY_ENV};
pub use audit::{AuditResult, AuditState, ScrapingResult};
pub use error::{Result, RoastError};
#[cfg(feature = "pdf")]
pub use export::{render_pdf, write_pdf};
pub use orchestrator::Auditor;
pub use report::{render, render_json, render_markdown, render_text, ReportFormat};
pub use scrape::{visible_text, HttpScraper, ScrapeConfig, Scraper};
