//! The audit state machine: scrape, then analyze, then hold the result.
//!
//! [`Auditor`] sequences one [`Scraper`] call and one [`Analyst`] call per
//! submission and tracks the five-state lifecycle
//! (Idle, Scraping, Analyzing, Complete, Error). Both calls run on the
//! caller's task; there is never more than one submission in flight.
//!
//! # Example
//!
//! ```rust,no_run
//! use roastline_core::{AnalystConfig, Auditor, GeminiAnalyst, HttpScraper, ScrapeConfig};
//!
//! # #[tokio::main]
//! # async fn example() -> roastline_core::Result<()> {
//! let scraper = HttpScraper::new(ScrapeConfig::default())?;
//! let analyst = GeminiAnalyst::from_env(AnalystConfig::default())?;
//! let mut auditor = Auditor::new(Box::new(scraper), Box::new(analyst));
//!
//! auditor.submit("https://example.com", |_| {}).await;
//! if let Some(result) = auditor.result() {
//!     println!("clarity: {}/100", result.clarity_score);
//! }
//! # Ok(())
//! # }
//! ```

use crate::analyze::Analyst;
use crate::audit::{AuditResult, AuditState};
use crate::scrape::Scraper;
use crate::RoastError;

/// Shown when an error escapes classification entirely.
const UNEXPECTED_ERROR: &str = "An unexpected error occurred.";

/// Drives one landing-page audit at a time.
///
/// Owns the current [`AuditState`] together with its payload: a result in
/// `Complete`, an error message in `Error`, and neither otherwise. Only
/// [`Auditor::submit`] and [`Auditor::reset`] mutate that pair.
pub struct Auditor {
    state: AuditState,
    result: Option<AuditResult>,
    error: Option<String>,
    scraper: Box<dyn Scraper>,
    analyst: Box<dyn Analyst>,
}

impl Auditor {
    /// Creates an idle auditor over the given clients.
    pub fn new(scraper: Box<dyn Scraper>, analyst: Box<dyn Analyst>) -> Self {
        Self { state: AuditState::Idle, result: None, error: None, scraper, analyst }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> AuditState {
        self.state
    }

    /// The stored critique. `Some` exactly when the state is `Complete`.
    pub fn result(&self) -> Option<&AuditResult> {
        self.result.as_ref()
    }

    /// The user-visible failure. `Some` exactly when the state is `Error`.
    pub fn error_message(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Runs one audit: scrape the URL, then request the critique.
    ///
    /// Accepted from `Idle` and `Error` (a resubmission clears the stale
    /// error first); ignored from every other state, which is what makes
    /// overlapping submissions impossible. `on_state` observes each
    /// transition in order, so a front-end can re-render per state.
    ///
    /// When this returns, exactly one of the terminal pairs holds:
    /// `Complete` with a result, or `Error` with a message. A scrape
    /// failure never reaches the analyst; an analysis failure discards the
    /// scraped text.
    pub async fn submit(&mut self, url: &str, mut on_state: impl FnMut(AuditState)) {
        match self.state {
            AuditState::Idle | AuditState::Error => {}
            _ => return,
        }

        self.error = None;
        self.result = None;

        match self.run(url, &mut on_state).await {
            Ok(result) => {
                self.result = Some(result);
                self.transition(AuditState::Complete, &mut on_state);
            }
            Err(message) => {
                self.error = Some(message);
                self.transition(AuditState::Error, &mut on_state);
            }
        }
    }

    /// Returns to `Idle`, discarding any result or error.
    ///
    /// Covers both the "try again" affordance from `Error` and the
    /// "new audit" affordance from `Complete`.
    pub fn reset(&mut self) {
        self.state = AuditState::Idle;
        self.result = None;
        self.error = None;
    }

    /// The two sequential calls, with failures flattened to one message.
    async fn run(
        &mut self,
        url: &str,
        on_state: &mut impl FnMut(AuditState),
    ) -> std::result::Result<AuditResult, String> {
        self.transition(AuditState::Scraping, on_state);

        let scraped = self.scraper.scrape(url).await.map_err(user_message)?;

        let text = match (scraped.success, scraped.text) {
            (true, Some(text)) if !text.is_empty() => text,
            _ => {
                return Err(scraped
                    .error
                    .unwrap_or_else(|| RoastError::EmptyContent.to_string()));
            }
        };

        self.transition(AuditState::Analyzing, on_state);

        self.analyst.analyze(&text, url).await.map_err(user_message)
    }

    fn transition(&mut self, next: AuditState, on_state: &mut impl FnMut(AuditState)) {
        self.state = next;
        on_state(next);
    }
}

/// Converts an error into the banner text shown to the user.
fn user_message(err: RoastError) -> String {
    let message = err.to_string();
    if message.is_empty() {
        UNEXPECTED_ERROR.to_string()
    } else {
        message
    }
}
