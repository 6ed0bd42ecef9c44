use std::fs;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::Context;
use clap::Parser;
use owo_colors::OwoColorize;
use roastline_core::{
    AnalystConfig, AuditState, Auditor, GeminiAnalyst, HttpScraper, ReportFormat, ScrapeConfig,
    render,
};

mod echo;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Output format for the audit report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Text,
    Markdown,
    Json,
    Pdf,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(Self::Text),
            "markdown" | "md" => Ok(Self::Markdown),
            "json" => Ok(Self::Json),
            "pdf" => Ok(Self::Pdf),
            _ => Err(format!("Invalid format: {}. Valid options: text, markdown, json, pdf", s)),
        }
    }
}

/// Roast a landing page: scrape its copy and audit it with Gemini
#[derive(Parser, Debug)]
#[command(name = "roastline")]
#[command(author = "Roastline Contributors")]
#[command(version = VERSION)]
#[command(about = "Roast landing-page copy with an AI audit", long_about = None)]
struct Args {
    /// Landing page URL to audit
    #[arg(value_name = "URL")]
    url: String,

    /// Output file (default: stdout; required for pdf)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Output format (text, markdown, json, pdf)
    #[arg(short, long, default_value = "text", value_name = "FORMAT")]
    format: OutputFormat,

    /// HTTP timeout in seconds, applied to both network calls
    #[arg(long, default_value = "30", value_name = "SECS")]
    timeout: u64,

    /// Custom User-Agent for the scrape request
    #[arg(long, value_name = "UA")]
    user_agent: Option<String>,

    /// Gemini model to request the critique from
    #[arg(long, default_value = "gemini-2.0-flash-lite", value_name = "NAME")]
    model: String,

    /// Maximum characters of page text sent for analysis
    #[arg(long, default_value = "15000", value_name = "NUM")]
    max_chars: usize,

    /// Enable step-by-step progress output
    #[arg(short, long)]
    verbose: bool,
}

/// Prepend https:// when the user omits the scheme.
fn normalize_url(input: &str) -> String {
    if input.starts_with("http://") || input.starts_with("https://") {
        input.to_string()
    } else {
        format!("https://{}", input)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if args.verbose {
        echo::print_banner();
    }

    if args.format == OutputFormat::Pdf && args.output.is_none() {
        anyhow::bail!("--format pdf requires --output FILE");
    }

    let url = normalize_url(&args.url);

    let scrape_config = ScrapeConfig {
        timeout: args.timeout,
        user_agent: args
            .user_agent
            .unwrap_or_else(|| ScrapeConfig::default().user_agent),
        max_chars: args.max_chars,
    };

    let analyst_config = AnalystConfig {
        model: args.model.clone(),
        timeout: args.timeout,
        ..AnalystConfig::default()
    };

    let scraper = HttpScraper::new(scrape_config).context("Failed to build the HTTP client")?;
    let analyst = GeminiAnalyst::from_env(analyst_config)
        .context("Gemini credentials are required to run an audit")?;

    let mut auditor = Auditor::new(Box::new(scraper), Box::new(analyst));

    if args.verbose {
        echo::print_info(&format!("Model: {}", args.model));
    }

    let verbose = args.verbose;
    auditor
        .submit(&url, |state| {
            if verbose {
                match state {
                    AuditState::Scraping => {
                        echo::print_step(1, 3, &format!("Scraping {}", url.bright_white().underline()))
                    }
                    AuditState::Analyzing => echo::print_step(2, 3, "Requesting the critique"),
                    AuditState::Complete => echo::print_step(3, 3, "Rendering the report"),
                    AuditState::Idle | AuditState::Error => {}
                }
            }
        })
        .await;

    if auditor.state() == AuditState::Error {
        let message = auditor
            .error_message()
            .unwrap_or("An unexpected error occurred.");
        echo::print_error(message);
        anyhow::bail!("audit failed");
    }

    let Some(result) = auditor.result() else {
        anyhow::bail!("audit completed without a result");
    };

    if args.verbose {
        echo::print_info(&format!("Clarity score: {}/100", result.clarity_score));
    }

    match args.format {
        OutputFormat::Pdf => {
            // Presence checked before the audit ran.
            let Some(path) = &args.output else {
                anyhow::bail!("--format pdf requires --output FILE");
            };
            roastline_core::write_pdf(result, path)
                .with_context(|| format!("Failed to write PDF: {}", path.display()))?;
            echo::print_success(&format!("Report written to {}", path.display()));
        }
        other => {
            let format = match other {
                OutputFormat::Text => ReportFormat::Text,
                OutputFormat::Markdown => ReportFormat::Markdown,
                OutputFormat::Json => ReportFormat::Json,
                OutputFormat::Pdf => unreachable!(),
            };
            let rendered = render(result, format).context("Failed to render report")?;

            match &args.output {
                Some(path) => {
                    fs::write(path, rendered)
                        .with_context(|| format!("Failed to write to file: {}", path.display()))?;
                    echo::print_success(&format!("Report written to {}", path.display()));
                }
                None => print!("{}", rendered),
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_url() {
        assert_eq!(normalize_url("example.com"), "https://example.com");
        assert_eq!(normalize_url("https://example.com"), "https://example.com");
        assert_eq!(normalize_url("http://example.com"), "http://example.com");
    }

    #[test]
    fn test_output_format_from_str() {
        assert_eq!("pdf".parse::<OutputFormat>().unwrap(), OutputFormat::Pdf);
        assert_eq!("md".parse::<OutputFormat>().unwrap(), OutputFormat::Markdown);
        assert!("docx".parse::<OutputFormat>().is_err());
    }
}
