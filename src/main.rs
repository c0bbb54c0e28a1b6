use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use integra::company::{CompanyInfo, CompanySettings};
use integra::config::{Arithmetic, Config};
use integra::core::Amount;
use integra::invoices::{DocumentRequest, DocumentService, DocumentSummary, ParsePolicy};

/// Compute the tax table and totals of an invoice or quote
#[derive(Parser)]
#[command(name = "integra", version)]
struct Cli {
    /// Document JSON file; reads stdin when omitted
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Company settings JSON to attach as the document header
    #[arg(long)]
    company: Option<PathBuf>,

    /// Overrides INTEGRA_ARITHMETIC (decimal or float)
    #[arg(long)]
    arithmetic: Option<Arithmetic>,

    /// Reject documents containing invalid numbers
    #[arg(long)]
    strict: bool,

    /// Round amounts to the currency precision (decimal arithmetic only)
    #[arg(long)]
    rounded: bool,

    #[arg(long)]
    pretty: bool,
}

#[derive(Serialize)]
struct RenderPayload<A: Amount> {
    #[serde(skip_serializing_if = "Option::is_none")]
    company: Option<CompanyInfo>,
    #[serde(flatten)]
    summary: DocumentSummary<A>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    config
        .validate()
        .context("Configuration validation failed")?;

    // Initialize tracing; stdout is reserved for the JSON output
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("integra={}", config.app.log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    tracing::info!("Environment: {}", config.app.env);

    let policy = if cli.strict {
        ParsePolicy::Strict
    } else {
        config.calculation.parse_policy
    };
    let arithmetic = cli.arithmetic.unwrap_or(config.calculation.arithmetic);
    tracing::info!(%policy, %arithmetic, "Summarizing document");

    let request = match cli.input.as_deref() {
        Some(path) => DocumentRequest::from_path(path)
            .with_context(|| format!("Failed to load document {}", path.display()))?,
        None => DocumentRequest::from_reader(io::stdin().lock())
            .context("Failed to read document from stdin")?,
    };
    let company = cli.company.as_deref().map(load_company).transpose()?;
    let service = DocumentService::new(policy, config.calculation.default_currency);

    let output = match arithmetic {
        Arithmetic::Decimal => {
            let summary = service.summarize::<Decimal>(&request)?;
            let summary = if cli.rounded { summary.rounded() } else { summary };
            render(&RenderPayload { company, summary }, cli.pretty)?
        }
        Arithmetic::Float => {
            if cli.rounded {
                tracing::warn!("--rounded only applies to decimal arithmetic, ignoring it");
            }
            let summary = service.summarize::<f64>(&request)?;
            render(&RenderPayload { company, summary }, cli.pretty)?
        }
    };

    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{}", output).context("Failed to write summary")?;

    Ok(())
}

fn load_company(path: &Path) -> anyhow::Result<CompanyInfo> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let settings: CompanySettings = serde_json::from_str(&raw)
        .with_context(|| format!("Invalid company settings in {}", path.display()))?;
    Ok(CompanyInfo::from_settings(&settings))
}

fn render<A: Amount>(payload: &RenderPayload<A>, pretty: bool) -> anyhow::Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(payload)?
    } else {
        serde_json::to_string(payload)?
    };
    Ok(json)
}
