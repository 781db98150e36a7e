//! gmi-analysis - command-line host for the analysis core
//!
//! Reads one `AnalysisRequest` (or an array of them) as JSON, runs the
//! pipeline, and writes each outcome wrapped in a run envelope as pretty JSON.
//!
//! Configuration is resolved as: `--config`, then `GMI_CONFIG`, then
//! `~/.config/gmi/gmi.toml`, then built-in defaults.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use clap::Parser;
use gmi_analysis::pipeline::load_requests;
use gmi_analysis::{analyze_batch, AnalysisConfig, AnalysisOutcome};
use gmi_common::config::{ConfigFileResolver, TomlConfig};
use gmi_common::logging::init_logging;
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

/// Command-line arguments for gmi-analysis
#[derive(Parser, Debug)]
#[command(name = "gmi-analysis")]
#[command(about = "Validate, estimate, match comparables and prioritize actions for a game")]
#[command(version)]
struct Args {
    /// JSON file with one analysis request or an array of requests
    input: PathBuf,

    /// Configuration file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write results here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Hourly rate for action time investment (overrides the config file)
    #[arg(long, env = "GMI_HOURLY_RATE")]
    hourly_rate: Option<f64>,

    /// Exit with an error when any subject is rejected by validation
    #[arg(long)]
    strict: bool,
}

/// One run's outcome with its identity
#[derive(Debug, Serialize)]
struct RunEnvelope {
    run_id: Uuid,
    generated_at: DateTime<Utc>,
    #[serde(flatten)]
    outcome: AnalysisOutcome,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config_path = ConfigFileResolver::new("gmi")
        .with_cli_arg(args.config.clone())
        .resolve();

    let bootstrap = TomlConfig::load_or_default(config_path.as_deref())
        .context("Failed to load configuration file")?;
    init_logging(&bootstrap.logging).context("Failed to initialize logging")?;

    info!("Starting gmi-analysis v{}", env!("CARGO_PKG_VERSION"));

    let mut config = AnalysisConfig::load(config_path.as_deref())
        .context("Failed to load analysis configuration")?;
    if let Some(rate) = args.hourly_rate {
        config.roi.hourly_rate = rate;
        config.check().context("Invalid --hourly-rate")?;
    }

    let requests = load_requests(&args.input)
        .with_context(|| format!("Failed to read requests from {}", args.input.display()))?;
    info!("Analyzing {} request(s)", requests.len());

    let outcomes = analyze_batch(&requests, &config);
    let rejected = outcomes.iter().filter(|o| !o.is_completed()).count();
    let total = outcomes.len();

    let generated_at = Utc::now();
    let envelopes: Vec<RunEnvelope> = outcomes
        .into_iter()
        .map(|outcome| RunEnvelope {
            run_id: Uuid::new_v4(),
            generated_at,
            outcome,
        })
        .collect();

    let rendered = match envelopes.as_slice() {
        [single] => serde_json::to_string_pretty(single),
        many => serde_json::to_string_pretty(many),
    }
    .context("Failed to serialize results")?;

    match &args.output {
        Some(path) => {
            std::fs::write(path, rendered.as_bytes())
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!("Results written to {}", path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{}", rendered).context("Failed to write results")?;
        }
    }

    if rejected > 0 {
        warn!("{} of {} run(s) rejected by validation", rejected, total);
        if args.strict {
            bail!("{} of {} run(s) rejected by validation", rejected, total);
        }
    }

    Ok(())
}
