//! # nepse-runner
//!
//! Entry point for the NEPSE cloud collector.
//!
//! Loads a JSON configuration file, performs one collection run, and exits.
//! Absence of data (market closed, API unreachable, every endpoint empty)
//! is a normal outcome: the process still exits 0. Only an unreadable
//! config aborts with a failure status.
//!
//! # Usage
//!
//! ```bash
//! nepse-runner config.json --log-level info --run-id 1234
//! ```

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::{error, info};

use nepse_collect::{ApiClient, DatasetSink, collect_single_run};

/// NEPSE Cloud Data Collector.
#[derive(Parser)]
#[command(name = "nepse-runner", about = "NEPSE Cloud Data Collector")]
struct Cli {
    /// Configuration file path (JSON).
    config: PathBuf,

    /// Log level (trace, debug, info, warn, error).
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Optional log directory for file output.
    #[arg(long)]
    log_dir: Option<String>,

    /// External run identifier; falls back to GITHUB_RUN_NUMBER, then "local".
    #[arg(long)]
    run_id: Option<String>,
}

impl Cli {
    fn resolve_run_id(&self) -> String {
        self.run_id
            .clone()
            .or_else(|| std::env::var("GITHUB_RUN_NUMBER").ok())
            .unwrap_or_else(|| "local".to_string())
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // 1. Initialize logging
    nepse_core::logging::init_logging(&cli.log_level, cli.log_dir.as_deref(), "nepse-collector");

    info!("nepse-runner starting — config={}, log_level={}", cli.config.display(), cli.log_level,);

    // 2. Load configuration (the only hard failure: an operator mistake)
    let config = nepse_core::config::load_config(&cli.config)?;
    let run_id = cli.resolve_run_id();
    info!("config loaded — api={}, run_id={run_id}", config.effective_api_base_url(),);

    // 3. Build the collaborators and run one collection attempt
    let client = ApiClient::new(&config)?;
    let sink = DatasetSink::new(config.effective_data_dir());

    match collect_single_run(&client, &sink, &run_id).await {
        Ok(Some(outcome)) => {
            println!("SUCCESS: data collected -> {}", outcome.dataset_path.display());
        }
        Ok(None) => {
            println!("INFO: no data collected (market closed or API unavailable)");
        }
        Err(e) => {
            // A sink fault loses this run's files but must not fail the
            // scheduled job.
            error!("error saving data: {e:#}");
            println!("INFO: no data collected (market closed or API unavailable)");
        }
    }

    Ok(())
}
