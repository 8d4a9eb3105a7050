use anyhow::Context;
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::cli::Args;
use crate::config::RunConfig;

mod cli;
mod config;
mod data_handling;
mod errors;
mod helper_functions;
mod models;
mod orchestrator;
mod output;
mod prediction_tools;

fn main() -> anyhow::Result<()> {
    // Setup logging; records go to the output file, logs to stderr
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    info!("Starting HLA-Inception prediction");

    if let Some(threads) = args.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .context("failed to size the worker pool")?;
    }

    let config = RunConfig::from_args(&args)?;

    let report = match orchestrator::execute(&config) {
        Ok(report) => report,
        Err(e) => {
            error!("{}", e);
            return Err(e)
                .with_context(|| format!("prediction run for {} failed", config.input.display()));
        }
    };

    info!(
        "Done: {} alleles, {} predictions in {}",
        report.summaries.len(),
        report.records_written,
        config.output.display()
    );
    Ok(())
}
