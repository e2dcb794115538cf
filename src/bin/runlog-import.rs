// ABOUTME: Command-line importer for a HealthExport CSV file on disk
// ABOUTME: Runs the same pipeline as the server; --dry-run stops before anything is logged
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Usage:
//! ```bash
//! # Import an export
//! runlog-import ~/Downloads/Workouts.csv
//!
//! # Show what would be logged without logging it
//! runlog-import ~/Downloads/Workouts.csv --dry-run
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use runlog::config::ImportConfig;
use runlog::external::{GraphJsonClient, TimeSeriesStore};
use runlog::import::ImportPipeline;
use runlog::logging;
use serde_json::json;
use tokio::fs;
use tracing::info;

#[derive(Parser)]
#[command(
    name = "runlog-import",
    about = "Import running activities from a HealthExport CSV file",
    long_about = "Parses, deduplicates and normalizes the runs in a HealthExport CSV and logs \
                  them with their heart-rate zones to the configured GraphJSON collections."
)]
struct Cli {
    /// Path to the HealthExport CSV
    path: PathBuf,

    /// Run every stage except logging and print what would be sent
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    logging::init_from_env()?;

    let config = Arc::new(ImportConfig::from_env()?);
    info!("{}", config.summary());

    let store: Arc<dyn TimeSeriesStore> = Arc::new(GraphJsonClient::new(&config.graphjson)?);
    let pipeline = ImportPipeline::new(config, store);

    let csv_text = fs::read_to_string(&cli.path).await?;
    info!(path = %cli.path.display(), bytes = csv_text.len(), "Read export");

    let report = if cli.dry_run {
        let plan = pipeline.plan(&csv_text).await?;
        json!({
            "dryRun": true,
            "eventCount": plan.events.len(),
            "filteredTimestampsCount": plan.filtered_timestamps_count,
            "alreadyLoggedCount": plan.already_logged_count,
            "skippedRows": plan.skipped_rows,
        })
    } else {
        serde_json::to_value(pipeline.run(&csv_text).await?)?
    };

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
