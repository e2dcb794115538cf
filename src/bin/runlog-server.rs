// ABOUTME: HTTP server binary accepting HealthExport CSV uploads for import
// ABOUTME: Loads configuration and logging from the environment, then serves the router
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Runlog Server Binary
//!
//! Serves `POST /api/import`, `GET /health` and `GET /ready`.

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use runlog::{config::ImportConfig, logging, server};
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "runlog-server")]
#[command(about = "Runlog - HealthExport running-activity importer (HTTP server)")]
struct Args {
    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,

    /// Override listen address
    #[arg(long)]
    host: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    logging::init_from_env()?;

    let mut config = ImportConfig::from_env()?;
    if let Some(http_port) = args.http_port {
        config.http_port = http_port;
    }
    if let Some(host) = args.host {
        config.host = host;
    }
    info!("{}", config.summary());

    if let Err(e) = server::serve(Arc::new(config)).await {
        error!("Server error: {e}");
        return Err(e);
    }
    Ok(())
}
