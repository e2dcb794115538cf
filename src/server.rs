// ABOUTME: HTTP server bootstrap wiring configuration, the GraphJSON store, and the router
// ABOUTME: Binds the configured address and shuts down gracefully on Ctrl-C or SIGTERM
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#[cfg(not(unix))]
use std::future;
use std::sync::Arc;

use anyhow::Result;
use axum::Router;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{info, warn};

use crate::config::ImportConfig;
use crate::external::{GraphJsonClient, TimeSeriesStore};
use crate::import::ImportPipeline;
use crate::routes;

/// Build the application router over the real GraphJSON store
///
/// # Errors
///
/// Returns an error if the GraphJSON client cannot be created.
pub fn build_app(config: Arc<ImportConfig>) -> Result<Router> {
    let store: Arc<dyn TimeSeriesStore> = Arc::new(GraphJsonClient::new(&config.graphjson)?);
    let pipeline = Arc::new(ImportPipeline::new(config, store));
    Ok(routes::router(pipeline))
}

/// Serve the importer until a shutdown signal arrives
///
/// # Errors
///
/// Returns an error if the address cannot be bound or the server fails.
pub async fn serve(config: Arc<ImportConfig>) -> Result<()> {
    let address = format!("{}:{}", config.host, config.http_port);
    let app = build_app(config)?;

    let listener = TcpListener::bind(&address).await?;
    info!("Runlog listening on http://{address}");
    info!("   Import:  POST http://{address}/api/import");
    info!("   Health:  GET  http://{address}/health");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl-C: {e}");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => warn!("Failed to listen for SIGTERM: {e}"),
        }
    };

    #[cfg(not(unix))]
    let terminate = future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("Received Ctrl-C, shutting down"),
        () = terminate => info!("Received SIGTERM, shutting down"),
    }
}
