// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Training Dashboard API Server
//!
//! Serves daily training load, ACWR injury-risk metrics, and chart series
//! computed from a COROS activity snapshot.

use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use training_dashboard::{config::Config, services::TrainingDataStore, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize structured JSON logging
    init_logging()?;

    // Load configuration from environment
    let config = Config::from_env()?;
    tracing::info!(port = config.port, "Starting Training Dashboard API");

    // Warm the snapshot so a bad data file shows up at startup. A failure is
    // logged and retried on the first request.
    let data = TrainingDataStore::from_config(&config);
    tracing::info!(source = ?data.source(), "Activity data source configured");
    if let Err(e) = data.snapshot().await {
        tracing::warn!(error = %e, "Activity snapshot not available yet");
    }

    // Build shared state
    let state = Arc::new(AppState {
        config: config.clone(),
        data,
    });

    // Build router
    let app = training_dashboard::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() -> anyhow::Result<()> {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("training_dashboard=debug".parse()?)
                .add_directive("info".parse()?),
        )
        .with(format)
        .init();
    Ok(())
}
