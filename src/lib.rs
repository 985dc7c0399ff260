// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Training dashboard: daily load aggregation and injury-risk metrics.
//!
//! This crate ingests a batch of running sessions exported from COROS,
//! groups them by calendar day, and derives the Acute:Chronic Workload
//! Ratio, overall totals, and chart series served by a read-only API.

pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use services::TrainingDataStore;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub data: TrainingDataStore,
}
