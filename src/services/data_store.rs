// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Load-once access to the activity snapshot.
//!
//! The raw batch is read, validated, and aggregated on first use. Every
//! later caller shares the same immutable [`TrainingSnapshot`].

use crate::config::Config;
use crate::error::{AppError, Result};
use crate::models::{validate_records, ActivityRecord, DailySummary};
use crate::services::aggregator::aggregate_by_date;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::OnceCell;

/// Where the raw activity batch comes from.
#[derive(Debug, Clone)]
pub enum DataSource {
    /// JSON file on local disk
    File(PathBuf),
    /// JSON document served over HTTP
    Url(String),
    /// Records already in memory
    Records(Vec<ActivityRecord>),
}

/// Validated raw batch plus its per-day aggregation.
#[derive(Debug, Clone)]
pub struct TrainingSnapshot {
    pub records: Vec<ActivityRecord>,
    pub days: Vec<DailySummary>,
}

impl TrainingSnapshot {
    /// Validate and aggregate a raw batch.
    pub fn from_records(records: Vec<ActivityRecord>) -> Result<Self> {
        validate_records(&records)?;
        let days = aggregate_by_date(&records);
        Ok(Self { records, days })
    }
}

/// Owns the data source and the load-once guard.
pub struct TrainingDataStore {
    source: DataSource,
    http: reqwest::Client,
    snapshot: OnceCell<Arc<TrainingSnapshot>>,
}

impl TrainingDataStore {
    pub fn new(source: DataSource) -> Self {
        Self {
            source,
            http: reqwest::Client::new(),
            snapshot: OnceCell::new(),
        }
    }

    /// Remote URL when configured, local file otherwise.
    pub fn from_config(config: &Config) -> Self {
        let source = match &config.data_url {
            Some(url) => DataSource::Url(url.clone()),
            None => DataSource::File(config.data_path.clone()),
        };
        Self::new(source)
    }

    /// In-memory store, for tests and embedding.
    pub fn from_records(records: Vec<ActivityRecord>) -> Self {
        Self::new(DataSource::Records(records))
    }

    pub fn source(&self) -> &DataSource {
        &self.source
    }

    pub fn is_loaded(&self) -> bool {
        self.snapshot.initialized()
    }

    /// The snapshot, loading it on first call.
    ///
    /// Concurrent first calls wait on a single load. A failed load is not
    /// cached, so the next call tries again.
    pub async fn snapshot(&self) -> Result<Arc<TrainingSnapshot>> {
        self.snapshot
            .get_or_try_init(|| self.load())
            .await
            .map(Arc::clone)
    }

    async fn load(&self) -> Result<Arc<TrainingSnapshot>> {
        let records = match &self.source {
            DataSource::File(path) => read_file(path).await?,
            DataSource::Url(url) => self.fetch(url).await?,
            DataSource::Records(records) => records.clone(),
        };

        let snapshot = TrainingSnapshot::from_records(records)?;
        tracing::info!(
            records = snapshot.records.len(),
            days = snapshot.days.len(),
            "Training data loaded"
        );
        Ok(Arc::new(snapshot))
    }

    async fn fetch(&self, url: &str) -> Result<Vec<ActivityRecord>> {
        tracing::info!(url, "Fetching activity snapshot");

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| AppError::DataLoad(format!("Request to {} failed: {}", url, e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::DataLoad(format!("HTTP {} from {}", status, url)));
        }

        let body = response
            .text()
            .await
            .map_err(|e| AppError::DataLoad(format!("Failed to read body: {}", e)))?;
        parse_records(&body)
    }
}

async fn read_file(path: &Path) -> Result<Vec<ActivityRecord>> {
    tracing::info!(path = %path.display(), "Loading activity snapshot");
    let json = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| AppError::DataLoad(format!("Failed to read {}: {}", path.display(), e)))?;
    parse_records(&json)
}

/// Parse a JSON array of activity records.
pub fn parse_records(json: &str) -> Result<Vec<ActivityRecord>> {
    serde_json::from_str(json)
        .map_err(|e| AppError::DataLoad(format!("Failed to parse activity JSON: {}", e)))
}
