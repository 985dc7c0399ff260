// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use std::sync::Arc;
use tower::ServiceExt;
use training_dashboard::config::Config;
use training_dashboard::models::ActivityRecord;
use training_dashboard::routes::create_router;
use training_dashboard::services::{DataSource, TrainingDataStore};
use training_dashboard::AppState;

/// `today` used by the fixture: 2024-03-15.
#[allow(dead_code)]
pub const FIXTURE_TODAY: &str = "20240315";

/// Six sessions over five days, two of them on the fixture's `today`.
///
/// With `today = 2024-03-15`: acute load 180, chronic load 92.5.
#[allow(dead_code)]
pub fn fixture_records() -> Vec<ActivityRecord> {
    vec![
        ActivityRecord::new(20240315, 5000.0, 1500.0, 50.0, 150.0),
        ActivityRecord::new(20240201, 6000.0, 1800.0, 40.0, 0.0),
        ActivityRecord::new(20240310, 10000.0, 3000.0, 100.0, 145.0),
        ActivityRecord::new(20240315, 3000.0, 900.0, 30.0, 140.0),
        ActivityRecord::new(20240220, 12000.0, 3900.0, 120.0, 152.0),
        ActivityRecord::new(20240301, 8000.0, 2400.0, 70.0, 148.0),
    ]
}

/// Create a test app serving the given in-memory records.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app(records: Vec<ActivityRecord>) -> (axum::Router, Arc<AppState>) {
    create_test_app_with_store(TrainingDataStore::from_records(records))
}

/// Create a test app whose data file does not exist.
#[allow(dead_code)]
pub fn create_unavailable_app() -> axum::Router {
    let store = TrainingDataStore::new(DataSource::File(
        "/nonexistent/activities_data.json".into(),
    ));
    create_test_app_with_store(store).0
}

fn create_test_app_with_store(data: TrainingDataStore) -> (axum::Router, Arc<AppState>) {
    let state = Arc::new(AppState {
        config: Config::test_default(),
        data,
    });

    (create_router(state.clone()), state)
}

/// Issue a GET and return the status plus the parsed JSON body.
#[allow(dead_code)]
pub async fn get_json(app: axum::Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .unwrap();
    let json = serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null);
    (status, json)
}
