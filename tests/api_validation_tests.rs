// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Integration tests for request validation and data failures.

mod common;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
};
use common::{create_test_app, create_unavailable_app, fixture_records, get_json};
use tower::ServiceExt;
use training_dashboard::models::ActivityRecord;

#[tokio::test]
async fn test_invalid_today_rejected() {
    let (app, _) = create_test_app(fixture_records());

    for uri in [
        "/api/acwr?today=2024-03-15",
        "/api/acwr?today=20240230",
        "/api/dashboard?today=yesterday",
    ] {
        let (status, json) = get_json(app.clone(), uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(json["error"], "bad_request", "{uri}");
    }
}

#[tokio::test]
async fn test_invalid_day_key_rejected() {
    let (app, _) = create_test_app(fixture_records());

    for uri in ["/api/days/2024-03-10", "/api/days/20240431"] {
        let (status, json) = get_json(app.clone(), uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(json["error"], "bad_request", "{uri}");
    }
}

#[tokio::test]
async fn test_recent_days_out_of_range() {
    let (app, _) = create_test_app(fixture_records());

    for uri in ["/api/recent?days=0", "/api/recent?days=367"] {
        let (status, json) = get_json(app.clone(), uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(json["error"], "bad_request", "{uri}");
    }

    // Not a number: rejected by the query extractor
    let (status, _) = get_json(app, "/api/recent?days=abc").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_unknown_chart_field() {
    let (app, _) = create_test_app(fixture_records());

    let (status, json) = get_json(app, "/api/charts/cadence").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "bad_request");
    let details = json["details"].as_str().unwrap();
    assert!(details.contains("cadence"));
    assert!(details.contains("training_load"));
}

#[tokio::test]
async fn test_missing_data_file_is_unavailable() {
    let app = create_unavailable_app();

    let (status, json) = get_json(app, "/api/days").await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(json["error"], "data_unavailable");
    // Filesystem details stay in the logs
    assert!(json.get("details").is_none());
}

#[tokio::test]
async fn test_invalid_records_are_unavailable() {
    let records = vec![
        ActivityRecord::new(20240301, 5000.0, 1500.0, 50.0, 150.0),
        ActivityRecord::new(20240302, -5.0, 1500.0, 50.0, 150.0),
    ];
    let (app, state) = create_test_app(records);

    let (status, json) = get_json(app, "/api/stats").await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(json["error"], "invalid_data");
    assert!(json["details"].as_str().unwrap().contains("Record 1"));
    assert!(!state.data.is_loaded());
}

#[tokio::test]
async fn test_invalid_date_is_unavailable() {
    let records = vec![ActivityRecord::new(20241301, 5000.0, 1500.0, 50.0, 150.0)];
    let (app, _) = create_test_app(records);

    let (status, json) = get_json(app, "/api/acwr?today=20240315").await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(json["error"], "invalid_data");
}

#[tokio::test]
async fn test_unknown_route() {
    let (app, _) = create_test_app(fixture_records());

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/nope")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_cors_allows_frontend_origin() {
    let (app, _) = create_test_app(fixture_records());

    let response = app
        .oneshot(
            Request::builder()
                .method(Method::OPTIONS)
                .uri("/api/stats")
                .header(header::ORIGIN, "http://localhost:5173")
                .header(header::ACCESS_CONTROL_REQUEST_METHOD, "GET")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .unwrap(),
        "http://localhost:5173"
    );
}

#[tokio::test]
async fn test_cors_rejects_foreign_origin() {
    let (app, _) = create_test_app(fixture_records());

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/stats")
                .header(header::ORIGIN, "https://evil.example")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert!(response
        .headers()
        .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
        .is_none());
}
