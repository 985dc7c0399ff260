// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Read-only API over the training snapshot.

use crate::error::{AppError, Result};
use crate::models::{
    AcwrResult, ActivityRecord, ChartField, ChartSeries, DailySummary, DashboardSnapshot, DateKey,
    StatsSummary,
};
use crate::services::metrics;
use crate::time_utils::today_local;
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use chrono::NaiveDate;
use serde::Deserialize;
use std::sync::Arc;

const DEFAULT_RECENT_DAYS: usize = 7;
const MAX_RECENT_DAYS: usize = 366;

/// API routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/activities", get(get_activities))
        .route("/api/days", get(get_days))
        .route("/api/days/{date}", get(get_day))
        .route("/api/acwr", get(get_acwr))
        .route("/api/stats", get(get_stats))
        .route("/api/recent", get(get_recent))
        .route("/api/charts/{field}", get(get_chart))
        .route("/api/dashboard", get(get_dashboard))
}

// ─── Query parsing ───────────────────────────────────────────

#[derive(Deserialize)]
struct TodayQuery {
    /// Override for the current date (YYYYMMDD)
    today: Option<String>,
}

fn resolve_today(today: Option<&str>) -> Result<NaiveDate> {
    match today {
        None => Ok(today_local()),
        Some(raw) => raw
            .parse::<DateKey>()
            .and_then(DateKey::to_naive_date)
            .map_err(|_| {
                AppError::BadRequest(
                    "Invalid 'today' parameter: must be a YYYYMMDD date".to_string(),
                )
            }),
    }
}

#[derive(Deserialize)]
struct RecentQuery {
    days: Option<usize>,
}

fn resolve_recent_days(days: Option<usize>) -> Result<usize> {
    let days = days.unwrap_or(DEFAULT_RECENT_DAYS);
    if days == 0 || days > MAX_RECENT_DAYS {
        return Err(AppError::BadRequest(format!(
            "'days' must be between 1 and {}",
            MAX_RECENT_DAYS
        )));
    }
    Ok(days)
}

// ─── Handlers ────────────────────────────────────────────────

/// Raw records as loaded.
async fn get_activities(State(state): State<Arc<AppState>>) -> Result<Json<Vec<ActivityRecord>>> {
    let snapshot = state.data.snapshot().await?;
    Ok(Json(snapshot.records.clone()))
}

/// Per-day summaries, ascending by date.
async fn get_days(State(state): State<Arc<AppState>>) -> Result<Json<Vec<DailySummary>>> {
    let snapshot = state.data.snapshot().await?;
    Ok(Json(snapshot.days.clone()))
}

/// A single day by its `YYYYMMDD` key.
async fn get_day(
    State(state): State<Arc<AppState>>,
    Path(date): Path<String>,
) -> Result<Json<DailySummary>> {
    let key: DateKey = date
        .parse()
        .map_err(|_| AppError::BadRequest(format!("Invalid date {:?}: expected YYYYMMDD", date)))?;

    let snapshot = state.data.snapshot().await?;
    snapshot
        .days
        .binary_search_by_key(&key, |d| d.date)
        .map(|i| Json(snapshot.days[i].clone()))
        .map_err(|_| AppError::NotFound(format!("No activities on {}", key)))
}

async fn get_acwr(
    State(state): State<Arc<AppState>>,
    Query(params): Query<TodayQuery>,
) -> Result<Json<AcwrResult>> {
    let today = resolve_today(params.today.as_deref())?;
    let snapshot = state.data.snapshot().await?;
    Ok(Json(metrics::calculate_acwr(&snapshot.days, today)))
}

async fn get_stats(State(state): State<Arc<AppState>>) -> Result<Json<StatsSummary>> {
    let snapshot = state.data.snapshot().await?;
    Ok(Json(metrics::calculate_stats(&snapshot.days)))
}

async fn get_recent(
    State(state): State<Arc<AppState>>,
    Query(params): Query<RecentQuery>,
) -> Result<Json<Vec<DailySummary>>> {
    let days = resolve_recent_days(params.days)?;
    let snapshot = state.data.snapshot().await?;
    let recent = metrics::recent_days(&snapshot.days, days)
        .into_iter()
        .cloned()
        .collect();
    Ok(Json(recent))
}

async fn get_chart(
    State(state): State<Arc<AppState>>,
    Path(field): Path<String>,
) -> Result<Json<ChartSeries>> {
    let field: ChartField = field.parse().map_err(|e| {
        let valid: Vec<&str> = ChartField::ALL.iter().map(|f| f.as_str()).collect();
        AppError::BadRequest(format!("{}; expected one of {}", e, valid.join(", ")))
    })?;

    tracing::debug!(field = field.as_str(), "Building chart series");
    let snapshot = state.data.snapshot().await?;
    Ok(Json(metrics::chart_series_for(&snapshot.days, field)))
}

/// Everything the dashboard page needs in one response.
async fn get_dashboard(
    State(state): State<Arc<AppState>>,
    Query(params): Query<TodayQuery>,
) -> Result<Json<DashboardSnapshot>> {
    let today = resolve_today(params.today.as_deref())?;
    let snapshot = state.data.snapshot().await?;
    Ok(Json(metrics::dashboard(&snapshot.days, today)))
}
