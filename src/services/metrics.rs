// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Metrics engine over aggregated days.
//!
//! Every function here is pure. The one wall-clock dependency, "today" for
//! the ACWR windows, is an explicit parameter.

use crate::models::{
    AcwrResult, ChartField, ChartSeries, DailySummary, DashboardSnapshot, DateKey, RiskLevel,
    StatsSummary,
};
use crate::services::aggregator::{
    format_duration, format_pace, meters_to_km, round_to, round_u32, weighted_average,
};
use crate::time_utils::days_before;
use chrono::NaiveDate;

/// Acute window length in days.
pub const ACUTE_WINDOW_DAYS: u64 = 7;
/// Chronic window length in days.
pub const CHRONIC_WINDOW_DAYS: u64 = 28;
/// The chronic load is reported as a weekly average over this many weeks.
const CHRONIC_WEEKS: f64 = 4.0;

/// Sum of training load over days in `[from, to]`, inclusive.
fn load_between(data: &[DailySummary], from: DateKey, to: DateKey) -> f64 {
    data.iter()
        .filter(|d| d.date >= from && d.date <= to)
        .map(|d| d.training_load)
        .sum()
}

/// Compute the Acute:Chronic Workload Ratio as of `today`.
///
/// Acute load covers `[today - 7d, today]`; chronic load covers
/// `[today - 28d, today]` divided by four. Days after `today` are ignored.
pub fn calculate_acwr(data: &[DailySummary], today: NaiveDate) -> AcwrResult {
    if data.is_empty() {
        return AcwrResult::insufficient_data();
    }

    let today_key = DateKey::from(today);
    let acute_start = DateKey::from(days_before(today, ACUTE_WINDOW_DAYS));
    let chronic_start = DateKey::from(days_before(today, CHRONIC_WINDOW_DAYS));

    let acute_load = load_between(data, acute_start, today_key);
    let chronic_load = load_between(data, chronic_start, today_key) / CHRONIC_WEEKS;

    let ratio = if chronic_load > 0.0 {
        acute_load / chronic_load
    } else {
        0.0
    };
    let level = RiskLevel::classify(ratio);

    tracing::debug!(
        today = %today_key,
        acute_load,
        chronic_load,
        ratio,
        risk = level.as_str(),
        "Computed ACWR"
    );

    AcwrResult::from_level(
        acute_load.round() as i64,
        chronic_load.round() as i64,
        round_to(ratio, 2),
        level,
    )
}

/// Totals, weighted averages, and counts over all days.
pub fn calculate_stats(data: &[DailySummary]) -> StatsSummary {
    let total_distance: f64 = data.iter().map(|d| d.distance_raw).sum();
    let total_duration: f64 = data.iter().map(|d| d.duration).sum();
    let total_training_load: f64 = data.iter().map(|d| d.training_load).sum();
    let activities_count: usize = data.iter().map(|d| d.activity_count).sum();

    let hr_weighted: f64 = data
        .iter()
        .map(|d| f64::from(d.avg_hr) * d.duration)
        .sum();
    let avg_hr = weighted_average(hr_weighted, total_duration);

    let avg_pace = if total_distance > 0.0 {
        total_duration / (total_distance / 1000.0)
    } else {
        0.0
    };
    let avg_pace = round_u32(avg_pace);

    StatsSummary {
        total_distance: meters_to_km(total_distance),
        total_duration,
        total_duration_formatted: format_duration(total_duration),
        total_training_load,
        avg_pace,
        avg_pace_formatted: format_pace(avg_pace),
        avg_hr: round_u32(avg_hr),
        training_days: data.len(),
        activities_count,
    }
}

/// The `days` most recent entries, in ascending date order.
pub fn recent_days(data: &[DailySummary], days: usize) -> Vec<&DailySummary> {
    let mut sorted: Vec<&DailySummary> = data.iter().collect();
    sorted.sort_by(|a, b| b.date.cmp(&a.date));
    sorted.truncate(days);
    sorted.reverse();
    sorted
}

/// Parallel `{dates, values}` arrays for any numeric projection of a day.
pub fn chart_series<F>(data: &[DailySummary], select: F) -> ChartSeries
where
    F: Fn(&DailySummary) -> f64,
{
    let mut sorted: Vec<&DailySummary> = data.iter().collect();
    sorted.sort_by_key(|d| d.date);

    ChartSeries {
        dates: sorted.iter().map(|d| d.date_formatted.clone()).collect(),
        values: sorted.iter().map(|d| select(*d)).collect(),
    }
}

/// [`chart_series`] for a named field.
pub fn chart_series_for(data: &[DailySummary], field: ChartField) -> ChartSeries {
    chart_series(data, |d| field.value(d))
}

/// Everything the dashboard renders, for a given `today`.
pub fn dashboard(data: &[DailySummary], today: NaiveDate) -> DashboardSnapshot {
    DashboardSnapshot {
        acwr: calculate_acwr(data, today),
        stats: calculate_stats(data),
        recent_7_days: recent_days(data, 7).into_iter().cloned().collect(),
        recent_30_days: recent_days(data, 30).into_iter().cloned().collect(),
        training_load_chart: chart_series_for(data, ChartField::TrainingLoad),
        distance_chart: chart_series_for(data, ChartField::Distance),
    }
}
