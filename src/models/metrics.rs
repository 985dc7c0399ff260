// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Derived metric value objects.
//!
//! These are recomputed from a [`DailySummary`] sequence on demand and hold
//! no identity of their own.

use crate::models::DailySummary;
use serde::Serialize;
use std::str::FromStr;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

// ─── ACWR ────────────────────────────────────────────────────

/// Injury-risk band derived from the acute:chronic ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum RiskLevel {
    /// No aggregated data at all
    Unknown,
    /// ratio <= 0.8
    Low,
    /// 0.8 < ratio <= 1.0
    Moderate,
    /// 1.0 < ratio <= 1.3
    Medium,
    /// 1.3 < ratio <= 1.5
    High,
    /// ratio > 1.5
    Critical,
}

impl RiskLevel {
    /// Band a ratio. Bands are inclusive on their upper end, so 1.0 is `Moderate`.
    pub fn classify(ratio: f64) -> Self {
        match ratio {
            r if r <= 0.8 => RiskLevel::Low,
            r if r <= 1.0 => RiskLevel::Moderate,
            r if r <= 1.3 => RiskLevel::Medium,
            r if r <= 1.5 => RiskLevel::High,
            _ => RiskLevel::Critical,
        }
    }

    pub fn score(self) -> u8 {
        match self {
            RiskLevel::Unknown => 0,
            RiskLevel::Low => 10,
            RiskLevel::Moderate => 20,
            RiskLevel::Medium => 40,
            RiskLevel::High => 70,
            RiskLevel::Critical => 90,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RiskLevel::Unknown => "unknown",
            RiskLevel::Low => "low",
            RiskLevel::Moderate => "moderate",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
            RiskLevel::Critical => "critical",
        }
    }

    /// Human-readable explanation shown next to the gauge.
    pub fn description(self) -> &'static str {
        match self {
            RiskLevel::Unknown => "Insufficient data",
            RiskLevel::Low => "Training load is conservatively low",
            RiskLevel::Moderate => "Training load in good standing",
            RiskLevel::Medium => "Moderate load growth",
            RiskLevel::High => "Load growing fast",
            RiskLevel::Critical => "High risk, recommend reducing load",
        }
    }
}

/// Acute:Chronic Workload Ratio for a given day.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct AcwrResult {
    /// 7-day load sum, rounded
    pub acute_load: i64,
    /// 28-day load sum / 4, rounded
    pub chronic_load: i64,
    /// acute / chronic, rounded to 2 decimals
    pub ratio: f64,
    pub risk_score: u8,
    pub risk_level: RiskLevel,
    pub risk_text: String,
}

impl AcwrResult {
    /// Result for an empty data set.
    pub fn insufficient_data() -> Self {
        Self::from_level(0, 0, 0.0, RiskLevel::Unknown)
    }

    pub(crate) fn from_level(
        acute_load: i64,
        chronic_load: i64,
        ratio: f64,
        level: RiskLevel,
    ) -> Self {
        Self {
            acute_load,
            chronic_load,
            ratio,
            risk_score: level.score(),
            risk_level: level,
            risk_text: level.description().to_string(),
        }
    }
}

// ─── Stats ───────────────────────────────────────────────────

/// Totals over every aggregated day.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct StatsSummary {
    /// Kilometers, rounded to 2 decimals
    pub total_distance: f64,
    /// Seconds
    pub total_duration: f64,
    pub total_duration_formatted: String,
    pub total_training_load: f64,
    /// Seconds per kilometer, rounded; 0 without distance
    pub avg_pace: u32,
    /// `M'SS"` or `--`
    pub avg_pace_formatted: String,
    pub avg_hr: u32,
    pub training_days: usize,
    pub activities_count: usize,
}

// ─── Charts ──────────────────────────────────────────────────

/// Parallel arrays ready for a chart: `values[i]` belongs to `dates[i]`.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ChartSeries {
    pub dates: Vec<String>,
    pub values: Vec<f64>,
}

/// Numeric [`DailySummary`] field selectable for a chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartField {
    TrainingLoad,
    Distance,
    DistanceRaw,
    Duration,
    AvgHr,
    ActivityCount,
}

impl ChartField {
    pub const ALL: [ChartField; 6] = [
        ChartField::TrainingLoad,
        ChartField::Distance,
        ChartField::DistanceRaw,
        ChartField::Duration,
        ChartField::AvgHr,
        ChartField::ActivityCount,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ChartField::TrainingLoad => "training_load",
            ChartField::Distance => "distance",
            ChartField::DistanceRaw => "distance_raw",
            ChartField::Duration => "duration",
            ChartField::AvgHr => "avg_hr",
            ChartField::ActivityCount => "activity_count",
        }
    }

    /// Read this field from a day.
    pub fn value(self, day: &DailySummary) -> f64 {
        match self {
            ChartField::TrainingLoad => day.training_load,
            ChartField::Distance => day.distance,
            ChartField::DistanceRaw => day.distance_raw,
            ChartField::Duration => day.duration,
            ChartField::AvgHr => f64::from(day.avg_hr),
            ChartField::ActivityCount => day.activity_count as f64,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown chart field: {0}")]
pub struct UnknownChartField(pub String);

impl FromStr for ChartField {
    type Err = UnknownChartField;

    /// Accepts snake_case, camelCase, and kebab-case spellings.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .flat_map(char::to_lowercase)
            .collect();

        ChartField::ALL
            .into_iter()
            .find(|field| field.as_str().replace('_', "") == normalized)
            .ok_or_else(|| UnknownChartField(s.to_string()))
    }
}

// ─── Dashboard ───────────────────────────────────────────────

/// Everything the dashboard page renders, computed in one pass.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct DashboardSnapshot {
    pub acwr: AcwrResult,
    pub stats: StatsSummary,
    pub recent_7_days: Vec<DailySummary>,
    pub recent_30_days: Vec<DailySummary>,
    pub training_load_chart: ChartSeries,
    pub distance_chart: ChartSeries,
}
