// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Per-day aggregate of training sessions.

use crate::models::{ActivityRecord, DateKey};
use serde::Serialize;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// All sessions of one calendar day, merged.
///
/// Built by [`crate::services::aggregator::aggregate_by_date`]; never
/// mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct DailySummary {
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub date: DateKey,
    /// `MM/DD`
    pub date_formatted: String,
    /// `YYYY/MM/DD`
    pub date_full: String,
    /// Kilometers, rounded to 2 decimals
    pub distance: f64,
    /// Meters, unrounded
    pub distance_raw: f64,
    /// Seconds
    pub duration: f64,
    pub duration_formatted: String,
    pub training_load: f64,
    /// Duration-weighted mean heart rate; 0 when the day has no duration
    pub avg_hr: u32,
    pub activity_count: usize,
    pub activities: Vec<ActivityRecord>,
}
