// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Groups raw training sessions into per-day summaries.
//!
//! Also hosts the display formatters shared with the metrics engine.

use crate::models::{ActivityRecord, DailySummary, DateFormat, DateKey};
use std::collections::BTreeMap;

/// Running totals for one calendar day.
#[derive(Default)]
struct DayAccumulator {
    distance: f64,
    duration: f64,
    training_load: f64,
    /// sum(avg_hr * duration)
    hr_weighted: f64,
    activities: Vec<ActivityRecord>,
}

impl DayAccumulator {
    fn add(&mut self, record: &ActivityRecord) {
        self.distance += record.distance;
        self.duration += record.duration;
        self.training_load += record.training_load;
        self.hr_weighted += record.avg_hr * record.duration;
        self.activities.push(record.clone());
    }

    fn into_summary(self, date: DateKey) -> DailySummary {
        DailySummary {
            date,
            date_formatted: date.format(DateFormat::Short),
            date_full: date.format(DateFormat::Full),
            distance: meters_to_km(self.distance),
            distance_raw: self.distance,
            duration: self.duration,
            duration_formatted: format_duration(self.duration),
            training_load: self.training_load,
            avg_hr: round_u32(weighted_average(self.hr_weighted, self.duration)),
            activity_count: self.activities.len(),
            activities: self.activities,
        }
    }
}

/// Merge sessions sharing a date into one summary per day, ascending by date.
pub fn aggregate_by_date(records: &[ActivityRecord]) -> Vec<DailySummary> {
    let mut days: BTreeMap<DateKey, DayAccumulator> = BTreeMap::new();

    for record in records {
        days.entry(record.date).or_default().add(record);
    }

    days.into_iter()
        .map(|(date, acc)| acc.into_summary(date))
        .collect()
}

/// `numerator / denominator`, or 0 when there is nothing to weight by.
pub fn weighted_average(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 {
        numerator / denominator
    } else {
        0.0
    }
}

/// Round to `decimals` places, halves away from zero.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Round a non-negative value to the nearest integer.
pub(crate) fn round_u32(value: f64) -> u32 {
    value.max(0.0).round() as u32
}

/// Meters to kilometers, rounded to 2 decimals.
pub fn meters_to_km(meters: f64) -> f64 {
    round_to(meters / 1000.0, 2)
}

/// `H:MM:SS` from one hour up, `M:SS` below. Fractional seconds are rounded.
pub fn format_duration(seconds: f64) -> String {
    let total = seconds.max(0.0).round() as u64;
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let secs = total % 60;

    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, secs)
    } else {
        format!("{}:{:02}", minutes, secs)
    }
}

/// Pace in seconds per km as `M'SS"`, or `--` when there is no pace.
pub fn format_pace(pace_seconds: u32) -> String {
    if pace_seconds == 0 {
        return "--".to_string();
    }
    format!("{}'{:02}\"", pace_seconds / 60, pace_seconds % 60)
}
