// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod activity;
pub mod date_key;
pub mod metrics;
pub mod summary;

pub use activity::{validate_records, ActivityRecord};
pub use date_key::{DateFormat, DateKey};
pub use metrics::{AcwrResult, ChartField, ChartSeries, DashboardSnapshot, RiskLevel, StatsSummary};
pub use summary::DailySummary;
