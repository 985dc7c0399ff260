// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for calendar dates.

use chrono::{Days, Local, NaiveDate};

/// Today's calendar date in the server's local time zone.
pub fn today_local() -> NaiveDate {
    Local::now().date_naive()
}

/// Calendar date `days` days before `date`, saturating at the minimum date.
pub fn days_before(date: NaiveDate, days: u64) -> NaiveDate {
    date.checked_sub_days(Days::new(days))
        .unwrap_or(NaiveDate::MIN)
}
