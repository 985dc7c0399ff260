// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Calendar day encoded as a `YYYYMMDD` integer.

use crate::error::DataError;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Calendar day in the `YYYYMMDD` wire encoding (e.g. `20240315`).
///
/// Numeric ordering matches calendar ordering as long as every key is
/// exactly eight digits wide, which [`DateKey::to_naive_date`] enforces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DateKey(u32);

/// Display variants for a [`DateKey`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateFormat {
    /// `MM/DD`
    Short,
    /// `YYYY/MM/DD`
    Full,
}

const MIN_KEY: u32 = 10_000_000;
const MAX_KEY: u32 = 99_999_999;

impl DateKey {
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    pub const fn value(self) -> u32 {
        self.0
    }

    pub fn from_naive_date(date: NaiveDate) -> Self {
        let year = date.year().max(0) as u32;
        Self(year * 10_000 + date.month() * 100 + date.day())
    }

    /// Decode into a calendar date, rejecting wrong widths and impossible days.
    pub fn to_naive_date(self) -> Result<NaiveDate, DataError> {
        if !(MIN_KEY..=MAX_KEY).contains(&self.0) {
            return Err(DataError::InvalidDateKey(self.0));
        }
        NaiveDate::from_ymd_opt(self.year() as i32, self.month(), self.day())
            .ok_or(DataError::InvalidDateKey(self.0))
    }

    pub fn year(self) -> u32 {
        self.0 / 10_000
    }

    pub fn month(self) -> u32 {
        (self.0 / 100) % 100
    }

    pub fn day(self) -> u32 {
        self.0 % 100
    }

    /// Format from the encoded digits. Never fails, even for invalid keys.
    pub fn format(self, format: DateFormat) -> String {
        match format {
            DateFormat::Short => format!("{:02}/{:02}", self.month(), self.day()),
            DateFormat::Full => {
                format!("{:04}/{:02}/{:02}", self.year(), self.month(), self.day())
            }
        }
    }
}

impl From<NaiveDate> for DateKey {
    fn from(date: NaiveDate) -> Self {
        Self::from_naive_date(date)
    }
}

impl fmt::Display for DateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for DateKey {
    type Err = DataError;

    /// Parse and validate an eight-digit `YYYYMMDD` string.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.len() != 8 || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
            return Err(DataError::UnparsableDate(s.to_string()));
        }
        let value: u32 = trimmed
            .parse()
            .map_err(|_| DataError::UnparsableDate(s.to_string()))?;
        let key = Self(value);
        key.to_naive_date()?;
        Ok(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_through_naive_date() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        let key = DateKey::from(date);
        assert_eq!(key.value(), 20240315);
        assert_eq!(key.to_naive_date().unwrap(), date);
    }

    #[test]
    fn test_rejects_wrong_width_and_impossible_days() {
        assert!(DateKey::new(2024315).to_naive_date().is_err());
        assert!(DateKey::new(20240230).to_naive_date().is_err());
        assert!(DateKey::new(20241301).to_naive_date().is_err());
        assert!(DateKey::new(20240229).to_naive_date().is_ok());
    }

    #[test]
    fn test_format_variants() {
        let key = DateKey::new(20240305);
        assert_eq!(key.format(DateFormat::Short), "03/05");
        assert_eq!(key.format(DateFormat::Full), "2024/03/05");
    }

    #[test]
    fn test_parse() {
        assert_eq!("20240315".parse::<DateKey>().unwrap(), DateKey::new(20240315));
        assert!(matches!(
            "2024-03-15".parse::<DateKey>(),
            Err(DataError::UnparsableDate(_))
        ));
        assert!(matches!(
            "20241332".parse::<DateKey>(),
            Err(DataError::InvalidDateKey(20241332))
        ));
    }
}
