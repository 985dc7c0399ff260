// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Raw training session model, as exported to the activity snapshot.

use crate::error::DataError;
use crate::models::DateKey;
use serde::{Deserialize, Deserializer, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// One training session from the snapshot.
///
/// Wire format uses snake_case keys: `date, distance, duration,
/// training_load, avg_hr`, plus optional `name` and `pace`. Numeric readings
/// that are `null` or absent read as 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ActivityRecord {
    /// Calendar day (YYYYMMDD)
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub date: DateKey,
    /// Distance in meters
    #[serde(default, deserialize_with = "null_as_zero")]
    pub distance: f64,
    /// Duration in seconds
    #[serde(default, deserialize_with = "null_as_zero")]
    pub duration: f64,
    /// Precomputed session load score
    #[serde(default, deserialize_with = "null_as_zero")]
    pub training_load: f64,
    /// Average heart rate (bpm); 0 when the device recorded none
    #[serde(default, deserialize_with = "null_as_zero")]
    pub avg_hr: f64,
    /// Session title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Adjusted pace (seconds per km) as reported upstream
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pace: Option<f64>,
}

impl ActivityRecord {
    /// Minimal constructor for the fields the pipeline reads.
    pub fn new(date: u32, distance: f64, duration: f64, training_load: f64, avg_hr: f64) -> Self {
        Self {
            date: DateKey::new(date),
            distance,
            duration,
            training_load,
            avg_hr,
            name: None,
            pace: None,
        }
    }

    /// Check this record at ingestion. `index` is its position in the batch.
    pub fn validate(&self, index: usize) -> Result<(), DataError> {
        self.date
            .to_naive_date()
            .map_err(|_| DataError::InvalidDate {
                index,
                value: self.date.value(),
            })?;

        for (field, value) in [
            ("distance", self.distance),
            ("duration", self.duration),
            ("training_load", self.training_load),
            ("avg_hr", self.avg_hr),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(DataError::InvalidValue {
                    index,
                    field,
                    value,
                });
            }
        }

        Ok(())
    }
}

/// Validate a whole batch, failing on the first bad record.
pub fn validate_records(records: &[ActivityRecord]) -> Result<(), DataError> {
    records
        .iter()
        .enumerate()
        .try_for_each(|(index, record)| record.validate(index))
}

/// The upstream exporter writes `null` for readings the device did not record.
fn null_as_zero<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_snapshot_record() {
        let json = r#"{
            "date": 20240301,
            "name": "Morning Run",
            "distance": 5000.0,
            "duration": 1500,
            "pace": 300,
            "avg_hr": 150,
            "training_load": 50
        }"#;

        let record: ActivityRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.date, DateKey::new(20240301));
        assert_eq!(record.distance, 5000.0);
        assert_eq!(record.duration, 1500.0);
        assert_eq!(record.training_load, 50.0);
        assert_eq!(record.avg_hr, 150.0);
        assert_eq!(record.name.as_deref(), Some("Morning Run"));
        assert_eq!(record.pace, Some(300.0));
    }

    #[test]
    fn test_null_and_missing_readings_default_to_zero() {
        let json = r#"{"date": 20240301, "distance": 0, "duration": 0, "avg_hr": null}"#;
        let record: ActivityRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.avg_hr, 0.0);
        assert_eq!(record.training_load, 0.0);
        assert!(record.name.is_none());
    }

    #[test]
    fn test_null_distance_and_duration_read_as_zero() {
        let json = r#"{"date": 20240301, "distance": null, "duration": null, "training_load": 12}"#;
        let record: ActivityRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.distance, 0.0);
        assert_eq!(record.duration, 0.0);
        assert_eq!(record.training_load, 12.0);
        assert_eq!(record.validate(0), Ok(()));
    }

    #[test]
    fn test_validate_rejects_bad_date() {
        let records = vec![
            ActivityRecord::new(20240301, 1000.0, 300.0, 10.0, 140.0),
            ActivityRecord::new(2024031, 1000.0, 300.0, 10.0, 140.0),
        ];
        assert_eq!(
            validate_records(&records),
            Err(DataError::InvalidDate {
                index: 1,
                value: 2024031
            })
        );
    }

    #[test]
    fn test_validate_rejects_negative_values() {
        let record = ActivityRecord::new(20240301, -5.0, 300.0, 10.0, 140.0);
        assert!(matches!(
            record.validate(0),
            Err(DataError::InvalidValue {
                field: "distance",
                ..
            })
        ));

        let record = ActivityRecord::new(20240301, 5.0, 300.0, 10.0, f64::NAN);
        assert!(matches!(
            record.validate(3),
            Err(DataError::InvalidValue {
                index: 3,
                field: "avg_hr",
                ..
            })
        ));
    }
}
