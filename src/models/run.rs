// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Run model for storage and API.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::Validate;

use crate::error::Result;
use crate::time_utils::parse_date;

/// Stored run record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Run {
    /// Storage-assigned ID
    pub id: u64,
    /// Owning user (never changes after creation)
    pub user_id: u64,
    /// Calendar date the run took place
    pub date: NaiveDate,
    /// Distance in meters
    pub distance_meters: u32,
    /// Duration in seconds
    pub duration_seconds: u32,
    pub calories: u32,
    /// Fitness-proxy score, stored as a whole number
    pub vo2max: u32,
}

impl Run {
    /// Speed-style pace: `distance * 3600 / (duration * 1000)` to two decimals.
    pub fn pace(&self) -> f64 {
        pace(self.distance_meters, self.duration_seconds)
    }
}

/// Compute pace from raw distance and duration.
///
/// Rounds half-up in integer hundredths so the result does not depend on
/// binary float representation. Zero distance (or zero duration) yields `0.0`.
pub fn pace(distance_meters: u32, duration_seconds: u32) -> f64 {
    if distance_meters == 0 || duration_seconds == 0 {
        return 0.0;
    }
    // distance * 3600 * 100 / (duration * 1000) == distance * 360 / duration
    let numerator = u64::from(distance_meters) * 360;
    let denominator = u64::from(duration_seconds);
    let hundredths = (2 * numerator + denominator) / (2 * denominator);
    hundredths as f64 / 100.0
}

/// Run as submitted by a client, before it has an ID or owner.
#[derive(Debug, Clone, Deserialize, Validate)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct RunDraft {
    /// Calendar date (YYYY-MM-DD)
    pub date: String,
    pub distance_meters: u32,
    #[validate(range(min = 1, message = "duration must be at least one second"))]
    pub duration_seconds: u32,
    #[serde(default)]
    pub calories: u32,
    #[serde(default)]
    pub vo2max: u32,
}

/// A draft whose fields have been validated and parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunFields {
    pub date: NaiveDate,
    pub distance_meters: u32,
    pub duration_seconds: u32,
    pub calories: u32,
    pub vo2max: u32,
}

impl RunDraft {
    /// Validate the draft and parse its date.
    pub fn parse(&self) -> Result<RunFields> {
        self.validate()?;
        Ok(RunFields {
            date: parse_date(&self.date, "date")?,
            distance_meters: self.distance_meters,
            duration_seconds: self.duration_seconds,
            calories: self.calories,
            vo2max: self.vo2max,
        })
    }
}

impl RunFields {
    /// Build a stored run from these fields.
    pub fn into_run(self, id: u64, user_id: u64) -> Run {
        Run {
            id,
            user_id,
            date: self.date,
            distance_meters: self.distance_meters,
            duration_seconds: self.duration_seconds,
            calories: self.calories,
            vo2max: self.vo2max,
        }
    }

    /// Overwrite the mutable fields of `run`, leaving its id and owner alone.
    pub fn apply_to(self, run: &mut Run) {
        run.date = self.date;
        run.distance_meters = self.distance_meters;
        run.duration_seconds = self.duration_seconds;
        run.calories = self.calories;
        run.vo2max = self.vo2max;
    }
}

/// Run as returned by the API, including derived pace.
#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct RunSummary {
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub id: u64,
    pub date: NaiveDate,
    pub distance_meters: u32,
    pub duration_seconds: u32,
    pub calories: u32,
    pub vo2max: u32,
    pub pace: f64,
}

impl From<&Run> for RunSummary {
    fn from(run: &Run) -> Self {
        Self {
            id: run.id,
            date: run.date,
            distance_meters: run.distance_meters,
            duration_seconds: run.duration_seconds,
            calories: run.calories,
            vo2max: run.vo2max,
            pace: run.pace(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;

    fn draft(date: &str, duration: u32) -> RunDraft {
        RunDraft {
            date: date.to_string(),
            distance_meters: 5000,
            duration_seconds: duration,
            calories: 300,
            vo2max: 45,
        }
    }

    #[test]
    fn test_pace_ten_km_in_an_hour() {
        assert_eq!(pace(10000, 3600), 10.0);
    }

    #[test]
    fn test_pace_zero_distance() {
        assert_eq!(pace(0, 3600), 0.0);
        assert_eq!(pace(0, 1), 0.0);
    }

    #[test]
    fn test_pace_rounds_to_two_decimals() {
        // 5000 m in 1500 s = 12.0 km/h
        assert_eq!(pace(5000, 1500), 12.0);
        // 5000 m in 1801 s = 9.99445... km/h
        assert_eq!(pace(5000, 1801), 9.99);
        // 1000 m in 288 s = 12.5 exactly
        assert_eq!(pace(1000, 288), 12.5);
    }

    #[test]
    fn test_draft_parse_valid() {
        let fields = draft("2024-01-05", 1500).parse().unwrap();
        assert_eq!(fields.date, NaiveDate::from_ymd_opt(2024, 1, 5).unwrap());
        assert_eq!(fields.duration_seconds, 1500);
    }

    #[test]
    fn test_draft_rejects_zero_duration() {
        let err = draft("2024-01-05", 0).parse().unwrap_err();
        assert!(matches!(err, AppError::InvalidArgument(_)));
    }

    #[test]
    fn test_draft_rejects_bad_date() {
        let err = draft("05/01/2024", 1500).parse().unwrap_err();
        assert!(matches!(err, AppError::InvalidArgument(_)));
    }

    #[test]
    fn test_apply_keeps_identity() {
        let mut run = draft("2024-01-05", 1500).parse().unwrap().into_run(7, 42);
        draft("2024-02-01", 1200).parse().unwrap().apply_to(&mut run);

        assert_eq!(run.id, 7);
        assert_eq!(run.user_id, 42);
        assert_eq!(run.duration_seconds, 1200);
        assert_eq!(run.date, NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
    }
}
