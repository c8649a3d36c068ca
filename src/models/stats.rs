// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Time-bucketed run aggregates.
//!
//! A bucket key is derived from a run's date according to the requested
//! granularity. Keys of one granularity sort chronologically.

use chrono::{Datelike, NaiveDate};
use serde::{Serialize, Serializer};
use std::fmt;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::models::Run;
use crate::time_utils::start_of_week;

/// Bucketing resolution for run history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Granularity {
    /// One row per run.
    #[default]
    None,
    Weekly,
    Monthly,
    Yearly,
}

impl Granularity {
    /// Parse the `group_by` query value.
    ///
    /// Unrecognised values fall back to per-run rows.
    pub fn from_param(raw: Option<&str>) -> Self {
        match raw.map(|s| s.trim().to_ascii_lowercase()).as_deref() {
            None | Some("") | Some("none") | Some("daily") => Granularity::None,
            Some("weekly") => Granularity::Weekly,
            Some("monthly") => Granularity::Monthly,
            Some("yearly") => Granularity::Yearly,
            Some(other) => {
                tracing::debug!(group_by = other, "Unknown grouping, using daily");
                Granularity::None
            }
        }
    }

    /// Key of the bucket that a run dated `date` falls into.
    pub fn bucket_key(self, date: NaiveDate) -> BucketKey {
        match self {
            Granularity::None => BucketKey::Day(date),
            Granularity::Weekly => BucketKey::Week(start_of_week(date)),
            Granularity::Monthly => BucketKey::Month {
                year: date.year(),
                month: date.month(),
            },
            Granularity::Yearly => BucketKey::Year(date.year()),
        }
    }
}

/// Identifies a bucket. Serializes as a date string, `YYYY-MM`, or a bare
/// year number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BucketKey {
    Day(NaiveDate),
    /// Monday starting the ISO week
    Week(NaiveDate),
    Month { year: i32, month: u32 },
    Year(i32),
}

impl fmt::Display for BucketKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BucketKey::Day(date) | BucketKey::Week(date) => {
                write!(f, "{}", date.format("%Y-%m-%d"))
            }
            BucketKey::Month { year, month } => write!(f, "{:04}-{:02}", year, month),
            BucketKey::Year(year) => write!(f, "{}", year),
        }
    }
}

impl Serialize for BucketKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            BucketKey::Year(year) => serializer.serialize_i32(*year),
            _ => serializer.collect_str(self),
        }
    }
}

/// One row of aggregated run history.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct AggregateBucket {
    #[cfg_attr(feature = "binding-generation", ts(type = "string | number"))]
    pub bucket_label: BucketKey,
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub total_distance_meters: u64,
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub total_duration_seconds: u64,
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub total_calories: u64,
    /// Mean vo2max, one decimal place
    pub average_vo2max: f64,
    pub run_count: u32,
    /// Set only for per-run rows
    #[serde(skip_serializing_if = "Option::is_none")]
    #[cfg_attr(feature = "binding-generation", ts(type = "number | null"))]
    pub run_id: Option<u64>,
    /// Set only for per-run rows
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pace: Option<f64>,
}

/// Running totals for one bucket while grouping.
#[derive(Debug, Default, Clone)]
pub struct BucketTotals {
    pub distance_meters: u64,
    pub duration_seconds: u64,
    pub calories: u64,
    pub vo2max_sum: u64,
    pub runs: u32,
}

impl BucketTotals {
    pub fn add(&mut self, run: &Run) {
        self.distance_meters += u64::from(run.distance_meters);
        self.duration_seconds += u64::from(run.duration_seconds);
        self.calories += u64::from(run.calories);
        self.vo2max_sum += u64::from(run.vo2max);
        self.runs += 1;
    }

    pub fn into_bucket(self, key: BucketKey) -> AggregateBucket {
        AggregateBucket {
            bucket_label: key,
            total_distance_meters: self.distance_meters,
            total_duration_seconds: self.duration_seconds,
            total_calories: self.calories,
            average_vo2max: mean_to_tenths(self.vo2max_sum, self.runs),
            run_count: self.runs,
            run_id: None,
            pace: None,
        }
    }
}

/// Mean of `count` values summing to `sum`, rounded half-up to one decimal.
///
/// Computed in integer tenths so halves are detected exactly.
pub fn mean_to_tenths(sum: u64, count: u32) -> f64 {
    if count == 0 {
        return 0.0;
    }
    let count = u64::from(count);
    let tenths = (2 * sum * 10 + count) / (2 * count);
    tenths as f64 / 10.0
}
