// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for calendar date parsing and week arithmetic.

use chrono::{Datelike, Days, NaiveDate};

use crate::error::{AppError, Result};

/// Parse a `YYYY-MM-DD` calendar date.
///
/// `field` names the offending input in the error message.
pub fn parse_date(raw: &str, field: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|_| {
        AppError::InvalidArgument(format!(
            "Invalid '{}' parameter: must be a YYYY-MM-DD date",
            field
        ))
    })
}

/// Parse an optional date parameter.
pub fn parse_optional_date(raw: Option<&str>, field: &str) -> Result<Option<NaiveDate>> {
    raw.filter(|s| !s.trim().is_empty())
        .map(|s| parse_date(s, field))
        .transpose()
}

/// Monday of the ISO week containing `date`.
pub fn start_of_week(date: NaiveDate) -> NaiveDate {
    let offset = u64::from(date.weekday().num_days_from_monday());
    // Subtracting at most six days only fails at NaiveDate::MIN.
    date.checked_sub_days(Days::new(offset)).unwrap_or(date)
}
