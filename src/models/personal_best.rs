// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Personal-best category configuration and results.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::Validate;

use crate::models::run::{Run, RunSummary};

/// What a personal-best category ranks runs by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum PersonalBestType {
    /// Longest distance first
    Distance,
    /// Longest duration first
    Duration,
    /// Shortest duration first (distance is already bounded)
    Speed,
}

/// Sort order applied when selecting runs for a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOrder {
    DurationAscending,
    DurationDescending,
    DistanceDescending,
}

impl PersonalBestType {
    pub fn order(self) -> RunOrder {
        match self {
            PersonalBestType::Speed => RunOrder::DurationAscending,
            PersonalBestType::Duration => RunOrder::DurationDescending,
            PersonalBestType::Distance => RunOrder::DistanceDescending,
        }
    }
}

impl RunOrder {
    /// Compare two runs; ties go to the earlier run, then the lower ID.
    pub fn compare(self, a: &Run, b: &Run) -> Ordering {
        let primary = match self {
            RunOrder::DurationAscending => a.duration_seconds.cmp(&b.duration_seconds),
            RunOrder::DurationDescending => b.duration_seconds.cmp(&a.duration_seconds),
            RunOrder::DistanceDescending => b.distance_meters.cmp(&a.distance_meters),
        };
        primary
            .then_with(|| a.date.cmp(&b.date))
            .then_with(|| a.id.cmp(&b.id))
    }
}

/// Inclusive distance bounds; `None` leaves that side open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DistanceRange {
    pub min_meters: Option<u32>,
    pub max_meters: Option<u32>,
}

impl DistanceRange {
    pub fn contains(&self, distance_meters: u32) -> bool {
        self.min_meters.is_none_or(|min| distance_meters >= min)
            && self.max_meters.is_none_or(|max| distance_meters <= max)
    }
}

/// A user-defined personal-best category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct PersonalBestCategory {
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub id: u64,
    #[serde(skip_serializing)]
    #[cfg_attr(feature = "binding-generation", ts(skip))]
    pub user_id: u64,
    pub title: String,
    /// Presentation order, ascending
    pub sort_order: i32,
    #[serde(rename = "type")]
    pub kind: PersonalBestType,
    pub min_distance_meters: Option<u32>,
    pub max_distance_meters: Option<u32>,
}

impl PersonalBestCategory {
    pub fn distance_range(&self) -> DistanceRange {
        DistanceRange {
            min_meters: self.min_distance_meters,
            max_meters: self.max_distance_meters,
        }
    }
}

/// Category as submitted by a client.
#[derive(Debug, Clone, Deserialize, Validate)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct PersonalBestCategoryDraft {
    #[validate(length(min = 1, max = 100))]
    pub title: String,
    #[serde(default)]
    pub sort_order: i32,
    #[serde(rename = "type")]
    pub kind: PersonalBestType,
    pub min_distance_meters: Option<u32>,
    pub max_distance_meters: Option<u32>,
}

/// A category together with its top-ranked runs.
#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct PersonalBestResult {
    pub category: PersonalBestCategory,
    pub runs: Vec<RunSummary>,
}
