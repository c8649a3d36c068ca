// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Database layer.
//!
//! The aggregation and personal-best services only see storage through the
//! read traits defined here, so any backend that can list a user's runs and
//! categories can drive them.

pub mod memory;

pub use memory::MemoryDb;

use chrono::NaiveDate;

use crate::error::Result;
use crate::models::{DistanceRange, PersonalBestCategory, Run, RunOrder};

/// Maximum runs returned per personal-best category.
pub const PERSONAL_BEST_LIMIT: usize = 10;

/// Read access to stored runs.
pub trait RunReader {
    /// All runs for `user_id` dated within the inclusive bounds, in no
    /// particular order.
    fn read_runs(
        &self,
        user_id: u64,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Result<Vec<Run>>;

    /// Top runs for a personal-best category.
    ///
    /// Backends that can push the filter, sort and limit down into a query
    /// should override this; the result must match the default.
    fn read_runs_for_category(
        &self,
        user_id: u64,
        range: DistanceRange,
        order: RunOrder,
    ) -> Result<Vec<Run>> {
        let mut runs: Vec<Run> = self
            .read_runs(user_id, None, None)?
            .into_iter()
            .filter(|run| run.user_id == user_id && range.contains(run.distance_meters))
            .collect();
        runs.sort_by(|a, b| order.compare(a, b));
        runs.truncate(PERSONAL_BEST_LIMIT);
        Ok(runs)
    }
}

/// Read access to personal-best configuration.
pub trait CategoryReader {
    /// Categories owned by `user_id`, ordered by `sort_order` ascending.
    fn read_personal_best_categories(&self, user_id: u64) -> Result<Vec<PersonalBestCategory>>;
}

impl<T: RunReader + ?Sized> RunReader for &T {
    fn read_runs(
        &self,
        user_id: u64,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Result<Vec<Run>> {
        (**self).read_runs(user_id, start_date, end_date)
    }

    fn read_runs_for_category(
        &self,
        user_id: u64,
        range: DistanceRange,
        order: RunOrder,
    ) -> Result<Vec<Run>> {
        (**self).read_runs_for_category(user_id, range, order)
    }
}

impl<T: CategoryReader + ?Sized> CategoryReader for &T {
    fn read_personal_best_categories(&self, user_id: u64) -> Result<Vec<PersonalBestCategory>> {
        (**self).read_personal_best_categories(user_id)
    }
}
