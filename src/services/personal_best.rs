// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Personal-best selection.

use crate::db::{CategoryReader, RunReader, PERSONAL_BEST_LIMIT};
use crate::error::{AppError, Result};
use crate::models::{PersonalBestResult, RunSummary};

/// Ranks each of a user's personal-best categories.
pub struct PersonalBestSelector<R> {
    reader: R,
}

impl<R: RunReader + CategoryReader> PersonalBestSelector<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }

    /// Top runs for every configured category, in category sort order.
    ///
    /// A run may appear under several categories.
    pub fn compute_personal_bests(&self, user_id: u64) -> Result<Vec<PersonalBestResult>> {
        let categories = self.reader.read_personal_best_categories(user_id)?;
        if categories.is_empty() {
            return Err(AppError::NotFound(format!(
                "No personal best categories configured for user {}",
                user_id
            )));
        }

        let mut results = Vec::with_capacity(categories.len());
        for category in categories {
            let runs = self.reader.read_runs_for_category(
                user_id,
                category.distance_range(),
                category.kind.order(),
            )?;

            let range = category.distance_range();
            let runs: Vec<RunSummary> = runs
                .iter()
                .filter(|run| run.user_id == user_id && range.contains(run.distance_meters))
                .take(PERSONAL_BEST_LIMIT)
                .map(RunSummary::from)
                .collect();

            tracing::debug!(
                user_id,
                category_id = category.id,
                runs = runs.len(),
                "Ranked personal best category"
            );

            results.push(PersonalBestResult { category, runs });
        }

        // Unreachable while every category yields a result; kept so an empty
        // answer is never reported as success.
        if results.is_empty() {
            return Err(AppError::NotFound(format!(
                "No personal bests found for user {}",
                user_id
            )));
        }

        Ok(results)
    }
}
