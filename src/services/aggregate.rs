// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Run history aggregation.
//!
//! Groups a user's runs into day/week/month/year buckets, newest first:
//! 1. Read runs in the requested date range
//! 2. Re-apply the inclusive range filter
//! 3. Derive each run's bucket key and fold totals
//! 4. Emit buckets by key, descending

use chrono::NaiveDate;
use std::collections::BTreeMap;

use crate::db::RunReader;
use crate::error::{AppError, Result};
use crate::models::stats::BucketTotals;
use crate::models::{AggregateBucket, BucketKey, Granularity, Run};

/// Computes bucketed totals over a user's runs.
pub struct BucketAggregator<R> {
    reader: R,
}

impl<R: RunReader> BucketAggregator<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }

    /// Aggregate a user's runs at the given granularity.
    ///
    /// Fails with `NotFound` when no runs fall inside the range.
    pub fn aggregate(
        &self,
        user_id: u64,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
        granularity: Granularity,
    ) -> Result<Vec<AggregateBucket>> {
        let runs: Vec<Run> = self
            .reader
            .read_runs(user_id, start_date, end_date)?
            .into_iter()
            .filter(|run| {
                run.user_id == user_id
                    && start_date.is_none_or(|start| run.date >= start)
                    && end_date.is_none_or(|end| run.date <= end)
            })
            .collect();

        if runs.is_empty() {
            return Err(AppError::NotFound(format!(
                "No runs found for user {}",
                user_id
            )));
        }

        let buckets = match granularity {
            Granularity::None => per_run_rows(runs),
            _ => grouped_rows(runs, granularity),
        };

        tracing::debug!(
            user_id,
            ?granularity,
            buckets = buckets.len(),
            "Aggregated runs"
        );

        Ok(buckets)
    }
}

/// One row per run, newest first.
fn per_run_rows(mut runs: Vec<Run>) -> Vec<AggregateBucket> {
    runs.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| b.id.cmp(&a.id)));
    runs.iter()
        .map(|run| {
            let mut totals = BucketTotals::default();
            totals.add(run);
            let mut bucket = totals.into_bucket(BucketKey::Day(run.date));
            bucket.run_id = Some(run.id);
            bucket.pace = Some(run.pace());
            bucket
        })
        .collect()
}

fn grouped_rows(runs: Vec<Run>, granularity: Granularity) -> Vec<AggregateBucket> {
    let mut groups: BTreeMap<BucketKey, BucketTotals> = BTreeMap::new();
    for run in &runs {
        groups
            .entry(granularity.bucket_key(run.date))
            .or_default()
            .add(run);
    }

    groups
        .into_iter()
        .rev()
        .map(|(key, totals)| totals.into_bucket(key))
        .collect()
}
