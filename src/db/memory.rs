// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-process store for runs and personal-best categories.
//!
//! Records live in sharded concurrent maps, so a mutation of one run only
//! locks that run's shard and concurrent edits of the same run are
//! serialized.

use chrono::NaiveDate;
use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::db::{CategoryReader, RunReader};
use crate::error::{AppError, Result};
use crate::models::{PersonalBestCategory, PersonalBestCategoryDraft, Run, RunFields};

#[derive(Default)]
struct Tables {
    runs: DashMap<u64, Run>,
    categories: DashMap<u64, PersonalBestCategory>,
    last_run_id: AtomicU64,
    last_category_id: AtomicU64,
}

/// In-memory database handle. Clones share the same tables.
#[derive(Clone, Default)]
pub struct MemoryDb {
    tables: Arc<Tables>,
}

impl MemoryDb {
    pub fn new() -> Self {
        tracing::info!("Using in-memory run store");
        Self::default()
    }

    // ─── Run Operations ──────────────────────────────────────────

    /// Store a new run and return it with its assigned ID.
    pub fn insert_run(&self, user_id: u64, fields: RunFields) -> Result<Run> {
        let id = self.tables.last_run_id.fetch_add(1, Ordering::Relaxed) + 1;
        let run = fields.into_run(id, user_id);
        self.tables.runs.insert(id, run.clone());
        Ok(run)
    }

    /// Get a run by ID regardless of owner.
    pub fn get_run(&self, run_id: u64) -> Result<Option<Run>> {
        Ok(self.tables.runs.get(&run_id).map(|entry| entry.value().clone()))
    }

    /// Mutate a run in place while holding its lock.
    ///
    /// `f` may reject the change, in which case the run is left untouched.
    pub fn update_run<F>(&self, run_id: u64, f: F) -> Result<Run>
    where
        F: FnOnce(&mut Run) -> Result<()>,
    {
        let mut entry = self
            .tables
            .runs
            .get_mut(&run_id)
            .ok_or_else(|| AppError::NotFound(format!("Run {} not found", run_id)))?;

        let mut updated = entry.value().clone();
        f(&mut updated)?;
        *entry.value_mut() = updated.clone();
        Ok(updated)
    }

    /// Delete a run if `approve` accepts it. Returns the removed run.
    pub fn delete_run_if<F>(&self, run_id: u64, approve: F) -> Result<Option<Run>>
    where
        F: FnOnce(&Run) -> bool,
    {
        Ok(self
            .tables
            .runs
            .remove_if(&run_id, |_, run| approve(run))
            .map(|(_, run)| run))
    }

    // ─── Category Operations ─────────────────────────────────────

    /// Store a new personal-best category for a user.
    pub fn insert_category(
        &self,
        user_id: u64,
        draft: PersonalBestCategoryDraft,
    ) -> Result<PersonalBestCategory> {
        let id = self.tables.last_category_id.fetch_add(1, Ordering::Relaxed) + 1;
        let category = PersonalBestCategory {
            id,
            user_id,
            title: draft.title,
            sort_order: draft.sort_order,
            kind: draft.kind,
            min_distance_meters: draft.min_distance_meters,
            max_distance_meters: draft.max_distance_meters,
        };
        self.tables.categories.insert(id, category.clone());
        Ok(category)
    }

    /// Delete a category owned by `user_id`. Returns whether one was removed.
    pub fn delete_category(&self, user_id: u64, category_id: u64) -> Result<bool> {
        Ok(self
            .tables
            .categories
            .remove_if(&category_id, |_, category| category.user_id == user_id)
            .is_some())
    }
}

impl RunReader for MemoryDb {
    fn read_runs(
        &self,
        user_id: u64,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Result<Vec<Run>> {
        Ok(self
            .tables
            .runs
            .iter()
            .filter(|entry| {
                let run = entry.value();
                run.user_id == user_id
                    && start_date.is_none_or(|start| run.date >= start)
                    && end_date.is_none_or(|end| run.date <= end)
            })
            .map(|entry| entry.value().clone())
            .collect())
    }
}

impl CategoryReader for MemoryDb {
    fn read_personal_best_categories(&self, user_id: u64) -> Result<Vec<PersonalBestCategory>> {
        let mut categories: Vec<PersonalBestCategory> = self
            .tables
            .categories
            .iter()
            .filter(|entry| entry.value().user_id == user_id)
            .map(|entry| entry.value().clone())
            .collect();
        categories.sort_by(|a, b| a.sort_order.cmp(&b.sort_order).then(a.id.cmp(&b.id)));
        Ok(categories)
    }
}
