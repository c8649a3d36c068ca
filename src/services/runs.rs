// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Run create/read/update/delete with ownership checks.

use crate::db::MemoryDb;
use crate::error::{AppError, Result};
use crate::models::{Run, RunDraft};

/// Run management on behalf of a single requesting user.
#[derive(Clone)]
pub struct RunService {
    db: MemoryDb,
}

impl RunService {
    pub fn new(db: MemoryDb) -> Self {
        Self { db }
    }

    /// Validate and store a new run owned by `user_id`.
    pub fn create(&self, user_id: u64, draft: &RunDraft) -> Result<Run> {
        let fields = draft.parse()?;
        let run = self.db.insert_run(user_id, fields)?;
        tracing::info!(user_id, run_id = run.id, date = %run.date, "Run created");
        Ok(run)
    }

    /// Overwrite a run's date, distance, duration, calories and vo2max.
    pub fn update(&self, user_id: u64, run_id: u64, draft: &RunDraft) -> Result<Run> {
        let fields = draft.parse()?;
        let run = self.db.update_run(run_id, |run| {
            ensure_owner(run, user_id)?;
            fields.apply_to(run);
            Ok(())
        })?;
        tracing::info!(user_id, run_id, "Run updated");
        Ok(run)
    }

    /// Delete one of the user's runs.
    pub fn delete(&self, user_id: u64, run_id: Option<u64>) -> Result<()> {
        let run_id = run_id
            .ok_or_else(|| AppError::InvalidArgument("A run ID is required".to_string()))?;

        let existing = self
            .db
            .get_run(run_id)?
            .ok_or_else(|| AppError::NotFound(format!("Run {} not found", run_id)))?;
        ensure_owner(&existing, user_id)?;

        // The run may have vanished since the lookup.
        self.db
            .delete_run_if(run_id, |run| run.user_id == user_id)?
            .ok_or_else(|| AppError::NotFound(format!("Run {} not found", run_id)))?;

        tracing::info!(user_id, run_id, "Run deleted");
        Ok(())
    }

    /// Fetch one of the user's runs.
    ///
    /// No ID means nothing was asked for and yields `None`; an ID that does
    /// not resolve to one of the user's runs is an error.
    pub fn get_one(&self, user_id: u64, run_id: Option<u64>) -> Result<Option<Run>> {
        let Some(run_id) = run_id else {
            return Ok(None);
        };

        match self.db.get_run(run_id)? {
            Some(run) if run.user_id == user_id => Ok(Some(run)),
            _ => Err(AppError::NotFound(format!("Run {} not found", run_id))),
        }
    }
}

fn ensure_owner(run: &Run, user_id: u64) -> Result<()> {
    if run.user_id != user_id {
        tracing::warn!(
            user_id,
            run_id = run.id,
            "Attempt to modify another user's run"
        );
        return Err(AppError::InvalidArgument(format!(
            "Run {} does not belong to the requesting user",
            run.id
        )));
    }
    Ok(())
}
