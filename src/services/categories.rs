// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Personal-best category management.

use validator::Validate;

use crate::db::{CategoryReader, MemoryDb};
use crate::error::{AppError, Result};
use crate::models::{PersonalBestCategory, PersonalBestCategoryDraft};

#[derive(Clone)]
pub struct CategoryService {
    db: MemoryDb,
}

impl CategoryService {
    pub fn new(db: MemoryDb) -> Self {
        Self { db }
    }

    /// The user's categories in presentation order.
    pub fn list(&self, user_id: u64) -> Result<Vec<PersonalBestCategory>> {
        self.db.read_personal_best_categories(user_id)
    }

    /// Add a category after checking its title and distance bounds.
    pub fn create(
        &self,
        user_id: u64,
        draft: PersonalBestCategoryDraft,
    ) -> Result<PersonalBestCategory> {
        draft.validate()?;

        if let (Some(min), Some(max)) = (draft.min_distance_meters, draft.max_distance_meters) {
            if min > max {
                return Err(AppError::InvalidArgument(format!(
                    "min_distance_meters ({}) exceeds max_distance_meters ({})",
                    min, max
                )));
            }
        }

        let category = self.db.insert_category(user_id, draft)?;
        tracing::info!(
            user_id,
            category_id = category.id,
            kind = ?category.kind,
            "Personal best category created"
        );
        Ok(category)
    }

    pub fn delete(&self, user_id: u64, category_id: u64) -> Result<()> {
        if !self.db.delete_category(user_id, category_id)? {
            return Err(AppError::NotFound(format!(
                "Category {} not found",
                category_id
            )));
        }
        tracing::info!(user_id, category_id, "Personal best category deleted");
        Ok(())
    }
}
