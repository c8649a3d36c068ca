// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod personal_best;
pub mod run;
pub mod stats;

pub use personal_best::{
    DistanceRange, PersonalBestCategory, PersonalBestCategoryDraft, PersonalBestResult,
    PersonalBestType, RunOrder,
};
pub use run::{Run, RunDraft, RunFields, RunSummary};
pub use stats::{AggregateBucket, BucketKey, Granularity};
