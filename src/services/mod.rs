// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod aggregate;
pub mod categories;
pub mod csrf;
pub mod personal_best;
pub mod runs;

pub use aggregate::BucketAggregator;
pub use categories::CategoryService;
pub use csrf::CsrfService;
pub use personal_best::PersonalBestSelector;
pub use runs::RunService;
