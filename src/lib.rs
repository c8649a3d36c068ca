// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Treadmill Tracker: record runs and analyse training history
//!
//! This crate provides the backend API for storing runs, aggregating them
//! into daily/weekly/monthly/yearly history, and ranking personal bests.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use db::MemoryDb;
use services::{CategoryService, CsrfService, RunService};

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: MemoryDb,
    pub run_service: RunService,
    pub category_service: CategoryService,
    pub csrf_service: CsrfService,
}

impl AppState {
    /// Wire services around a store.
    pub fn new(config: Config, db: MemoryDb) -> Self {
        let csrf_service = CsrfService::new(&config.csrf_secret, config.csrf_token_ttl_seconds);
        Self {
            run_service: RunService::new(db.clone()),
            category_service: CategoryService::new(db.clone()),
            csrf_service,
            config,
            db,
        }
    }
}
