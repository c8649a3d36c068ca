// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Middleware modules (authentication, CSRF).

pub mod auth;
pub mod csrf;

pub use auth::require_auth;
pub use csrf::require_csrf;
