// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! CSRF protection for state-changing requests.
//!
//! Must run after `require_auth`: the token is checked against the
//! authenticated user.

use crate::error::AppError;
use crate::middleware::auth::AuthUser;
use crate::AppState;
use axum::{
    extract::{Request, State},
    http::Method,
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

/// Request header carrying the CSRF token.
pub const CSRF_HEADER: &str = "x-csrf-token";

/// Reject unsafe methods that lack a valid CSRF token for the current user.
pub async fn require_csrf(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    if matches!(
        *request.method(),
        Method::GET | Method::HEAD | Method::OPTIONS
    ) {
        return Ok(next.run(request).await);
    }

    let user = request
        .extensions()
        .get::<AuthUser>()
        .copied()
        .ok_or(AppError::Unauthorized)?;

    let token = request
        .headers()
        .get(CSRF_HEADER)
        .and_then(|h| h.to_str().ok())
        .ok_or(AppError::CsrfRejected)?;

    if !state.csrf_service.verify(user.user_id, token) {
        tracing::warn!(
            user_id = user.user_id,
            method = %request.method(),
            "Rejected request with invalid CSRF token"
        );
        return Err(AppError::CsrfRejected);
    }

    Ok(next.run(request).await)
}
