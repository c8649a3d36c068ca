// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session helper routes.

use axum::{extract::State, routing::get, Extension, Json, Router};
use serde::Serialize;
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::error::Result;
use crate::middleware::auth::AuthUser;
use crate::AppState;

/// Requires authentication; mounted with the API routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/auth/csrf", get(get_csrf_token))
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct CsrfResponse {
    /// Send back in the `X-CSRF-Token` header on state-changing requests
    pub token: String,
}

/// Issue a CSRF token for the current user.
async fn get_csrf_token(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<CsrfResponse>> {
    let token = state.csrf_service.issue(user.user_id)?;
    tracing::debug!(user_id = user.user_id, "Issued CSRF token");
    Ok(Json(CsrfResponse { token }))
}
