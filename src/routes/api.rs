// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! API routes for authenticated users.

use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::{
    AggregateBucket, Granularity, PersonalBestCategory, PersonalBestCategoryDraft,
    PersonalBestResult, RunDraft, RunSummary,
};
use crate::services::{BucketAggregator, PersonalBestSelector};
use crate::time_utils::parse_optional_date;
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get},
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// API routes (require authentication via JWT).
/// The auth and CSRF middleware are applied in routes/mod.rs for these routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/runs", get(get_runs).post(create_run))
        .route(
            "/api/runs/{id}",
            get(get_run).put(update_run).delete(delete_run),
        )
        .route("/api/personal-bests", get(get_personal_bests))
        .route(
            "/api/personal-bests/categories",
            get(list_categories).post(create_category),
        )
        .route(
            "/api/personal-bests/categories/{id}",
            delete(delete_category),
        )
}

/// List wrapper shared by collection endpoints.
#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct DataResponse<T> {
    pub data: Vec<T>,
}

// ─── Run History ─────────────────────────────────────────────

#[derive(Deserialize)]
struct RunsQuery {
    /// daily (default), weekly, monthly or yearly
    group_by: Option<String>,
    /// Inclusive lower bound (YYYY-MM-DD)
    start_date: Option<String>,
    /// Inclusive upper bound (YYYY-MM-DD)
    end_date: Option<String>,
}

/// Get the user's run history, grouped and newest first.
async fn get_runs(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Query(params): Query<RunsQuery>,
) -> Result<Json<DataResponse<AggregateBucket>>> {
    let granularity = Granularity::from_param(params.group_by.as_deref());
    let start_date = parse_optional_date(params.start_date.as_deref(), "start_date")?;
    let end_date = parse_optional_date(params.end_date.as_deref(), "end_date")?;

    tracing::debug!(
        user_id = user.user_id,
        ?granularity,
        ?start_date,
        ?end_date,
        "Fetching run history"
    );

    let data = BucketAggregator::new(&state.db).aggregate(
        user.user_id,
        start_date,
        end_date,
        granularity,
    )?;

    Ok(Json(DataResponse { data }))
}

// ─── Single Runs ─────────────────────────────────────────────

async fn create_run(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(draft): Json<RunDraft>,
) -> Result<(StatusCode, Json<RunSummary>)> {
    let run = state.run_service.create(user.user_id, &draft)?;
    Ok((StatusCode::CREATED, Json(RunSummary::from(&run))))
}

async fn get_run(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(run_id): Path<u64>,
) -> Result<Json<RunSummary>> {
    let run = state
        .run_service
        .get_one(user.user_id, Some(run_id))?
        .ok_or_else(|| AppError::NotFound(format!("Run {} not found", run_id)))?;
    Ok(Json(RunSummary::from(&run)))
}

async fn update_run(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(run_id): Path<u64>,
    Json(draft): Json<RunDraft>,
) -> Result<Json<RunSummary>> {
    let run = state.run_service.update(user.user_id, run_id, &draft)?;
    Ok(Json(RunSummary::from(&run)))
}

async fn delete_run(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(run_id): Path<u64>,
) -> Result<StatusCode> {
    state.run_service.delete(user.user_id, Some(run_id))?;
    Ok(StatusCode::NO_CONTENT)
}

// ─── Personal Bests ──────────────────────────────────────────

/// Get the top runs for each of the user's personal-best categories.
async fn get_personal_bests(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<DataResponse<PersonalBestResult>>> {
    tracing::debug!(user_id = user.user_id, "Computing personal bests");

    let data = PersonalBestSelector::new(&state.db).compute_personal_bests(user.user_id)?;
    Ok(Json(DataResponse { data }))
}

async fn list_categories(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<DataResponse<PersonalBestCategory>>> {
    let data = state.category_service.list(user.user_id)?;
    Ok(Json(DataResponse { data }))
}

async fn create_category(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(draft): Json<PersonalBestCategoryDraft>,
) -> Result<(StatusCode, Json<PersonalBestCategory>)> {
    let category = state.category_service.create(user.user_id, draft)?;
    Ok((StatusCode::CREATED, Json(category)))
}

async fn delete_category(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(category_id): Path<u64>,
) -> Result<StatusCode> {
    state.category_service.delete(user.user_id, category_id)?;
    Ok(StatusCode::NO_CONTENT)
}
