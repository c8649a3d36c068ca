// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use tower::ServiceExt;
use treadmill_tracker::config::Config;
use treadmill_tracker::db::MemoryDb;
use treadmill_tracker::middleware::auth::create_jwt;
use treadmill_tracker::routes::create_router;
use treadmill_tracker::AppState;
use std::sync::Arc;

/// Create a test app over an empty in-memory store.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app() -> (Router, Arc<AppState>) {
    let state = Arc::new(AppState::new(Config::default(), MemoryDb::new()));
    (create_router(state.clone()), state)
}

/// Session JWT for `user_id`.
#[allow(dead_code)]
pub fn create_test_jwt(user_id: u64, signing_key: &[u8]) -> String {
    create_jwt(user_id, signing_key).expect("Failed to create JWT")
}

/// Send a request as `user_id`, attaching a CSRF token for unsafe methods.
#[allow(dead_code)]
pub async fn send_as(
    app: &Router,
    state: &AppState,
    user_id: u64,
    method: &str,
    uri: &str,
    body: Option<serde_json::Value>,
) -> (StatusCode, serde_json::Value) {
    let token = create_test_jwt(user_id, &state.config.jwt_signing_key);
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {}", token));

    if method != "GET" {
        let csrf = state
            .csrf_service
            .issue(user_id)
            .expect("Failed to issue CSRF token");
        builder = builder.header("X-CSRF-Token", csrf);
    }

    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null)
    };
    (status, json)
}

/// Create a run through the API and return its ID.
#[allow(dead_code)]
pub async fn create_run(
    app: &Router,
    state: &AppState,
    user_id: u64,
    date: &str,
    distance_meters: u32,
    duration_seconds: u32,
    vo2max: u32,
) -> u64 {
    let (status, body) = send_as(
        app,
        state,
        user_id,
        "POST",
        "/api/runs",
        Some(serde_json::json!({
            "date": date,
            "distance_meters": distance_meters,
            "duration_seconds": duration_seconds,
            "calories": distance_meters / 15,
            "vo2max": vo2max,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "create failed: {body}");
    body["id"].as_u64().expect("created run has an id")
}
