// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Run history API tests.
//!
//! These tests drive the router end to end over an in-memory store:
//! 1. Runs created via the API show up in the history
//! 2. Grouping, date filtering and ordering are applied
//! 3. Empty scopes and bad parameters map to the right statuses

use axum::http::StatusCode;
use serde_json::json;

mod common;
use common::{create_run, create_test_app, send_as};

const USER: u64 = 12345;

#[tokio::test]
async fn test_daily_history_newest_first() {
    let (app, state) = create_test_app();
    create_run(&app, &state, USER, "2024-01-05", 5000, 1500, 44).await;
    create_run(&app, &state, USER, "2024-01-20", 10000, 3600, 46).await;
    create_run(&app, &state, USER, "2023-12-31", 3000, 1000, 40).await;

    let (status, body) = send_as(&app, &state, USER, "GET", "/api/runs", None).await;

    assert_eq!(status, StatusCode::OK);
    let data = body["data"].as_array().unwrap();
    assert_eq!(data.len(), 3);
    assert_eq!(data[0]["bucket_label"], json!("2024-01-20"));
    assert_eq!(data[0]["pace"], json!(10.0));
    assert_eq!(data[1]["bucket_label"], json!("2024-01-05"));
    assert_eq!(data[2]["bucket_label"], json!("2023-12-31"));
}

#[tokio::test]
async fn test_monthly_history() {
    let (app, state) = create_test_app();
    create_run(&app, &state, USER, "2024-01-05", 5000, 1500, 44).await;
    create_run(&app, &state, USER, "2024-01-20", 10000, 3600, 47).await;
    create_run(&app, &state, USER, "2024-02-02", 3000, 1000, 40).await;

    let (status, body) = send_as(
        &app,
        &state,
        USER,
        "GET",
        "/api/runs?group_by=monthly",
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let data = body["data"].as_array().unwrap();
    assert_eq!(data.len(), 2);
    assert_eq!(data[0]["bucket_label"], json!("2024-02"));
    assert_eq!(data[1]["bucket_label"], json!("2024-01"));
    assert_eq!(data[1]["total_distance_meters"], json!(15000));
    assert_eq!(data[1]["total_duration_seconds"], json!(5100));
    assert_eq!(data[1]["average_vo2max"], json!(45.5));
    assert_eq!(data[1]["run_count"], json!(2));
    assert!(data[1].get("run_id").is_none());
}

#[tokio::test]
async fn test_yearly_label_is_a_number() {
    let (app, state) = create_test_app();
    create_run(&app, &state, USER, "2024-01-05", 5000, 1500, 44).await;

    let (_, body) = send_as(
        &app,
        &state,
        USER,
        "GET",
        "/api/runs?group_by=yearly",
        None,
    )
    .await;

    assert_eq!(body["data"][0]["bucket_label"], json!(2024));
}

#[tokio::test]
async fn test_date_range_inclusive() {
    let (app, state) = create_test_app();
    create_run(&app, &state, USER, "2024-03-01", 5000, 1500, 44).await;
    create_run(&app, &state, USER, "2024-03-10", 5000, 1500, 44).await;
    create_run(&app, &state, USER, "2024-03-11", 5000, 1500, 44).await;
    create_run(&app, &state, USER, "2024-02-29", 5000, 1500, 44).await;

    let (status, body) = send_as(
        &app,
        &state,
        USER,
        "GET",
        "/api/runs?start_date=2024-03-01&end_date=2024-03-10",
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let labels: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|b| b["bucket_label"].as_str().unwrap())
        .collect();
    assert_eq!(labels, vec!["2024-03-10", "2024-03-01"]);
}

#[tokio::test]
async fn test_no_runs_is_not_found() {
    let (app, state) = create_test_app();

    let (status, body) = send_as(&app, &state, USER, "GET", "/api/runs", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], json!("not_found"));
}

#[tokio::test]
async fn test_other_users_runs_are_invisible() {
    let (app, state) = create_test_app();
    create_run(&app, &state, USER, "2024-01-05", 5000, 1500, 44).await;

    let (status, _) = send_as(&app, &state, USER + 1, "GET", "/api/runs", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_and_delete_run() {
    let (app, state) = create_test_app();
    let id = create_run(&app, &state, USER, "2024-01-05", 5000, 1500, 44).await;
    let uri = format!("/api/runs/{}", id);

    let (status, body) = send_as(
        &app,
        &state,
        USER,
        "PUT",
        &uri,
        Some(json!({
            "date": "2024-01-06",
            "distance_meters": 6000,
            "duration_seconds": 1800,
            "calories": 400,
            "vo2max": 45
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["date"], json!("2024-01-06"));
    assert_eq!(body["pace"], json!(12.0));

    // Another user cannot touch it
    let (status, _) = send_as(&app, &state, USER + 1, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send_as(&app, &state, USER, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send_as(&app, &state, USER, "GET", &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_unknown_run_is_not_found() {
    let (app, state) = create_test_app();

    let (status, _) = send_as(
        &app,
        &state,
        USER,
        "PUT",
        "/api/runs/999",
        Some(json!({
            "date": "2024-01-06",
            "distance_meters": 6000,
            "duration_seconds": 1800
        })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
