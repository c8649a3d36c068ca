// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Personal-best API tests.

use axum::http::StatusCode;
use serde_json::json;

mod common;
use common::{create_run, create_test_app, send_as};

const USER: u64 = 777;

#[tokio::test]
async fn test_no_categories_is_not_found() {
    let (app, state) = create_test_app();
    create_run(&app, &state, USER, "2024-01-05", 5000, 1500, 44).await;

    let (status, _) = send_as(&app, &state, USER, "GET", "/api/personal-bests", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_categories_ranked_in_sort_order() {
    let (app, state) = create_test_app();
    create_run(&app, &state, USER, "2024-01-01", 5000, 1620, 44).await;
    create_run(&app, &state, USER, "2024-01-08", 5050, 1490, 45).await;
    create_run(&app, &state, USER, "2024-01-15", 10000, 3300, 46).await;
    create_run(&app, &state, USER, "2024-01-22", 21100, 7600, 46).await;

    for category in [
        json!({"title": "Longest", "sort_order": 2, "type": "DISTANCE"}),
        json!({
            "title": "5K",
            "sort_order": 1,
            "type": "SPEED",
            "min_distance_meters": 5000,
            "max_distance_meters": 5100
        }),
        json!({"title": "Time on feet", "sort_order": 3, "type": "DURATION"}),
    ] {
        let (status, _) = send_as(
            &app,
            &state,
            USER,
            "POST",
            "/api/personal-bests/categories",
            Some(category),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, body) = send_as(&app, &state, USER, "GET", "/api/personal-bests", None).await;
    assert_eq!(status, StatusCode::OK);

    let data = body["data"].as_array().unwrap();
    assert_eq!(data.len(), 3);

    assert_eq!(data[0]["category"]["title"], json!("5K"));
    assert_eq!(data[0]["category"]["type"], json!("SPEED"));
    let five_k: Vec<u64> = data[0]["runs"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["duration_seconds"].as_u64().unwrap())
        .collect();
    assert_eq!(five_k, vec![1490, 1620]);

    assert_eq!(data[1]["category"]["title"], json!("Longest"));
    let longest: Vec<u64> = data[1]["runs"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["distance_meters"].as_u64().unwrap())
        .collect();
    assert_eq!(longest, vec![21100, 10000, 5050, 5000]);

    assert_eq!(data[2]["category"]["title"], json!("Time on feet"));
    assert_eq!(data[2]["runs"][0]["duration_seconds"], json!(7600));
}

#[tokio::test]
async fn test_category_with_no_eligible_runs_is_empty() {
    let (app, state) = create_test_app();
    create_run(&app, &state, USER, "2024-01-01", 5000, 1620, 44).await;

    let (status, _) = send_as(
        &app,
        &state,
        USER,
        "POST",
        "/api/personal-bests/categories",
        Some(json!({
            "title": "Marathon",
            "type": "SPEED",
            "min_distance_meters": 42195
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send_as(&app, &state, USER, "GET", "/api/personal-bests", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"][0]["runs"], json!([]));
}

#[tokio::test]
async fn test_delete_category() {
    let (app, state) = create_test_app();

    let (_, created) = send_as(
        &app,
        &state,
        USER,
        "POST",
        "/api/personal-bests/categories",
        Some(json!({"title": "Longest", "type": "DISTANCE"})),
    )
    .await;
    let uri = format!(
        "/api/personal-bests/categories/{}",
        created["id"].as_u64().unwrap()
    );

    let (status, _) = send_as(&app, &state, USER + 1, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send_as(&app, &state, USER, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, body) = send_as(
        &app,
        &state,
        USER,
        "GET",
        "/api/personal-bests/categories",
        None,
    )
    .await;
    assert_eq!(body["data"], json!([]));
}
