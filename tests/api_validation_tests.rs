// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Input validation tests.
//!
//! Every request here carries a valid token but bad input, and must be
//! rejected with 400 before the (offline) database is touched.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use tower::ServiceExt;

mod common;
use common::{create_test_app, create_test_jwt};

fn authed_app() -> (Router, String) {
    let (app, state) = create_test_app();
    let token = create_test_jwt("runner-1", &state.config.jwt_signing_key);
    (app, token)
}

fn json_request(method: &str, uri: &str, token: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn error_details(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_search_text_too_long() {
    let (app, token) = authed_app();
    let q = "a".repeat(101);

    let response = app
        .oneshot(
            Request::builder()
                .uri(format!("/api/runs?type=all&q={}", q))
                .header(header::AUTHORIZATION, format!("Bearer {}", token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = error_details(response).await;
    assert_eq!(body["error"], "bad_request");
}

#[tokio::test]
async fn test_unknown_filter_type() {
    let (app, token) = authed_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/runs?type=marathon")
                .header(header::AUTHORIZATION, format!("Bearer {}", token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_run_in_the_future() {
    let (app, token) = authed_app();
    let tomorrow = chrono::Utc::now().date_naive() + chrono::Duration::days(2);

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/runs",
            &token,
            serde_json::json!({
                "run_type": "race",
                "date": tomorrow.format("%Y-%m-%d").to_string(),
                "distance_category": "10K",
                "minutes": 50,
                "race_name": "Spring 10K"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = error_details(response).await;
    assert!(body["details"].as_str().unwrap().contains("future"));
}

#[tokio::test]
async fn test_create_run_minutes_out_of_range() {
    let (app, token) = authed_app();

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/runs",
            &token,
            serde_json::json!({
                "run_type": "race",
                "date": "2024-04-01",
                "distance_category": "5K",
                "minutes": 60,
                "race_name": "Park Run"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_race_without_name() {
    let (app, token) = authed_app();

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/runs",
            &token,
            serde_json::json!({
                "run_type": "race",
                "date": "2024-04-01",
                "distance_category": "HALF",
                "hours": 1,
                "minutes": 45,
                "race_name": "   "
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_custom_run_without_distance() {
    let (app, token) = authed_app();

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/runs",
            &token,
            serde_json::json!({
                "run_type": "casual",
                "date": "2024-04-01",
                "distance_category": "CUSTOM",
                "minutes": 30,
                "city": "Seoul"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_too_many_photos() {
    let (app, token) = authed_app();

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/runs",
            &token,
            serde_json::json!({
                "run_type": "casual",
                "date": "2024-04-01",
                "distance_category": "5K",
                "minutes": 28,
                "city": "Busan",
                "photos": [
                    "https://cdn.example.com/1.jpg",
                    "https://cdn.example.com/2.jpg",
                    "https://cdn.example.com/3.jpg",
                    "https://cdn.example.com/4.jpg"
                ]
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_malformed_json_body() {
    let (app, token) = authed_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/runs")
                .header(header::AUTHORIZATION, format!("Bearer {}", token))
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from("{\"run_type\": "))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_profile_nickname_too_short() {
    let (app, token) = authed_app();

    let response = app
        .oneshot(json_request(
            "PUT",
            "/api/me",
            &token,
            serde_json::json!({ "nickname": "a" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_profile_photo_url_must_be_http() {
    let (app, token) = authed_app();

    let response = app
        .oneshot(json_request(
            "PUT",
            "/api/me",
            &token,
            serde_json::json!({ "photo_url": "javascript:alert(1)" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_profile_email_must_be_valid() {
    let (app, token) = authed_app();

    let response = app
        .oneshot(json_request(
            "PUT",
            "/api/me",
            &token,
            serde_json::json!({ "nickname": "Pacer", "email": "pacer-at-example" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
