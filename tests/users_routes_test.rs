// ABOUTME: Integration tests for the user CRUD routes
// ABOUTME: Exercises the JSON envelopes, status codes, and sub-resource updates end to end
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Spark Health

// Test files: allow missing_docs (rustc lint) and unwrap (valid in tests)
#![allow(missing_docs, clippy::unwrap_used)]

mod helpers;

use axum::http::StatusCode;
use helpers::axum_test::AxumTestRequest;
use serde_json::{json, Value};
use spark_intake::database::Database;
use spark_intake::routes;

async fn test_router() -> axum::Router {
    let database = Database::new("sqlite::memory:").await.unwrap();
    routes::router(database)
}

fn sample_user_body() -> Value {
    json!({
        "userName": "Ada",
        "age": "36",
        "sex": "Female",
        "height": "5'6\"",
        "weight": "140lbs",
        "medicalBackground": "None notable",
        "chronicConditions": "asthma",
        "currentMedications": "albuterol",
        "hereditaryRiskPatterns": "heart disease"
    })
}

async fn create_user(router: axum::Router) -> i64 {
    let response = AxumTestRequest::post("/api/users")
        .json(&sample_user_body())
        .send(router)
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);
    let body: Value = response.json();
    assert_eq!(body["success"], json!(true));
    body["userId"].as_i64().unwrap()
}

#[tokio::test]
async fn health_endpoint_reports_ok() {
    let router = test_router().await;
    let response = AxumTestRequest::get("/health").send(router).await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["status"], json!("ok"));
}

#[tokio::test]
async fn create_then_fetch_round_trips_the_record() {
    let router = test_router().await;
    let id = create_user(router.clone()).await;

    let response = AxumTestRequest::get(&format!("/api/users/{id}"))
        .send(router)
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["success"], json!(true));
    let user = &body["user"];
    assert_eq!(user["userId"].as_i64().unwrap(), id);
    assert_eq!(user["userName"], json!("Ada"));
    assert_eq!(user["age"], json!("36"));
    assert_eq!(user["chronicConditions"], json!("asthma"));
    assert_eq!(user["wellnessReport"], json!(""));
    assert_eq!(user["wellnessCheckFrequency"], json!(""));
}

#[tokio::test]
async fn create_rejects_missing_name() {
    let router = test_router().await;
    let response = AxumTestRequest::post("/api/users")
        .json(&json!({ "userName": "  " }))
        .send(router)
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["success"], json!(false));
    assert!(body["error"].as_str().unwrap().contains("userName"));
}

#[tokio::test]
async fn fetch_unknown_user_returns_404_envelope() {
    let router = test_router().await;
    let response = AxumTestRequest::get("/api/users/999").send(router).await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert_eq!(body["success"], json!(false));
    assert!(body["error"].as_str().unwrap().contains("not found"));
}

#[tokio::test]
async fn list_returns_trimmed_records_newest_first() {
    let router = test_router().await;
    let first = create_user(router.clone()).await;
    let second = create_user(router.clone()).await;

    let response = AxumTestRequest::get("/api/users").send(router).await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["success"], json!(true));
    let users = body["users"].as_array().unwrap();
    assert_eq!(users.len(), 2);
    assert_eq!(users[0]["userId"].as_i64().unwrap(), second);
    assert_eq!(users[1]["userId"].as_i64().unwrap(), first);
    // Trimmed field set only
    assert!(users[0].get("height").is_none());
    assert!(users[0].get("medicalBackground").is_none());
    assert!(users[0].get("wellnessReport").is_some());
}

#[tokio::test]
async fn full_update_preserves_report_and_frequency() {
    let router = test_router().await;
    let id = create_user(router.clone()).await;

    let response = AxumTestRequest::put(&format!("/api/users/{id}/wellness-report"))
        .json(&json!({ "wellnessReport": "Patient reports mild fatigue." }))
        .send(router.clone())
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let mut body = sample_user_body();
    body["userName"] = json!("Ada Lovelace");
    let response = AxumTestRequest::put(&format!("/api/users/{id}"))
        .json(&body)
        .send(router.clone())
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let response = AxumTestRequest::get(&format!("/api/users/{id}"))
        .send(router)
        .await;
    let body: Value = response.json();
    assert_eq!(body["user"]["userName"], json!("Ada Lovelace"));
    assert_eq!(
        body["user"]["wellnessReport"],
        json!("Patient reports mild fatigue.")
    );
}

#[tokio::test]
async fn frequency_sub_resource_updates_only_the_frequency() {
    let router = test_router().await;
    let id = create_user(router.clone()).await;

    let response = AxumTestRequest::put(&format!("/api/users/{id}/wellness-frequency"))
        .json(&json!({ "wellnessCheckFrequency": "7" }))
        .send(router.clone())
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["success"], json!(true));

    let response = AxumTestRequest::get(&format!("/api/users/{id}"))
        .send(router)
        .await;
    let body: Value = response.json();
    assert_eq!(body["user"]["wellnessCheckFrequency"], json!("7"));
    assert_eq!(body["user"]["userName"], json!("Ada"));
}

#[tokio::test]
async fn sub_resource_updates_against_unknown_ids_return_404() {
    let router = test_router().await;

    let response = AxumTestRequest::put("/api/users/999/wellness-report")
        .json(&json!({ "wellnessReport": "report" }))
        .send(router.clone())
        .await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);

    let response = AxumTestRequest::put("/api/users/999/wellness-frequency")
        .json(&json!({ "wellnessCheckFrequency": "30" }))
        .send(router)
        .await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}
