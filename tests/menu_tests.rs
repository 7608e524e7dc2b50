//! HTTP tests for the menu endpoints and the validity window rule

mod common;

use axum::http::StatusCode;
use chrono::{Duration, SecondsFormat, Utc};
use common::*;
use restaurant::prelude::*;
use serde_json::{Value, json};

fn in_days(days: i64) -> String {
    (Utc::now() + Duration::days(days)).to_rfc3339_opts(SecondsFormat::Secs, true)
}

#[tokio::test]
async fn test_list_menus_empty() {
    let (server, _) = create_test_server();

    let response = server.get("/menus").await;
    response.assert_status_ok();

    let body: Vec<Value> = response.json();
    assert!(body.is_empty());
}

#[tokio::test]
async fn test_create_and_list_menus() {
    let (server, _) = create_test_server();

    let response = server
        .post("/menus")
        .json(&json!({ "name": "Breakfast", "category": "Morning" }))
        .await;
    response.assert_status(StatusCode::CREATED);
    let created: Value = response.json();
    let menu_id = created["data"]["inserted_id"].as_str().unwrap();

    let menus: Vec<Value> = server.get("/menus").await.json();
    assert_eq!(menus.len(), 1);
    assert_eq!(menus[0]["menu_id"], menu_id);
    assert_eq!(menus[0]["name"], "Breakfast");
    assert!(menus[0].get("start_date").is_none());
}

#[tokio::test]
async fn test_create_with_valid_window() {
    let (server, _) = create_test_server();

    let response = server
        .post("/menus")
        .json(&json!({
            "name": "Summer",
            "category": "Seasonal",
            "start_date": in_days(1),
            "end_date": in_days(90)
        }))
        .await;
    response.assert_status(StatusCode::CREATED);
}

#[tokio::test]
async fn test_create_with_inverted_window_is_rejected() {
    let (server, stores) = create_test_server();

    let response = server
        .post("/menus")
        .json(&json!({
            "name": "Backwards",
            "category": "Seasonal",
            "start_date": in_days(10),
            "end_date": in_days(2)
        }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let body: Value = response.json();
    assert_eq!(body["details"]["fields"][0]["field"], "end_date");
    assert!(stores.menus.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_create_with_expired_window_is_rejected() {
    let (server, _) = create_test_server();

    let response = server
        .post("/menus")
        .json(&json!({
            "name": "Last year",
            "category": "Seasonal",
            "start_date": in_days(-400),
            "end_date": in_days(-35)
        }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_missing_category_is_rejected() {
    let (server, _) = create_test_server();

    let response = server
        .post("/menus")
        .json(&json!({ "name": "Nameless" }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let body: Value = response.json();
    assert_eq!(body["code"], "INVALID_JSON");
}

#[tokio::test]
async fn test_update_menu_window() {
    let (server, stores) = create_test_server();
    let menu = seed_menu(&stores, "Lunch").await;

    let response = server
        .patch(&format!("/menus/{}", menu.menu_id))
        .json(&json!({ "start_date": in_days(5), "end_date": in_days(1) }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let end = in_days(60);
    let response = server
        .patch(&format!("/menus/{}", menu.menu_id))
        .json(&json!({ "category": "Business", "end_date": end }))
        .await;
    response.assert_status_ok();

    let updated = stores.menus.get(&menu.menu_id).await.unwrap().unwrap();
    assert_eq!(updated.category.as_deref(), Some("Business"));
    assert_eq!(updated.name, menu.name);
    assert_eq!(updated.start_date, menu.start_date);
    assert_eq!(
        updated.end_date.map(|d| d.to_rfc3339_opts(SecondsFormat::Secs, true)),
        Some(end)
    );
}

#[tokio::test]
async fn test_get_menu() {
    let (server, stores) = create_test_server();
    let menu = seed_menu(&stores, "Tasting").await;

    let response = server.get(&format!("/menus/{}", menu.menu_id)).await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["name"], "Tasting");

    server
        .get("/menus/unknown")
        .await
        .assert_status(StatusCode::NOT_FOUND);
}
