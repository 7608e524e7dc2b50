//! Error mapping across the HTTP surface: malformed bodies, unknown routes,
//! storage timeouts and the health endpoints.

mod common;

use axum::http::StatusCode;
use axum_test::TestServer;
use common::*;
use restaurant::prelude::*;
use serde_json::{Value, json};
use std::sync::Arc;
use std::time::Duration;

#[tokio::test]
async fn test_malformed_json_is_rejected() {
    let (server, stores) = create_test_server();

    let response = server
        .post("/tables")
        .text("{\"number_of_guests\": 4,")
        .content_type("application/json")
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let body: Value = response.json();
    assert_eq!(body["code"], "INVALID_JSON");
    assert!(stores.tables.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_wrong_field_type_is_rejected() {
    let (server, _stores) = create_test_server();

    let response = server
        .post("/tables")
        .json(&json!({ "number_of_guests": "four", "table_number": 1 }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let body: Value = response.json();
    assert_eq!(body["code"], "INVALID_JSON");
}

#[tokio::test]
async fn test_unknown_route_returns_json() {
    let (server, _stores) = create_test_server();

    let response = server.get("/waiters").await;
    response.assert_status(StatusCode::NOT_FOUND);

    let body: Value = response.json();
    assert_eq!(body["code"], "ROUTE_NOT_FOUND");
    assert_eq!(body["error"], "no route for /waiters");
}

#[tokio::test]
async fn test_health_endpoints() {
    let (server, _stores) = create_test_server();

    for path in ["/health", "/healthz"] {
        let response = server.get(path).await;
        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "restaurant-rs");
    }
}

/// Table collection that never answers in time
struct StalledTables;

#[async_trait]
impl DataService<Table> for StalledTables {
    async fn list(&self) -> Result<Vec<Table>, StorageError> {
        tokio::time::sleep(Duration::from_secs(30)).await;
        Ok(Vec::new())
    }

    async fn page(&self, _window: PageWindow) -> Result<Option<Page<Table>>, StorageError> {
        tokio::time::sleep(Duration::from_secs(30)).await;
        Ok(None)
    }

    async fn get(&self, _id: &str) -> Result<Option<Table>, StorageError> {
        tokio::time::sleep(Duration::from_secs(30)).await;
        Ok(None)
    }

    async fn find_by(&self, _field: &str, _value: &str) -> Result<Vec<Table>, StorageError> {
        tokio::time::sleep(Duration::from_secs(30)).await;
        Ok(Vec::new())
    }

    async fn create(&self, entity: Table) -> Result<InsertReceipt, StorageError> {
        tokio::time::sleep(Duration::from_secs(30)).await;
        Ok(InsertReceipt {
            inserted_id: entity.table_id,
        })
    }

    async fn create_many(&self, _entities: Vec<Table>) -> Result<Vec<InsertReceipt>, StorageError> {
        tokio::time::sleep(Duration::from_secs(30)).await;
        Ok(Vec::new())
    }

    async fn upsert(
        &self,
        _id: &str,
        _update: UpdateDocument,
    ) -> Result<UpdateReceipt, StorageError> {
        tokio::time::sleep(Duration::from_secs(30)).await;
        Err(StorageError::operation("update table", "unreachable"))
    }
}

#[tokio::test]
async fn test_storage_timeout_maps_to_gateway_timeout() {
    let mut stores = Stores::in_memory();
    stores.tables = Arc::new(StalledTables);
    let stores = stores.with_timeout(Duration::from_millis(50));

    let app = ServerBuilder::new()
        .with_stores(stores)
        .register_restaurant_entities()
        .unwrap()
        .build()
        .unwrap();
    let server = TestServer::try_new(app).unwrap();

    let response = server.get("/tables").await;
    response.assert_status(StatusCode::GATEWAY_TIMEOUT);

    let body: Value = response.json();
    assert_eq!(body["code"], "STORAGE_TIMEOUT");
    assert_eq!(body["error"], "list table timed out after 0s");

    // Reference checks go through the same deadline
    let response = server
        .post("/orders")
        .json(&json!({ "order_date": "2026-10-18T12:00:00Z", "table_id": "t1" }))
        .await;
    response.assert_status(StatusCode::GATEWAY_TIMEOUT);
}
