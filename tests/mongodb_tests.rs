//! Integration tests against a real MongoDB server.
//!
//! # Requirements
//!
//! - Docker must be running (testcontainers launches a MongoDB container)
//! - Feature flag `mongodb_tests` must be enabled
//!
//! # Running
//!
//! ```sh
//! cargo test --features mongodb_tests --test mongodb_tests -- --test-threads=1
//! ```
//!
//! All tests share a single container (via `OnceLock`); each test gets its
//! own database.

#![cfg(feature = "mongodb_tests")]

use axum::http::StatusCode;
use axum_test::TestServer;
use chrono::Utc;
use restaurant::prelude::*;
use serde_json::{Value, json};
use std::sync::OnceLock;
use std::sync::atomic::{AtomicU64, Ordering};
use testcontainers::runners::AsyncRunner;
use testcontainers_modules::mongo::Mongo;

// ---------------------------------------------------------------------------
// Shared test environment
// ---------------------------------------------------------------------------

struct MongoTestEnv {
    /// Dropping this stops the container
    _container: testcontainers::ContainerAsync<Mongo>,
    uri: String,
}

static TEST_ENV: OnceLock<MongoTestEnv> = OnceLock::new();
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

async fn init_mongo_env() -> &'static MongoTestEnv {
    if let Some(env) = TEST_ENV.get() {
        return env;
    }

    let container = Mongo::default()
        .start()
        .await
        .expect("Failed to start MongoDB container, is Docker running?");

    let host = container.get_host().await.unwrap();
    let port = container.get_host_port_ipv4(27017).await.unwrap();

    let _ = TEST_ENV.set(MongoTestEnv {
        _container: container,
        uri: format!("mongodb://{host}:{port}"),
    });
    TEST_ENV.get().unwrap()
}

/// Connect to a fresh database through the production connect path
async fn database_config() -> DatabaseConfig {
    let env = init_mongo_env().await;
    let n = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
    DatabaseConfig {
        uri: env.uri.clone(),
        name: format!("restaurant_test_{n}"),
        connect_timeout_secs: 10,
    }
}

async fn fresh_database() -> mongodb::Database {
    connect(&database_config().await)
        .await
        .expect("Failed to connect to MongoDB")
}

async fn table_service() -> MongoDataService<Table> {
    let service = MongoDataService::<Table>::new(fresh_database().await);
    service.ensure_indexes().await.unwrap();
    service
}

// ---------------------------------------------------------------------------
// Data service
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_connect_fails_for_unreachable_server() {
    let config = DatabaseConfig {
        uri: "mongodb://127.0.0.1:1".to_string(),
        name: "unreachable".to_string(),
        connect_timeout_secs: 1,
    };

    let err = connect(&config).await.unwrap_err();
    assert!(matches!(err, StorageError::Connection { .. }));
}

#[tokio::test]
async fn test_create_get_and_exists() {
    let service = table_service().await;
    let table = Table::new(Stamp::fresh(), 4, 12);

    let receipt = service.create(table.clone()).await.unwrap();
    assert_eq!(receipt.inserted_id, table.table_id);

    let fetched = service.get(&table.table_id).await.unwrap().unwrap();
    assert_eq!(fetched.table_number, Some(12));
    assert_eq!(fetched.created_at, table.created_at);
    assert!(service.exists(&table.table_id).await.unwrap());
    assert!(!service.exists("ffffffffffffffffffffffff").await.unwrap());
}

#[tokio::test]
async fn test_duplicate_id_is_rejected() {
    let service = table_service().await;
    let table = Table::new(Stamp::fresh(), 2, 1);

    service.create(table.clone()).await.unwrap();
    assert!(service.create(table).await.is_err());
    assert_eq!(service.list().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_create_many_and_list_in_insertion_order() {
    let service = table_service().await;
    let tables: Vec<Table> = (1..=3).map(|n| Table::new(Stamp::fresh(), 2, n)).collect();

    let receipts = service.create_many(tables.clone()).await.unwrap();
    assert_eq!(receipts.len(), 3);
    assert!(service.create_many(Vec::new()).await.unwrap().is_empty());

    let numbers: Vec<_> = service
        .list()
        .await
        .unwrap()
        .into_iter()
        .map(|t| t.table_number)
        .collect();
    assert_eq!(numbers, vec![Some(1), Some(2), Some(3)]);
}

#[tokio::test]
async fn test_page_counts_and_slices() {
    let service = table_service().await;
    assert!(service.page(PageWindow::new(0, 10)).await.unwrap().is_none());

    for n in 1..=5 {
        service.create(Table::new(Stamp::fresh(), 2, n)).await.unwrap();
    }

    let page = service.page(PageWindow::new(2, 2)).await.unwrap().unwrap();
    assert_eq!(page.total_count, 5);
    let numbers: Vec<_> = page.items.iter().map(|t| t.table_number).collect();
    assert_eq!(numbers, vec![Some(3), Some(4)]);

    let page = service.page(PageWindow::new(20, 2)).await.unwrap().unwrap();
    assert_eq!(page.total_count, 5);
    assert!(page.items.is_empty());

    let page = service.page(PageWindow::new(-2, 2)).await.unwrap().unwrap();
    let numbers: Vec<_> = page.items.iter().map(|t| t.table_number).collect();
    assert_eq!(numbers, vec![Some(4), Some(5)]);
}

#[tokio::test]
async fn test_documents_with_native_dates_are_readable() {
    use mongodb::bson::{DateTime as BsonDateTime, doc, oid::ObjectId};

    let database = fresh_database().await;
    let service = MongoDataService::<Table>::new(database.clone());
    let oid = ObjectId::new();
    let at = BsonDateTime::from_millis(1_792_350_000_000);
    database
        .collection::<mongodb::bson::Document>("table")
        .insert_one(doc! {
            "_id": oid,
            "table_id": oid.to_hex(),
            "number_of_guests": 2_i32,
            "table_number": 5_i32,
            "created_at": at,
            "updated_at": at,
        })
        .await
        .unwrap();

    let table = service.get(&oid.to_hex()).await.unwrap().unwrap();
    assert_eq!(table.table_number, Some(5));
    assert_eq!(table.created_at.timestamp_millis(), 1_792_350_000_000);

    // Records written here are stored with native dates too
    let mine = Table::new(Stamp::fresh(), 4, 6);
    service.create(mine.clone()).await.unwrap();
    let raw = database
        .collection::<mongodb::bson::Document>("table")
        .find_one(doc! { "table_id": &mine.table_id })
        .await
        .unwrap()
        .unwrap();
    assert!(raw.get_datetime("created_at").is_ok());
    assert_eq!(service.list().await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_upsert_updates_then_creates() {
    let service = table_service().await;
    let table = Table::new(Stamp::fresh(), 2, 9);
    service.create(table.clone()).await.unwrap();

    let update = UpdateDocument::builder()
        .set("number_of_guests", 6)
        .finish(Utc::now());
    let receipt = service.upsert(&table.table_id, update).await.unwrap();
    assert_eq!(receipt.matched_count, 1);
    assert_eq!(receipt.modified_count, 1);
    assert_eq!(receipt.upserted_count, 0);

    let updated = service.get(&table.table_id).await.unwrap().unwrap();
    assert_eq!(updated.number_of_guests, Some(6));
    assert_eq!(updated.table_number, Some(9));
    assert_eq!(updated.created_at, table.created_at);

    let stamp = Stamp::fresh();
    let update = UpdateDocument::builder()
        .set("table_number", 3)
        .finish(stamp.at);
    let receipt = service.upsert(&stamp.id, update).await.unwrap();
    assert_eq!(receipt.upserted_count, 1);
    assert_eq!(receipt.upserted_id.as_deref(), Some(stamp.id.as_str()));

    let created = service.get(&stamp.id).await.unwrap().unwrap();
    assert_eq!(created.table_number, Some(3));
    assert_eq!(created.number_of_guests, None);
    assert_eq!(created.created_at, created.updated_at);
}

#[tokio::test]
async fn test_find_by_reference() {
    let service = MongoDataService::<OrderItem>::new(fresh_database().await);
    let items = vec![
        OrderItem::new(Stamp::fresh(), 1, 2.5, "f1".into(), "o1".into()),
        OrderItem::new(Stamp::fresh(), 2, 4.0, "f2".into(), "o2".into()),
        OrderItem::new(Stamp::fresh(), 3, 1.0, "f1".into(), "o1".into()),
    ];
    service.create_many(items).await.unwrap();

    let found = service.find_by("order_id", "o1").await.unwrap();
    assert_eq!(found.len(), 2);
    assert!(found.iter().all(|i| i.order_id.as_deref() == Some("o1")));
}

// ---------------------------------------------------------------------------
// HTTP over MongoDB
// ---------------------------------------------------------------------------

async fn mongo_server() -> (TestServer, Stores) {
    let database = fresh_database().await;
    let stores = Stores::mongo(&database)
        .await
        .unwrap()
        .with_timeout(std::time::Duration::from_secs(10));

    let app = ServerBuilder::new()
        .with_stores(stores.clone())
        .register_restaurant_entities()
        .unwrap()
        .build()
        .unwrap();
    (TestServer::try_new(app).unwrap(), stores)
}

#[tokio::test]
async fn test_food_flow_over_mongodb() {
    let (server, _stores) = mongo_server().await;

    let empty: Value = server.get("/foods").await.json();
    assert_eq!(empty["message"], "No food items found");

    let menu: Value = server
        .post("/menus")
        .json(&json!({ "name": "Dinner", "category": "Main" }))
        .await
        .json();
    let menu_id = menu["data"]["inserted_id"].as_str().unwrap().to_string();

    for (name, price) in [("Soup", 4.5), ("Steak", 19.999), ("Cake", 5.0)] {
        server
            .post("/foods")
            .json(&json!({
                "name": name,
                "price": price,
                "food_image": format!("{name}.png"),
                "menu_id": menu_id
            }))
            .await
            .assert_status(StatusCode::CREATED);
    }

    let page: Value = server
        .get("/foods")
        .add_query_param("recordsPerPage", 2)
        .add_query_param("page", 2)
        .await
        .json();
    assert_eq!(page["total_count"], 3);
    let items = page["food_items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["name"], "Cake");

    let first: Value = server
        .get("/foods")
        .add_query_param("recordsPerPage", 2)
        .await
        .json();
    assert_eq!(first["food_items"][1]["price"], 20.0);
}

#[tokio::test]
async fn test_order_items_flow_over_mongodb() {
    let (server, stores) = mongo_server().await;
    let menu = Menu::new(Stamp::fresh(), "Lunch".into(), "Main".into(), None, None);
    stores.menus.create(menu.clone()).await.unwrap();
    let food = Food::new(Stamp::fresh(), "Pie".into(), 6.0, "pie.png".into(), menu.menu_id);
    stores.foods.create(food.clone()).await.unwrap();
    let table = Table::new(Stamp::fresh(), 2, 4);
    stores.tables.create(table.clone()).await.unwrap();

    let response = server
        .post("/order-items")
        .json(&json!({
            "table_id": table.table_id,
            "order_items": [{ "quantity": 2, "unit_price": 6.0, "food_id": food.food_id }]
        }))
        .await;
    response.assert_status(StatusCode::CREATED);
    let body: Value = response.json();
    let order_id = body["data"]["order_id"].as_str().unwrap().to_string();

    let items: Vec<Value> = server
        .get(&format!("/order-items-order/{order_id}"))
        .await
        .json();
    assert_eq!(items.len(), 1);

    let invoice: Value = server
        .post("/invoices")
        .json(&json!({ "order_id": order_id, "payment_status": "PENDING" }))
        .await
        .json();
    let invoice_id = invoice["data"]["inserted_id"].as_str().unwrap();

    let view: Value = server.get(&format!("/invoices/{invoice_id}")).await.json();
    assert_eq!(view["payment_due"], 12.0);
    assert_eq!(view["table_id"], table.table_id.as_str());
}
