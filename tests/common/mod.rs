//! Shared test harness for the HTTP integration tests
//!
//! Builds the full router over in-memory stores and provides helpers to
//! seed records directly, bypassing the HTTP layer.
//!
//! # Usage
//!
//! From any integration test file in `tests/`:
//! ```rust,ignore
//! mod common;
//! use common::*;
//! ```

#![allow(dead_code)]

use axum_test::TestServer;
use chrono::{Duration, Utc};
use restaurant::prelude::*;

/// Full application over fresh in-memory stores
pub fn create_test_server() -> (TestServer, Stores) {
    let stores = Stores::in_memory();

    let app = ServerBuilder::new()
        .with_stores(stores.clone())
        .register_restaurant_entities()
        .expect("Failed to register entities")
        .build()
        .expect("Failed to build router");

    let server = TestServer::try_new(app).expect("Failed to create test server");
    (server, stores)
}

pub async fn seed_menu(stores: &Stores, name: &str) -> Menu {
    let now = Utc::now();
    let menu = Menu::new(
        Stamp::fresh(),
        name.to_string(),
        "Main".to_string(),
        Some(now - Duration::days(1)),
        Some(now + Duration::days(30)),
    );
    stores.menus.create(menu.clone()).await.unwrap();
    menu
}

pub async fn seed_food(stores: &Stores, menu_id: &str, name: &str, price: f64) -> Food {
    let food = Food::new(
        Stamp::fresh(),
        name.to_string(),
        price,
        format!("{}.png", name.to_lowercase()),
        menu_id.to_string(),
    );
    stores.foods.create(food.clone()).await.unwrap();
    food
}

pub async fn seed_table(stores: &Stores, table_number: u32) -> Table {
    let table = Table::new(Stamp::fresh(), 4, table_number);
    stores.tables.create(table.clone()).await.unwrap();
    table
}

pub async fn seed_order(stores: &Stores, table_id: &str) -> Order {
    let order = Order::new(Stamp::fresh(), Utc::now(), table_id.to_string());
    stores.orders.create(order.clone()).await.unwrap();
    order
}

pub async fn seed_order_item(
    stores: &Stores,
    order_id: &str,
    food_id: &str,
    quantity: u32,
    unit_price: f64,
) -> OrderItem {
    let item = OrderItem::new(
        Stamp::fresh(),
        quantity,
        unit_price,
        food_id.to_string(),
        order_id.to_string(),
    );
    stores.order_items.create(item.clone()).await.unwrap();
    item
}
