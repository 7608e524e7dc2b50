//! Order HTTP handlers

use super::model::{CreateOrder, Order, UpdateOrder};
use crate::core::entity::{Stamp, now};
use crate::core::error::{EntityError, RestaurantError};
use crate::core::response::{Created, Updated};
use crate::core::service::ensure_reference;
use crate::core::validation::Validated;
use crate::store::Stores;
use axum::{
    Json,
    extract::{Path, State},
};

/// Create and store a new order for `table_id`, dated now
///
/// The table is not checked here; callers check it first.
pub async fn open_order(stores: &Stores, table_id: &str) -> Result<Order, RestaurantError> {
    let stamp = Stamp::fresh();
    let order = Order::new(stamp.clone(), stamp.at, table_id.to_string());
    stores.orders.create(order.clone()).await?;

    tracing::info!(order_id = %order.order_id, %table_id, "order opened");
    Ok(order)
}

pub async fn list_orders(
    State(stores): State<Stores>,
) -> Result<Json<Vec<Order>>, RestaurantError> {
    Ok(Json(stores.orders.list().await?))
}

pub async fn get_order(
    State(stores): State<Stores>,
    Path(order_id): Path<String>,
) -> Result<Json<Order>, RestaurantError> {
    stores
        .orders
        .get(&order_id)
        .await?
        .map(Json)
        .ok_or_else(|| EntityError::not_found("order", &order_id).into())
}

pub async fn create_order(
    State(stores): State<Stores>,
    Validated(payload): Validated<CreateOrder>,
) -> Result<Created, RestaurantError> {
    ensure_reference(stores.tables.as_ref(), &payload.table_id).await?;

    let receipt = stores
        .orders
        .create(payload.into_order(Stamp::fresh()))
        .await?;

    tracing::info!(order_id = %receipt.inserted_id, "order created");
    Ok(Created::new("order created", receipt))
}

pub async fn update_order(
    State(stores): State<Stores>,
    Path(order_id): Path<String>,
    Validated(payload): Validated<UpdateOrder>,
) -> Result<Updated, RestaurantError> {
    if let Some(table_id) = &payload.table_id {
        ensure_reference(stores.tables.as_ref(), table_id).await?;
    }

    let result = stores
        .orders
        .upsert(&order_id, payload.to_update(now()))
        .await?;

    tracing::info!(%order_id, upserted = result.upserted_count, "order updated");
    Ok(Updated::new("order updated", result))
}
