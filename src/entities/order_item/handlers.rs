//! Order item HTTP handlers

use super::model::{CreateOrderItems, OrderItem, OrderItemsReceipt, UpdateOrderItem};
use crate::core::entity::{Stamp, now};
use crate::core::error::{EntityError, RestaurantError};
use crate::core::response::{Created, Updated};
use crate::core::service::ensure_reference;
use crate::core::validation::Validated;
use crate::entities::order::open_order;
use crate::store::Stores;
use axum::{
    Json,
    extract::{Path, State},
};
use std::collections::BTreeSet;

pub async fn list_order_items(
    State(stores): State<Stores>,
) -> Result<Json<Vec<OrderItem>>, RestaurantError> {
    Ok(Json(stores.order_items.list().await?))
}

pub async fn get_order_item(
    State(stores): State<Stores>,
    Path(order_item_id): Path<String>,
) -> Result<Json<OrderItem>, RestaurantError> {
    stores
        .order_items
        .get(&order_item_id)
        .await?
        .map(Json)
        .ok_or_else(|| EntityError::not_found("order item", &order_item_id).into())
}

/// `GET /order-items-order/{order_id}`
pub async fn list_order_items_by_order(
    State(stores): State<Stores>,
    Path(order_id): Path<String>,
) -> Result<Json<Vec<OrderItem>>, RestaurantError> {
    if !stores.orders.exists(&order_id).await? {
        return Err(EntityError::not_found("order", &order_id).into());
    }

    Ok(Json(stores.order_items.find_by("order_id", &order_id).await?))
}

/// Open an order for the table and insert its lines
///
/// Every reference is checked before anything is written.
pub async fn create_order_items(
    State(stores): State<Stores>,
    Validated(payload): Validated<CreateOrderItems>,
) -> Result<Created<OrderItemsReceipt>, RestaurantError> {
    ensure_reference(stores.tables.as_ref(), &payload.table_id).await?;

    let food_ids: BTreeSet<&str> = payload
        .order_items
        .iter()
        .map(|item| item.food_id.as_str())
        .collect();
    for food_id in food_ids {
        ensure_reference(stores.foods.as_ref(), food_id).await?;
    }

    let order = open_order(&stores, &payload.table_id).await?;

    let items: Vec<OrderItem> = payload
        .order_items
        .into_iter()
        .map(|item| item.into_order_item(Stamp::fresh(), &order.order_id))
        .collect();
    let receipts = stores.order_items.create_many(items).await?;

    tracing::info!(
        order_id = %order.order_id,
        count = receipts.len(),
        "order items created"
    );
    Ok(Created::new(
        "order items created",
        OrderItemsReceipt {
            order_id: order.order_id,
            inserted_ids: receipts.into_iter().map(|r| r.inserted_id).collect(),
        },
    ))
}

pub async fn update_order_item(
    State(stores): State<Stores>,
    Path(order_item_id): Path<String>,
    Validated(payload): Validated<UpdateOrderItem>,
) -> Result<Updated, RestaurantError> {
    if let Some(food_id) = &payload.food_id {
        ensure_reference(stores.foods.as_ref(), food_id).await?;
    }
    if let Some(order_id) = &payload.order_id {
        ensure_reference(stores.orders.as_ref(), order_id).await?;
    }

    let result = stores
        .order_items
        .upsert(&order_item_id, payload.to_update(now()))
        .await?;

    tracing::info!(%order_item_id, upserted = result.upserted_count, "order item updated");
    Ok(Updated::new("order item updated", result))
}
