//! HTTP routes of the OrderItem entity

use super::handlers::{
    create_order_items, get_order_item, list_order_items, list_order_items_by_order,
    update_order_item,
};
use super::model::OrderItem;
use crate::core::entity::Entity;
use crate::server::EntityRoutes;
use crate::store::Stores;
use axum::{Router, routing::get};

/// Routes of the OrderItem entity
pub struct OrderItemDescriptor {
    pub stores: Stores,
}

impl OrderItemDescriptor {
    pub fn new(stores: Stores) -> Self {
        Self { stores }
    }
}

impl EntityRoutes for OrderItemDescriptor {
    fn resource(&self) -> &'static str {
        OrderItem::resource_name()
    }

    fn extra_prefixes(&self) -> &'static [&'static str] {
        &["order-items-order"]
    }

    fn routes(&self) -> Router {
        Router::new()
            .route(
                "/order-items",
                get(list_order_items).post(create_order_items),
            )
            .route(
                "/order-items/{order_item_id}",
                get(get_order_item).patch(update_order_item),
            )
            .route(
                "/order-items-order/{order_id}",
                get(list_order_items_by_order),
            )
            .with_state(self.stores.clone())
    }
}
