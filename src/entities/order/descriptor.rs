//! HTTP routes of the Order entity

use super::handlers::{create_order, get_order, list_orders, update_order};
use super::model::Order;
use crate::core::entity::Entity;
use crate::server::EntityRoutes;
use crate::store::Stores;
use axum::{Router, routing::get};

/// Routes of the Order entity
pub struct OrderDescriptor {
    pub stores: Stores,
}

impl OrderDescriptor {
    pub fn new(stores: Stores) -> Self {
        Self { stores }
    }
}

impl EntityRoutes for OrderDescriptor {
    fn resource(&self) -> &'static str {
        Order::resource_name()
    }

    fn routes(&self) -> Router {
        Router::new()
            .route("/orders", get(list_orders).post(create_order))
            .route("/orders/{order_id}", get(get_order).patch(update_order))
            .with_state(self.stores.clone())
    }
}
