//! Order item entity model with validation and filtering

use crate::core::entity::Stamp;
use crate::core::update::UpdateDocument;
use crate::core::validation::round_currency;
use crate::core::validation::validators::non_blank;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

crate::impl_restaurant_entity!(
    /// One line of an order: a food, how many, at which unit price
    OrderItem {
        resource: "order-items",
        singular: "order item",
        collection: "orderItem",
        id: order_item_id,
    },
    required {
        quantity: u32,
        unit_price: f64,
        food_id: String,
        order_id: String,
    },
    optional {}
);

impl OrderItem {
    /// `quantity * unit_price`, zero when either is missing
    pub fn line_total(&self) -> f64 {
        match (self.quantity, self.unit_price) {
            (Some(quantity), Some(unit_price)) => f64::from(quantity) * unit_price,
            _ => 0.0,
        }
    }
}

/// One line of a `POST /order-items` payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewOrderItem {
    #[validate(range(min = 1))]
    pub quantity: u32,

    #[validate(range(exclusive_min = 0.0))]
    pub unit_price: f64,

    #[validate(custom(function = "non_blank"))]
    pub food_id: String,
}

impl NewOrderItem {
    pub fn into_order_item(self, stamp: Stamp, order_id: &str) -> OrderItem {
        OrderItem::new(
            stamp,
            self.quantity,
            round_currency(self.unit_price),
            self.food_id,
            order_id.to_string(),
        )
    }
}

/// Payload of `POST /order-items`: a new order for a table and its lines
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateOrderItems {
    #[validate(custom(function = "non_blank"))]
    pub table_id: String,

    #[validate(length(min = 1), nested)]
    pub order_items: Vec<NewOrderItem>,
}

/// Data of the `POST /order-items` response
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderItemsReceipt {
    pub order_id: String,
    pub inserted_ids: Vec<String>,
}

/// Payload of `PATCH /order-items/{order_item_id}`
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateOrderItem {
    #[validate(range(min = 1))]
    pub quantity: Option<u32>,

    #[validate(range(exclusive_min = 0.0))]
    pub unit_price: Option<f64>,

    #[validate(custom(function = "non_blank"))]
    pub food_id: Option<String>,

    #[validate(custom(function = "non_blank"))]
    pub order_id: Option<String>,
}

impl UpdateOrderItem {
    pub fn to_update(&self, at: DateTime<Utc>) -> UpdateDocument {
        UpdateDocument::builder()
            .set_opt("quantity", self.quantity)
            .set_opt("unit_price", self.unit_price.map(round_currency))
            .set_opt("food_id", self.food_id.clone())
            .set_opt("order_id", self.order_id.clone())
            .finish(at)
    }
}
