//! Order entity model with validation

use crate::core::entity::Stamp;
use crate::core::update::UpdateDocument;
use crate::core::validation::validators::non_blank;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use validator::Validate;

crate::impl_restaurant_entity!(
    /// An order placed at a table
    Order {
        resource: "orders",
        singular: "order",
        collection: "order",
        id: order_id,
        dates: [order_date],
    },
    required {
        order_date: DateTime<Utc>,
        /// Table the order was placed at
        table_id: String,
    },
    optional {}
);

/// Payload of `POST /orders`
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateOrder {
    pub order_date: DateTime<Utc>,

    #[validate(custom(function = "non_blank"))]
    pub table_id: String,
}

impl CreateOrder {
    pub fn into_order(self, stamp: Stamp) -> Order {
        Order::new(stamp, self.order_date, self.table_id)
    }
}

/// Payload of `PATCH /orders/{order_id}`
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateOrder {
    pub order_date: Option<DateTime<Utc>>,

    #[validate(custom(function = "non_blank"))]
    pub table_id: Option<String>,
}

impl UpdateOrder {
    pub fn to_update(&self, at: DateTime<Utc>) -> UpdateDocument {
        UpdateDocument::builder()
            .set_timestamp_opt("order_date", self.order_date)
            .set_opt("table_id", self.table_id.clone())
            .finish(at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::entity::now;
    use serde_json::json;

    #[test]
    fn test_create_requires_order_date() {
        let result = serde_json::from_value::<CreateOrder>(json!({ "table_id": "t1" }));
        assert!(result.is_err());
    }

    #[test]
    fn test_update_with_table_only() {
        let payload: UpdateOrder = serde_json::from_value(json!({ "table_id": "t2" })).unwrap();
        let doc = payload.to_update(now());
        assert_eq!(doc.get("table_id"), Some(&json!("t2")));
        assert!(!doc.contains("order_date"));
        assert_eq!(doc.len(), 2);
    }
}
