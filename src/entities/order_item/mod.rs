//! Order item entity module

pub mod descriptor;
pub mod handlers;
pub mod model;

pub use descriptor::OrderItemDescriptor;
pub use handlers::*;
pub use model::{CreateOrderItems, NewOrderItem, OrderItem, OrderItemsReceipt, UpdateOrderItem};
