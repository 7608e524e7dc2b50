//! Entities module - contains all business entities
//!
//! Each entity lives in its own module with the stored model and its
//! payloads (`model`), the HTTP handlers (`handlers`) and the route
//! descriptor (`descriptor`).

pub mod macros;

pub mod employee;
pub mod food;
pub mod invoice;
pub mod menu;
pub mod order;
pub mod order_item;
pub mod table;

// Re-export models for convenience
pub use employee::Employee;
pub use food::Food;
pub use invoice::Invoice;
pub use menu::Menu;
pub use order::Order;
pub use order_item::OrderItem;
pub use table::Table;

use crate::server::EntityRoutes;
use crate::store::Stores;

/// Routes of every restaurant entity, sharing one set of stores
pub fn descriptors(stores: &Stores) -> Vec<Box<dyn EntityRoutes>> {
    vec![
        Box::new(food::FoodDescriptor::new(stores.clone())),
        Box::new(menu::MenuDescriptor::new(stores.clone())),
        Box::new(order::OrderDescriptor::new(stores.clone())),
        Box::new(order_item::OrderItemDescriptor::new(stores.clone())),
        Box::new(table::TableDescriptor::new(stores.clone())),
        Box::new(invoice::InvoiceDescriptor::new(stores.clone())),
        Box::new(employee::EmployeeDescriptor::new(stores.clone())),
    ]
}
