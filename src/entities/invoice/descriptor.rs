//! HTTP routes of the Invoice entity

use super::handlers::{create_invoice, get_invoice, list_invoices, update_invoice};
use super::model::Invoice;
use crate::core::entity::Entity;
use crate::server::EntityRoutes;
use crate::store::Stores;
use axum::{Router, routing::get};

/// Routes of the Invoice entity
pub struct InvoiceDescriptor {
    pub stores: Stores,
}

impl InvoiceDescriptor {
    pub fn new(stores: Stores) -> Self {
        Self { stores }
    }
}

impl EntityRoutes for InvoiceDescriptor {
    fn resource(&self) -> &'static str {
        Invoice::resource_name()
    }

    fn routes(&self) -> Router {
        Router::new()
            .route("/invoices", get(list_invoices).post(create_invoice))
            .route(
                "/invoices/{invoice_id}",
                get(get_invoice).patch(update_invoice),
            )
            .with_state(self.stores.clone())
    }
}
