//! Invoice entity model with validation

use crate::core::entity::Stamp;
use crate::core::update::UpdateDocument;
use crate::core::validation::round_currency;
use crate::core::validation::validators::{self, non_blank};
use crate::entities::{Order, OrderItem};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

crate::impl_restaurant_entity!(
    /// Bill for one order
    Invoice {
        resource: "invoices",
        singular: "invoice",
        collection: "invoice",
        id: invoice_id,
        dates: [payment_due_date],
    },
    required {
        order_id: String,
        /// PENDING or PAID
        payment_status: String,
    },
    optional {
        /// CARD or CASH
        payment_method: String,
        payment_due_date: DateTime<Utc>,
    }
);

/// An invoice with the figures derived from its order
#[derive(Debug, Clone, Serialize)]
pub struct InvoiceView {
    #[serde(flatten)]
    pub invoice: Invoice,

    /// Table of the invoiced order, when the order still exists
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table_id: Option<String>,

    /// Sum of the order's line totals
    pub payment_due: f64,
}

impl InvoiceView {
    pub fn new(invoice: Invoice, order: Option<&Order>, items: &[OrderItem]) -> Self {
        let payment_due = round_currency(items.iter().map(OrderItem::line_total).sum());
        Self {
            invoice,
            table_id: order.and_then(|order| order.table_id.clone()),
            payment_due,
        }
    }
}

/// Payload of `POST /invoices`
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateInvoice {
    #[validate(custom(function = "non_blank"))]
    pub order_id: String,

    #[validate(custom(function = "validators::payment_method"))]
    pub payment_method: Option<String>,

    #[validate(custom(function = "validators::payment_status"))]
    pub payment_status: String,

    pub payment_due_date: Option<DateTime<Utc>>,
}

impl CreateInvoice {
    pub fn into_invoice(self, stamp: Stamp) -> Invoice {
        Invoice::new(
            stamp,
            self.order_id,
            self.payment_status,
            self.payment_method,
            self.payment_due_date,
        )
    }
}

/// Payload of `PATCH /invoices/{invoice_id}`
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateInvoice {
    #[validate(custom(function = "non_blank"))]
    pub order_id: Option<String>,

    #[validate(custom(function = "validators::payment_method"))]
    pub payment_method: Option<String>,

    #[validate(custom(function = "validators::payment_status"))]
    pub payment_status: Option<String>,

    pub payment_due_date: Option<DateTime<Utc>>,
}

impl UpdateInvoice {
    pub fn to_update(&self, at: DateTime<Utc>) -> UpdateDocument {
        UpdateDocument::builder()
            .set_opt("order_id", self.order_id.clone())
            .set_opt("payment_method", self.payment_method.clone())
            .set_opt("payment_status", self.payment_status.clone())
            .set_timestamp_opt("payment_due_date", self.payment_due_date)
            .finish(at)
    }
}
