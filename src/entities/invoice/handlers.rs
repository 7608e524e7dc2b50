//! Invoice HTTP handlers

use super::model::{CreateInvoice, Invoice, InvoiceView, UpdateInvoice};
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

pub async fn list_invoices(
    State(stores): State<Stores>,
) -> Result<Json<Vec<Invoice>>, RestaurantError> {
    Ok(Json(stores.invoices.list().await?))
}

/// Invoice with its table and amount due
pub async fn get_invoice(
    State(stores): State<Stores>,
    Path(invoice_id): Path<String>,
) -> Result<Json<InvoiceView>, RestaurantError> {
    let invoice = stores
        .invoices
        .get(&invoice_id)
        .await?
        .ok_or_else(|| EntityError::not_found("invoice", &invoice_id))?;

    let (order, items) = match invoice.order_id.as_deref() {
        Some(order_id) => (
            stores.orders.get(order_id).await?,
            stores.order_items.find_by("order_id", order_id).await?,
        ),
        None => (None, Vec::new()),
    };

    Ok(Json(InvoiceView::new(invoice, order.as_ref(), &items)))
}

pub async fn create_invoice(
    State(stores): State<Stores>,
    Validated(payload): Validated<CreateInvoice>,
) -> Result<Created, RestaurantError> {
    ensure_reference(stores.orders.as_ref(), &payload.order_id).await?;

    let receipt = stores
        .invoices
        .create(payload.into_invoice(Stamp::fresh()))
        .await?;

    tracing::info!(invoice_id = %receipt.inserted_id, "invoice created");
    Ok(Created::new("invoice created", receipt))
}

pub async fn update_invoice(
    State(stores): State<Stores>,
    Path(invoice_id): Path<String>,
    Validated(payload): Validated<UpdateInvoice>,
) -> Result<Updated, RestaurantError> {
    if let Some(order_id) = &payload.order_id {
        ensure_reference(stores.orders.as_ref(), order_id).await?;
    }

    let result = stores
        .invoices
        .upsert(&invoice_id, payload.to_update(now()))
        .await?;

    tracing::info!(%invoice_id, upserted = result.upserted_count, "invoice updated");
    Ok(Updated::new("invoice updated", result))
}
