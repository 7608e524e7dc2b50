//! Invoice entity module

pub mod descriptor;
pub mod handlers;
pub mod model;

pub use descriptor::InvoiceDescriptor;
pub use handlers::*;
pub use model::{CreateInvoice, Invoice, InvoiceView, UpdateInvoice};
