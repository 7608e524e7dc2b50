//! Table entity module

pub mod descriptor;
pub mod handlers;
pub mod model;

pub use descriptor::TableDescriptor;
pub use handlers::*;
pub use model::{CreateTable, Table, UpdateTable};
