//! Menu entity module

pub mod descriptor;
pub mod handlers;
pub mod model;

pub use descriptor::MenuDescriptor;
pub use handlers::*;
pub use model::{CreateMenu, Menu, UpdateMenu};
