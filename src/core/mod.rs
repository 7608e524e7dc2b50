//! Core module containing the entity abstraction, errors and store contracts

pub mod entity;
pub mod error;
pub mod query;
pub mod response;
pub mod service;
pub mod update;
pub mod validation;

pub use entity::{Entity, Stamp};
pub use error::{EntityError, RestaurantError, StorageError, ValidationError};
pub use query::{Page, PageParams, PageWindow};
pub use service::{DataService, InsertReceipt, UpdateReceipt, ensure_reference};
pub use update::UpdateDocument;
