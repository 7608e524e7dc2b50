//! # Restaurant backend
//!
//! A REST backend for running a restaurant: foods, menus, orders, order items,
//! tables, invoices and employees, persisted in MongoDB.
//!
//! ## Features
//!
//! - **One collection per entity**: every entity is keyed by a string business
//!   identifier (`food_id`, `menu_id`, ...) that doubles as MongoDB's `_id`
//! - **Declarative validation**: create and update payloads are validated before
//!   anything reaches the database
//! - **Partial updates**: `PATCH` builds a sparse `$set` document from the fields
//!   present in the payload and always refreshes `updated_at`
//! - **Cross-entity checks**: foods must reference an existing menu, orders an
//!   existing table, invoices an existing order
//! - **Paginated food listing**: page, total count and slice in one aggregation
//! - **Pluggable storage**: MongoDB in production, an in-memory store for tests
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use restaurant::prelude::*;
//!
//! let database = connect(&config.database).await?;
//! let stores = Stores::mongo(&database).await?.with_timeout(config.operation_timeout());
//!
//! ServerBuilder::new()
//!     .with_stores(stores)
//!     .register_restaurant_entities()?
//!     .serve("0.0.0.0:8000")
//!     .await?;
//! ```

pub mod config;
pub mod core;
pub mod entities;
pub mod server;
pub mod storage;
pub mod store;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        entity::{Entity, Stamp},
        error::{EntityError, RestaurantError, StorageError, ValidationError},
        query::{Page, PageParams, PageWindow},
        response::{Created, Updated},
        service::{DataService, InsertReceipt, UpdateReceipt},
        update::UpdateDocument,
        validation::Validated,
    };

    // === Entities ===
    pub use crate::entities::{Employee, Food, Invoice, Menu, Order, OrderItem, Table};

    // === Storage ===
    pub use crate::storage::{InMemoryDataService, MongoDataService, TimedDataService, connect};
    pub use crate::store::Stores;

    // === Config ===
    pub use crate::config::{AppConfig, DatabaseConfig, ServerConfig};

    // === Server ===
    pub use crate::server::{EntityRegistry, EntityRoutes, ServerBuilder};

    // === External dependencies ===
    pub use async_trait::async_trait;
    pub use chrono::{DateTime, Utc};
    pub use serde::{Deserialize, Serialize};
}
