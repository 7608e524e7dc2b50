//! HTTP routes of the Table entity

use super::handlers::{create_table, get_table, list_tables, update_table};
use super::model::Table;
use crate::core::entity::Entity;
use crate::server::EntityRoutes;
use crate::store::Stores;
use axum::{Router, routing::get};

/// Routes of the Table entity
pub struct TableDescriptor {
    pub stores: Stores,
}

impl TableDescriptor {
    pub fn new(stores: Stores) -> Self {
        Self { stores }
    }
}

impl EntityRoutes for TableDescriptor {
    fn resource(&self) -> &'static str {
        Table::resource_name()
    }

    fn routes(&self) -> Router {
        Router::new()
            .route("/tables", get(list_tables).post(create_table))
            .route("/tables/{table_id}", get(get_table).patch(update_table))
            .with_state(self.stores.clone())
    }
}
