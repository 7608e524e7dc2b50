//! HTTP routes of the Menu entity

use super::handlers::{create_menu, get_menu, list_menus, update_menu};
use super::model::Menu;
use crate::core::entity::Entity;
use crate::server::EntityRoutes;
use crate::store::Stores;
use axum::{Router, routing::get};

/// Routes of the Menu entity
pub struct MenuDescriptor {
    pub stores: Stores,
}

impl MenuDescriptor {
    pub fn new(stores: Stores) -> Self {
        Self { stores }
    }
}

impl EntityRoutes for MenuDescriptor {
    fn resource(&self) -> &'static str {
        Menu::resource_name()
    }

    fn routes(&self) -> Router {
        Router::new()
            .route("/menus", get(list_menus).post(create_menu))
            .route("/menus/{menu_id}", get(get_menu).patch(update_menu))
            .with_state(self.stores.clone())
    }
}
