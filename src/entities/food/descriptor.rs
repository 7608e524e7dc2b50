//! HTTP routes of the Food entity

use super::handlers::{create_food, get_food, list_foods, update_food};
use super::model::Food;
use crate::core::entity::Entity;
use crate::server::EntityRoutes;
use crate::store::Stores;
use axum::{Router, routing::get};

/// Routes of the Food entity
pub struct FoodDescriptor {
    pub stores: Stores,
}

impl FoodDescriptor {
    pub fn new(stores: Stores) -> Self {
        Self { stores }
    }
}

impl EntityRoutes for FoodDescriptor {
    fn resource(&self) -> &'static str {
        Food::resource_name()
    }

    fn routes(&self) -> Router {
        Router::new()
            .route("/foods", get(list_foods).post(create_food))
            .route("/foods/{food_id}", get(get_food).patch(update_food))
            .with_state(self.stores.clone())
    }
}
