//! Food entity module

pub mod descriptor;
pub mod handlers;
pub mod model;

pub use descriptor::FoodDescriptor;
pub use handlers::*;
pub use model::{CreateFood, Food, FoodListing, UpdateFood};
