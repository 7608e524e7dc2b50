//! Food HTTP handlers

use super::model::{CreateFood, Food, FoodListing, UpdateFood};
use crate::core::entity::{Stamp, now};
use crate::core::error::{EntityError, RestaurantError};
use crate::core::query::PageParams;
use crate::core::response::{Created, Updated};
use crate::core::service::ensure_reference;
use crate::core::validation::Validated;
use crate::store::Stores;
use axum::{
    Json,
    extract::{Path, Query, State},
};

/// `GET /foods?recordsPerPage=&page=&startIndex=`
pub async fn list_foods(
    State(stores): State<Stores>,
    Query(params): Query<PageParams>,
) -> Result<Json<FoodListing>, RestaurantError> {
    let listing = match stores.foods.page(params.window()).await? {
        Some(page) => FoodListing::Page {
            total_count: page.total_count,
            food_items: page.items,
        },
        None => FoodListing::empty(),
    };

    Ok(Json(listing))
}

pub async fn get_food(
    State(stores): State<Stores>,
    Path(food_id): Path<String>,
) -> Result<Json<Food>, RestaurantError> {
    stores
        .foods
        .get(&food_id)
        .await?
        .map(Json)
        .ok_or_else(|| EntityError::not_found("food", &food_id).into())
}

pub async fn create_food(
    State(stores): State<Stores>,
    Validated(payload): Validated<CreateFood>,
) -> Result<Created, RestaurantError> {
    ensure_reference(stores.menus.as_ref(), &payload.menu_id).await?;

    let food = payload.into_food(Stamp::fresh());
    let receipt = stores.foods.create(food).await?;

    tracing::info!(food_id = %receipt.inserted_id, "food created");
    Ok(Created::new("food item created", receipt))
}

pub async fn update_food(
    State(stores): State<Stores>,
    Path(food_id): Path<String>,
    Validated(payload): Validated<UpdateFood>,
) -> Result<Updated, RestaurantError> {
    if let Some(menu_id) = &payload.menu_id {
        ensure_reference(stores.menus.as_ref(), menu_id).await?;
    }

    let result = stores
        .foods
        .upsert(&food_id, payload.to_update(now()))
        .await?;

    tracing::info!(%food_id, upserted = result.upserted_count, "food updated");
    Ok(Updated::new("food item updated", result))
}
