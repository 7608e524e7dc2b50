//! Menu HTTP handlers

use super::model::{CreateMenu, Menu, UpdateMenu};
use crate::core::entity::{Stamp, now};
use crate::core::error::{EntityError, RestaurantError};
use crate::core::response::{Created, Updated};
use crate::core::validation::Validated;
use crate::store::Stores;
use axum::{
    Json,
    extract::{Path, State},
};

pub async fn list_menus(State(stores): State<Stores>) -> Result<Json<Vec<Menu>>, RestaurantError> {
    Ok(Json(stores.menus.list().await?))
}

pub async fn get_menu(
    State(stores): State<Stores>,
    Path(menu_id): Path<String>,
) -> Result<Json<Menu>, RestaurantError> {
    stores
        .menus
        .get(&menu_id)
        .await?
        .map(Json)
        .ok_or_else(|| EntityError::not_found("menu", &menu_id).into())
}

pub async fn create_menu(
    State(stores): State<Stores>,
    Validated(payload): Validated<CreateMenu>,
) -> Result<Created, RestaurantError> {
    let stamp = Stamp::fresh();
    payload.check_window(stamp.at)?;

    let receipt = stores.menus.create(payload.into_menu(stamp)).await?;

    tracing::info!(menu_id = %receipt.inserted_id, "menu created");
    Ok(Created::new("menu created", receipt))
}

pub async fn update_menu(
    State(stores): State<Stores>,
    Path(menu_id): Path<String>,
    Validated(payload): Validated<UpdateMenu>,
) -> Result<Updated, RestaurantError> {
    let at = now();
    payload.check_window(at)?;

    let result = stores.menus.upsert(&menu_id, payload.to_update(at)).await?;

    tracing::info!(%menu_id, upserted = result.upserted_count, "menu updated");
    Ok(Updated::new("menu updated", result))
}
