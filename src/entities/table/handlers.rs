//! Table HTTP handlers

use super::model::{CreateTable, Table, UpdateTable};
use crate::core::entity::{Stamp, now};
use crate::core::error::{EntityError, RestaurantError};
use crate::core::response::{Created, Updated};
use crate::core::validation::Validated;
use crate::store::Stores;
use axum::{
    Json,
    extract::{Path, State},
};

pub async fn list_tables(
    State(stores): State<Stores>,
) -> Result<Json<Vec<Table>>, RestaurantError> {
    Ok(Json(stores.tables.list().await?))
}

pub async fn get_table(
    State(stores): State<Stores>,
    Path(table_id): Path<String>,
) -> Result<Json<Table>, RestaurantError> {
    stores
        .tables
        .get(&table_id)
        .await?
        .map(Json)
        .ok_or_else(|| EntityError::not_found("table", &table_id).into())
}

pub async fn create_table(
    State(stores): State<Stores>,
    Validated(payload): Validated<CreateTable>,
) -> Result<Created, RestaurantError> {
    let receipt = stores
        .tables
        .create(payload.into_table(Stamp::fresh()))
        .await?;

    tracing::info!(table_id = %receipt.inserted_id, "table created");
    Ok(Created::new("table created", receipt))
}

pub async fn update_table(
    State(stores): State<Stores>,
    Path(table_id): Path<String>,
    Validated(payload): Validated<UpdateTable>,
) -> Result<Updated, RestaurantError> {
    let result = stores
        .tables
        .upsert(&table_id, payload.to_update(now()))
        .await?;

    tracing::info!(%table_id, upserted = result.upserted_count, "table updated");
    Ok(Updated::new("table updated", result))
}
