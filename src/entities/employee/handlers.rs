//! Employee HTTP handlers

use super::model::{CreateEmployee, Employee, UpdateEmployee};
use crate::core::entity::{Stamp, now};
use crate::core::error::{EntityError, RestaurantError};
use crate::core::response::{Created, Updated};
use crate::core::validation::Validated;
use crate::store::Stores;
use axum::{
    Json,
    extract::{Path, State},
};

pub async fn list_employees(
    State(stores): State<Stores>,
) -> Result<Json<Vec<Employee>>, RestaurantError> {
    Ok(Json(stores.employees.list().await?))
}

pub async fn get_employee(
    State(stores): State<Stores>,
    Path(employee_id): Path<String>,
) -> Result<Json<Employee>, RestaurantError> {
    stores
        .employees
        .get(&employee_id)
        .await?
        .map(Json)
        .ok_or_else(|| EntityError::not_found("employee", &employee_id).into())
}

pub async fn create_employee(
    State(stores): State<Stores>,
    Validated(payload): Validated<CreateEmployee>,
) -> Result<Created, RestaurantError> {
    let receipt = stores
        .employees
        .create(payload.into_employee(Stamp::fresh()))
        .await?;

    tracing::info!(employee_id = %receipt.inserted_id, "employee created");
    Ok(Created::new("employee created", receipt))
}

pub async fn update_employee(
    State(stores): State<Stores>,
    Path(employee_id): Path<String>,
    Validated(payload): Validated<UpdateEmployee>,
) -> Result<Updated, RestaurantError> {
    let result = stores
        .employees
        .upsert(&employee_id, payload.to_update(now()))
        .await?;

    tracing::info!(%employee_id, upserted = result.upserted_count, "employee updated");
    Ok(Updated::new("employee updated", result))
}
