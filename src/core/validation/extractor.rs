//! Axum extractor for validated payloads
//!
//! This module provides the `Validated<T>` extractor that parses the JSON
//! body into `T` and runs its declared validation rules.

use crate::core::error::{RestaurantError, ValidationError};
use axum::{
    Json,
    extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;
use validator::Validate;

/// Axum extractor that deserializes and validates a payload
///
/// A body that does not parse, or a payload that breaks one of its rules,
/// is rejected with 400 and nothing reaches the handler.
///
/// # Usage
///
/// ```rust,ignore
/// pub async fn create_table(
///     State(stores): State<Stores>,
///     Validated(payload): Validated<CreateTable>,
/// ) -> Result<Created, RestaurantError> {
///     // payload is already validated
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Validated<T>(pub T);

impl<T> Validated<T> {
    /// Get the inner payload
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> std::ops::Deref for Validated<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<S, T> FromRequest<S> for Validated<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = RestaurantError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(payload) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| ValidationError::InvalidJson {
                message: rejection.body_text(),
            })?;

        payload.validate().map_err(ValidationError::from)?;

        Ok(Validated(payload))
    }
}
