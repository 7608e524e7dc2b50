//! Success response bodies shared by all entity handlers

use crate::core::service::{InsertReceipt, UpdateReceipt};
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

/// Body returned by create handlers, sent with 201 Created
#[derive(Debug, Serialize)]
pub struct Created<D = InsertReceipt> {
    pub message: String,
    pub data: D,
}

impl<D> Created<D> {
    pub fn new(message: impl Into<String>, data: D) -> Self {
        Self {
            message: message.into(),
            data,
        }
    }
}

impl<D: Serialize> IntoResponse for Created<D> {
    fn into_response(self) -> Response {
        (StatusCode::CREATED, Json(self)).into_response()
    }
}

/// Body returned by update handlers, sent with 200 OK
#[derive(Debug, Serialize)]
pub struct Updated {
    pub message: String,
    pub result: UpdateReceipt,
}

impl Updated {
    pub fn new(message: impl Into<String>, result: UpdateReceipt) -> Self {
        Self {
            message: message.into(),
            result,
        }
    }
}

impl IntoResponse for Updated {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}
