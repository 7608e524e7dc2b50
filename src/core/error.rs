//! Typed error handling for the restaurant backend
//!
//! Every failure is caught at the handler boundary and converted into a JSON
//! error body carrying a textual message and a machine-readable code.
//!
//! # Error Categories
//!
//! - [`ValidationError`]: malformed or missing fields → 400
//! - [`EntityError`]: a record (or a record it references) does not exist → 404
//! - [`StorageError`]: the persistence layer failed → 500 (504 on timeout)
//!
//! # Example
//!
//! ```rust,ignore
//! let food = stores
//!     .foods
//!     .get(&food_id)
//!     .await?
//!     .ok_or_else(|| EntityError::not_found("food", &food_id))?;
//! ```

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use std::time::Duration;
use thiserror::Error;

/// The main error type returned by handlers
#[derive(Debug, Error)]
pub enum RestaurantError {
    /// Missing records and missing references
    #[error(transparent)]
    Entity(#[from] EntityError),

    /// Payload validation failures
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Persistence failures
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// Anything else that should not happen in normal operation
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response structure for HTTP responses
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable error message
    pub error: String,
    /// Error code for programmatic handling
    pub code: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl RestaurantError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            RestaurantError::Entity(e) => e.status_code(),
            RestaurantError::Validation(_) => StatusCode::BAD_REQUEST,
            RestaurantError::Storage(e) => e.status_code(),
            RestaurantError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            RestaurantError::Entity(e) => e.error_code(),
            RestaurantError::Validation(e) => e.error_code(),
            RestaurantError::Storage(e) => e.error_code(),
            RestaurantError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Convert to an error response
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            error: self.to_string(),
            code: self.error_code().to_string(),
            details: self.details(),
        }
    }

    fn details(&self) -> Option<serde_json::Value> {
        match self {
            RestaurantError::Entity(
                EntityError::NotFound { entity_type, id }
                | EntityError::ReferenceNotFound { entity_type, id },
            ) => Some(serde_json::json!({
                "entity_type": entity_type,
                "id": id,
            })),
            RestaurantError::Validation(ValidationError::FieldErrors(errors)) => {
                Some(serde_json::json!({ "fields": errors }))
            }
            RestaurantError::Validation(ValidationError::FieldError { field, message }) => {
                Some(serde_json::json!({ "fields": [{ "field": field, "message": message }] }))
            }
            _ => None,
        }
    }
}

impl IntoResponse for RestaurantError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(code = self.error_code(), "{}", self);
        } else {
            tracing::warn!(code = self.error_code(), "{}", self);
        }

        (status, Json(self.to_response())).into_response()
    }
}

// =============================================================================
// Entity Errors
// =============================================================================

/// Errors related to entity lookups
#[derive(Debug, Error)]
pub enum EntityError {
    /// The addressed entity does not exist
    #[error("{entity_type} with id '{id}' not found")]
    NotFound { entity_type: String, id: String },

    /// An entity referenced by the payload does not exist
    #[error("referenced {entity_type} '{id}' not found")]
    ReferenceNotFound { entity_type: String, id: String },
}

impl EntityError {
    pub fn not_found(entity_type: &str, id: &str) -> Self {
        EntityError::NotFound {
            entity_type: entity_type.to_string(),
            id: id.to_string(),
        }
    }

    pub fn reference_not_found(entity_type: &str, id: &str) -> Self {
        EntityError::ReferenceNotFound {
            entity_type: entity_type.to_string(),
            id: id.to_string(),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        StatusCode::NOT_FOUND
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            EntityError::NotFound { .. } => "ENTITY_NOT_FOUND",
            EntityError::ReferenceNotFound { .. } => "REFERENCE_NOT_FOUND",
        }
    }
}

// =============================================================================
// Validation Errors
// =============================================================================

/// Errors related to input validation
#[derive(Debug, Error)]
pub enum ValidationError {
    /// Single field validation error
    #[error("Validation error for field '{field}': {message}")]
    FieldError { field: String, message: String },

    /// Multiple field validation errors
    #[error("Validation failed: {}", join_field_errors(.0))]
    FieldErrors(Vec<FieldValidationError>),

    /// Body could not be parsed into the expected payload
    #[error("Invalid request data: {message}")]
    InvalidJson { message: String },
}

/// A single field validation error
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldValidationError {
    pub field: String,
    pub message: String,
}

fn join_field_errors(errors: &[FieldValidationError]) -> String {
    errors
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join(", ")
}

impl ValidationError {
    pub fn field(field: &str, message: impl Into<String>) -> Self {
        ValidationError::FieldError {
            field: field.to_string(),
            message: message.into(),
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            ValidationError::FieldError { .. } | ValidationError::FieldErrors(_) => {
                "VALIDATION_ERROR"
            }
            ValidationError::InvalidJson { .. } => "INVALID_JSON",
        }
    }
}

impl From<validator::ValidationErrors> for ValidationError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut collected = Vec::new();
        collect_field_errors("", &errors, &mut collected);
        collected.sort_by(|a, b| a.field.cmp(&b.field));
        ValidationError::FieldErrors(collected)
    }
}

/// Flatten nested validator errors into `field` / `parent.field` /
/// `list[index].field` paths.
fn collect_field_errors(
    prefix: &str,
    errors: &validator::ValidationErrors,
    out: &mut Vec<FieldValidationError>,
) {
    use validator::ValidationErrorsKind;

    for (field, kind) in errors.errors() {
        let path = if prefix.is_empty() {
            field.to_string()
        } else {
            format!("{prefix}.{field}")
        };

        match kind {
            ValidationErrorsKind::Field(field_errors) => {
                for err in field_errors {
                    let message = err
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| describe(err));
                    out.push(FieldValidationError {
                        field: path.clone(),
                        message,
                    });
                }
            }
            ValidationErrorsKind::Struct(inner) => collect_field_errors(&path, inner, out),
            ValidationErrorsKind::List(items) => {
                for (index, inner) in items {
                    collect_field_errors(&format!("{path}[{index}]"), inner, out);
                }
            }
        }
    }
}

fn describe(err: &validator::ValidationError) -> String {
    match err.code.as_ref() {
        "length" => match (err.params.get("min"), err.params.get("max")) {
            (Some(min), Some(max)) => format!("length must be between {min} and {max}"),
            (Some(min), None) => format!("length must be at least {min}"),
            (None, Some(max)) => format!("length must be at most {max}"),
            (None, None) => "invalid length".to_string(),
        },
        "range" => match (
            err.params.get("min").or(err.params.get("exclusive_min")),
            err.params.get("max"),
        ) {
            (Some(min), _) if err.params.contains_key("exclusive_min") => {
                format!("must be greater than {min}")
            }
            (Some(min), Some(max)) => format!("must be between {min} and {max}"),
            (Some(min), None) => format!("must be at least {min}"),
            (None, Some(max)) => format!("must be at most {max}"),
            (None, None) => "out of range".to_string(),
        },
        "email" => "must be a valid email address".to_string(),
        "regex" => "has an invalid format".to_string(),
        code => format!("failed '{code}' validation"),
    }
}

// =============================================================================
// Storage Errors
// =============================================================================

/// Errors raised by storage backends
#[derive(Debug, Error)]
pub enum StorageError {
    /// Could not reach the storage engine
    #[error("Connection to {backend} failed: {message}")]
    Connection { backend: String, message: String },

    /// The operation did not complete within its deadline
    #[error("{operation} timed out after {}s", .timeout.as_secs())]
    Timeout {
        operation: String,
        timeout: Duration,
    },

    /// The storage engine rejected or failed the operation
    #[error("Failed to {operation}: {message}")]
    Operation { operation: String, message: String },

    /// A record could not be converted to or from its stored form
    #[error("Serialization error: {message}")]
    Serialization { message: String },
}

impl StorageError {
    pub fn operation(operation: &str, err: impl std::fmt::Display) -> Self {
        StorageError::Operation {
            operation: operation.to_string(),
            message: err.to_string(),
        }
    }

    pub fn serialization(err: impl std::fmt::Display) -> Self {
        StorageError::Serialization {
            message: err.to_string(),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            StorageError::Timeout { .. } => StatusCode::GATEWAY_TIMEOUT,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            StorageError::Connection { .. } => "STORAGE_CONNECTION_ERROR",
            StorageError::Timeout { .. } => "STORAGE_TIMEOUT",
            StorageError::Operation { .. } => "STORAGE_ERROR",
            StorageError::Serialization { .. } => "STORAGE_SERIALIZATION_ERROR",
        }
    }
}
