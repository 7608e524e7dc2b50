//! Reusable field validators
//!
//! Plugged into payload structs with `#[validate(custom(function = ...))]`
//! or `#[validate(regex(path = ...))]`.

use chrono::{DateTime, Utc};
use regex::Regex;
use std::borrow::Cow;
use std::sync::LazyLock;
use validator::ValidationError;

/// Accepted invoice payment methods
pub const PAYMENT_METHODS: &[&str] = &["CARD", "CASH"];

/// Accepted invoice payment statuses
pub const PAYMENT_STATUSES: &[&str] = &["PENDING", "PAID"];

/// Digits with optional leading `+` and single spaces, dashes or dots between groups
pub static PHONE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\+?[0-9]+([ .\-]?[0-9]+)*$").expect("phone pattern is a valid regex")
});

fn failure(code: &'static str, message: String) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(Cow::Owned(message));
    err
}

/// Validator: string must contain something other than whitespace
pub fn non_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(failure("non_blank", "must not be blank".to_string()))
    } else {
        Ok(())
    }
}

fn in_list(value: &str, allowed: &[&str]) -> Result<(), ValidationError> {
    if allowed.contains(&value) {
        Ok(())
    } else {
        Err(failure(
            "in_list",
            format!("must be one of {} (got '{}')", allowed.join(", "), value),
        ))
    }
}

/// Validator: invoice payment method
pub fn payment_method(value: &str) -> Result<(), ValidationError> {
    in_list(value, PAYMENT_METHODS)
}

/// Validator: invoice payment status
pub fn payment_status(value: &str) -> Result<(), ValidationError> {
    in_list(value, PAYMENT_STATUSES)
}

/// Check a menu validity window against the current time
///
/// The end must come strictly after the start, and the window must not have
/// expired yet. A window that has already started is accepted.
pub fn menu_window(
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    now: DateTime<Utc>,
) -> Result<(), crate::core::error::ValidationError> {
    if end <= start {
        return Err(crate::core::error::ValidationError::field(
            "end_date",
            "must be after start_date",
        ));
    }
    if end <= now {
        return Err(crate::core::error::ValidationError::field(
            "end_date",
            "must be in the future",
        ));
    }
    Ok(())
}
