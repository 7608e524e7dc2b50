//! Validation and filtering system
//!
//! Payload structs declare their constraints with `validator` derive
//! attributes; the [`Validated`] extractor runs them before the payload
//! reaches a handler. Filters normalise accepted values before storage.

pub mod extractor;
pub mod filters;
pub mod validators;

pub use extractor::Validated;
pub use filters::{round_currency, round_decimals};
