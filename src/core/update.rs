//! Sparse update documents for partial updates
//!
//! An update payload has every field optional. Only the fields actually
//! present end up in the document, and `updated_at` is always appended when
//! the document is finished.

use super::entity::format_timestamp;
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;

/// Field holding the last-modification timestamp on every entity
pub const UPDATED_AT: &str = "updated_at";

/// Field holding the creation timestamp on every entity
pub const CREATED_AT: &str = "created_at";

/// Ordered set of `(field, value)` pairs to write with `$set` semantics
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct UpdateDocument {
    fields: IndexMap<String, Value>,
}

impl UpdateDocument {
    /// Start building an update document
    pub fn builder() -> UpdateBuilder {
        UpdateBuilder::default()
    }

    /// All fields in the order they were set
    pub fn fields(&self) -> &IndexMap<String, Value> {
        &self.fields
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Builder collecting the fields present on an update payload
#[derive(Debug, Default)]
pub struct UpdateBuilder {
    fields: IndexMap<String, Value>,
}

impl UpdateBuilder {
    /// Set a field unconditionally
    pub fn set(mut self, field: &str, value: impl Into<Value>) -> Self {
        self.fields.insert(field.to_string(), value.into());
        self
    }

    /// Set a field only when the payload carried it
    pub fn set_opt(self, field: &str, value: Option<impl Into<Value>>) -> Self {
        match value {
            Some(value) => self.set(field, value),
            None => self,
        }
    }

    /// Set a timestamp field only when the payload carried it
    pub fn set_timestamp_opt(self, field: &str, value: Option<DateTime<Utc>>) -> Self {
        self.set_opt(field, value.map(format_timestamp))
    }

    /// Finish the document, always stamping `updated_at`
    pub fn finish(self, updated_at: DateTime<Utc>) -> UpdateDocument {
        self.set(UPDATED_AT, format_timestamp(updated_at)).into_document()
    }

    fn into_document(self) -> UpdateDocument {
        UpdateDocument {
            fields: self.fields,
        }
    }
}
