//! Service trait for entity persistence

use crate::core::entity::Entity;
use crate::core::error::{EntityError, RestaurantError, StorageError};
use crate::core::query::{Page, PageWindow};
use crate::core::update::UpdateDocument;
use async_trait::async_trait;
use serde::Serialize;

/// Result of inserting a record
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InsertReceipt {
    /// Business identifier of the inserted record
    pub inserted_id: String,
}

/// Raw outcome of an upserting update
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpdateReceipt {
    /// Number of records matching the identifier filter (0 or 1)
    pub matched_count: u64,

    /// Number of records actually changed
    pub modified_count: u64,

    /// 1 when no record matched and a new one was created
    pub upserted_count: u64,

    /// Business identifier of the created record, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upserted_id: Option<String>,
}

/// Service trait for managing one entity collection
///
/// Implementations own a single collection and address records by their
/// business identifier (`T::id_field()`), never by the storage engine's
/// internal id. Writes are atomic per record only.
#[async_trait]
pub trait DataService<T: Entity>: Send + Sync {
    /// List all records in natural order
    async fn list(&self) -> Result<Vec<T>, StorageError>;

    /// Count all records and return the records inside `window`
    ///
    /// Returns `Ok(None)` when the collection is empty, which callers must
    /// distinguish from a page with no items.
    async fn page(&self, window: PageWindow) -> Result<Option<Page<T>>, StorageError>;

    /// Get a record by business identifier
    async fn get(&self, id: &str) -> Result<Option<T>, StorageError>;

    /// List the records whose `field` equals `value`
    async fn find_by(&self, field: &str, value: &str) -> Result<Vec<T>, StorageError>;

    /// Whether a record with this business identifier exists
    async fn exists(&self, id: &str) -> Result<bool, StorageError> {
        Ok(self.get(id).await?.is_some())
    }

    /// Insert a new record
    async fn create(&self, entity: T) -> Result<InsertReceipt, StorageError>;

    /// Insert several records
    async fn create_many(&self, entities: Vec<T>) -> Result<Vec<InsertReceipt>, StorageError>;

    /// Apply `update` to the record with this identifier, creating it when
    /// nothing matches
    ///
    /// A created record holds the identifier field, the update's fields and
    /// `created_at` equal to the update's `updated_at`.
    async fn upsert(&self, id: &str, update: UpdateDocument)
    -> Result<UpdateReceipt, StorageError>;
}

/// Fail with a not-found error unless the referenced record exists
///
/// Used before writing a record that points at another collection (a food's
/// menu, an order's table). The check and the following write are not
/// isolated from each other.
pub async fn ensure_reference<T: Entity>(
    service: &dyn DataService<T>,
    id: &str,
) -> Result<(), RestaurantError> {
    if service.exists(id).await? {
        Ok(())
    } else {
        Err(EntityError::reference_not_found(T::resource_name_singular(), id).into())
    }
}
