//! In-memory implementation of DataService for testing and development
//!
//! Records are held as JSON objects so that partial upserts behave the way
//! they do on MongoDB: a record created by an update only carries the fields
//! that update set.

use crate::core::entity::Entity;
use crate::core::error::StorageError;
use crate::core::query::{Page, PageWindow};
use crate::core::service::{DataService, InsertReceipt, UpdateReceipt};
use crate::core::update::{CREATED_AT, UPDATED_AT, UpdateDocument};
use async_trait::async_trait;
use indexmap::IndexMap;
use serde_json::{Map, Value};
use std::marker::PhantomData;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

type Records = IndexMap<String, Value>;

/// In-memory data service implementation
///
/// Useful for testing and development. Uses RwLock for thread-safe access
/// and keeps records in insertion order.
pub struct InMemoryDataService<T> {
    records: Arc<RwLock<Records>>,
    _marker: PhantomData<T>,
}

impl<T> Clone for InMemoryDataService<T> {
    fn clone(&self) -> Self {
        Self {
            records: Arc::clone(&self.records),
            _marker: PhantomData,
        }
    }
}

impl<T> InMemoryDataService<T> {
    /// Create a new, empty in-memory data service
    pub fn new() -> Self {
        Self {
            records: Arc::new(RwLock::new(IndexMap::new())),
            _marker: PhantomData,
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Records>, StorageError> {
        self.records
            .read()
            .map_err(|e| StorageError::operation("acquire read lock", e))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Records>, StorageError> {
        self.records
            .write()
            .map_err(|e| StorageError::operation("acquire write lock", e))
    }
}

impl<T> Default for InMemoryDataService<T> {
    fn default() -> Self {
        Self::new()
    }
}

fn decode<T: Entity>(record: &Value) -> Result<T, StorageError> {
    serde_json::from_value(record.clone()).map_err(StorageError::serialization)
}

fn decode_all<'a, T: Entity>(
    records: impl Iterator<Item = &'a Value>,
) -> Result<Vec<T>, StorageError> {
    records.map(decode).collect()
}

fn duplicate_key<T: Entity>(id: &str) -> StorageError {
    StorageError::operation(
        &format!("insert {}", T::resource_name_singular()),
        format!("duplicate key {}: {}", T::id_field(), id),
    )
}

#[async_trait]
impl<T: Entity> DataService<T> for InMemoryDataService<T> {
    async fn list(&self) -> Result<Vec<T>, StorageError> {
        let records = self.read()?;
        decode_all(records.values())
    }

    async fn page(&self, window: PageWindow) -> Result<Option<Page<T>>, StorageError> {
        let records = self.read()?;
        if records.is_empty() {
            return Ok(None);
        }

        let items = decode_all(
            records
                .values()
                .skip(window.offset(records.len()))
                .take(window.records_per_page),
        )?;

        Ok(Some(Page {
            total_count: records.len() as u64,
            items,
        }))
    }

    async fn get(&self, id: &str) -> Result<Option<T>, StorageError> {
        let records = self.read()?;
        records.get(id).map(decode).transpose()
    }

    async fn find_by(&self, field: &str, value: &str) -> Result<Vec<T>, StorageError> {
        let records = self.read()?;
        decode_all(
            records
                .values()
                .filter(|record| record.get(field).and_then(Value::as_str) == Some(value)),
        )
    }

    async fn exists(&self, id: &str) -> Result<bool, StorageError> {
        Ok(self.read()?.contains_key(id))
    }

    async fn create(&self, entity: T) -> Result<InsertReceipt, StorageError> {
        let record = serde_json::to_value(&entity).map_err(StorageError::serialization)?;
        let id = entity.id().to_string();

        let mut records = self.write()?;
        if records.contains_key(&id) {
            return Err(duplicate_key::<T>(&id));
        }
        records.insert(id.clone(), record);

        Ok(InsertReceipt { inserted_id: id })
    }

    /// Insert all records or none of them
    async fn create_many(&self, entities: Vec<T>) -> Result<Vec<InsertReceipt>, StorageError> {
        let mut batch = Vec::with_capacity(entities.len());
        for entity in &entities {
            let record = serde_json::to_value(entity).map_err(StorageError::serialization)?;
            batch.push((entity.id().to_string(), record));
        }

        let mut records = self.write()?;
        for (index, (id, _)) in batch.iter().enumerate() {
            if records.contains_key(id) || batch[..index].iter().any(|(other, _)| other == id) {
                return Err(duplicate_key::<T>(id));
            }
        }

        let mut receipts = Vec::with_capacity(batch.len());
        for (id, record) in batch {
            records.insert(id.clone(), record);
            receipts.push(InsertReceipt { inserted_id: id });
        }
        Ok(receipts)
    }

    async fn upsert(
        &self,
        id: &str,
        update: UpdateDocument,
    ) -> Result<UpdateReceipt, StorageError> {
        let mut records = self.write()?;

        if let Some(Value::Object(record)) = records.get_mut(id) {
            let mut modified = false;
            for (field, value) in update.fields() {
                if record.get(field) != Some(value) {
                    record.insert(field.clone(), value.clone());
                    modified = true;
                }
            }

            return Ok(UpdateReceipt {
                matched_count: 1,
                modified_count: u64::from(modified),
                upserted_count: 0,
                upserted_id: None,
            });
        }

        let mut record = Map::new();
        record.insert(T::id_field().to_string(), Value::String(id.to_string()));
        for (field, value) in update.fields() {
            record.insert(field.clone(), value.clone());
        }
        if let Some(updated_at) = update.get(UPDATED_AT) {
            record.insert(CREATED_AT.to_string(), updated_at.clone());
        }
        records.insert(id.to_string(), Value::Object(record));

        Ok(UpdateReceipt {
            matched_count: 0,
            modified_count: 0,
            upserted_count: 1,
            upserted_id: Some(id.to_string()),
        })
    }
}
