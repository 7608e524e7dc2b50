//! Deadline decorator for any DataService
//!
//! Every call to the wrapped service is bounded by one timeout; a call that
//! does not finish in time fails with [`StorageError::Timeout`]. The inner
//! operation is dropped at the deadline, so a write may or may not have been
//! applied when the timeout is reported.

use crate::core::entity::Entity;
use crate::core::error::StorageError;
use crate::core::query::{Page, PageWindow};
use crate::core::service::{DataService, InsertReceipt, UpdateReceipt};
use crate::core::update::UpdateDocument;
use async_trait::async_trait;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

/// Wraps a data service and applies a deadline to each operation
pub struct TimedDataService<T> {
    inner: Arc<dyn DataService<T>>,
    timeout: Duration,
}

impl<T: Entity> TimedDataService<T> {
    pub fn new(inner: Arc<dyn DataService<T>>, timeout: Duration) -> Self {
        Self { inner, timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    async fn timed<R>(
        &self,
        verb: &str,
        operation: impl Future<Output = Result<R, StorageError>> + Send,
    ) -> Result<R, StorageError> {
        match tokio::time::timeout(self.timeout, operation).await {
            Ok(result) => result,
            Err(_) => {
                let operation = format!("{} {}", verb, T::resource_name_singular());
                tracing::error!(timeout_secs = self.timeout.as_secs(), "{} timed out", operation);
                Err(StorageError::Timeout {
                    operation,
                    timeout: self.timeout,
                })
            }
        }
    }
}

#[async_trait]
impl<T: Entity> DataService<T> for TimedDataService<T> {
    async fn list(&self) -> Result<Vec<T>, StorageError> {
        self.timed("list", self.inner.list()).await
    }

    async fn page(&self, window: PageWindow) -> Result<Option<Page<T>>, StorageError> {
        self.timed("page", self.inner.page(window)).await
    }

    async fn get(&self, id: &str) -> Result<Option<T>, StorageError> {
        self.timed("get", self.inner.get(id)).await
    }

    async fn find_by(&self, field: &str, value: &str) -> Result<Vec<T>, StorageError> {
        self.timed("find", self.inner.find_by(field, value)).await
    }

    async fn exists(&self, id: &str) -> Result<bool, StorageError> {
        self.timed("look up", self.inner.exists(id)).await
    }

    async fn create(&self, entity: T) -> Result<InsertReceipt, StorageError> {
        self.timed("insert", self.inner.create(entity)).await
    }

    async fn create_many(&self, entities: Vec<T>) -> Result<Vec<InsertReceipt>, StorageError> {
        self.timed("insert", self.inner.create_many(entities)).await
    }

    async fn upsert(
        &self,
        id: &str,
        update: UpdateDocument,
    ) -> Result<UpdateReceipt, StorageError> {
        self.timed("update", self.inner.upsert(id, update)).await
    }
}
