//! MongoDB storage backend using the official MongoDB async driver.
//!
//! Provides `MongoDataService<T>` backed by a MongoDB database via
//! `mongodb::Database`, plus [`connect`] to open that database at start-up.
//!
//! # Storage model
//!
//! MongoDB uses a **collection-per-entity-type** pattern. Each
//! `MongoDataService<T>` operates on the collection named by
//! `T::collection_name()` (e.g., "food", "orderItem").
//!
//! # Serialization strategy
//!
//! Entities are serialized via `serde_json::Value` as an intermediate format,
//! then converted to BSON documents. Fields listed in
//! `T::timestamp_fields()` are stored as BSON dates, and any BSON date read
//! back is rendered as an RFC 3339 string before decoding. The business identifier
//! (`food_id`, `menu_id`, ...) stays a regular field; when it is a valid
//! object id it is also used as MongoDB's `_id`. `_id` never leaves this
//! module.

use crate::config::DatabaseConfig;
use crate::core::entity::Entity;
use crate::core::error::StorageError;
use crate::core::query::{Page, PageWindow};
use crate::core::service::{DataService, InsertReceipt, UpdateReceipt};
use crate::core::update::{CREATED_AT, UPDATED_AT, UpdateDocument};
use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use futures::TryStreamExt;
use mongodb::bson::oid::ObjectId;
use mongodb::bson::{Bson, Document, doc};
use mongodb::options::{ClientOptions, IndexOptions};
use mongodb::{Client, Collection, Database, IndexModel};
use std::marker::PhantomData;

const BACKEND: &str = "mongodb";

/// Field holding the page slice in the aggregation output
const PAGE_ITEMS: &str = "items";

/// Field holding the collection size in the aggregation output
const TOTAL_COUNT: &str = "total_count";

// ---------------------------------------------------------------------------
// Connection
// ---------------------------------------------------------------------------

/// Open the configured database and check that the server answers.
///
/// Fails when the URI is malformed or the server does not answer a `ping`
/// within the connect timeout.
pub async fn connect(config: &DatabaseConfig) -> Result<Database, StorageError> {
    let connection_error = |e: mongodb::error::Error| StorageError::Connection {
        backend: BACKEND.to_string(),
        message: e.to_string(),
    };

    let mut options = ClientOptions::parse(&config.uri)
        .await
        .map_err(connection_error)?;
    options.app_name = Some("restaurant-server".to_string());
    options.connect_timeout = Some(config.connect_timeout());
    options.server_selection_timeout = Some(config.connect_timeout());

    let client = Client::with_options(options).map_err(connection_error)?;
    let database = client.database(&config.name);

    database
        .run_command(doc! { "ping": 1 })
        .await
        .map_err(connection_error)?;

    tracing::info!(database = %config.name, "connected to MongoDB");
    Ok(database)
}

// ---------------------------------------------------------------------------
// Conversion helpers
// ---------------------------------------------------------------------------

/// Convert a serde_json::Value (expected to be an Object) into a BSON
/// Document, using the business identifier as `_id` when it is an object id
/// and storing `date_fields` as BSON dates.
fn json_to_document(
    json: serde_json::Value,
    id_field: &str,
    date_fields: &[&str],
) -> Result<Document, StorageError> {
    let bson_val = mongodb::bson::to_bson(&json).map_err(StorageError::serialization)?;

    let mut doc = match bson_val {
        Bson::Document(d) => d,
        _ => {
            return Err(StorageError::serialization(
                "expected BSON document, got non-object",
            ));
        }
    };

    if let Some(oid) = doc.get_str(id_field).ok().and_then(object_id) {
        doc.insert("_id", oid);
    }
    store_dates(&mut doc, date_fields)?;

    Ok(doc)
}

/// Replace the RFC 3339 strings held by `fields` with BSON dates.
fn store_dates(doc: &mut Document, fields: &[&str]) -> Result<(), StorageError> {
    for field in fields {
        let Some(Bson::String(raw)) = doc.get(*field) else {
            continue;
        };
        let at = DateTime::parse_from_rfc3339(raw).map_err(|e| {
            StorageError::serialization(format!("field '{field}' is not a timestamp: {e}"))
        })?;
        let date = mongodb::bson::DateTime::from_millis(at.timestamp_millis());
        doc.insert(*field, date);
    }
    Ok(())
}

/// Render every top-level BSON date as an RFC 3339 string.
fn load_dates(doc: &mut Document) {
    for (_, value) in doc.iter_mut() {
        if let Bson::DateTime(date) = value {
            if let Some(at) = DateTime::<Utc>::from_timestamp_millis(date.timestamp_millis()) {
                *value = Bson::String(at.to_rfc3339_opts(SecondsFormat::AutoSi, true));
            }
        }
    }
}

/// Convert a BSON Document back into a serde_json::Value, dropping `_id`.
fn document_to_json(mut doc: Document) -> serde_json::Value {
    doc.remove("_id");
    load_dates(&mut doc);
    Bson::Document(doc).into_relaxed_extjson()
}

fn object_id(id: &str) -> Option<ObjectId> {
    ObjectId::parse_str(id).ok()
}

/// Read the `$sum` output of a `$group` stage, which is Int32 until it
/// overflows to Int64.
fn count_of(doc: &Document, field: &str) -> Result<u64, StorageError> {
    let count = match doc.get(field) {
        Some(Bson::Int32(n)) => i64::from(*n),
        Some(Bson::Int64(n)) => *n,
        other => {
            return Err(StorageError::serialization(format!(
                "expected integer '{field}', got {other:?}"
            )));
        }
    };
    u64::try_from(count).map_err(StorageError::serialization)
}

/// Aggregation returning the collection size and one window of records:
/// match everything in insertion order, group into a single document, then
/// slice. A negative start counts from the end, as `$slice` does.
fn page_pipeline(window: PageWindow) -> Vec<Document> {
    let start = i32::try_from(window.start_index).unwrap_or(if window.start_index < 0 {
        i32::MIN
    } else {
        i32::MAX
    });
    let n = i32::try_from(window.records_per_page).unwrap_or(i32::MAX);

    vec![
        doc! { "$match": {} },
        doc! { "$sort": { "_id": 1 } },
        doc! {
            "$group": {
                "_id": Bson::Null,
                TOTAL_COUNT: { "$sum": 1 },
                "data": { "$push": "$$ROOT" },
            }
        },
        doc! {
            "$project": {
                "_id": 0,
                TOTAL_COUNT: 1,
                PAGE_ITEMS: { "$slice": ["$data", start, n] },
            }
        },
    ]
}

/// Build the `$set` / `$setOnInsert` pair applied by an upsert.
///
/// A newly inserted record gets `created_at` equal to the update's
/// `updated_at`, and `_id` equal to the identifier when it is an object id.
/// `date_fields` are written as BSON dates.
fn upsert_document(
    id: &str,
    update: &UpdateDocument,
    date_fields: &[&str],
) -> Result<Document, StorageError> {
    let mut set = mongodb::bson::to_document(update).map_err(StorageError::serialization)?;
    store_dates(&mut set, date_fields)?;

    let mut on_insert = Document::new();
    if let Some(updated_at) = set.get(UPDATED_AT) {
        on_insert.insert(CREATED_AT, updated_at.clone());
    }
    if let Some(oid) = object_id(id) {
        on_insert.insert("_id", oid);
    }

    let mut document = doc! { "$set": set };
    if !on_insert.is_empty() {
        document.insert("$setOnInsert", on_insert);
    }
    Ok(document)
}

// ---------------------------------------------------------------------------
// MongoDataService<T>
// ---------------------------------------------------------------------------

/// Generic data storage service backed by MongoDB.
///
/// # Example
///
/// ```rust,ignore
/// use restaurant::storage::{MongoDataService, connect};
///
/// let db = connect(&config.database).await?;
/// let foods = MongoDataService::<Food>::new(db);
/// foods.ensure_indexes().await?;
/// let receipt = foods.create(food).await?;
/// ```
#[derive(Clone, Debug)]
pub struct MongoDataService<T> {
    database: Database,
    _marker: PhantomData<T>,
}

impl<T> MongoDataService<T> {
    /// Create a new `MongoDataService` with the given database handle.
    pub fn new(database: Database) -> Self {
        Self {
            database,
            _marker: PhantomData,
        }
    }

    /// Get a reference to the underlying database.
    pub fn database(&self) -> &Database {
        &self.database
    }
}

impl<T: Entity> MongoDataService<T> {
    fn collection(&self) -> Collection<Document> {
        self.database.collection(T::collection_name())
    }

    fn id_filter(id: &str) -> Document {
        let id_field = T::id_field();
        doc! { id_field: id }
    }

    /// Create a unique index on the business identifier field.
    ///
    /// Idempotent, safe to call on every startup.
    pub async fn ensure_indexes(&self) -> Result<(), StorageError> {
        let id_field = T::id_field();
        let index = IndexModel::builder()
            .keys(doc! { id_field: 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();

        self.collection().create_index(index).await.map_err(|e| {
            StorageError::operation(
                &format!("create indexes on {} collection", T::collection_name()),
                e,
            )
        })?;

        Ok(())
    }

    fn entity_to_document(entity: &T) -> Result<Document, StorageError> {
        let json = serde_json::to_value(entity).map_err(StorageError::serialization)?;
        json_to_document(json, T::id_field(), T::timestamp_fields())
    }

    fn document_to_entity(doc: Document) -> Result<T, StorageError> {
        serde_json::from_value(document_to_json(doc)).map_err(StorageError::serialization)
    }

    async fn find_documents(&self, filter: Document, operation: &str) -> Result<Vec<T>, StorageError> {
        let cursor = self
            .collection()
            .find(filter)
            .sort(doc! { "_id": 1 })
            .await
            .map_err(|e| StorageError::operation(operation, e))?;

        let docs: Vec<Document> = cursor
            .try_collect()
            .await
            .map_err(|e| StorageError::operation(operation, e))?;

        docs.into_iter().map(Self::document_to_entity).collect()
    }
}

#[async_trait]
impl<T: Entity> DataService<T> for MongoDataService<T> {
    async fn list(&self) -> Result<Vec<T>, StorageError> {
        tracing::debug!(collection = T::collection_name(), "list");
        self.find_documents(doc! {}, &format!("list {}", T::resource_name()))
            .await
    }

    /// Count and slice the collection in a single aggregation.
    async fn page(&self, window: PageWindow) -> Result<Option<Page<T>>, StorageError> {
        tracing::debug!(
            collection = T::collection_name(),
            start_index = window.start_index,
            records_per_page = window.records_per_page,
            "page"
        );
        let operation = format!("page {}", T::resource_name());

        let mut cursor = self
            .collection()
            .aggregate(page_pipeline(window))
            .await
            .map_err(|e| StorageError::operation(&operation, e))?;

        // An empty collection produces no group at all.
        let Some(result) = cursor
            .try_next()
            .await
            .map_err(|e| StorageError::operation(&operation, e))?
        else {
            return Ok(None);
        };

        let total_count = count_of(&result, TOTAL_COUNT)?;
        let items = result
            .get_array(PAGE_ITEMS)
            .map_err(StorageError::serialization)?
            .iter()
            .map(|item| match item {
                Bson::Document(doc) => Self::document_to_entity(doc.clone()),
                other => Err(StorageError::serialization(format!(
                    "expected document in page, got {other:?}"
                ))),
            })
            .collect::<Result<Vec<T>, _>>()?;

        Ok(Some(Page { total_count, items }))
    }

    async fn get(&self, id: &str) -> Result<Option<T>, StorageError> {
        tracing::debug!(collection = T::collection_name(), id, "get");
        let doc = self
            .collection()
            .find_one(Self::id_filter(id))
            .await
            .map_err(|e| {
                StorageError::operation(&format!("get {}", T::resource_name_singular()), e)
            })?;

        doc.map(Self::document_to_entity).transpose()
    }

    async fn find_by(&self, field: &str, value: &str) -> Result<Vec<T>, StorageError> {
        tracing::debug!(collection = T::collection_name(), field, value, "find_by");
        self.find_documents(
            doc! { field: value },
            &format!("find {} by {}", T::resource_name(), field),
        )
        .await
    }

    async fn exists(&self, id: &str) -> Result<bool, StorageError> {
        let count = self
            .collection()
            .count_documents(Self::id_filter(id))
            .limit(1)
            .await
            .map_err(|e| {
                StorageError::operation(&format!("look up {}", T::resource_name_singular()), e)
            })?;

        Ok(count > 0)
    }

    async fn create(&self, entity: T) -> Result<InsertReceipt, StorageError> {
        tracing::debug!(collection = T::collection_name(), id = entity.id(), "create");
        let doc = Self::entity_to_document(&entity)?;

        self.collection().insert_one(doc).await.map_err(|e| {
            StorageError::operation(&format!("insert {}", T::resource_name_singular()), e)
        })?;

        Ok(InsertReceipt {
            inserted_id: entity.id().to_string(),
        })
    }

    async fn create_many(&self, entities: Vec<T>) -> Result<Vec<InsertReceipt>, StorageError> {
        if entities.is_empty() {
            return Ok(Vec::new());
        }
        tracing::debug!(
            collection = T::collection_name(),
            count = entities.len(),
            "create_many"
        );

        let docs = entities
            .iter()
            .map(Self::entity_to_document)
            .collect::<Result<Vec<_>, _>>()?;

        self.collection()
            .insert_many(docs)
            .await
            .map_err(|e| StorageError::operation(&format!("insert {}", T::resource_name()), e))?;

        Ok(entities
            .iter()
            .map(|entity| InsertReceipt {
                inserted_id: entity.id().to_string(),
            })
            .collect())
    }

    async fn upsert(
        &self,
        id: &str,
        update: UpdateDocument,
    ) -> Result<UpdateReceipt, StorageError> {
        tracing::debug!(
            collection = T::collection_name(),
            id,
            fields = update.len(),
            "upsert"
        );

        let result = self
            .collection()
            .update_one(
                Self::id_filter(id),
                upsert_document(id, &update, T::timestamp_fields())?,
            )
            .upsert(true)
            .await
            .map_err(|e| {
                StorageError::operation(&format!("update {}", T::resource_name_singular()), e)
            })?;

        let upserted = result.upserted_id.is_some();
        Ok(UpdateReceipt {
            matched_count: result.matched_count,
            modified_count: result.modified_count,
            upserted_count: u64::from(upserted),
            upserted_id: upserted.then(|| id.to_string()),
        })
    }
}
