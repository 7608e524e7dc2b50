//! Entity trait defining the core abstraction for all persisted records

use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
use mongodb::bson::oid::ObjectId;
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Base trait for all entities in the system.
///
/// Every entity has:
/// - a business identifier stored under `id_field()` (e.g. `food_id`),
///   mirrored into MongoDB's `_id` when it is a valid object id
/// - created_at / updated_at timestamps with whole-second precision
///
/// Entities are owned by exactly one collection. Relations between entities
/// are plain string references checked for existence at write time.
pub trait Entity: Clone + Serialize + DeserializeOwned + Send + Sync + Unpin + 'static {
    /// The plural resource name used in URLs (e.g., "foods", "order-items")
    fn resource_name() -> &'static str;

    /// The singular resource name (e.g., "food", "order item")
    fn resource_name_singular() -> &'static str;

    /// Name of the physical collection holding this entity
    fn collection_name() -> &'static str;

    /// Name of the business identifier field (e.g., "food_id")
    fn id_field() -> &'static str;

    /// Fields holding a timestamp, `created_at` and `updated_at` included
    ///
    /// Storage backends with a native date type store these as dates.
    fn timestamp_fields() -> &'static [&'static str];

    /// Get the business identifier of this entity instance
    fn id(&self) -> &str;

    /// Get the creation timestamp
    fn created_at(&self) -> DateTime<Utc>;

    /// Get the last update timestamp
    fn updated_at(&self) -> DateTime<Utc>;
}

/// Identity and timestamps assigned to a record at creation.
///
/// The identifier is a freshly generated object id rendered as 24 hex chars,
/// and `created_at == updated_at`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stamp {
    pub id: String,
    pub at: DateTime<Utc>,
}

impl Stamp {
    /// Generate a new identifier stamped with the current time
    pub fn fresh() -> Self {
        Self {
            id: new_entity_id(),
            at: now(),
        }
    }
}

/// Generate a new business identifier
pub fn new_entity_id() -> String {
    ObjectId::new().to_hex()
}

/// Current UTC time truncated to whole seconds
pub fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(0)
}

/// Render a timestamp the same way entity serialization does
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Secs, true)
}
