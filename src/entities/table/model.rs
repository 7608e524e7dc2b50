//! Table entity model with validation

use crate::core::entity::Stamp;
use crate::core::update::UpdateDocument;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use validator::Validate;

crate::impl_restaurant_entity!(
    /// A dining table
    Table {
        resource: "tables",
        singular: "table",
        collection: "table",
        id: table_id,
    },
    required {
        number_of_guests: u32,
        table_number: u32,
    },
    optional {}
);

/// Payload of `POST /tables`
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateTable {
    #[validate(range(min = 1))]
    pub number_of_guests: u32,

    #[validate(range(min = 1))]
    pub table_number: u32,
}

impl CreateTable {
    pub fn into_table(self, stamp: Stamp) -> Table {
        Table::new(stamp, self.number_of_guests, self.table_number)
    }
}

/// Payload of `PATCH /tables/{table_id}`
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateTable {
    #[validate(range(min = 1))]
    pub number_of_guests: Option<u32>,

    #[validate(range(min = 1))]
    pub table_number: Option<u32>,
}

impl UpdateTable {
    pub fn to_update(&self, at: DateTime<Utc>) -> UpdateDocument {
        UpdateDocument::builder()
            .set_opt("number_of_guests", self.number_of_guests)
            .set_opt("table_number", self.table_number)
            .finish(at)
    }
}
