//! Menu entity model with validation

use crate::core::entity::Stamp;
use crate::core::error::ValidationError;
use crate::core::update::UpdateDocument;
use crate::core::validation::validators::{menu_window, non_blank};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use validator::Validate;

crate::impl_restaurant_entity!(
    /// A named group of foods, optionally valid for a time window
    Menu {
        resource: "menus",
        singular: "menu",
        collection: "menu",
        id: menu_id,
        dates: [start_date, end_date],
    },
    required {
        name: String,
        category: String,
    },
    optional {
        start_date: DateTime<Utc>,
        end_date: DateTime<Utc>,
    }
);

/// Check the validity window when both bounds are given
fn check_window(
    start_date: Option<DateTime<Utc>>,
    end_date: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> Result<(), ValidationError> {
    match (start_date, end_date) {
        (Some(start), Some(end)) => menu_window(start, end, now),
        _ => Ok(()),
    }
}

/// Payload of `POST /menus`
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateMenu {
    #[validate(custom(function = "non_blank"), length(max = 100))]
    pub name: String,

    #[validate(custom(function = "non_blank"), length(max = 100))]
    pub category: String,

    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
}

impl CreateMenu {
    pub fn check_window(&self, now: DateTime<Utc>) -> Result<(), ValidationError> {
        check_window(self.start_date, self.end_date, now)
    }

    pub fn into_menu(self, stamp: Stamp) -> Menu {
        Menu::new(
            stamp,
            self.name,
            self.category,
            self.start_date,
            self.end_date,
        )
    }
}

/// Payload of `PATCH /menus/{menu_id}`
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateMenu {
    #[validate(custom(function = "non_blank"), length(max = 100))]
    pub name: Option<String>,

    #[validate(custom(function = "non_blank"), length(max = 100))]
    pub category: Option<String>,

    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
}

impl UpdateMenu {
    pub fn check_window(&self, now: DateTime<Utc>) -> Result<(), ValidationError> {
        check_window(self.start_date, self.end_date, now)
    }

    pub fn to_update(&self, at: DateTime<Utc>) -> UpdateDocument {
        UpdateDocument::builder()
            .set_opt("name", self.name.clone())
            .set_opt("category", self.category.clone())
            .set_timestamp_opt("start_date", self.start_date)
            .set_timestamp_opt("end_date", self.end_date)
            .finish(at)
    }
}
