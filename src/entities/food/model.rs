//! Food entity model with validation and filtering

use crate::core::entity::Stamp;
use crate::core::update::UpdateDocument;
use crate::core::validation::round_currency;
use crate::core::validation::validators::non_blank;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

crate::impl_restaurant_entity!(
    /// A dish that can be ordered, listed on exactly one menu
    Food {
        resource: "foods",
        singular: "food",
        collection: "food",
        id: food_id,
    },
    required {
        name: String,
        /// Unit price, always stored with at most 2 decimals
        price: f64,
        food_image: String,
        /// Menu this food belongs to
        menu_id: String,
    },
    optional {}
);

/// Payload of `POST /foods`
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateFood {
    #[validate(length(min = 2, max = 100))]
    pub name: String,

    #[validate(range(exclusive_min = 0.0))]
    pub price: f64,

    #[validate(custom(function = "non_blank"))]
    pub food_image: String,

    #[validate(custom(function = "non_blank"))]
    pub menu_id: String,
}

impl CreateFood {
    pub fn into_food(self, stamp: Stamp) -> Food {
        Food::new(
            stamp,
            self.name,
            round_currency(self.price),
            self.food_image,
            self.menu_id,
        )
    }
}

/// Payload of `PATCH /foods/{food_id}`
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateFood {
    #[validate(length(min = 2, max = 100))]
    pub name: Option<String>,

    #[validate(range(exclusive_min = 0.0))]
    pub price: Option<f64>,

    #[validate(custom(function = "non_blank"))]
    pub food_image: Option<String>,

    #[validate(custom(function = "non_blank"))]
    pub menu_id: Option<String>,
}

impl UpdateFood {
    pub fn to_update(&self, at: DateTime<Utc>) -> UpdateDocument {
        UpdateDocument::builder()
            .set_opt("name", self.name.clone())
            .set_opt("price", self.price.map(round_currency))
            .set_opt("food_image", self.food_image.clone())
            .set_opt("menu_id", self.menu_id.clone())
            .finish(at)
    }
}

/// Body of `GET /foods`
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum FoodListing {
    Page {
        total_count: u64,
        food_items: Vec<Food>,
    },
    Empty {
        message: String,
    },
}

impl FoodListing {
    pub fn empty() -> Self {
        FoodListing::Empty {
            message: "No food items found".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::entity::now;
    use serde_json::json;

    fn create(price: f64) -> CreateFood {
        CreateFood {
            name: "Margherita".to_string(),
            price,
            food_image: "margherita.png".to_string(),
            menu_id: "m1".to_string(),
        }
    }

    #[test]
    fn test_create_rounds_price() {
        let food = create(9.995).into_food(Stamp::fresh());
        assert_eq!(food.price, Some(10.0));
        assert_eq!(food.created_at, food.updated_at);
    }

    #[test]
    fn test_create_validation() {
        assert!(create(12.5).validate().is_ok());
        assert!(create(0.0).validate().is_err());

        let mut payload = create(12.5);
        payload.name = "x".to_string();
        payload.menu_id = "  ".to_string();
        let errors = payload.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("name"));
        assert!(fields.contains_key("menu_id"));
    }

    #[test]
    fn test_missing_field_is_a_parse_error() {
        let result = serde_json::from_value::<CreateFood>(json!({
            "name": "Soup",
            "price": 4.5,
            "food_image": "soup.png"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_update_only_sets_present_fields() {
        let payload = UpdateFood {
            price: Some(1.005),
            ..Default::default()
        };
        let doc = payload.to_update(now());
        assert_eq!(doc.get("price"), Some(&json!(1.01)));
        assert!(!doc.contains("name"));
        assert!(doc.contains("updated_at"));
    }

    #[test]
    fn test_listing_shapes() {
        let empty = serde_json::to_value(FoodListing::empty()).unwrap();
        assert_eq!(empty, json!({"message": "No food items found"}));

        let page = serde_json::to_value(FoodListing::Page {
            total_count: 0,
            food_items: vec![],
        })
        .unwrap();
        assert_eq!(page, json!({"total_count": 0, "food_items": []}));
    }
}
