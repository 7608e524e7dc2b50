//! Employee entity model with validation

use crate::core::entity::Stamp;
use crate::core::update::UpdateDocument;
use crate::core::validation::validators::PHONE_PATTERN;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use validator::Validate;

crate::impl_restaurant_entity!(
    /// A member of staff
    Employee {
        resource: "employees",
        singular: "employee",
        collection: "employee",
        id: employee_id,
    },
    required {
        first_name: String,
        last_name: String,
        email: String,
        phone: String,
    },
    optional {
        /// Picture URL
        avatar: String,
    }
);

/// Payload of `POST /employees`
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateEmployee {
    #[validate(length(min = 2, max = 100))]
    pub first_name: String,

    #[validate(length(min = 2, max = 100))]
    pub last_name: String,

    #[validate(email)]
    pub email: String,

    #[validate(regex(path = *PHONE_PATTERN))]
    pub phone: String,

    #[validate(url)]
    pub avatar: Option<String>,
}

impl CreateEmployee {
    pub fn into_employee(self, stamp: Stamp) -> Employee {
        Employee::new(
            stamp,
            self.first_name,
            self.last_name,
            self.email.to_lowercase(),
            self.phone,
            self.avatar,
        )
    }
}

/// Payload of `PATCH /employees/{employee_id}`
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateEmployee {
    #[validate(length(min = 2, max = 100))]
    pub first_name: Option<String>,

    #[validate(length(min = 2, max = 100))]
    pub last_name: Option<String>,

    #[validate(email)]
    pub email: Option<String>,

    #[validate(regex(path = *PHONE_PATTERN))]
    pub phone: Option<String>,

    #[validate(url)]
    pub avatar: Option<String>,
}

impl UpdateEmployee {
    pub fn to_update(&self, at: DateTime<Utc>) -> UpdateDocument {
        UpdateDocument::builder()
            .set_opt("first_name", self.first_name.clone())
            .set_opt("last_name", self.last_name.clone())
            .set_opt("email", self.email.as_deref().map(str::to_lowercase))
            .set_opt("phone", self.phone.clone())
            .set_opt("avatar", self.avatar.clone())
            .finish(at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::entity::now;
    use serde_json::json;

    fn payload() -> CreateEmployee {
        CreateEmployee {
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: "Ada@Example.com".to_string(),
            phone: "+44 20 7946 0958".to_string(),
            avatar: None,
        }
    }

    #[test]
    fn test_valid_employee() {
        assert!(payload().validate().is_ok());
        let employee = payload().into_employee(Stamp::fresh());
        assert_eq!(employee.email.as_deref(), Some("ada@example.com"));
        assert!(employee.avatar.is_none());
    }

    #[test]
    fn test_invalid_contact_details() {
        let mut bad = payload();
        bad.email = "not-an-email".to_string();
        bad.phone = "call me".to_string();
        bad.avatar = Some("nope".to_string());

        let errors = bad.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("email"));
        assert!(fields.contains_key("phone"));
        assert!(fields.contains_key("avatar"));
    }

    #[test]
    fn test_update_lowercases_email() {
        let payload: UpdateEmployee =
            serde_json::from_value(json!({ "email": "Chef@Kitchen.io" })).unwrap();
        assert!(payload.validate().is_ok());
        let doc = payload.to_update(now());
        assert_eq!(doc.get("email"), Some(&json!("chef@kitchen.io")));
    }
}
