//! HTTP routes of the Employee entity

use super::handlers::{create_employee, get_employee, list_employees, update_employee};
use super::model::Employee;
use crate::core::entity::Entity;
use crate::server::EntityRoutes;
use crate::store::Stores;
use axum::{Router, routing::get};

/// Routes of the Employee entity
pub struct EmployeeDescriptor {
    pub stores: Stores,
}

impl EmployeeDescriptor {
    pub fn new(stores: Stores) -> Self {
        Self { stores }
    }
}

impl EntityRoutes for EmployeeDescriptor {
    fn resource(&self) -> &'static str {
        Employee::resource_name()
    }

    fn routes(&self) -> Router {
        Router::new()
            .route("/employees", get(list_employees).post(create_employee))
            .route(
                "/employees/{employee_id}",
                get(get_employee).patch(update_employee),
            )
            .with_state(self.stores.clone())
    }
}
