//! Employee entity module

pub mod descriptor;
pub mod handlers;
pub mod model;

pub use descriptor::EmployeeDescriptor;
pub use handlers::*;
pub use model::{CreateEmployee, Employee, UpdateEmployee};
