//! Server module for building the HTTP server
//!
//! `ServerBuilder` assembles the entity routes registered through
//! `EntityRoutes`, the health routes and the HTTP layers, and serves
//! them with graceful shutdown.

pub mod builder;
pub mod entity_registry;
pub mod rest;

pub use builder::ServerBuilder;
pub use entity_registry::{EntityRegistry, EntityRoutes, RegistryError};
pub use rest::RestExposure;
