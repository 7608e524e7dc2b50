//! Registry of the resources served by the application
//!
//! Each entity contributes the router for its URL prefix. Prefixes are
//! claimed at registration so two entities can never answer the same path,
//! and resources are mounted and listed in registration order.

use axum::Router;
use thiserror::Error;

/// Routes exposing one entity over HTTP
///
/// The returned router already carries its state.
pub trait EntityRoutes: Send + Sync {
    /// Top-level path segment of the entity (e.g. "order-items")
    fn resource(&self) -> &'static str;

    /// Other top-level segments served by the same router
    fn extra_prefixes(&self) -> &'static [&'static str] {
        &[]
    }

    /// Router with every route of the entity
    fn routes(&self) -> Router;
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("path prefix '/{prefix}' of '{resource}' is already served by '{owner}'")]
    PrefixTaken {
        prefix: String,
        resource: String,
        owner: String,
    },
}

/// Resources registered with the server
#[derive(Default)]
pub struct EntityRegistry {
    entries: Vec<Box<dyn EntityRoutes>>,
}

impl EntityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an entity's routes
    ///
    /// Fails without registering anything when one of its prefixes is
    /// already served by another entity.
    pub fn register(&mut self, entry: Box<dyn EntityRoutes>) -> Result<(), RegistryError> {
        for prefix in Self::prefixes_of(entry.as_ref()) {
            if let Some(owner) = self.owner_of(prefix) {
                return Err(RegistryError::PrefixTaken {
                    prefix: prefix.to_string(),
                    resource: entry.resource().to_string(),
                    owner: owner.to_string(),
                });
            }
        }

        tracing::debug!(resource = entry.resource(), "registered entity routes");
        self.entries.push(entry);
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Resource names in registration order
    pub fn resources(&self) -> Vec<&'static str> {
        self.entries.iter().map(|entry| entry.resource()).collect()
    }

    /// Resource serving the given top-level path segment
    pub fn owner_of(&self, prefix: &str) -> Option<&'static str> {
        self.entries
            .iter()
            .find(|entry| Self::prefixes_of(entry.as_ref()).any(|p| p == prefix))
            .map(|entry| entry.resource())
    }

    /// All entity routers merged together
    pub fn router(&self) -> Router {
        self.entries
            .iter()
            .fold(Router::new(), |router, entry| router.merge(entry.routes()))
    }

    fn prefixes_of(entry: &dyn EntityRoutes) -> impl Iterator<Item = &'static str> {
        std::iter::once(entry.resource()).chain(entry.extra_prefixes().iter().copied())
    }
}
