//! ServerBuilder for fluent API to build HTTP servers

use super::entity_registry::{EntityRegistry, EntityRoutes};
use super::rest::RestExposure;
use crate::entities::descriptors;
use crate::store::Stores;
use anyhow::{Context, Result};
use axum::Router;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Builder for creating the HTTP server with its entity routes
///
/// # Example
///
/// ```ignore
/// let app = ServerBuilder::new()
///     .with_stores(Stores::in_memory())
///     .register_restaurant_entities()?
///     .build()?;
/// ```
pub struct ServerBuilder {
    stores: Option<Stores>,
    entity_registry: EntityRegistry,
    custom_routes: Vec<Router>,
}

impl ServerBuilder {
    /// Create a new ServerBuilder
    pub fn new() -> Self {
        Self {
            stores: None,
            entity_registry: EntityRegistry::new(),
            custom_routes: Vec::new(),
        }
    }

    /// Set the stores shared by the restaurant entities
    pub fn with_stores(mut self, stores: Stores) -> Self {
        self.stores = Some(stores);
        self
    }

    /// Add custom routes to the server
    ///
    /// Use this for routes that don't belong to an entity.
    pub fn with_custom_routes(mut self, routes: Router) -> Self {
        self.custom_routes.push(routes);
        self
    }

    /// Register the routes of a single entity
    ///
    /// Fails when the entity's paths are already served.
    pub fn register_entity(mut self, routes: impl EntityRoutes + 'static) -> Result<Self> {
        self.entity_registry.register(Box::new(routes))?;
        Ok(self)
    }

    /// Register every restaurant entity over the configured stores
    ///
    /// Fails when no stores were set.
    pub fn register_restaurant_entities(mut self) -> Result<Self> {
        let stores = self
            .stores
            .as_ref()
            .ok_or_else(|| anyhow::anyhow!("Stores are required. Call .with_stores()"))?;

        for routes in descriptors(stores) {
            self.entity_registry.register(routes)?;
        }

        Ok(self)
    }

    /// Get the entity registry
    pub fn registry(&self) -> &EntityRegistry {
        &self.entity_registry
    }

    /// Build the final REST router with tracing and CORS layers
    ///
    /// Fails when no entity was registered.
    pub fn build(self) -> Result<Router> {
        if self.entity_registry.is_empty() {
            anyhow::bail!("No entity registered. Call .register_restaurant_entities()");
        }

        let app = RestExposure::build_router(&self.entity_registry, self.custom_routes).layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        );

        Ok(app)
    }

    /// Serve the application with graceful shutdown
    ///
    /// This will:
    /// - Bind to the provided address
    /// - Start serving requests
    /// - Handle SIGTERM and SIGINT (Ctrl+C) for graceful shutdown
    pub async fn serve(self, addr: &str) -> Result<()> {
        let resources = self.entity_registry.resources().join(", ");
        let app = self.build()?;
        let listener = TcpListener::bind(addr)
            .await
            .with_context(|| format!("failed to bind {addr}"))?;

        tracing::info!(%resources, "Server listening on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .context("server error")?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal, initiating graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal, initiating graceful shutdown...");
        },
    }
}
