//! REST API exposure
//!
//! Produces the Axum router from the registered entities: health routes,
//! entity routes, custom routes and a JSON fallback for unknown paths.

use super::entity_registry::EntityRegistry;
use crate::core::error::ErrorResponse;
use axum::http::{StatusCode, Uri};
use axum::{Json, Router, routing::get};
use serde_json::{Value, json};

/// REST API exposure implementation
pub struct RestExposure;

impl RestExposure {
    /// Build the REST router
    ///
    /// # Arguments
    ///
    /// * `registry` - The registered entities
    /// * `custom_routes` - Additional custom routes to merge
    pub fn build_router(registry: &EntityRegistry, custom_routes: Vec<Router>) -> Router {
        let mut app = Self::health_routes().merge(registry.router());

        for custom_router in custom_routes {
            app = app.merge(custom_router);
        }

        app.fallback(Self::not_found)
    }

    /// Build health check routes
    fn health_routes() -> Router {
        Router::new()
            .route("/health", get(Self::health_check))
            .route("/healthz", get(Self::health_check))
    }

    /// Health check endpoint handler
    async fn health_check() -> Json<Value> {
        Json(json!({
            "status": "ok",
            "service": "restaurant-rs"
        }))
    }

    async fn not_found(uri: Uri) -> (StatusCode, Json<ErrorResponse>) {
        (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: format!("no route for {}", uri.path()),
                code: "ROUTE_NOT_FOUND".to_string(),
                details: None,
            }),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::table::TableDescriptor;
    use crate::store::Stores;
    use axum::body::{Body, to_bytes};
    use axum::http::Request;
    use tower::ServiceExt;

    fn app() -> Router {
        let mut registry = EntityRegistry::new();
        registry
            .register(Box::new(TableDescriptor::new(Stores::in_memory())))
            .unwrap();
        RestExposure::build_router(&registry, Vec::new())
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health_route() {
        let response = app()
            .oneshot(Request::get("/healthz").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["status"], "ok");
    }

    #[tokio::test]
    async fn test_entity_routes_are_mounted() {
        let response = app()
            .oneshot(Request::get("/tables").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!([]));
    }

    #[tokio::test]
    async fn test_fallback_is_json() {
        let response = app()
            .oneshot(Request::get("/foods").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await["code"], "ROUTE_NOT_FOUND");
    }
}
