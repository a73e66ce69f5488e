use std::sync::Arc;

use axum::{
    routing::{get, patch, post},
    Router,
};

use crate::features::providers::handlers;
use crate::features::providers::services::ProviderService;

/// Create routes for the providers feature
pub fn routes(service: Arc<ProviderService>) -> Router {
    Router::new()
        .route("/api/providers", post(handlers::register_provider))
        .route(
            "/api/providers/{id}",
            get(handlers::get_provider).delete(handlers::delete_provider),
        )
        .route("/api/providers/{id}/approve", post(handlers::approve_provider))
        .route(
            "/api/providers/{id}/deactivate",
            post(handlers::deactivate_provider),
        )
        .route(
            "/api/providers/{id}/location",
            patch(handlers::update_location),
        )
        .route(
            "/api/providers/{id}/availability",
            patch(handlers::update_availability),
        )
        .with_state(service)
}
