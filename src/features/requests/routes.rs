use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::features::requests::handlers;
use crate::features::requests::services::RequestService;

/// Create routes for the requests feature
pub fn routes(service: Arc<RequestService>) -> Router {
    Router::new()
        .route(
            "/api/requests",
            get(handlers::list_requests).post(handlers::create_request),
        )
        .route("/api/requests/{id}", get(handlers::get_request))
        .route(
            "/api/requests/ref/{reference}",
            get(handlers::get_request_by_reference),
        )
        .route("/api/requests/{id}/accept", post(handlers::accept_request))
        .route("/api/requests/{id}/start", post(handlers::start_request))
        .route(
            "/api/requests/{id}/complete",
            post(handlers::complete_request),
        )
        .route("/api/requests/{id}/cancel", post(handlers::cancel_request))
        .route(
            "/api/requests/{id}/redispatch",
            post(handlers::redispatch_request),
        )
        .route(
            "/api/providers/{id}/offers",
            get(handlers::list_provider_offers),
        )
        .with_state(service)
}
