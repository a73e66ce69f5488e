use std::sync::Arc;

use axum::{routing::post, Router};

use crate::core::config::DispatchConfig;
use crate::features::dispatch::handlers::{self, DispatchState};
use crate::features::dispatch::services::DispatchResolver;

/// Create routes for the dispatch feature
pub fn routes(resolver: Arc<DispatchResolver>, config: Arc<DispatchConfig>) -> Router {
    let state = DispatchState { resolver, config };

    Router::new()
        .route("/api/dispatch/preview", post(handlers::preview))
        .with_state(state)
}
