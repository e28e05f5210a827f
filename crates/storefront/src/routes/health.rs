//! Health check endpoints.

use axum::{extract::State, http::StatusCode};
use vibe_commerce_core::{PageRequest, ProductFilter};

use crate::state::AppState;

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
pub async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// Asks the commerce API for a single product. Returns 503 Service
/// Unavailable if it cannot be reached or answers with an error.
pub async fn readiness(State(state): State<AppState>) -> StatusCode {
    match state
        .commerce()
        .products()
        .list(&ProductFilter::default(), PageRequest::new(1, 1))
        .await
    {
        Ok(_) => StatusCode::OK,
        Err(e) => {
            tracing::warn!(error = %e, "Commerce API not ready");
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}
