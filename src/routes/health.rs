// src/routes/health.rs
//! Health check endpoint for the crop advisor service.
//!
//! Used by container orchestrators and uptime checks to verify that the
//! service is running and able to respond to HTTP requests. Follows the
//! Explicit Module Boundary Pattern (EMBP):
//! - Internal to this file: endpoint handler(s) and related types
//! - Exports to the gateway (`mod.rs`): a subrouter containing the health routes

use axum::{routing::get, Json, Router};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// JSON response body for the health endpoints.
#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    service: &'static str,
    timestamp: DateTime<Utc>,
}

/// Handle `GET /health` and `GET /`.
///
/// Does not touch the classifier; startup fails without a loaded model.
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: "Crop Advisor API",
        timestamp: Utc::now(),
    })
}

/// Create a subrouter containing the health routes.
///
/// Generic over the application state so it merges cleanly with the
/// gateway router regardless of the state type.
pub fn router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new()
        .route("/", get(health))
        .route("/health", get(health))
}
