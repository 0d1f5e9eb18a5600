//! Health check endpoints

use axum::{extract::State, response::Json, routing::get, Router};
use serde::Serialize;

use crate::AppState;

/// Health check response
#[derive(Debug, Serialize)]
struct HealthResponse {
    status: String,
    market_context: coach_services::ContextCacheStats,
}

/// Health check handler
///
/// Degraded market data is reported but never turns the response into an
/// error status: the chat layer keeps working without it.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let stats = state.context_cache.stats().await;

    let status = if stats.populated && stats.degraded {
        "degraded"
    } else {
        "healthy"
    };

    Json(HealthResponse {
        status: status.to_string(),
        market_context: stats,
    })
}

/// Simple liveness check (always returns OK if server is running)
async fn liveness() -> &'static str {
    "OK"
}

/// Create health routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_check))
        .route("/health/live", get(liveness))
}
