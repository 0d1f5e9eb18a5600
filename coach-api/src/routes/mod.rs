//! API route definitions

mod health;
mod market;

use axum::Router;
use crate::AppState;

/// Create all API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(market::routes())
        .merge(health::routes())
}
