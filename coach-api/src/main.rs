//! Finance Coach Market Context API Server
//!
//! HTTP API server that serves cached market context (trending equities and
//! top cryptocurrencies) for the AI chat layer.

mod config;
mod routes;

use axum::{
    http::{header, Method},
    Router,
};
use coach_market::{
    CoinGeckoClient, CryptoSource, EquitySource, NseTrendingTable, YahooChartClient,
};
use coach_services::{MarketContextAggregator, MarketContextCache};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::{ApiConfig, EquitiesSource};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub context_cache: Arc<MarketContextCache>,
    /// Live quotes for the gainers, losers and single-symbol endpoints
    pub stock_quotes: Arc<YahooChartClient>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env.local file
    if let Err(e) = dotenvy::from_filename(".env.local") {
        // Not an error if the file doesn't exist
        if !matches!(e, dotenvy::Error::Io(_)) {
            eprintln!("Warning: Failed to load .env.local: {}", e);
        }
    }

    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,coach_api=debug")),
        )
        .init();

    info!("Starting Finance Coach Market Context API");

    let config = ApiConfig::from_env()?;

    let stock_quotes = Arc::new(YahooChartClient::new());
    let equities: Arc<dyn EquitySource> = match config.equities_source {
        EquitiesSource::Static => Arc::new(NseTrendingTable::new()),
        EquitiesSource::Yahoo => stock_quotes.clone(),
    };
    let crypto: Arc<dyn CryptoSource> = Arc::new(CoinGeckoClient::new(config.quote_currency));
    info!(
        "Equities source: {}, crypto source: {} ({})",
        equities.name(),
        crypto.name(),
        config.quote_currency
    );

    // One cache for the lifetime of the process
    let aggregator = MarketContextAggregator::new(equities, crypto);
    let state = AppState {
        context_cache: Arc::new(MarketContextCache::new(aggregator)),
        stock_quotes,
    };

    let app = build_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Build the application router
pub fn build_router(state: AppState) -> Router {
    // Configure CORS for frontend
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .nest("/api", routes::api_routes())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
