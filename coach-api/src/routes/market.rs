//! Market context endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use tracing::error;

use coach_market::MarketDataError;

use crate::AppState;

/// Create market routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/market/context", get(get_market_context))
        .route("/market/context/prompt", get(get_prompt_context))
        .route("/market/trending/stocks", get(get_trending_stocks))
        .route("/market/crypto/top", get(get_top_cryptos))
        .route("/market/stocks/gainers", get(get_top_gainers))
        .route("/market/stocks/losers", get(get_top_losers))
        .route("/market/quote/{symbol}", get(get_stock_quote))
}

/// GET /api/market/context - Cached market snapshot
async fn get_market_context(State(state): State<AppState>) -> impl IntoResponse {
    let snapshot = state.context_cache.get_context().await;
    Json(snapshot.as_ref().clone())
}

/// GET /api/market/context/prompt - Cached market snapshot rendered for an AI prompt
async fn get_prompt_context(State(state): State<AppState>) -> String {
    state.context_cache.prompt_context().await
}

/// GET /api/market/trending/stocks - Uncached equities straight from the source
async fn get_trending_stocks(State(state): State<AppState>) -> Response {
    let source = state.context_cache.aggregator().equities();
    list_response(source.name(), source.fetch_equities().await)
}

/// GET /api/market/crypto/top - Uncached cryptocurrencies straight from the source
async fn get_top_cryptos(State(state): State<AppState>) -> Response {
    let source = state.context_cache.aggregator().crypto();
    list_response(source.name(), source.fetch_cryptocurrencies().await)
}

/// GET /api/market/stocks/gainers - Rising watch-list stocks, biggest gain first
async fn get_top_gainers(State(state): State<AppState>) -> Response {
    list_response("yahoo", state.stock_quotes.fetch_gainers().await)
}

/// GET /api/market/stocks/losers - Falling watch-list stocks, biggest loss last
async fn get_top_losers(State(state): State<AppState>) -> Response {
    list_response("yahoo", state.stock_quotes.fetch_losers().await)
}

/// GET /api/market/quote/:symbol - Live quote for one NSE symbol
async fn get_stock_quote(
    State(state): State<AppState>,
    Path(symbol): Path<String>,
) -> Response {
    match state.stock_quotes.fetch_symbol(&symbol).await {
        Ok(quote) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "success": true,
                "data": quote,
            })),
        )
            .into_response(),
        Err(MarketDataError::NoData(_)) | Err(MarketDataError::Http { status: 404 }) => (
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({
                "success": false,
                "message": "Stock not found",
            })),
        )
            .into_response(),
        Err(e) => {
            error!("Failed to fetch quote for {}: {}", symbol, e);
            (
                StatusCode::BAD_GATEWAY,
                Json(serde_json::json!({
                    "success": false,
                    "message": e.to_string(),
                })),
            )
                .into_response()
        }
    }
}

fn list_response<T: Serialize>(source: &str, result: Result<Vec<T>, MarketDataError>) -> Response {
    match result {
        Ok(data) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "success": true,
                "count": data.len(),
                "data": data,
            })),
        )
            .into_response(),
        Err(e) => {
            error!("Failed to fetch from {}: {}", source, e);
            (
                StatusCode::BAD_GATEWAY,
                Json(serde_json::json!({
                    "success": false,
                    "message": e.to_string(),
                })),
            )
                .into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use axum::{
        body::{to_bytes, Body},
        http::Request,
    };
    use tower::ServiceExt;

    use coach_core::CryptoQuote;
    use coach_market::{CryptoSource, NseTrendingTable, YahooChartClient};
    use coach_services::{MarketContextAggregator, MarketContextCache};

    use super::*;

    struct UnreachableCrypto;

    #[async_trait]
    impl CryptoSource for UnreachableCrypto {
        fn name(&self) -> &str {
            "unreachable"
        }

        async fn fetch_cryptocurrencies(&self) -> Result<Vec<CryptoQuote>, MarketDataError> {
            Err(MarketDataError::Network("connection refused".to_string()))
        }
    }

    fn app() -> Router {
        app_with_quotes("http://127.0.0.1:9")
    }

    fn app_with_quotes(quotes_url: &str) -> Router {
        let aggregator = MarketContextAggregator::new(
            Arc::new(NseTrendingTable::new()),
            Arc::new(UnreachableCrypto),
        );
        let watchlist = vec![
            ("TCS".to_string(), "Tata Consultancy Services".to_string()),
            ("INFY".to_string(), "Infosys".to_string()),
            ("SBIN".to_string(), "State Bank of India".to_string()),
        ];
        let state = AppState {
            context_cache: Arc::new(MarketContextCache::new(aggregator)),
            stock_quotes: Arc::new(
                YahooChartClient::with_base_url(quotes_url).with_watchlist(watchlist),
            ),
        };
        crate::build_router(state)
    }

    /// Chart API stand-in: TCS up 1%, INFY down 0.5%, SBIN down 3%
    async fn spawn_chart_upstream() -> String {
        let app = Router::new().route(
            "/v8/finance/chart/{symbol}",
            get(|Path(symbol): Path<String>| async move {
                let price = match symbol.as_str() {
                    "TCS.NS" => 101.0,
                    "INFY.NS" => 99.5,
                    "SBIN.NS" => 97.0,
                    _ => return StatusCode::NOT_FOUND.into_response(),
                };
                Json(serde_json::json!({
                    "chart": {
                        "result": [{
                            "meta": {"regularMarketPrice": price, "chartPreviousClose": 100.0}
                        }]
                    }
                }))
                .into_response()
            }),
        );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    async fn send_get(app: Router, uri: &str) -> (StatusCode, String) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(body.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_prompt_context_omits_failed_section() {
        let (status, body) = send_get(app(), "/api/market/context/prompt").await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.starts_with("CURRENT MARKET DATA:\n\nTrending Stocks (NSE):\n"));
        assert!(body.contains("- Reliance Industries (RELIANCE.NS): +2.5%\n"));
        assert!(!body.contains("Top Cryptocurrencies"));
    }

    #[tokio::test]
    async fn test_market_context_json() {
        let (status, body) = send_get(app(), "/api/market/context").await;

        assert_eq!(status, StatusCode::OK);
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["trending_equities"].as_array().unwrap().len(), 5);
        assert_eq!(json["top_cryptocurrencies"].as_array().unwrap().len(), 0);
        assert!(json.get("fetch_error").is_none());
    }

    #[tokio::test]
    async fn test_source_failure_maps_to_bad_gateway() {
        let (status, body) = send_get(app(), "/api/market/crypto/top").await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["success"], false);
    }

    #[tokio::test]
    async fn test_trending_stocks_listing() {
        let (status, body) = send_get(app(), "/api/market/trending/stocks").await;

        assert_eq!(status, StatusCode::OK);
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["count"], 5);
        assert_eq!(json["data"][0]["symbol"], "RELIANCE.NS");
    }

    #[tokio::test]
    async fn test_health_reports_cache_state() {
        let (status, body) = send_get(app(), "/api/health").await;

        assert_eq!(status, StatusCode::OK);
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["status"], "healthy");
        assert_eq!(json["market_context"]["populated"], false);
    }

    #[tokio::test]
    async fn test_gainers_and_losers_listing() {
        let upstream = spawn_chart_upstream().await;

        let uri = "/api/market/stocks/gainers";
        let (status, body) = send_get(app_with_quotes(&upstream), uri).await;
        assert_eq!(status, StatusCode::OK);
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["count"], 1);
        assert_eq!(json["data"][0]["symbol"], "TCS.NS");

        let uri = "/api/market/stocks/losers";
        let (status, body) = send_get(app_with_quotes(&upstream), uri).await;
        assert_eq!(status, StatusCode::OK);
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["count"], 2);
        assert_eq!(json["data"][0]["symbol"], "INFY.NS");
        assert_eq!(json["data"][1]["percent_change"], "-3.00%");
    }

    #[tokio::test]
    async fn test_stock_quote_found_and_missing() {
        let upstream = spawn_chart_upstream().await;

        let (status, body) = send_get(app_with_quotes(&upstream), "/api/market/quote/tcs").await;
        assert_eq!(status, StatusCode::OK);
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["data"]["symbol"], "TCS.NS");
        assert_eq!(json["data"]["display_name"], "Tata Consultancy Services");
        assert_eq!(json["data"]["percent_change"], "+1.00%");

        let (status, body) = send_get(app_with_quotes(&upstream), "/api/market/quote/NOPE").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["message"], "Stock not found");
    }

    #[tokio::test]
    async fn test_stock_quote_upstream_down_maps_to_bad_gateway() {
        let (status, _) = send_get(app(), "/api/market/quote/TCS").await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
    }
}
