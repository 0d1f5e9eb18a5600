//! CoinGecko API client for top cryptocurrencies by market capitalization
//!
//! Uses the public markets endpoint. Free API, no authentication required.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::{debug, info};

use coach_core::{format_percent, format_price, CryptoQuote, QuoteCurrency};

use crate::{CryptoSource, MarketDataError};

const COINGECKO_API_BASE: &str = "https://api.coingecko.com/api/v3";

/// Upstream request budget
const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Coins requested per call
const PAGE_SIZE: usize = 5;

/// CoinGecko API client
#[derive(Clone)]
pub struct CoinGeckoClient {
    http: Client,
    base_url: String,
    currency: QuoteCurrency,
    timeout: Duration,
}

/// Coin entry from /coins/markets
#[derive(Debug, Deserialize)]
struct CoinMarket {
    symbol: String,
    name: String,
    current_price: Decimal,
    price_change_percentage_24h: Option<Decimal>,
}

impl CoinGeckoClient {
    /// Create a new CoinGecko client quoting prices in `currency`
    pub fn new(currency: QuoteCurrency) -> Self {
        Self::with_base_url(COINGECKO_API_BASE, currency)
    }

    /// Create a client against a different API host
    pub fn with_base_url(base_url: impl Into<String>, currency: QuoteCurrency) -> Self {
        Self {
            http: build_http_client(REQUEST_TIMEOUT),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            currency,
            timeout: REQUEST_TIMEOUT,
        }
    }

    /// Replace the request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.http = build_http_client(timeout);
        self.timeout = timeout;
        self
    }

    /// Fetch the top coins by market capitalization
    pub async fn fetch_top_coins(&self) -> Result<Vec<CryptoQuote>, MarketDataError> {
        let url = format!("{}/coins/markets", self.base_url);
        debug!("[CoinGecko] Fetching top coins from: {}", url);

        let page_size = PAGE_SIZE.to_string();
        let response = self
            .http
            .get(&url)
            .query(&[
                ("vs_currency", self.currency.code()),
                ("order", "market_cap_desc"),
                ("per_page", page_size.as_str()),
                ("page", "1"),
                ("sparkline", "false"),
            ])
            .send()
            .await
            .map_err(|e| MarketDataError::from_request(e, self.timeout))?;

        if !response.status().is_success() {
            return Err(MarketDataError::Http {
                status: response.status().as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| MarketDataError::from_request(e, self.timeout))?;
        let coins = parse_markets(&body)?;

        info!("[CoinGecko] Fetched {} coins", coins.len());

        Ok(coins
            .into_iter()
            .map(|coin| coin_to_quote(coin, self.currency))
            .collect())
    }
}

impl Default for CoinGeckoClient {
    fn default() -> Self {
        Self::new(QuoteCurrency::default())
    }
}

#[async_trait]
impl CryptoSource for CoinGeckoClient {
    fn name(&self) -> &str {
        "coingecko"
    }

    async fn fetch_cryptocurrencies(&self) -> Result<Vec<CryptoQuote>, MarketDataError> {
        self.fetch_top_coins().await
    }
}

fn build_http_client(timeout: Duration) -> Client {
    Client::builder()
        .timeout(timeout)
        .user_agent("FinanceCoach/1.0")
        .build()
        .expect("Failed to create HTTP client")
}

fn parse_markets(body: &str) -> Result<Vec<CoinMarket>, MarketDataError> {
    serde_json::from_str(body).map_err(|e| MarketDataError::Parse(e.to_string()))
}

/// Convert a market entry to a display quote
fn coin_to_quote(coin: CoinMarket, currency: QuoteCurrency) -> CryptoQuote {
    CryptoQuote {
        symbol: coin.symbol.to_uppercase(),
        display_name: coin.name,
        price: format_price(coin.current_price, currency),
        percent_change_24h: format_percent(coin.price_change_percentage_24h.unwrap_or_default()),
    }
}
