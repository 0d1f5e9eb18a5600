//! Yahoo Finance chart client for live NSE equity quotes
//!
//! Fetches the daily chart for each symbol on a watch-list and ranks the
//! results by percentage change, biggest gainers first.

use std::cmp::Ordering;
use std::time::Duration;

use async_trait::async_trait;
use futures::future::join_all;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info, warn};

use coach_core::{format_signed_percent, EquityQuote};

use crate::{EquitySource, MarketDataError};

const YAHOO_CHART_API_BASE: &str = "https://query1.finance.yahoo.com";

/// Yahoo rejects requests without a browser-like user agent
const BROWSER_USER_AGENT: &str = "Mozilla/5.0";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Most entries returned by the gainers and losers listings
pub const MOVERS_LIMIT: usize = 10;

/// Exchange suffix for National Stock Exchange of India listings
const NSE_SUFFIX: &str = ".NS";

/// Default NSE watch-list: (base symbol, company name)
pub const NSE_WATCHLIST: &[(&str, &str)] = &[
    ("RELIANCE", "Reliance Industries"),
    ("TCS", "Tata Consultancy Services"),
    ("INFY", "Infosys"),
    ("HDFCBANK", "HDFC Bank"),
    ("ICICIBANK", "ICICI Bank"),
    ("SBIN", "State Bank of India"),
    ("BHARTIARTL", "Bharti Airtel"),
    ("ITC", "ITC Limited"),
    ("KOTAKBANK", "Kotak Mahindra Bank"),
    ("LT", "Larsen & Toubro"),
];

/// Yahoo Finance chart API client
#[derive(Clone)]
pub struct YahooChartClient {
    http: Client,
    base_url: String,
    watchlist: Vec<(String, String)>,
    timeout: Duration,
}

#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: Chart,
}

#[derive(Debug, Deserialize)]
struct Chart {
    result: Option<Vec<ChartResult>>,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    meta: ChartMeta,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChartMeta {
    regular_market_price: f64,
    chart_previous_close: f64,
}

impl YahooChartClient {
    /// Create a client for the default NSE watch-list
    pub fn new() -> Self {
        Self::with_base_url(YAHOO_CHART_API_BASE)
    }

    /// Create a client against a different API host
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            http: build_http_client(REQUEST_TIMEOUT),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            watchlist: NSE_WATCHLIST
                .iter()
                .map(|(symbol, name)| (symbol.to_string(), name.to_string()))
                .collect(),
            timeout: REQUEST_TIMEOUT,
        }
    }

    /// Replace the request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.http = build_http_client(timeout);
        self.timeout = timeout;
        self
    }

    /// Replace the watch-list of (base symbol, company name) pairs
    pub fn with_watchlist(mut self, watchlist: Vec<(String, String)>) -> Self {
        self.watchlist = watchlist;
        self
    }

    /// Fetch a single NSE quote and its numeric change percentage
    pub async fn fetch_quote(
        &self,
        symbol: &str,
        display_name: &str,
    ) -> Result<(EquityQuote, f64), MarketDataError> {
        let exchange_symbol = format!("{}{}", symbol, NSE_SUFFIX);
        let url = format!("{}/v8/finance/chart/{}", self.base_url, exchange_symbol);
        debug!("[Yahoo] Fetching chart for {}", exchange_symbol);

        let response = self
            .http
            .get(&url)
            .query(&[("interval", "1d"), ("range", "1d")])
            .send()
            .await
            .map_err(|e| MarketDataError::from_request(e, self.timeout))?;

        if !response.status().is_success() {
            return Err(MarketDataError::Http {
                status: response.status().as_u16(),
            });
        }

        let chart: ChartResponse = response
            .json()
            .await
            .map_err(|e| MarketDataError::from_request(e, self.timeout))?;

        let meta = chart
            .chart
            .result
            .and_then(|results| results.into_iter().next())
            .map(|result| result.meta)
            .ok_or_else(|| {
                MarketDataError::NoData(format!("no chart result for {}", exchange_symbol))
            })?;

        let change_percent = change_percent(&meta)?;
        let quote = EquityQuote::new(
            exchange_symbol,
            display_name,
            format_signed_percent(change_percent),
        );

        Ok((quote, change_percent))
    }

    /// Fetch one symbol, named from the watch-list when it is listed there
    ///
    /// Accepts the base symbol or the exchange symbol, in any case.
    pub async fn fetch_symbol(&self, symbol: &str) -> Result<EquityQuote, MarketDataError> {
        let symbol = symbol.trim().to_uppercase();
        let base = symbol.strip_suffix(NSE_SUFFIX).unwrap_or(&symbol);
        if base.is_empty() {
            return Err(MarketDataError::NoData("empty symbol".to_string()));
        }

        let display_name = self
            .watchlist
            .iter()
            .find(|(listed, _)| listed.eq_ignore_ascii_case(base))
            .map(|(_, name)| name.as_str())
            .unwrap_or(base);

        let (quote, _) = self.fetch_quote(base, display_name).await?;
        Ok(quote)
    }

    /// Fetch every watch-list symbol and rank by change, biggest gainers first
    ///
    /// Symbols that fail are skipped. Fails only when no symbol succeeds.
    pub async fn fetch_trending(&self) -> Result<Vec<EquityQuote>, MarketDataError> {
        let ranked = self.fetch_ranked().await?;
        Ok(ranked.into_iter().map(|(quote, _)| quote).collect())
    }

    /// Rising watch-list symbols, biggest gain first, at most `MOVERS_LIMIT`
    pub async fn fetch_gainers(&self) -> Result<Vec<EquityQuote>, MarketDataError> {
        let ranked = self.fetch_ranked().await?;
        Ok(ranked
            .into_iter()
            .filter(|(_, change)| *change > 0.0)
            .take(MOVERS_LIMIT)
            .map(|(quote, _)| quote)
            .collect())
    }

    /// Falling watch-list symbols, biggest loss last, at most `MOVERS_LIMIT`
    pub async fn fetch_losers(&self) -> Result<Vec<EquityQuote>, MarketDataError> {
        let ranked = self.fetch_ranked().await?;
        let losers: Vec<EquityQuote> = ranked
            .into_iter()
            .filter(|(_, change)| *change < 0.0)
            .map(|(quote, _)| quote)
            .collect();

        let skip = losers.len().saturating_sub(MOVERS_LIMIT);
        Ok(losers.into_iter().skip(skip).collect())
    }

    async fn fetch_ranked(&self) -> Result<Vec<(EquityQuote, f64)>, MarketDataError> {
        let requests = self
            .watchlist
            .iter()
            .map(|(symbol, name)| self.fetch_quote(symbol, name));
        let results = join_all(requests).await;

        let mut quotes = Vec::with_capacity(results.len());
        for ((symbol, _), result) in self.watchlist.iter().zip(results) {
            match result {
                Ok(entry) => quotes.push(entry),
                Err(e) => warn!("[Yahoo] Failed to fetch {}: {}", symbol, e),
            }
        }

        if quotes.is_empty() {
            return Err(MarketDataError::NoData(
                "no watch-list symbol could be fetched".to_string(),
            ));
        }

        quotes.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
        info!(
            "[Yahoo] Fetched {}/{} watch-list quotes",
            quotes.len(),
            self.watchlist.len()
        );

        Ok(quotes)
    }
}

impl Default for YahooChartClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EquitySource for YahooChartClient {
    fn name(&self) -> &str {
        "yahoo"
    }

    async fn fetch_equities(&self) -> Result<Vec<EquityQuote>, MarketDataError> {
        self.fetch_trending().await
    }
}

fn build_http_client(timeout: Duration) -> Client {
    Client::builder()
        .timeout(timeout)
        .user_agent(BROWSER_USER_AGENT)
        .build()
        .expect("Failed to create HTTP client")
}

fn change_percent(meta: &ChartMeta) -> Result<f64, MarketDataError> {
    if meta.chart_previous_close == 0.0 || !meta.chart_previous_close.is_finite() {
        return Err(MarketDataError::Parse(
            "previous close is zero or not finite".to_string(),
        ));
    }

    let change = meta.regular_market_price - meta.chart_previous_close;
    Ok(change / meta.chart_previous_close * 100.0)
}
