//! Market Context Aggregator
//!
//! Fetches trending equities and top cryptocurrencies from two independent
//! sources and assembles them into a single snapshot for AI prompts.
//! A failing source contributes an empty section; it never fails the snapshot.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinError;
use tracing::{debug, info, warn};

use coach_core::{CryptoQuote, EquityQuote, MarketSnapshot};
use coach_market::{CryptoSource, EquitySource, MarketDataError};

/// Entries kept per section
pub const MAX_CONTEXT_ITEMS: usize = 5;

/// Upper bound on a single source call, regardless of its own timeout
pub const SOURCE_TIMEOUT: Duration = Duration::from_secs(5);

/// Configuration for the MarketContextAggregator
#[derive(Clone, Debug)]
pub struct MarketContextConfig {
    pub max_items: usize,
    pub source_timeout: Duration,
}

impl Default for MarketContextConfig {
    fn default() -> Self {
        Self {
            max_items: MAX_CONTEXT_ITEMS,
            source_timeout: SOURCE_TIMEOUT,
        }
    }
}

/// Combines an equities source and a crypto source into snapshots
#[derive(Clone)]
pub struct MarketContextAggregator {
    equities: Arc<dyn EquitySource>,
    crypto: Arc<dyn CryptoSource>,
    config: MarketContextConfig,
}

impl MarketContextAggregator {
    /// Create a new MarketContextAggregator with default limits
    pub fn new(equities: Arc<dyn EquitySource>, crypto: Arc<dyn CryptoSource>) -> Self {
        Self::with_config(equities, crypto, MarketContextConfig::default())
    }

    pub fn with_config(
        equities: Arc<dyn EquitySource>,
        crypto: Arc<dyn CryptoSource>,
        config: MarketContextConfig,
    ) -> Self {
        info!(
            "[MarketContext] Aggregating equities from '{}' and crypto from '{}'",
            equities.name(),
            crypto.name()
        );
        Self {
            equities,
            crypto,
            config,
        }
    }

    pub fn equities(&self) -> &Arc<dyn EquitySource> {
        &self.equities
    }

    pub fn crypto(&self) -> &Arc<dyn CryptoSource> {
        &self.crypto
    }

    pub fn config(&self) -> &MarketContextConfig {
        &self.config
    }

    /// Fetch both sources concurrently and assemble a snapshot
    ///
    /// Each source runs in its own task so a panic or hang in one cannot
    /// take the other down.
    pub async fn fetch(&self) -> MarketSnapshot {
        let timeout = self.config.source_timeout;

        let equities = Arc::clone(&self.equities);
        let equities_task =
            tokio::spawn(async move { bounded(timeout, equities.fetch_equities()).await });

        let crypto = Arc::clone(&self.crypto);
        let crypto_task =
            tokio::spawn(async move { bounded(timeout, crypto.fetch_cryptocurrencies()).await });

        let (equities_result, crypto_result) = tokio::join!(equities_task, crypto_task);

        let snapshot = assemble(
            SourceReport::new(self.equities.name(), joined(equities_result)),
            SourceReport::new(self.crypto.name(), joined(crypto_result)),
            self.config.max_items,
        );

        debug!(
            "[MarketContext] Assembled snapshot: {} equities, {} cryptocurrencies",
            snapshot.trending_equities.len(),
            snapshot.top_cryptocurrencies.len()
        );

        snapshot
    }
}

/// Outcome of one source call, tagged with the source name
struct SourceReport<'a, T> {
    name: &'a str,
    outcome: Result<Vec<T>, MarketDataError>,
}

impl<'a, T> SourceReport<'a, T> {
    fn new(name: &'a str, outcome: Result<Vec<T>, MarketDataError>) -> Self {
        Self { name, outcome }
    }

    /// Keep the first `max_items` quotes, or log the failure and keep nothing
    fn into_quotes(self, max_items: usize) -> (Vec<T>, Option<String>) {
        match self.outcome {
            Ok(mut quotes) => {
                quotes.truncate(max_items);
                (quotes, None)
            }
            Err(e) => {
                warn!("[MarketContext] Source '{}' failed: {}", self.name, e);
                (Vec::new(), Some(format!("{}: {}", self.name, e)))
            }
        }
    }
}

fn assemble(
    equities: SourceReport<'_, EquityQuote>,
    crypto: SourceReport<'_, CryptoQuote>,
    max_items: usize,
) -> MarketSnapshot {
    let (trending_equities, equities_error) = equities.into_quotes(max_items);
    let (top_cryptocurrencies, crypto_error) = crypto.into_quotes(max_items);

    let mut snapshot = MarketSnapshot::new(trending_equities, top_cryptocurrencies);
    if let (Some(equities_error), Some(crypto_error)) = (equities_error, crypto_error) {
        snapshot.fetch_error = Some(format!("{}; {}", equities_error, crypto_error));
    }

    snapshot
}

async fn bounded<T>(
    timeout: Duration,
    fetch: impl Future<Output = Result<Vec<T>, MarketDataError>>,
) -> Result<Vec<T>, MarketDataError> {
    tokio::time::timeout(timeout, fetch)
        .await
        .unwrap_or(Err(MarketDataError::Timeout(timeout)))
}

fn joined<T>(
    result: Result<Result<Vec<T>, MarketDataError>, JoinError>,
) -> Result<Vec<T>, MarketDataError> {
    result.unwrap_or_else(|e| Err(MarketDataError::Internal(format!("source task failed: {}", e))))
}
