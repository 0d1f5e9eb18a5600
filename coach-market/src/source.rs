//! Source traits implemented by every market data adapter
//!
//! A source returns its quotes in rank order, or an error describing why it
//! could not. Callers decide how to degrade; sources never retry.

use async_trait::async_trait;
use coach_core::{CryptoQuote, EquityQuote};

use crate::MarketDataError;

/// Ranked list of trending equities for a single market
#[async_trait]
pub trait EquitySource: Send + Sync {
    /// Short name used in logs and error messages
    fn name(&self) -> &str;

    /// Fetch equities, most relevant first
    async fn fetch_equities(&self) -> Result<Vec<EquityQuote>, MarketDataError>;
}

/// Ranked list of cryptocurrencies
#[async_trait]
pub trait CryptoSource: Send + Sync {
    /// Short name used in logs and error messages
    fn name(&self) -> &str;

    /// Fetch cryptocurrencies, most relevant first
    async fn fetch_cryptocurrencies(&self) -> Result<Vec<CryptoQuote>, MarketDataError>;
}
