//! Point-in-time aggregation of market data used as AI prompt context

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{CryptoQuote, EquityQuote};

/// Immutable snapshot of trending equities and top cryptocurrencies
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketSnapshot {
    /// Trending equities in source-given rank order
    pub trending_equities: Vec<EquityQuote>,
    /// Top cryptocurrencies in source-given rank order
    pub top_cryptocurrencies: Vec<CryptoQuote>,
    /// When the snapshot was assembled
    pub generated_at: DateTime<Utc>,
    /// Set only when no source could be reached
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fetch_error: Option<String>,
}

impl MarketSnapshot {
    /// Create a snapshot stamped with the current time
    pub fn new(
        trending_equities: Vec<EquityQuote>,
        top_cryptocurrencies: Vec<CryptoQuote>,
    ) -> Self {
        Self {
            trending_equities,
            top_cryptocurrencies,
            generated_at: Utc::now(),
            fetch_error: None,
        }
    }

    /// Create an empty snapshot carrying the reason it is empty
    pub fn degraded(fetch_error: impl Into<String>) -> Self {
        Self {
            trending_equities: Vec::new(),
            top_cryptocurrencies: Vec::new(),
            generated_at: Utc::now(),
            fetch_error: Some(fetch_error.into()),
        }
    }

    /// True when neither section has any entries
    pub fn is_empty(&self) -> bool {
        self.trending_equities.is_empty() && self.top_cryptocurrencies.is_empty()
    }

    /// True when there is no usable market data to present
    pub fn is_degraded(&self) -> bool {
        self.fetch_error.is_some() || self.is_empty()
    }
}
