//! Error types for the market data sources

use std::time::Duration;

use thiserror::Error;

/// Errors a market data source can report instead of quotes
#[derive(Debug, Error)]
pub enum MarketDataError {
    /// Request could not be sent or the connection failed
    #[error("Network error: {0}")]
    Network(String),

    /// No response within the allowed time
    #[error("Timed out after {0:?}")]
    Timeout(Duration),

    /// Upstream answered with a non-success status
    #[error("HTTP error: {status}")]
    Http {
        /// HTTP status code
        status: u16,
    },

    /// Response body did not have the expected shape
    #[error("Parse error: {0}")]
    Parse(String),

    /// Request succeeded but nothing usable came back
    #[error("No data: {0}")]
    NoData(String),

    /// Source task failed outside of its own error handling
    #[error("Internal error: {0}")]
    Internal(String),
}

impl MarketDataError {
    /// Classify a reqwest failure
    pub fn from_request(err: reqwest::Error, timeout: Duration) -> Self {
        if err.is_timeout() {
            MarketDataError::Timeout(timeout)
        } else if err.is_decode() {
            MarketDataError::Parse(err.to_string())
        } else {
            MarketDataError::Network(err.to_string())
        }
    }
}
