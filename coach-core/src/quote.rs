//! Quote types carried inside a market snapshot
//!
//! Every field is a presentation value: changes and prices arrive already
//! formatted by the source that produced them and are never parsed back.

use serde::{Deserialize, Serialize};

/// A ranked equity entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquityQuote {
    /// Exchange-qualified identifier (e.g., "RELIANCE.NS")
    pub symbol: String,
    /// Human readable company name
    pub display_name: String,
    /// Signed change with two decimals, e.g. "+1.25%"
    pub percent_change: String,
}

impl EquityQuote {
    pub fn new(
        symbol: impl Into<String>,
        display_name: impl Into<String>,
        percent_change: impl Into<String>,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            display_name: display_name.into(),
            percent_change: percent_change.into(),
        }
    }
}

/// A ranked cryptocurrency entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CryptoQuote {
    /// Uppercase ticker (e.g., "BTC")
    pub symbol: String,
    /// Coin name
    pub display_name: String,
    /// Price with currency prefix and digit grouping, e.g. "₹50,00,000"
    pub price: String,
    /// 24h change with two decimals, e.g. "1.23%"
    pub percent_change_24h: String,
}

impl CryptoQuote {
    pub fn new(
        symbol: impl Into<String>,
        display_name: impl Into<String>,
        price: impl Into<String>,
        percent_change_24h: impl Into<String>,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            display_name: display_name.into(),
            price: price.into(),
            percent_change_24h: percent_change_24h.into(),
        }
    }
}
