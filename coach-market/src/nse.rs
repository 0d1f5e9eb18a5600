//! Static trending table for the National Stock Exchange of India
//!
//! Default equities source when no live feed is configured.

use async_trait::async_trait;

use coach_core::EquityQuote;

use crate::{EquitySource, MarketDataError};

/// Fixed, pre-ranked NSE trending list
#[derive(Debug, Clone)]
pub struct NseTrendingTable {
    quotes: Vec<EquityQuote>,
}

impl NseTrendingTable {
    pub fn new() -> Self {
        Self {
            quotes: vec![
                EquityQuote::new("RELIANCE.NS", "Reliance Industries", "+2.5%"),
                EquityQuote::new("TCS.NS", "TCS", "+1.8%"),
                EquityQuote::new("HDFCBANK.NS", "HDFC Bank", "+1.2%"),
                EquityQuote::new("INFY.NS", "Infosys", "-0.5%"),
                EquityQuote::new("ICICIBANK.NS", "ICICI Bank", "+0.8%"),
            ],
        }
    }
}

impl Default for NseTrendingTable {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EquitySource for NseTrendingTable {
    fn name(&self) -> &str {
        "nse-static"
    }

    async fn fetch_equities(&self) -> Result<Vec<EquityQuote>, MarketDataError> {
        Ok(self.quotes.clone())
    }
}
