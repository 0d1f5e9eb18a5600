//! Market data sources for the finance coach
//!
//! This crate provides clients for fetching market context from:
//! - CoinGecko: top cryptocurrencies by market capitalization
//! - Yahoo Finance: live NSE equity quotes for a watch-list
//! - A static NSE trending table (default equities source)

pub mod coingecko;
pub mod error;
pub mod nse;
pub mod source;
pub mod yahoo;

pub use coingecko::CoinGeckoClient;
pub use error::MarketDataError;
pub use nse::NseTrendingTable;
pub use source::{CryptoSource, EquitySource};
pub use yahoo::{YahooChartClient, MOVERS_LIMIT, NSE_WATCHLIST};
