//! Core types for the finance coach market context service
//!
//! This crate defines the shared data structures passed between the market
//! data sources, the context cache and the HTTP layer.

pub mod error;
pub mod format;
pub mod quote;
pub mod snapshot;

pub use error::{CoachError, CoachResult};
pub use format::{
    format_percent, format_price, format_signed_percent, DigitGrouping, QuoteCurrency,
};
pub use quote::{CryptoQuote, EquityQuote};
pub use snapshot::MarketSnapshot;
