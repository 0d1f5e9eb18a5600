//! Server configuration loaded from environment variables

use std::str::FromStr;

use coach_core::{CoachError, CoachResult, QuoteCurrency};

const DEFAULT_PORT: u16 = 3001;

/// Where trending equities come from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EquitiesSource {
    /// Fixed NSE trending table
    #[default]
    Static,
    /// Live Yahoo Finance chart quotes
    Yahoo,
}

impl FromStr for EquitiesSource {
    type Err = CoachError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "static" => Ok(EquitiesSource::Static),
            "yahoo" => Ok(EquitiesSource::Yahoo),
            other => Err(CoachError::config(format!(
                "Unknown EQUITIES_SOURCE '{}' (expected 'static' or 'yahoo')",
                other
            ))),
        }
    }
}

/// API server configuration
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub port: u16,
    pub equities_source: EquitiesSource,
    pub quote_currency: QuoteCurrency,
}

impl ApiConfig {
    /// Load configuration from process environment variables
    ///
    /// - `SERVER_PORT` (default 3001)
    /// - `EQUITIES_SOURCE`: `static` (default) or `yahoo`
    /// - `CRYPTO_QUOTE_CURRENCY`: `inr` (default) or `usd`
    pub fn from_env() -> CoachResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> CoachResult<Self> {
        let port = match lookup("SERVER_PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| CoachError::config(format!("Invalid SERVER_PORT '{}'", raw)))?,
            None => DEFAULT_PORT,
        };

        let equities_source = lookup("EQUITIES_SOURCE")
            .map(|raw| raw.parse::<EquitiesSource>())
            .transpose()?
            .unwrap_or_default();

        let quote_currency = lookup("CRYPTO_QUOTE_CURRENCY")
            .map(|raw| raw.parse::<QuoteCurrency>())
            .transpose()?
            .unwrap_or_default();

        Ok(Self {
            port,
            equities_source,
            quote_currency,
        })
    }
}
