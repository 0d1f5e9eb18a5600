//! Scripted market data sources shared by the service tests

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use coach_core::{CryptoQuote, EquityQuote};
use coach_market::{CryptoSource, EquitySource, MarketDataError};

/// How a scripted source answers
#[derive(Debug, Clone, Copy)]
pub(crate) enum Behaviour {
    Succeed,
    Fail,
    /// Succeed after sleeping for the given duration
    Delay(Duration),
    Panic,
}

pub(crate) struct ScriptedEquities {
    quotes: Vec<EquityQuote>,
    behaviour: Behaviour,
    calls: AtomicUsize,
}

impl ScriptedEquities {
    pub(crate) fn new(quotes: Vec<EquityQuote>, behaviour: Behaviour) -> Self {
        Self {
            quotes,
            behaviour,
            calls: AtomicUsize::new(0),
        }
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl EquitySource for ScriptedEquities {
    fn name(&self) -> &str {
        "scripted-equities"
    }

    async fn fetch_equities(&self) -> Result<Vec<EquityQuote>, MarketDataError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        respond(self.behaviour, &self.quotes).await
    }
}

pub(crate) struct ScriptedCrypto {
    quotes: Vec<CryptoQuote>,
    behaviour: Behaviour,
    calls: AtomicUsize,
}

impl ScriptedCrypto {
    pub(crate) fn new(quotes: Vec<CryptoQuote>, behaviour: Behaviour) -> Self {
        Self {
            quotes,
            behaviour,
            calls: AtomicUsize::new(0),
        }
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CryptoSource for ScriptedCrypto {
    fn name(&self) -> &str {
        "scripted-crypto"
    }

    async fn fetch_cryptocurrencies(&self) -> Result<Vec<CryptoQuote>, MarketDataError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        respond(self.behaviour, &self.quotes).await
    }
}

async fn respond<T: Clone>(behaviour: Behaviour, quotes: &[T]) -> Result<Vec<T>, MarketDataError> {
    match behaviour {
        Behaviour::Succeed => Ok(quotes.to_vec()),
        Behaviour::Fail => Err(MarketDataError::Http { status: 503 }),
        Behaviour::Delay(delay) => {
            tokio::time::sleep(delay).await;
            Ok(quotes.to_vec())
        }
        Behaviour::Panic => panic!("scripted source panic"),
    }
}

pub(crate) fn equities(count: usize) -> Vec<EquityQuote> {
    (0..count)
        .map(|i| EquityQuote::new(format!("EQ{}.NS", i), format!("Equity {}", i), "+1.00%"))
        .collect()
}

pub(crate) fn cryptos(count: usize) -> Vec<CryptoQuote> {
    (0..count)
        .map(|i| CryptoQuote::new(format!("C{}", i), format!("Coin {}", i), "₹1,000", "0.50%"))
        .collect()
}
