//! Market Context Cache
//!
//! Single-slot, time-to-live cache in front of the aggregator. Freshness is
//! checked lazily on read; there is no background refresh.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tokio::sync::{Mutex, RwLock};
use tokio::time::Instant;
use tracing::{debug, info, warn};

use coach_core::MarketSnapshot;

use crate::prompt::format_for_prompt;
use crate::MarketContextAggregator;

/// Cache TTL (5 minutes)
pub const CONTEXT_CACHE_TTL: Duration = Duration::from_secs(5 * 60);

/// Stored snapshot with metadata
#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub snapshot: Arc<MarketSnapshot>,
    pub stored_at: Instant,
}

impl CacheEntry {
    fn is_fresh(&self, ttl: Duration) -> bool {
        self.stored_at.elapsed() < ttl
    }
}

/// Snapshot cache shared by every consumer of market context
pub struct MarketContextCache {
    aggregator: MarketContextAggregator,
    ttl: Duration,
    /// Only ever locked briefly; never held across a fetch
    entry: RwLock<Option<CacheEntry>>,
    /// Held for the duration of a fetch so concurrent misses share one fetch
    refresh: Mutex<()>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl MarketContextCache {
    /// Create an empty cache; the first call to `get_context` fills it
    pub fn new(aggregator: MarketContextAggregator) -> Self {
        Self {
            aggregator,
            ttl: CONTEXT_CACHE_TTL,
            entry: RwLock::new(None),
            refresh: Mutex::new(()),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Get the current market snapshot
    ///
    /// Returns the stored snapshot while it is fresh. Otherwise fetches a new
    /// one and stores it, degraded or not, so a failing upstream is asked
    /// at most once per TTL window.
    pub async fn get_context(&self) -> Arc<MarketSnapshot> {
        if let Some(snapshot) = self.fresh_snapshot().await {
            return snapshot;
        }

        let _refresh = self.refresh.lock().await;

        // Another caller may have refreshed while we waited
        if let Some(snapshot) = self.fresh_snapshot().await {
            return snapshot;
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        debug!("[MarketContext] Cache miss, fetching market context");

        let snapshot = Arc::new(self.aggregator.fetch().await);
        if snapshot.is_degraded() {
            warn!(
                "[MarketContext] Storing degraded snapshot: {}",
                snapshot.fetch_error.as_deref().unwrap_or("no market data")
            );
        } else {
            info!(
                "[MarketContext] Refreshed context: {} equities, {} cryptocurrencies",
                snapshot.trending_equities.len(),
                snapshot.top_cryptocurrencies.len()
            );
        }

        *self.entry.write().await = Some(CacheEntry {
            snapshot: Arc::clone(&snapshot),
            stored_at: Instant::now(),
        });

        snapshot
    }

    async fn fresh_snapshot(&self) -> Option<Arc<MarketSnapshot>> {
        let entry = self.entry.read().await;
        let cached = entry.as_ref().filter(|cached| cached.is_fresh(self.ttl))?;

        self.hits.fetch_add(1, Ordering::Relaxed);
        debug!(
            "[MarketContext] Cache hit (age {:?})",
            cached.stored_at.elapsed()
        );
        Some(Arc::clone(&cached.snapshot))
    }

    /// Get the current market context rendered for an AI prompt
    pub async fn prompt_context(&self) -> String {
        let snapshot = self.get_context().await;
        format_for_prompt(&snapshot)
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn aggregator(&self) -> &MarketContextAggregator {
        &self.aggregator
    }

    /// Get cache statistics
    ///
    /// Reports the stored entry as-is while a refresh is in flight.
    pub async fn stats(&self) -> ContextCacheStats {
        let entry = self.entry.read().await;

        let (age_secs, fresh, degraded, generated_at) = match entry.as_ref() {
            Some(cached) => (
                Some(cached.stored_at.elapsed().as_secs()),
                cached.is_fresh(self.ttl),
                cached.snapshot.is_degraded(),
                Some(cached.snapshot.generated_at),
            ),
            None => (None, false, false, None),
        };

        ContextCacheStats {
            populated: entry.is_some(),
            fresh,
            degraded,
            age_secs,
            generated_at,
            ttl_secs: self.ttl.as_secs(),
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }
}

/// Cache statistics
#[derive(Debug, Clone, Serialize)]
pub struct ContextCacheStats {
    pub populated: bool,
    pub fresh: bool,
    pub degraded: bool,
    pub age_secs: Option<u64>,
    pub generated_at: Option<chrono::DateTime<chrono::Utc>>,
    pub ttl_secs: u64,
    pub hits: u64,
    pub misses: u64,
}
