//! Market context services for the finance coach
//!
//! This crate aggregates market data sources into snapshots, caches them
//! behind a time-to-live slot and renders them for AI prompts.

pub mod context_cache;
pub mod market_context;
pub mod prompt;

#[cfg(test)]
mod testing;

pub use context_cache::{CacheEntry, ContextCacheStats, MarketContextCache, CONTEXT_CACHE_TTL};
pub use market_context::{
    MarketContextAggregator, MarketContextConfig, MAX_CONTEXT_ITEMS, SOURCE_TIMEOUT,
};
pub use prompt::{format_for_prompt, DEGRADED_NOTICE};
