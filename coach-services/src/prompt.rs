//! Renders a market snapshot as plain text for an AI prompt

use coach_core::MarketSnapshot;

/// Returned instead of an empty block when there is no usable market data
pub const DEGRADED_NOTICE: &str = "Market data temporarily unavailable.";

/// Format a snapshot for insertion into an LLM prompt
///
/// Never returns an empty string. Sections without entries are left out.
pub fn format_for_prompt(snapshot: &MarketSnapshot) -> String {
    if snapshot.is_degraded() {
        return DEGRADED_NOTICE.to_string();
    }

    let mut prompt = String::from("CURRENT MARKET DATA:\n\n");

    if !snapshot.trending_equities.is_empty() {
        prompt.push_str("Trending Stocks (NSE):\n");
        for equity in &snapshot.trending_equities {
            prompt.push_str(&format!(
                "- {} ({}): {}\n",
                equity.display_name, equity.symbol, equity.percent_change
            ));
        }
        prompt.push('\n');
    }

    if !snapshot.top_cryptocurrencies.is_empty() {
        prompt.push_str("Top Cryptocurrencies:\n");
        for crypto in &snapshot.top_cryptocurrencies {
            prompt.push_str(&format!(
                "- {} ({}): {} ({})\n",
                crypto.display_name, crypto.symbol, crypto.price, crypto.percent_change_24h
            ));
        }
    }

    prompt
}
