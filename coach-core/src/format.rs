//! Presentation formatting for prices and percentage changes
//!
//! Quotes carry display strings rather than numbers, so every source formats
//! through these helpers to keep the prompt text consistent.

use std::fmt;
use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::CoachError;

/// Maximum fraction digits shown for prices
const PRICE_FRACTION_DIGITS: u32 = 3;

/// Fraction digits shown for percentage changes
const PERCENT_FRACTION_DIGITS: u32 = 2;

/// How integer digits are grouped when rendering a price
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DigitGrouping {
    /// 1,234,567
    Thousands,
    /// 12,34,567 (lakh/crore)
    Indian,
}

/// Currency that crypto prices are quoted in
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuoteCurrency {
    #[default]
    Inr,
    Usd,
}

impl QuoteCurrency {
    /// Currency code as the market data APIs expect it
    pub fn code(&self) -> &'static str {
        match self {
            QuoteCurrency::Inr => "inr",
            QuoteCurrency::Usd => "usd",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            QuoteCurrency::Inr => "₹",
            QuoteCurrency::Usd => "$",
        }
    }

    pub fn grouping(&self) -> DigitGrouping {
        match self {
            QuoteCurrency::Inr => DigitGrouping::Indian,
            QuoteCurrency::Usd => DigitGrouping::Thousands,
        }
    }
}

impl fmt::Display for QuoteCurrency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for QuoteCurrency {
    type Err = CoachError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "inr" => Ok(QuoteCurrency::Inr),
            "usd" => Ok(QuoteCurrency::Usd),
            other => Err(CoachError::config(format!(
                "Unsupported quote currency: {}",
                other
            ))),
        }
    }
}

/// Render a price with currency prefix, digit grouping and at most three
/// fraction digits (trailing zeros dropped)
pub fn format_price(value: Decimal, currency: QuoteCurrency) -> String {
    let rounded = value
        .round_dp_with_strategy(PRICE_FRACTION_DIGITS, RoundingStrategy::MidpointAwayFromZero)
        .normalize();
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };

    let digits = rounded.abs().to_string();
    let (integer, fraction) = match digits.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (digits.as_str(), None),
    };

    let grouped = group_integer(integer, currency.grouping());
    match fraction {
        Some(fraction) => format!("{}{}{}.{}", currency.symbol(), sign, grouped, fraction),
        None => format!("{}{}{}", currency.symbol(), sign, grouped),
    }
}

/// Render a change as "1.23%" / "-0.50%" (sign only when negative)
pub fn format_percent(value: Decimal) -> String {
    let rounded = value.round_dp_with_strategy(
        PERCENT_FRACTION_DIGITS,
        RoundingStrategy::MidpointAwayFromZero,
    );
    format!("{:.2}%", rounded)
}

/// Render a change with an explicit sign, e.g. "+2.50%" / "-0.50%"
pub fn format_signed_percent(value: f64) -> String {
    format!("{:+.2}%", value)
}

fn group_integer(digits: &str, grouping: DigitGrouping) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let step = match grouping {
        DigitGrouping::Thousands => 3,
        DigitGrouping::Indian => 2,
    };

    let mut groups = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(step);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();

    format!("{},{}", groups.join(","), tail)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_indian_grouping() {
        assert_eq!(format_price(dec!(5000000), QuoteCurrency::Inr), "₹50,00,000");
        assert_eq!(format_price(dec!(123456789), QuoteCurrency::Inr), "₹12,34,56,789");
        assert_eq!(format_price(dec!(999), QuoteCurrency::Inr), "₹999");
        assert_eq!(format_price(dec!(1000), QuoteCurrency::Inr), "₹1,000");
    }

    #[test]
    fn test_thousands_grouping() {
        assert_eq!(format_price(dec!(5000000), QuoteCurrency::Usd), "$5,000,000");
        assert_eq!(format_price(dec!(1234.5), QuoteCurrency::Usd), "$1,234.5");
    }

    #[test]
    fn test_price_fraction_digits() {
        assert_eq!(format_price(dec!(0.123456), QuoteCurrency::Inr), "₹0.123");
        assert_eq!(format_price(dec!(87.1000), QuoteCurrency::Inr), "₹87.1");
        assert_eq!(format_price(dec!(2.0005), QuoteCurrency::Usd), "$2.001");
    }

    #[test]
    fn test_percent_formatting() {
        assert_eq!(format_percent(dec!(1.2345)), "1.23%");
        assert_eq!(format_percent(dec!(-0.5)), "-0.50%");
        assert_eq!(format_percent(dec!(3)), "3.00%");
        assert_eq!(format_percent(dec!(2.345)), "2.35%");
    }

    #[test]
    fn test_signed_percent_formatting() {
        assert_eq!(format_signed_percent(2.5), "+2.50%");
        assert_eq!(format_signed_percent(-0.5), "-0.50%");
    }

    #[test]
    fn test_quote_currency_parsing() {
        assert_eq!("INR".parse::<QuoteCurrency>().unwrap(), QuoteCurrency::Inr);
        assert_eq!(" usd ".parse::<QuoteCurrency>().unwrap(), QuoteCurrency::Usd);
        assert!("eur".parse::<QuoteCurrency>().is_err());
        assert_eq!(QuoteCurrency::default().code(), "inr");
    }
}
