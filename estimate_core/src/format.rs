//! # Currency Formatting
//!
//! Whole-unit currency strings for reports. Rupee amounts use Indian digit
//! grouping (last three digits, then pairs), dollar amounts use groups of
//! three.
//!
//! ```rust
//! use estimate_core::format::{format_currency, Currency};
//!
//! assert_eq!(format_currency(1234567.0, Currency::Inr), "₹12,34,567");
//! assert_eq!(format_currency(1234567.0, Currency::Usd), "$1,234,567");
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// Display currency
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Currency {
    #[default]
    Inr,
    Usd,
}

impl Currency {
    pub const ALL: [Currency; 2] = [Currency::Inr, Currency::Usd];

    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::Inr => "₹",
            Currency::Usd => "$",
        }
    }

    /// Parse from string (case-insensitive)
    pub fn from_str_flexible(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "inr" | "rupee" | "rupees" | "₹" => Some(Currency::Inr),
            "usd" | "dollar" | "dollars" | "$" => Some(Currency::Usd),
            _ => None,
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Currency::Inr => write!(f, "INR"),
            Currency::Usd => write!(f, "USD"),
        }
    }
}

/// Format an amount rounded to whole units.
///
/// Non-finite amounts yield an empty string.
pub fn format_currency(value: f64, currency: Currency) -> String {
    if !value.is_finite() {
        return String::new();
    }

    let rounded = value.round();
    let sign = if rounded < 0.0 { "-" } else { "" };
    let digits = format!("{:.0}", rounded.abs());

    let grouped = match currency {
        Currency::Inr => group_indian(&digits),
        Currency::Usd => group_thousands(&digits),
    };

    format!("{}{}{}", sign, currency.symbol(), grouped)
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut out = String::with_capacity(digits.len() + digits.len() / 2);
    for (i, ch) in head.chars().enumerate() {
        if i > 0 && (head.len() - i) % 2 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out.push(',');
    out.push_str(tail);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indian_grouping() {
        assert_eq!(format_currency(0.0, Currency::Inr), "₹0");
        assert_eq!(format_currency(999.0, Currency::Inr), "₹999");
        assert_eq!(format_currency(1000.0, Currency::Inr), "₹1,000");
        assert_eq!(format_currency(100000.0, Currency::Inr), "₹1,00,000");
        assert_eq!(format_currency(323274.0, Currency::Inr), "₹3,23,274");
        assert_eq!(format_currency(123456789.0, Currency::Inr), "₹12,34,56,789");
    }

    #[test]
    fn test_thousands_grouping() {
        assert_eq!(format_currency(12.0, Currency::Usd), "$12");
        assert_eq!(format_currency(1000.0, Currency::Usd), "$1,000");
        assert_eq!(format_currency(123456789.0, Currency::Usd), "$123,456,789");
    }

    #[test]
    fn test_rounds_to_whole_units() {
        assert_eq!(format_currency(1499.5, Currency::Inr), "₹1,500");
        assert_eq!(format_currency(1499.4, Currency::Usd), "$1,499");
    }

    #[test]
    fn test_negative_and_non_finite() {
        assert_eq!(format_currency(-2500.0, Currency::Usd), "-$2,500");
        assert_eq!(format_currency(f64::NAN, Currency::Inr), "");
        assert_eq!(format_currency(f64::INFINITY, Currency::Usd), "");
    }

    #[test]
    fn test_currency_parsing() {
        assert_eq!(Currency::from_str_flexible("INR"), Some(Currency::Inr));
        assert_eq!(Currency::from_str_flexible(" usd "), Some(Currency::Usd));
        assert_eq!(Currency::from_str_flexible("eur"), None);
    }
}
