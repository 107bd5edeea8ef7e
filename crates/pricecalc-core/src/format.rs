//! # Currency Formatting
//!
//! Renders [`Money`] for display. Formatting is a boundary concern: the
//! engine never sees strings, and the formatter never changes values
//! beyond rounding to the currency's display precision.
//!
//! ## Conventions
//! ```text
//! ┌──────────┬────────────┬────────────┬─────────────────┐
//! │  Locale  │  CLP 1234  │  USD 1234.5│  EUR 1234.5     │
//! ├──────────┼────────────┼────────────┼─────────────────┤
//! │  en-US   │  $1,234    │  $1,234.50 │  €1,234.50      │
//! │  es-CL   │  $1.234    │  $1.234,50 │  €1.234,50      │
//! │  de-DE   │  1.234 $   │  1.234,50 $│  1.234,50 €     │
//! └──────────┴────────────┴────────────┴─────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use pricecalc_core::format::{CurrencyFormatter, NumberLocale};
//! use pricecalc_core::money::Money;
//! use pricecalc_core::types::Currency;
//!
//! let fmt = CurrencyFormatter::new(NumberLocale::EnUs);
//! assert_eq!(fmt.format(Money::from_major(80), Currency::Clp), "$80");
//! assert_eq!(fmt.format(Money::from_major(80), Currency::Usd), "$80.00");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::CoreError;
use crate::money::Money;
use crate::types::Currency;

// =============================================================================
// Number Locale
// =============================================================================

/// Separator and symbol placement rules.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum NumberLocale {
    #[default]
    #[serde(rename = "en-US")]
    EnUs,
    #[serde(rename = "es-CL")]
    EsCl,
    #[serde(rename = "de-DE")]
    DeDe,
}

impl NumberLocale {
    /// BCP 47 tag.
    pub const fn tag(&self) -> &'static str {
        match self {
            NumberLocale::EnUs => "en-US",
            NumberLocale::EsCl => "es-CL",
            NumberLocale::DeDe => "de-DE",
        }
    }

    const fn group_separator(&self) -> char {
        match self {
            NumberLocale::EnUs => ',',
            NumberLocale::EsCl | NumberLocale::DeDe => '.',
        }
    }

    const fn decimal_separator(&self) -> char {
        match self {
            NumberLocale::EnUs => '.',
            NumberLocale::EsCl | NumberLocale::DeDe => ',',
        }
    }

    const fn symbol_after(&self) -> bool {
        matches!(self, NumberLocale::DeDe)
    }
}

impl fmt::Display for NumberLocale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for NumberLocale {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "en-us" | "en" => Ok(NumberLocale::EnUs),
            "es-cl" | "es" => Ok(NumberLocale::EsCl),
            "de-de" | "de" => Ok(NumberLocale::DeDe),
            _ => Err(CoreError::UnknownLocale(s.trim().to_string())),
        }
    }
}

// =============================================================================
// Currency Formatter
// =============================================================================

/// Formats money under one locale.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CurrencyFormatter {
    locale: NumberLocale,
}

impl CurrencyFormatter {
    pub const fn new(locale: NumberLocale) -> Self {
        CurrencyFormatter { locale }
    }

    pub const fn locale(&self) -> NumberLocale {
        self.locale
    }

    /// Rounds `value` to the currency's fraction digits and renders it with
    /// grouping, decimal separator and symbol.
    ///
    /// ```rust
    /// use pricecalc_core::format::{CurrencyFormatter, NumberLocale};
    /// use pricecalc_core::money::Money;
    /// use pricecalc_core::types::Currency;
    ///
    /// let de = CurrencyFormatter::new(NumberLocale::DeDe);
    /// let value = Money::from_hundredths(123_450);
    /// assert_eq!(de.format(value, Currency::Eur), "1.234,50 €");
    /// ```
    pub fn format(&self, value: Money, currency: Currency) -> String {
        let digits = currency.fraction_digits();
        let units = value.rounded_units(digits);
        let negative = units < 0;
        let magnitude = units.unsigned_abs();

        let divisor = 10u64.pow(digits as u32);
        let whole = magnitude / divisor;
        let fraction = magnitude % divisor;

        let mut number = group_digits(whole, self.locale.group_separator());
        if digits > 0 {
            number.push(self.locale.decimal_separator());
            number.push_str(&format!("{:0width$}", fraction, width = digits as usize));
        }

        let sign = if negative { "-" } else { "" };
        if self.locale.symbol_after() {
            format!("{}{} {}", sign, number, currency.symbol())
        } else {
            format!("{}{}{}", sign, currency.symbol(), number)
        }
    }
}

/// Formats with the given locale; shorthand for one-off calls.
pub fn format_money(value: Money, currency: Currency, locale: NumberLocale) -> String {
    CurrencyFormatter::new(locale).format(value, currency)
}

fn group_digits(value: u64, separator: char) -> String {
    let raw = value.to_string();
    let mut grouped = String::with_capacity(raw.len() + raw.len() / 3);
    for (i, ch) in raw.chars().enumerate() {
        if i > 0 && (raw.len() - i) % 3 == 0 {
            grouped.push(separator);
        }
        grouped.push(ch);
    }
    grouped
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locale_examples() {
        let fmt = CurrencyFormatter::default();
        assert_eq!(fmt.format(Money::from_major(80), Currency::Clp), "$80");
        assert_eq!(fmt.format(Money::from_major(80), Currency::Usd), "$80.00");
        assert_eq!(fmt.format(Money::zero(), Currency::Eur), "€0.00");
    }

    #[test]
    fn test_clp_has_no_decimals() {
        let fmt = CurrencyFormatter::default();
        assert_eq!(fmt.format(Money::from_hundredths(32_967), Currency::Clp), "$330");
        assert_eq!(fmt.format(Money::from_hundredths(49), Currency::Clp), "$0");
        assert_eq!(fmt.format(Money::from_hundredths(50), Currency::Clp), "$1");
    }

    #[test]
    fn test_grouping_per_locale() {
        let value = Money::from_hundredths(123_450);
        assert_eq!(format_money(value, Currency::Usd, NumberLocale::EnUs), "$1,234.50");
        assert_eq!(format_money(value, Currency::Usd, NumberLocale::EsCl), "$1.234,50");
        assert_eq!(format_money(value, Currency::Eur, NumberLocale::DeDe), "1.234,50 €");
        assert_eq!(
            format_money(Money::from_major(1_234_567), Currency::Clp, NumberLocale::EsCl),
            "$1.234.567"
        );
    }

    #[test]
    fn test_negative_values() {
        let value = Money::from_hundredths(-550);
        assert_eq!(format_money(value, Currency::Usd, NumberLocale::EnUs), "-$5.50");
        assert_eq!(format_money(value, Currency::Eur, NumberLocale::DeDe), "-5,50 €");
        // Rounds to zero: no stray minus sign
        assert_eq!(
            format_money(Money::from_hundredths(-40), Currency::Clp, NumberLocale::EnUs),
            "$0"
        );
    }

    #[test]
    fn test_group_digits() {
        assert_eq!(group_digits(0, ','), "0");
        assert_eq!(group_digits(999, ','), "999");
        assert_eq!(group_digits(1000, ','), "1,000");
        assert_eq!(group_digits(123_456_789, '.'), "123.456.789");
    }

    #[test]
    fn test_locale_parsing() {
        assert_eq!("en_us".parse::<NumberLocale>().unwrap(), NumberLocale::EnUs);
        assert_eq!("es-CL".parse::<NumberLocale>().unwrap(), NumberLocale::EsCl);
        assert!("fr-FR".parse::<NumberLocale>().is_err());
        assert_eq!(serde_json::to_string(&NumberLocale::DeDe).unwrap(), "\"de-DE\"");
    }
}
