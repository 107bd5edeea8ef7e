//! # Calculation Engine
//!
//! Pure functions from validated numbers to breakdowns.
//!
//! ## Formulas
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Discount                                                               │
//! │    discount_amount = original × pct / 100                               │
//! │    final_amount    = original − discount_amount                         │
//! │    saved_amount    = discount_amount                                    │
//! │                                                                         │
//! │  Tip                                                                    │
//! │    tip_amount      = bill × pct / 100                                   │
//! │    total_amount    = bill + tip_amount                                  │
//! │    per_person      = total_amount / max(party_size, 1)                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `saved_amount` is the discount amount itself, never a second
//! subtraction, so it always agrees with `final_amount`.
//!
//! ## Example
//! ```rust
//! use pricecalc_core::calc::{discount, tip_split};
//! use pricecalc_core::money::Money;
//! use pricecalc_core::types::{PartySize, Percentage};
//!
//! let d = discount(Money::from_major(100), Percentage::from_whole(20));
//! assert_eq!(d.discount_amount, Money::from_major(20));
//! assert_eq!(d.final_amount, Money::from_major(80));
//!
//! let t = tip_split(Money::from_major(200), Percentage::from_whole(10), PartySize::new(2));
//! assert_eq!(t.total_amount, Money::from_major(220));
//! assert_eq!(t.per_person_amount, Money::from_major(110));
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::format::CurrencyFormatter;
use crate::money::Money;
use crate::types::{Currency, Mode, PartySize, Percentage};

// =============================================================================
// Breakdowns
// =============================================================================

/// Numeric result of a discount calculation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct DiscountBreakdown {
    pub original_amount: Money,
    pub rate: Percentage,
    pub discount_amount: Money,
    pub final_amount: Money,
    pub saved_amount: Money,
}

/// Numeric result of a tip calculation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct TipBreakdown {
    pub bill_amount: Money,
    pub rate: Percentage,
    pub party_size: PartySize,
    pub tip_amount: Money,
    pub total_amount: Money,
    pub per_person_amount: Money,
}

// =============================================================================
// Engine
// =============================================================================

/// Amount removed from `original` at `rate`.
#[inline]
pub fn discount_amount(original: Money, rate: Percentage) -> Money {
    original.percentage(rate)
}

/// Applies a percentage discount.
///
/// For `original ≥ 0` and `rate ≤ 100%` the discount lies in
/// `[0, original]` and `final_amount + discount_amount == original`.
pub fn discount(original: Money, rate: Percentage) -> DiscountBreakdown {
    let off = discount_amount(original, rate);
    DiscountBreakdown {
        original_amount: original,
        rate,
        discount_amount: off,
        final_amount: original - off,
        saved_amount: off,
    }
}

/// Tip on `bill` at `rate`.
#[inline]
pub fn tip(bill: Money, rate: Percentage) -> Money {
    bill.percentage(rate)
}

/// Bill plus tip.
#[inline]
pub fn total(bill: Money, tip: Money) -> Money {
    bill + tip
}

/// Share of `total` for each of `party` people.
#[inline]
pub fn per_person(total: Money, party: PartySize) -> Money {
    total.split(party)
}

/// Full tip breakdown for a bill shared by `party` people.
pub fn tip_split(bill: Money, rate: Percentage, party: PartySize) -> TipBreakdown {
    let tip_amount = tip(bill, rate);
    let total_amount = total(bill, tip_amount);
    TipBreakdown {
        bill_amount: bill,
        rate,
        party_size: party,
        tip_amount,
        total_amount,
        per_person_amount: per_person(total_amount, party),
    }
}

// =============================================================================
// Formatted Results
// =============================================================================

/// Display strings for a discount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct DiscountDisplay {
    pub currency: Currency,
    pub discount_amount: String,
    pub final_amount: String,
    pub saved_amount: String,
}

/// Display strings for a tip split.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct TipDisplay {
    pub currency: Currency,
    pub tip_amount: String,
    pub total_amount: String,
    pub per_person_amount: String,
}

/// What the presentation layer renders after a recompute.
///
/// Serialized with a `mode` tag:
/// ```json
/// { "mode": "discount", "currency": "CLP",
///   "discountAmount": "$20", "finalAmount": "$80", "savedAmount": "$20" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "mode", rename_all = "lowercase")]
#[ts(export)]
pub enum CalculationResult {
    Discount(DiscountDisplay),
    Tip(TipDisplay),
}

impl CalculationResult {
    pub fn mode(&self) -> Mode {
        match self {
            CalculationResult::Discount(_) => Mode::Discount,
            CalculationResult::Tip(_) => Mode::Tip,
        }
    }

    pub fn currency(&self) -> Currency {
        match self {
            CalculationResult::Discount(display) => display.currency,
            CalculationResult::Tip(display) => display.currency,
        }
    }
}

impl DiscountBreakdown {
    pub fn display(&self, formatter: &CurrencyFormatter, currency: Currency) -> DiscountDisplay {
        DiscountDisplay {
            currency,
            discount_amount: formatter.format(self.discount_amount, currency),
            final_amount: formatter.format(self.final_amount, currency),
            saved_amount: formatter.format(self.saved_amount, currency),
        }
    }
}

impl TipBreakdown {
    pub fn display(&self, formatter: &CurrencyFormatter, currency: Currency) -> TipDisplay {
        TipDisplay {
            currency,
            tip_amount: formatter.format(self.tip_amount, currency),
            total_amount: formatter.format(self.total_amount, currency),
            per_person_amount: formatter.format(self.per_person_amount, currency),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
