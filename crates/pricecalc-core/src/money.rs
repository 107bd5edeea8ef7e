//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In a browser widget computing with floats:                             │
//! │    19.99 × 15 / 100 = 2.9985000000000004                                │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Hundredths                                       │
//! │    1999 × 1500 bps = 2_998_500 → round(/10000) = 300 hundredths         │
//! │    Rounding happens once, at the division, and is always the same       │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every currency is stored in hundredths of its major unit, CLP included.
//! CLP is *displayed* without decimals, but keeping hundredths internally
//! means switching the display currency never changes the stored value.
//!
//! ## Usage
//! ```rust
//! use pricecalc_core::money::Money;
//! use pricecalc_core::types::Percentage;
//!
//! let price = Money::from_major(100);
//! let off = price.percentage(Percentage::from_whole(20));
//! assert_eq!(off, Money::from_major(20));
//! assert_eq!(price - off, Money::from_major(80));
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Sub, SubAssign};
use ts_rs::TS;

use crate::types::{PartySize, Percentage};

/// Number of hundredths in one major unit.
pub const HUNDREDTHS_PER_UNIT: i64 = 100;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in hundredths of the major currency unit.
///
/// ## Design Decisions
/// - **i64 (signed)**: lenient input can briefly hold odd values, and
///   subtraction results are easier to reason about when signed
/// - **Saturating arithmetic**: free-text tip rates are unbounded, so
///   products are computed in i128 and clamped back into i64
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from hundredths of the major unit.
    ///
    /// ```rust
    /// use pricecalc_core::money::Money;
    ///
    /// let price = Money::from_hundredths(1099); // 10.99
    /// assert_eq!(price.hundredths(), 1099);
    /// ```
    #[inline]
    pub const fn from_hundredths(hundredths: i64) -> Self {
        Money(hundredths)
    }

    /// Creates a Money value from whole major units.
    #[inline]
    pub const fn from_major(major: i64) -> Self {
        Money(major.saturating_mul(HUNDREDTHS_PER_UNIT))
    }

    /// Returns the value in hundredths.
    #[inline]
    pub const fn hundredths(&self) -> i64 {
        self.0
    }

    /// Returns the whole major units, truncated toward zero.
    #[inline]
    pub const fn major(&self) -> i64 {
        self.0 / HUNDREDTHS_PER_UNIT
    }

    /// Returns the hundredths part (always 0-99).
    #[inline]
    pub const fn minor(&self) -> i64 {
        (self.0 % HUNDREDTHS_PER_UNIT).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Returns the absolute value.
    #[inline]
    pub const fn abs(&self) -> Self {
        Money(self.0.saturating_abs())
    }

    /// Computes `self × rate / 100`, rounded half away from zero.
    ///
    /// ## Implementation
    /// `rate` is in basis points, so the formula is
    /// `hundredths × bps / 10000`. The product is taken in i128.
    ///
    /// ## Example
    /// ```rust
    /// use pricecalc_core::money::Money;
    /// use pricecalc_core::types::Percentage;
    ///
    /// let bill = Money::from_hundredths(1999);       // 19.99
    /// let tip = bill.percentage(Percentage::from_bps(1500)); // 15%
    /// // 2.9985 → 3.00
    /// assert_eq!(tip.hundredths(), 300);
    /// ```
    pub fn percentage(&self, rate: Percentage) -> Money {
        let scaled = self.0 as i128 * rate.bps() as i128;
        Money::saturating_from(div_round_half_away(scaled, 10_000))
    }

    /// Divides evenly among a party, rounded half away from zero.
    ///
    /// The party size is at least one by construction, so this never
    /// divides by zero.
    ///
    /// ```rust
    /// use pricecalc_core::money::Money;
    /// use pricecalc_core::types::PartySize;
    ///
    /// let total = Money::from_major(10);
    /// assert_eq!(total.split(PartySize::new(3)).hundredths(), 333);
    /// ```
    pub fn split(&self, party: PartySize) -> Money {
        let share = div_round_half_away(self.0 as i128, party.get() as i128);
        Money::saturating_from(share)
    }

    /// Rounds to `fraction_digits` decimals and returns the value scaled to
    /// that precision (e.g. 1099 hundredths at 0 digits → 11).
    pub fn rounded_units(&self, fraction_digits: u8) -> i64 {
        match fraction_digits {
            0 => div_round_half_away(self.0 as i128, HUNDREDTHS_PER_UNIT as i128) as i64,
            1 => div_round_half_away(self.0 as i128, 10) as i64,
            _ => self.0,
        }
    }

    fn saturating_from(value: i128) -> Money {
        Money(value.clamp(i64::MIN as i128, i64::MAX as i128) as i64)
    }
}

/// Integer division rounding half away from zero. `divisor` must be positive.
pub(crate) fn div_round_half_away(dividend: i128, divisor: i128) -> i128 {
    let half = divisor / 2;
    if dividend >= 0 {
        (dividend + half) / divisor
    } else {
        -((-dividend + half) / divisor)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Plain decimal rendering (`-5.50`). For user-facing output use
/// [`crate::format::CurrencyFormatter`], which knows about symbols and
/// locales.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}.{:02}", sign, self.major().abs(), self.minor())
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0.saturating_sub(other.0))
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_sub(other.0);
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
