//! # Domain Types
//!
//! Value types and selectors shared by the parser, the engine and the
//! session.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │   Percentage    │   │    PartySize    │   │    Currency     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  bps (u32)      │   │  n >= 1 (u32)   │   │  CLP (0 dp)     │       │
//! │  │  2000 = 20%     │   │  divisor        │   │  USD (2 dp)     │       │
//! │  └─────────────────┘   └─────────────────┘   │  EUR (2 dp)     │       │
//! │                                              └─────────────────┘       │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │      Mode       │   │     Variant     │   │   EditPolicy    │       │
//! │  │  Discount       │   │  Discount       │   │  Strict         │       │
//! │  │  Tip            │   │  Tip            │   │  Lenient        │       │
//! │  └─────────────────┘   │  Combined       │   └─────────────────┘       │
//! │                        └─────────────────┘                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::CoreError;

// =============================================================================
// Percentage
// =============================================================================

/// A rate in basis points (1 bp = 0.01%).
///
/// ## Why Basis Points?
/// Users type rates such as `12.5`. Basis points keep two decimals of the
/// percentage exact, so `12.5%` is stored as `1250` with no float drift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Percentage(u32);

impl Percentage {
    /// 100%, the largest accepted discount.
    pub const MAX_DISCOUNT: Percentage = Percentage(10_000);

    /// 30%, the top of the tip slider.
    pub const TIP_SLIDER_MAX: Percentage = Percentage(3_000);

    /// Creates a percentage from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        Percentage(bps)
    }

    /// Creates a percentage from a whole number of percent.
    #[inline]
    pub const fn from_whole(percent: u32) -> Self {
        Percentage(percent.saturating_mul(100))
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percent(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    #[inline]
    pub const fn zero() -> Self {
        Percentage(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl Default for Percentage {
    fn default() -> Self {
        Percentage::zero()
    }
}

impl fmt::Display for Percentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = self.0 / 100;
        let frac = self.0 % 100;
        if frac == 0 {
            write!(f, "{}%", whole)
        } else if frac % 10 == 0 {
            write!(f, "{}.{}%", whole, frac / 10)
        } else {
            write!(f, "{}.{:02}%", whole, frac)
        }
    }
}

// =============================================================================
// Party Size
// =============================================================================

/// Number of people splitting a bill. Always at least one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PartySize(u32);

impl PartySize {
    /// Creates a party size, treating anything below one as one.
    ///
    /// ```rust
    /// use pricecalc_core::types::PartySize;
    ///
    /// assert_eq!(PartySize::new(4).get(), 4);
    /// assert_eq!(PartySize::new(0).get(), 1);
    /// assert_eq!(PartySize::new(-3).get(), 1);
    /// ```
    pub fn new(people: i64) -> Self {
        PartySize(people.clamp(1, u32::MAX as i64) as u32)
    }

    #[inline]
    pub const fn get(&self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn one() -> Self {
        PartySize(1)
    }
}

impl Default for PartySize {
    fn default() -> Self {
        PartySize::one()
    }
}

// =============================================================================
// Currency
// =============================================================================

/// Display currency. Selecting a currency never converts amounts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "UPPERCASE")]
#[ts(export)]
pub enum Currency {
    /// Chilean peso, shown without decimals.
    #[default]
    Clp,
    /// US dollar.
    Usd,
    /// Euro.
    Eur,
}

impl Currency {
    pub const ALL: [Currency; 3] = [Currency::Clp, Currency::Usd, Currency::Eur];

    /// ISO 4217 code.
    pub const fn code(&self) -> &'static str {
        match self {
            Currency::Clp => "CLP",
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
        }
    }

    /// Digits shown after the decimal separator.
    pub const fn fraction_digits(&self) -> u8 {
        match self {
            Currency::Clp => 0,
            Currency::Usd | Currency::Eur => 2,
        }
    }

    pub const fn symbol(&self) -> &'static str {
        match self {
            Currency::Clp | Currency::Usd => "$",
            Currency::Eur => "€",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Currency {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "CLP" => Ok(Currency::Clp),
            "USD" => Ok(Currency::Usd),
            "EUR" => Ok(Currency::Eur),
            _ => Err(CoreError::UnknownCurrency(s.trim().to_string())),
        }
    }
}

// =============================================================================
// Mode
// =============================================================================

/// Which calculation the session shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum Mode {
    Discount,
    Tip,
}

impl Mode {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Mode::Discount => "discount",
            Mode::Tip => "tip",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "discount" | "descuento" => Ok(Mode::Discount),
            "tip" | "propina" => Ok(Mode::Tip),
            _ => Err(CoreError::UnknownMode(s.trim().to_string())),
        }
    }
}

// =============================================================================
// Tip Input
// =============================================================================

/// How the tip rate is entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum TipInput {
    /// Range input from 0 to 30 in whole-percent steps.
    Slider,
    /// Free text, any non-negative rate.
    FreeText,
}

// =============================================================================
// Variant
// =============================================================================

/// Which of the calculator widgets a session behaves like.
///
/// ```text
/// ┌────────────┬──────────────────┬────────────────┬────────────┐
/// │  Variant   │  Modes           │  Currencies    │  Tip input │
/// ├────────────┼──────────────────┼────────────────┼────────────┤
/// │  discount  │  Discount        │  CLP USD EUR   │  -         │
/// │  tip       │  Tip             │  CLP USD       │  slider    │
/// │  combined  │  Discount, Tip   │  CLP USD EUR   │  free text │
/// └────────────┴──────────────────┴────────────────┴────────────┘
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum Variant {
    Discount,
    Tip,
    #[default]
    Combined,
}

impl Variant {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Variant::Discount => "discount",
            Variant::Tip => "tip",
            Variant::Combined => "combined",
        }
    }

    /// Modes offered, in tab order. The first one is active initially.
    pub const fn modes(&self) -> &'static [Mode] {
        match self {
            Variant::Discount => &[Mode::Discount],
            Variant::Tip => &[Mode::Tip],
            Variant::Combined => &[Mode::Discount, Mode::Tip],
        }
    }

    /// Currencies offered, in button order.
    pub const fn currencies(&self) -> &'static [Currency] {
        match self {
            Variant::Discount | Variant::Combined => &Currency::ALL,
            Variant::Tip => &[Currency::Clp, Currency::Usd],
        }
    }

    pub const fn tip_input(&self) -> TipInput {
        match self {
            Variant::Tip => TipInput::Slider,
            Variant::Discount | Variant::Combined => TipInput::FreeText,
        }
    }

    /// Input fields the variant renders.
    pub const fn fields(&self) -> &'static [Field] {
        match self {
            Variant::Discount => &[Field::Amount, Field::Discount],
            Variant::Tip => &[Field::Amount, Field::Tip, Field::PartySize],
            Variant::Combined => &[Field::Amount, Field::Discount, Field::Tip, Field::PartySize],
        }
    }

    pub fn supports_mode(&self, mode: Mode) -> bool {
        self.modes().contains(&mode)
    }

    pub fn supports_currency(&self, currency: Currency) -> bool {
        self.currencies().contains(&currency)
    }

    pub fn supports_field(&self, field: Field) -> bool {
        self.fields().contains(&field)
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Variant {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "discount" => Ok(Variant::Discount),
            "tip" => Ok(Variant::Tip),
            "combined" => Ok(Variant::Combined),
            _ => Err(CoreError::UnknownVariant(s.trim().to_string())),
        }
    }
}

// =============================================================================
// Edit Policy
// =============================================================================

/// What happens to an out-of-range edit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum EditPolicy {
    /// Reject the edit; the previous text stays.
    #[default]
    Strict,
    /// Accept any text; bad values count as the field default when
    /// calculating.
    Lenient,
}

impl EditPolicy {
    pub const fn as_str(&self) -> &'static str {
        match self {
            EditPolicy::Strict => "strict",
            EditPolicy::Lenient => "lenient",
        }
    }
}

impl fmt::Display for EditPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EditPolicy {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "strict" => Ok(EditPolicy::Strict),
            "lenient" => Ok(EditPolicy::Lenient),
            _ => Err(CoreError::UnknownPolicy(s.trim().to_string())),
        }
    }
}

// =============================================================================
// Field
// =============================================================================

/// An input field of the calculator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Field {
    /// Original price or bill.
    Amount,
    /// Discount rate.
    Discount,
    /// Tip rate.
    Tip,
    /// Number of people splitting the bill.
    PartySize,
}

impl Field {
    /// Name used in messages.
    pub const fn label(&self) -> &'static str {
        match self {
            Field::Amount => "amount",
            Field::Discount => "discount",
            Field::Tip => "tip",
            Field::PartySize => "party size",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Field {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "amount" | "bill" | "price" => Ok(Field::Amount),
            "discount" => Ok(Field::Discount),
            "tip" => Ok(Field::Tip),
            "people" | "party" | "party_size" => Ok(Field::PartySize),
            _ => Err(CoreError::UnknownField(s.trim().to_string())),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
