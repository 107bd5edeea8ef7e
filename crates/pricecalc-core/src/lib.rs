//! # pricecalc-core: Pure Calculation Logic for pricecalc
//!
//! This crate is the **heart** of pricecalc. It turns the text a user types
//! into a calculator (price, discount rate, tip rate, party size) into
//! formatted results, with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        pricecalc Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │           Presentation (browser widget or terminal shell)       │   │
//! │  │    Amount ──► Discount % ──► Tip % ──► Party size ──► Result    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ edit / select / result                 │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ pricecalc-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │ validation│  │   calc    │  │  format   │  │  session  │  │   │
//! │  │   │  parse    │  │ discount  │  │ CLP/USD/  │  │  inputs   │  │   │
//! │  │   │  gates    │  │ tip split │  │ EUR       │  │  policy   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO LOGGING • NO GLOBAL STATE • PURE FUNCTIONS        │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Percentage, PartySize, Currency and the selector enums
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`validation`] - Text parsing, edit gates, calculation-time fallbacks
//! - [`calc`] - Discount and tip formulas
//! - [`format`] - Locale-aware currency rendering
//! - [`session`] - The input state a front end owns
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same input = same output, every time
//! 2. **Integer Money**: all amounts are hundredths (i64), rates are basis points
//! 3. **Total Results**: recomputing never fails; bad text counts as the
//!    field default
//! 4. **Explicit Errors**: rejected edits are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use pricecalc_core::{calc, Currency, CurrencyFormatter, Money, Percentage};
//!
//! let result = calc::discount(Money::from_major(100), Percentage::from_whole(20));
//! let fmt = CurrencyFormatter::default();
//!
//! assert_eq!(fmt.format(result.final_amount, Currency::Clp), "$80");
//! assert_eq!(fmt.format(result.final_amount, Currency::Usd), "$80.00");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod calc;
pub mod error;
pub mod format;
pub mod money;
pub mod session;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use calc::{CalculationResult, DiscountBreakdown, TipBreakdown};
pub use error::{CoreError, CoreResult, ValidationError};
pub use format::{CurrencyFormatter, NumberLocale};
pub use money::Money;
pub use session::{CalculatorSession, Inputs};
pub use types::*;
