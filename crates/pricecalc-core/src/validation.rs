//! # Validation Module
//!
//! Turns raw field text into bounded numbers.
//!
//! ## Two Jobs
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Parser / Validator                                 │
//! │                                                                         │
//! │  On every edit (strict policy only)                                    │
//! │  ├── validate_edit(field, text) ← gate                                 │
//! │  └── Err → edit discarded, previous text kept                          │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  On every recompute (both policies)                                    │
//! │  ├── amount_or_zero / discount_or_zero / tip_or_zero                   │
//! │  └── party_size_or_one                                                 │
//! │      never fail: anything unusable becomes the field default           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Number Syntax
//! Optional sign, digits, optional `.` and fraction digits. `12`, `12.5`,
//! `.5` and `12.` are numbers. `.`, `+` and `-` are *incomplete*: the user
//! is still typing. Anything else is invalid.
//!
//! ## Usage
//! ```rust
//! use pricecalc_core::types::{Field, TipInput};
//! use pricecalc_core::validation::{amount_or_zero, validate_edit};
//!
//! assert!(validate_edit(Field::Amount, "19.99", TipInput::FreeText).is_ok());
//! assert!(validate_edit(Field::Amount, "-5", TipInput::FreeText).is_err());
//! assert!(validate_edit(Field::Discount, "150", TipInput::FreeText).is_err());
//!
//! assert_eq!(amount_or_zero("19.99").hundredths(), 1999);
//! assert_eq!(amount_or_zero("").hundredths(), 0);
//! ```

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::{Field, PartySize, Percentage, TipInput};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Fraction digits kept when parsing. Amounts are stored in hundredths of a
/// unit and rates in basis points, so both keep two.
const SCALE_DIGITS: u32 = 2;
const SCALE: i64 = 100;

// =============================================================================
// Parsing
// =============================================================================

/// Outcome of reading field text as a number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParsedNumber {
    /// Blank text.
    Empty,
    /// Sign and/or dot with no digits yet.
    Incomplete { negative: bool },
    /// A number scaled by 100 (`"12.5"` → `1250`).
    Value(i64),
    /// Digits beyond what fits in an i64.
    Overflow,
    /// Not a number.
    Invalid,
}

/// Parses decimal text into hundredths, rounding extra fraction digits half
/// away from zero.
///
/// ```rust
/// use pricecalc_core::validation::{parse_number, ParsedNumber};
///
/// assert_eq!(parse_number(" 12.5 "), ParsedNumber::Value(1250));
/// assert_eq!(parse_number("0.125"), ParsedNumber::Value(13));
/// assert_eq!(parse_number("-"), ParsedNumber::Incomplete { negative: true });
/// assert_eq!(parse_number("12abc"), ParsedNumber::Invalid);
/// ```
pub fn parse_number(text: &str) -> ParsedNumber {
    match scan(text) {
        Scanned::Number(number) => number.rounded(),
        Scanned::Other(parsed) => parsed,
    }
}

/// Typed text as an exact decimal: hundredths cut toward zero plus what
/// the cut dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Decimal {
    negative: bool,
    /// Magnitude in hundredths, truncated.
    hundredths: i64,
    /// A non-zero digit was dropped past the second fraction digit.
    inexact: bool,
    /// The first dropped digit is 5 or more.
    round_up: bool,
}

impl Decimal {
    fn rounded(self) -> ParsedNumber {
        let magnitude = if self.round_up {
            match self.hundredths.checked_add(1) {
                Some(m) => m,
                None => return ParsedNumber::Overflow,
            }
        } else {
            self.hundredths
        };
        ParsedNumber::Value(if self.negative { -magnitude } else { magnitude })
    }

    /// Strictly below zero. `-0` and `-0.00` are not.
    fn is_negative(&self) -> bool {
        self.negative && (self.hundredths > 0 || self.inexact)
    }

    /// Exact value ≥ `bound` hundredths, for `bound > 0`.
    fn at_least(&self, bound: i64) -> bool {
        !self.negative && self.hundredths >= bound
    }

    /// Exact value ≤ `bound` hundredths, for `bound ≥ 0`.
    fn at_most(&self, bound: i64) -> bool {
        self.negative || self.hundredths < bound || (self.hundredths == bound && !self.inexact)
    }

    /// Whole units of a non-negative value, fraction discarded.
    fn floor_units(&self) -> i64 {
        self.hundredths / SCALE
    }
}

enum Scanned {
    Number(Decimal),
    Other(ParsedNumber),
}

fn scan(text: &str) -> Scanned {
    let text = text.trim();
    if text.is_empty() {
        return Scanned::Other(ParsedNumber::Empty);
    }

    let (negative, body) = match text.as_bytes()[0] {
        b'-' => (true, &text[1..]),
        b'+' => (false, &text[1..]),
        _ => (false, text),
    };

    let (int_part, frac_part) = body.split_once('.').unwrap_or((body, ""));
    let is_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if !is_digits(int_part) || !is_digits(frac_part) {
        return Scanned::Other(ParsedNumber::Invalid);
    }
    if int_part.is_empty() && frac_part.is_empty() {
        return Scanned::Other(ParsedNumber::Incomplete { negative });
    }

    let mut magnitude: i128 = 0;
    let kept_frac = frac_part.bytes().chain(std::iter::repeat(b'0'));
    let digits = int_part
        .bytes()
        .chain(kept_frac.take(SCALE_DIGITS as usize));
    for digit in digits {
        magnitude = magnitude * 10 + i128::from(digit - b'0');
        if magnitude > i64::MAX as i128 {
            return Scanned::Other(ParsedNumber::Overflow);
        }
    }

    let dropped = frac_part.as_bytes().get(SCALE_DIGITS as usize..).unwrap_or(&[]);
    Scanned::Number(Decimal {
        negative,
        hundredths: magnitude as i64,
        inexact: dropped.iter().any(|&d| d != b'0'),
        round_up: dropped.first().is_some_and(|&d| d >= b'5'),
    })
}

// =============================================================================
// Edit Gates
// =============================================================================

/// Decides whether an edit is accepted under the strict policy.
///
/// ## Rules
/// | Field              | Accepted when                 |
/// |--------------------|-------------------------------|
/// | amount             | empty or ≥ 0                  |
/// | discount           | empty or 0 ≤ value ≤ 100      |
/// | tip (free text)    | empty or ≥ 0                  |
/// | tip (slider)       | empty or any number (snapped) |
/// | party size         | empty or ≥ 1                  |
///
/// Ranges are checked against the exact typed value, before any rounding.
/// Incomplete input (`.`, `+`) is accepted; a lone `-` is not, since no
/// continuation of it can be in range, except on the slider, which snaps
/// anything numeric.
///
/// ## User Workflow
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Discount field shows "15"                                              │
/// │       │                                                                 │
/// │  User types "0" → text becomes "150"                                   │
/// │       │                                                                 │
/// │       ▼                                                                 │
/// │  validate_edit(Discount, "150") ← THIS FUNCTION                        │
/// │       │                                                                 │
/// │       └── OutOfRange → field keeps showing "15"                        │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn validate_edit(field: Field, text: &str, tip_input: TipInput) -> ValidationResult<()> {
    let slider = field == Field::Tip && tip_input == TipInput::Slider;
    let number = match scan(text) {
        Scanned::Number(number) => number,
        Scanned::Other(ParsedNumber::Empty)
        | Scanned::Other(ParsedNumber::Incomplete { negative: false }) => return Ok(()),
        Scanned::Other(ParsedNumber::Incomplete { negative: true }) if slider => return Ok(()),
        Scanned::Other(ParsedNumber::Incomplete { negative: true }) => return Err(below_range(field)),
        Scanned::Other(ParsedNumber::Overflow) => {
            return Err(ValidationError::InvalidFormat {
                field: field.label().to_string(),
                reason: "number is too large".to_string(),
            })
        }
        Scanned::Other(_) => {
            return Err(ValidationError::InvalidFormat {
                field: field.label().to_string(),
                reason: "not a number".to_string(),
            })
        }
    };

    if slider {
        return Ok(());
    }

    let in_range = match field {
        Field::Amount | Field::Tip => !number.is_negative(),
        Field::Discount => {
            !number.is_negative() && number.at_most(Percentage::MAX_DISCOUNT.bps() as i64)
        }
        Field::PartySize => number.at_least(SCALE),
    };

    if in_range {
        Ok(())
    } else if field == Field::Discount && !number.is_negative() {
        Err(ValidationError::OutOfRange {
            field: field.label().to_string(),
            min: 0,
            max: 100,
        })
    } else {
        Err(below_range(field))
    }
}

fn below_range(field: Field) -> ValidationError {
    match field {
        Field::PartySize => ValidationError::TooSmall {
            field: field.label().to_string(),
            min: 1,
        },
        Field::Discount => ValidationError::OutOfRange {
            field: field.label().to_string(),
            min: 0,
            max: 100,
        },
        Field::Amount | Field::Tip => ValidationError::Negative {
            field: field.label().to_string(),
        },
    }
}

// =============================================================================
// Tip Slider
// =============================================================================

/// Snaps slider text to a whole percent in `[0, 30]`.
///
/// The slider cannot produce an out-of-range value, so numeric text is
/// clamped rather than rejected. Non-numeric text yields `None`.
///
/// ```rust
/// use pricecalc_core::types::Percentage;
/// use pricecalc_core::validation::snap_to_slider;
///
/// assert_eq!(snap_to_slider("15"), Some(Percentage::from_whole(15)));
/// assert_eq!(snap_to_slider("45"), Some(Percentage::from_whole(30)));
/// assert_eq!(snap_to_slider("12.6"), Some(Percentage::from_whole(13)));
/// assert_eq!(snap_to_slider("-3"), Some(Percentage::zero()));
/// assert_eq!(snap_to_slider("abc"), None);
/// ```
pub fn snap_to_slider(text: &str) -> Option<Percentage> {
    let max_whole = (Percentage::TIP_SLIDER_MAX.bps() / 100) as i64;
    match parse_number(text) {
        ParsedNumber::Empty | ParsedNumber::Incomplete { .. } => Some(Percentage::zero()),
        ParsedNumber::Value(value) => {
            let whole = crate::money::div_round_half_away(value as i128, SCALE as i128) as i64;
            Some(Percentage::from_whole(whole.clamp(0, max_whole) as u32))
        }
        ParsedNumber::Overflow => Some(Percentage::TIP_SLIDER_MAX),
        ParsedNumber::Invalid => None,
    }
}

// =============================================================================
// Calculation-Time Coercion
// =============================================================================

/// Amount for calculation: the parsed value, or zero when the text is
/// empty, unparsable or negative.
pub fn amount_or_zero(text: &str) -> Money {
    match parse_number(text) {
        ParsedNumber::Value(value) if value >= 0 => Money::from_hundredths(value),
        _ => Money::zero(),
    }
}

/// Discount rate for calculation: the parsed rate, or zero when the text
/// is empty, unparsable or outside `[0, 100]`.
pub fn discount_or_zero(text: &str) -> Percentage {
    match scan(text) {
        Scanned::Number(number)
            if !number.is_negative() && number.at_most(Percentage::MAX_DISCOUNT.bps() as i64) =>
        {
            match number.rounded() {
                ParsedNumber::Value(value) => Percentage::from_bps(value.max(0) as u32),
                _ => Percentage::zero(),
            }
        }
        _ => Percentage::zero(),
    }
}

/// Tip rate for calculation, honoring how the tip is entered.
pub fn tip_or_zero(text: &str, tip_input: TipInput) -> Percentage {
    match tip_input {
        TipInput::Slider => snap_to_slider(text).unwrap_or_default(),
        TipInput::FreeText => match parse_number(text) {
            ParsedNumber::Value(value) if value >= 0 => {
                Percentage::from_bps(value.min(u32::MAX as i64) as u32)
            }
            _ => Percentage::zero(),
        },
    }
}

/// Party size for calculation: the parsed count floored to an integer, or
/// one when the text is empty, unparsable or below one.
///
/// ```rust
/// use pricecalc_core::validation::party_size_or_one;
///
/// assert_eq!(party_size_or_one("4").get(), 4);
/// assert_eq!(party_size_or_one("2.9").get(), 2);
/// assert_eq!(party_size_or_one("2.999").get(), 2);
/// assert_eq!(party_size_or_one("0").get(), 1);
/// assert_eq!(party_size_or_one("many").get(), 1);
/// ```
pub fn party_size_or_one(text: &str) -> PartySize {
    match scan(text) {
        Scanned::Number(number) if number.at_least(SCALE) => PartySize::new(number.floor_units()),
        _ => PartySize::one(),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_number_forms() {
        assert_eq!(parse_number(""), ParsedNumber::Empty);
        assert_eq!(parse_number("   "), ParsedNumber::Empty);
        assert_eq!(parse_number("100"), ParsedNumber::Value(10_000));
        assert_eq!(parse_number("+7"), ParsedNumber::Value(700));
        assert_eq!(parse_number("-5"), ParsedNumber::Value(-500));
        assert_eq!(parse_number(".5"), ParsedNumber::Value(50));
        assert_eq!(parse_number("12."), ParsedNumber::Value(1200));
        assert_eq!(parse_number("0.01"), ParsedNumber::Value(1));
        assert_eq!(parse_number("-0"), ParsedNumber::Value(0));
    }

    #[test]
    fn test_parse_number_rounding() {
        assert_eq!(parse_number("0.125"), ParsedNumber::Value(13));
        assert_eq!(parse_number("0.124999"), ParsedNumber::Value(12));
        assert_eq!(parse_number("-0.125"), ParsedNumber::Value(-13));
        assert_eq!(parse_number("9.999"), ParsedNumber::Value(1000));
    }

    #[test]
    fn test_parse_number_incomplete_and_invalid() {
        assert_eq!(parse_number("."), ParsedNumber::Incomplete { negative: false });
        assert_eq!(parse_number("+"), ParsedNumber::Incomplete { negative: false });
        assert_eq!(parse_number("-."), ParsedNumber::Incomplete { negative: true });
        assert_eq!(parse_number("abc"), ParsedNumber::Invalid);
        assert_eq!(parse_number("1.2.3"), ParsedNumber::Invalid);
        assert_eq!(parse_number("1,5"), ParsedNumber::Invalid);
        assert_eq!(parse_number("1e3"), ParsedNumber::Invalid);
        assert_eq!(parse_number("--1"), ParsedNumber::Invalid);
        assert_eq!(parse_number("12 3"), ParsedNumber::Invalid);
    }

    #[test]
    fn test_parse_number_overflow() {
        assert_eq!(parse_number("99999999999999999999"), ParsedNumber::Overflow);
        // i64::MAX hundredths is fine
        assert_eq!(
            parse_number("92233720368547758.07"),
            ParsedNumber::Value(i64::MAX)
        );
        assert_eq!(parse_number("92233720368547758.075"), ParsedNumber::Overflow);
    }

    #[test]
    fn test_validate_amount() {
        let free = TipInput::FreeText;
        assert!(validate_edit(Field::Amount, "", free).is_ok());
        assert!(validate_edit(Field::Amount, "0", free).is_ok());
        assert!(validate_edit(Field::Amount, "1500.75", free).is_ok());
        assert!(validate_edit(Field::Amount, ".", free).is_ok());

        assert_eq!(
            validate_edit(Field::Amount, "-5", free),
            Err(ValidationError::Negative {
                field: "amount".to_string()
            })
        );
        assert!(validate_edit(Field::Amount, "-", free).is_err());
        assert!(matches!(
            validate_edit(Field::Amount, "ten", free),
            Err(ValidationError::InvalidFormat { .. })
        ));
    }

    #[test]
    fn test_validate_discount() {
        let free = TipInput::FreeText;
        assert!(validate_edit(Field::Discount, "0", free).is_ok());
        assert!(validate_edit(Field::Discount, "100", free).is_ok());
        assert!(validate_edit(Field::Discount, "12.5", free).is_ok());

        let expected = Err(ValidationError::OutOfRange {
            field: "discount".to_string(),
            min: 0,
            max: 100,
        });
        assert_eq!(validate_edit(Field::Discount, "150", free), expected);
        assert_eq!(validate_edit(Field::Discount, "100.01", free), expected);
        assert_eq!(validate_edit(Field::Discount, "-1", free), expected);
    }

    #[test]
    fn test_validate_tip() {
        assert!(validate_edit(Field::Tip, "250", TipInput::FreeText).is_ok());
        assert!(validate_edit(Field::Tip, "-1", TipInput::FreeText).is_err());
        // Slider snaps instead of rejecting
        assert!(validate_edit(Field::Tip, "250", TipInput::Slider).is_ok());
        assert!(validate_edit(Field::Tip, "-1", TipInput::Slider).is_ok());
        assert!(validate_edit(Field::Tip, "lots", TipInput::Slider).is_err());
    }

    #[test]
    fn test_validate_party_size() {
        let free = TipInput::FreeText;
        assert!(validate_edit(Field::PartySize, "", free).is_ok());
        assert!(validate_edit(Field::PartySize, "1", free).is_ok());
        assert!(validate_edit(Field::PartySize, "2.5", free).is_ok());

        let expected = Err(ValidationError::TooSmall {
            field: "party size".to_string(),
            min: 1,
        });
        assert_eq!(validate_edit(Field::PartySize, "0", free), expected);
        assert_eq!(validate_edit(Field::PartySize, "0.5", free), expected);
        assert_eq!(validate_edit(Field::PartySize, "-2", free), expected);
    }

    #[test]
    fn test_range_uses_typed_value_not_rounded() {
        let free = TipInput::FreeText;
        assert_eq!(
            validate_edit(Field::Discount, "100.004", free),
            Err(ValidationError::OutOfRange {
                field: "discount".to_string(),
                min: 0,
                max: 100,
            })
        );
        assert_eq!(
            validate_edit(Field::PartySize, "0.995", free),
            Err(ValidationError::TooSmall {
                field: "party size".to_string(),
                min: 1,
            })
        );
        assert_eq!(
            validate_edit(Field::Amount, "-0.004", free),
            Err(ValidationError::Negative {
                field: "amount".to_string()
            })
        );

        // Trailing zeros past the second digit are still exact
        assert!(validate_edit(Field::Discount, "100.000", free).is_ok());
        assert!(validate_edit(Field::Amount, "-0.000", free).is_ok());
        assert!(validate_edit(Field::PartySize, "1.0001", free).is_ok());
        assert_eq!(discount_or_zero("100.004"), Percentage::zero());
        assert_eq!(discount_or_zero("99.995"), Percentage::MAX_DISCOUNT);
    }

    #[test]
    fn test_party_size_floors_typed_value() {
        assert_eq!(party_size_or_one("2.999").get(), 2);
        assert_eq!(party_size_or_one("2.995").get(), 2);
        assert_eq!(party_size_or_one("1.999").get(), 1);
        assert_eq!(party_size_or_one("0.999").get(), 1);
    }

    #[test]
    fn test_slider_accepts_lone_minus() {
        assert!(validate_edit(Field::Tip, "-", TipInput::Slider).is_ok());
        assert!(validate_edit(Field::Tip, "-.", TipInput::Slider).is_ok());
        assert!(validate_edit(Field::Tip, "-", TipInput::FreeText).is_err());
        assert_eq!(snap_to_slider("-"), Some(Percentage::zero()));
    }

    #[test]
    fn test_coercion_defaults() {
        assert_eq!(amount_or_zero("-5"), Money::zero());
        assert_eq!(amount_or_zero("abc"), Money::zero());
        assert_eq!(amount_or_zero("12."), Money::from_major(12));

        assert_eq!(discount_or_zero("20"), Percentage::from_whole(20));
        assert_eq!(discount_or_zero("150"), Percentage::zero());
        assert_eq!(discount_or_zero(""), Percentage::zero());

        assert_eq!(tip_or_zero("18", TipInput::FreeText), Percentage::from_whole(18));
        assert_eq!(tip_or_zero("45", TipInput::FreeText), Percentage::from_whole(45));
        assert_eq!(tip_or_zero("45", TipInput::Slider), Percentage::from_whole(30));
        assert_eq!(tip_or_zero("x", TipInput::Slider), Percentage::zero());

        assert_eq!(party_size_or_one(""), PartySize::one());
        assert_eq!(party_size_or_one("-4"), PartySize::one());
        assert_eq!(party_size_or_one("3"), PartySize::new(3));
    }

    #[test]
    fn test_snap_to_slider_edges() {
        assert_eq!(snap_to_slider(""), Some(Percentage::zero()));
        assert_eq!(snap_to_slider("30"), Some(Percentage::from_whole(30)));
        assert_eq!(snap_to_slider("29.5"), Some(Percentage::from_whole(30)));
        assert_eq!(snap_to_slider("0.4"), Some(Percentage::zero()));
        assert_eq!(snap_to_slider("1e9"), None);
    }
}
