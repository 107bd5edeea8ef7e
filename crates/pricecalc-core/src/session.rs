//! # Calculator Session
//!
//! The input state a presentation layer owns: raw field text plus the
//! selected currency and mode. Edits go through the policy gate; results
//! are recomputed from scratch every time they are asked for.
//!
//! ## Edit Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  UI event                 Session call               State change       │
//! │  ────────                 ────────────               ────────────       │
//! │                                                                         │
//! │  Type in field ─────────► edit(field, text) ──┬───► text stored         │
//! │                                               └───► Err: text kept      │
//! │                                                                         │
//! │  Click currency ────────► select_currency(c) ─────► currency = c        │
//! │                                                                         │
//! │  Click tab ─────────────► select_mode(m) ─────────► mode = m            │
//! │                                                                         │
//! │  Render ────────────────► result(&formatter) ─────► (read only)         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//! ```rust
//! use pricecalc_core::calc::CalculationResult;
//! use pricecalc_core::format::CurrencyFormatter;
//! use pricecalc_core::session::CalculatorSession;
//! use pricecalc_core::types::{EditPolicy, Field, Variant};
//!
//! let mut session = CalculatorSession::new(Variant::Discount, EditPolicy::Strict);
//! session.edit(Field::Amount, "100").unwrap();
//! session.edit(Field::Discount, "20").unwrap();
//!
//! // Out of range: rejected, "20" stays
//! assert!(session.edit(Field::Discount, "150").is_err());
//!
//! match session.result(&CurrencyFormatter::default()) {
//!     CalculationResult::Discount(shown) => assert_eq!(shown.final_amount, "$80"),
//!     CalculationResult::Tip(_) => unreachable!(),
//! }
//! ```

use serde::{Deserialize, Deserializer, Serialize};
use ts_rs::TS;

use crate::calc::{self, CalculationResult, DiscountBreakdown, TipBreakdown};
use crate::error::ValidationError;
use crate::format::CurrencyFormatter;
use crate::types::{Currency, EditPolicy, Field, Mode, TipInput, Variant};
use crate::validation::{self, ParsedNumber, ValidationResult};

/// Raw text of every input field, exactly as displayed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Inputs {
    pub amount: String,
    pub discount: String,
    pub tip: String,
    pub party_size: String,
}

impl Inputs {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Amount => &self.amount,
            Field::Discount => &self.discount,
            Field::Tip => &self.tip,
            Field::PartySize => &self.party_size,
        }
    }

    fn slot_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::Amount => &mut self.amount,
            Field::Discount => &mut self.discount,
            Field::Tip => &mut self.tip,
            Field::PartySize => &mut self.party_size,
        }
    }
}

/// One calculator instance.
///
/// ## Invariants
/// - `currency` is always one of `variant.currencies()`
/// - `mode` is always one of `variant.modes()`
/// - Under [`EditPolicy::Strict`] every stored field passes
///   [`validation::validate_edit`]
///
/// Deserializing replays the stored state through the same methods, so
/// decoded sessions hold the invariants too.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CalculatorSession {
    variant: Variant,
    policy: EditPolicy,
    currency: Currency,
    mode: Mode,
    inputs: Inputs,
}

impl CalculatorSession {
    /// Creates a session with empty fields, the variant's first currency and
    /// its first mode.
    pub fn new(variant: Variant, policy: EditPolicy) -> Self {
        CalculatorSession {
            variant,
            policy,
            currency: variant.currencies()[0],
            mode: variant.modes()[0],
            inputs: Inputs::default(),
        }
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    pub fn policy(&self) -> EditPolicy {
        self.policy
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn inputs(&self) -> &Inputs {
        &self.inputs
    }

    /// Applies an edit to a field.
    ///
    /// ## Behavior
    /// - Field not used by the variant: `Unavailable`
    /// - Strict policy and the text fails the gate: error, text unchanged
    /// - Slider tip: numeric text is stored snapped to `[0, 30]`
    /// - Otherwise the text is stored as typed
    pub fn edit(&mut self, field: Field, text: &str) -> ValidationResult<()> {
        if !self.variant.supports_field(field) {
            return Err(ValidationError::Unavailable {
                field: field.label().to_string(),
                available: self.variant.fields().iter().map(|f| f.label().to_string()).collect(),
            });
        }

        let tip_input = self.variant.tip_input();
        if self.policy == EditPolicy::Strict {
            validation::validate_edit(field, text, tip_input)?;
        }

        let stored = if field == Field::Tip && tip_input == TipInput::Slider {
            snapped_slider_text(text)
        } else {
            text.to_string()
        };
        *self.inputs.slot_mut(field) = stored;
        Ok(())
    }

    /// Empties a field. Always accepted for fields the variant uses.
    pub fn clear(&mut self, field: Field) -> ValidationResult<()> {
        self.edit(field, "")
    }

    /// Switches the display currency. Amounts are not converted.
    pub fn select_currency(&mut self, currency: Currency) -> ValidationResult<()> {
        if !self.variant.supports_currency(currency) {
            return Err(ValidationError::NotAllowed {
                field: "currency".to_string(),
                allowed: self.variant.currencies().iter().map(|c| c.code().to_string()).collect(),
            });
        }
        self.currency = currency;
        Ok(())
    }

    /// Switches the active tab.
    pub fn select_mode(&mut self, mode: Mode) -> ValidationResult<()> {
        if !self.variant.supports_mode(mode) {
            return Err(ValidationError::NotAllowed {
                field: "mode".to_string(),
                allowed: self.variant.modes().iter().map(|m| m.as_str().to_string()).collect(),
            });
        }
        self.mode = mode;
        Ok(())
    }

    /// Clears every field. Currency and mode are kept.
    pub fn reset(&mut self) {
        self.inputs = Inputs::default();
    }

    /// Discount breakdown from the current text.
    pub fn discount_breakdown(&self) -> DiscountBreakdown {
        calc::discount(
            validation::amount_or_zero(&self.inputs.amount),
            validation::discount_or_zero(&self.inputs.discount),
        )
    }

    /// Tip breakdown from the current text.
    pub fn tip_breakdown(&self) -> TipBreakdown {
        calc::tip_split(
            validation::amount_or_zero(&self.inputs.amount),
            validation::tip_or_zero(&self.inputs.tip, self.variant.tip_input()),
            validation::party_size_or_one(&self.inputs.party_size),
        )
    }

    /// Recomputes the active mode and formats it. Never fails.
    pub fn result(&self, formatter: &CurrencyFormatter) -> CalculationResult {
        match self.mode {
            Mode::Discount => {
                CalculationResult::Discount(self.discount_breakdown().display(formatter, self.currency))
            }
            Mode::Tip => CalculationResult::Tip(self.tip_breakdown().display(formatter, self.currency)),
        }
    }
}

impl Default for CalculatorSession {
    fn default() -> Self {
        CalculatorSession::new(Variant::default(), EditPolicy::default())
    }
}

/// Wire shape of a session before its invariants are checked.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SessionData {
    variant: Variant,
    policy: EditPolicy,
    currency: Currency,
    mode: Mode,
    #[serde(default)]
    inputs: Inputs,
}

impl SessionData {
    fn replay(self) -> ValidationResult<CalculatorSession> {
        let mut session = CalculatorSession::new(self.variant, self.policy);
        session.select_currency(self.currency)?;
        session.select_mode(self.mode)?;
        for field in [Field::Amount, Field::Discount, Field::Tip, Field::PartySize] {
            let text = self.inputs.get(field);
            if !text.is_empty() {
                session.edit(field, text)?;
            }
        }
        Ok(session)
    }
}

impl<'de> Deserialize<'de> for CalculatorSession {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let data = SessionData::deserialize(deserializer)?;
        data.replay().map_err(serde::de::Error::custom)
    }
}

fn snapped_slider_text(text: &str) -> String {
    if parse_is_empty(text) {
        return String::new();
    }
    match validation::snap_to_slider(text) {
        Some(rate) => (rate.bps() / 100).to_string(),
        None => text.to_string(),
    }
}

fn parse_is_empty(text: &str) -> bool {
    validation::parse_number(text) == ParsedNumber::Empty
}

// =============================================================================
// Unit Tests
// =============================================================================
