//! # Session State
//!
//! The calculator session plus everything needed to render it.

use pricecalc_core::{CalculationResult, CalculatorSession, CurrencyFormatter};

use crate::error::{ConfigError, ConfigResult};
use crate::state::ConfigState;

/// Owned by the input loop; every command mutates it through `&mut`.
#[derive(Debug, Clone)]
pub struct SessionState {
    pub session: CalculatorSession,
    pub formatter: CurrencyFormatter,
    pub json: bool,
}

impl SessionState {
    /// Builds the initial state from validated configuration.
    pub fn from_config(config: &ConfigState) -> ConfigResult<Self> {
        config.validate()?;

        let mut session = CalculatorSession::new(config.variant, config.policy);
        if let Some(currency) = config.currency {
            session
                .select_currency(currency)
                .map_err(|e| ConfigError::Invalid(e.to_string()))?;
        }

        Ok(SessionState {
            session,
            formatter: CurrencyFormatter::new(config.locale),
            json: config.json,
        })
    }

    /// Recomputes the current result.
    pub fn result(&self) -> CalculationResult {
        self.session.result(&self.formatter)
    }
}
