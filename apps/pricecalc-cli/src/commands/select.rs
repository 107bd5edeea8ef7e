//! # Selection Commands
//!
//! `currency` and `mode`. Switching either never touches the entered
//! text; amounts are re-rendered, not converted.

use pricecalc_core::{Currency, Mode};
use tracing::{info, warn};

use crate::error::ApiError;
use crate::state::SessionState;

pub fn currency(state: &mut SessionState, currency: Currency) -> Result<(), ApiError> {
    let variant = state.session.variant();
    state.session.select_currency(currency).map_err(|e| {
        warn!(%currency, %variant, "Currency not offered");
        ApiError::from(e)
    })?;
    info!(%currency, "Currency selected");
    Ok(())
}

pub fn mode(state: &mut SessionState, mode: Mode) -> Result<(), ApiError> {
    let variant = state.session.variant();
    state.session.select_mode(mode).map_err(|e| {
        warn!(%mode, %variant, "Mode not offered");
        ApiError::from(e)
    })?;
    info!(%mode, "Mode selected");
    Ok(())
}
