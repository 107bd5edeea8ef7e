//! # Edit Commands
//!
//! `amount`, `discount`, `tip` and `people`.

use pricecalc_core::Field;
use tracing::{debug, warn};

use crate::error::ApiError;
use crate::state::SessionState;

/// Applies typed text to a field. Empty text clears the field.
///
/// Under the strict policy a rejected edit leaves the previous text in
/// place.
pub fn apply(state: &mut SessionState, field: Field, text: &str) -> Result<(), ApiError> {
    let outcome = if text.is_empty() {
        state.session.clear(field)
    } else {
        state.session.edit(field, text)
    };

    match outcome {
        Ok(()) => {
            debug!(%field, text, stored = state.session.inputs().get(field), "Edit accepted");
            Ok(())
        }
        Err(e) => {
            warn!(%field, text, error = %e, "Edit rejected");
            Err(e.into())
        }
    }
}
