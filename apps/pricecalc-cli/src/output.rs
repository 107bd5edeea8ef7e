//! # Output Rendering
//!
//! Replies are printed one line each, as text or JSON:
//!
//! ```text
//! text:  [CLP discount] discount $20 | final $80 | saved $20
//!        [USD tip] tip $20.00 | total $220.00 | per person $110.00
//!        error: discount must be between 0 and 100
//!
//! json:  {"mode":"discount","currency":"CLP","discountAmount":"$20",...}
//!        {"error":{"code":"VALIDATION_ERROR","message":"..."}}
//! ```

use std::io::{self, Write};

use serde_json::json;

use pricecalc_core::CalculationResult;

use crate::commands::Reply;
use crate::error::ApiError;

/// Renders a result as one text line.
pub fn result_line(result: &CalculationResult) -> String {
    match result {
        CalculationResult::Discount(d) => format!(
            "[{} discount] discount {} | final {} | saved {}",
            d.currency, d.discount_amount, d.final_amount, d.saved_amount
        ),
        CalculationResult::Tip(t) => format!(
            "[{} tip] tip {} | total {} | per person {}",
            t.currency, t.tip_amount, t.total_amount, t.per_person_amount
        ),
    }
}

/// Writes a successful reply. `Quit` prints nothing.
pub fn write_reply<W: Write>(out: &mut W, reply: &Reply, as_json: bool) -> io::Result<()> {
    match (reply, as_json) {
        (Reply::Result(result), false) => writeln!(out, "{}", result_line(result)),
        (Reply::Result(result), true) => write_json(out, result),
        (Reply::Help(lines), false) => {
            for line in lines {
                writeln!(out, "  {}", line)?;
            }
            Ok(())
        }
        (Reply::Help(lines), true) => write_json(out, &json!({ "help": lines })),
        (Reply::Quit, _) => Ok(()),
    }
}

/// Writes a refused command.
pub fn write_error<W: Write>(out: &mut W, err: &ApiError, as_json: bool) -> io::Result<()> {
    if as_json {
        write_json(out, &json!({ "error": err }))
    } else {
        writeln!(out, "error: {}", err.message)
    }
}

fn write_json<W: Write, T: serde::Serialize + ?Sized>(out: &mut W, value: &T) -> io::Result<()> {
    serde_json::to_writer(&mut *out, value)?;
    writeln!(out)
}
