//! # pricecalc Entry Point
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        pricecalc                                        │
//! │                                                                         │
//! │  stdin ──► commands/ ──► state/ (CalculatorSession) ──► output ──► stdout│
//! │                                                                         │
//! │  logs ──► stderr                                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::process::ExitCode;

fn main() -> ExitCode {
    // Setup lives in lib.rs so it can be tested
    pricecalc_cli::run()
}
