//! # State Module
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────────────┐          ┌──────────────────────────────┐    │
//! │  │    ConfigState       │  build   │    SessionState              │    │
//! │  │                      │ ───────► │                              │    │
//! │  │  variant, currency   │          │  CalculatorSession           │    │
//! │  │  locale, policy      │          │  CurrencyFormatter           │    │
//! │  │  json                │          │  json flag                   │    │
//! │  └──────────────────────┘          └──────────────────────────────┘    │
//! │                                                                         │
//! │  ConfigState is read once at startup. SessionState is owned by the     │
//! │  input loop and mutated by one command at a time.                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod session;

pub use config::ConfigState;
pub use session::SessionState;
