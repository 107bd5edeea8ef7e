//! # Commands Module
//!
//! One command per input line. Each command maps onto one session
//! operation:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Line               Command            Session call                     │
//! │  ─────────────────  ─────────────────  ───────────────────────────────  │
//! │  amount 100         Edit               edit(Amount, "100")              │
//! │  discount           Edit (empty)       clear(Discount)                  │
//! │  tip 15             Edit               edit(Tip, "15")                  │
//! │  people 3           Edit               edit(PartySize, "3")             │
//! │  currency usd       Currency           select_currency(Usd)             │
//! │  mode tip           Mode               select_mode(Tip)                 │
//! │  show               Show               result()                         │
//! │  reset              Reset              reset()                          │
//! │  help / quit        Help / Quit        -                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod edit;
pub mod select;

use pricecalc_core::{CalculationResult, Currency, Field, Mode};
use tracing::debug;

use crate::error::ApiError;
use crate::state::SessionState;

/// A parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Replace a field's text. Empty text clears it.
    Edit { field: Field, text: String },
    Currency(Currency),
    Mode(Mode),
    Show,
    Reset,
    Help,
    Quit,
}

/// What a command produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Result(CalculationResult),
    Help(Vec<&'static str>),
    Quit,
}

/// Usage lines printed by `help`.
pub const HELP: &[&str] = &[
    "amount <number>     set the price or bill (empty clears)",
    "discount <percent>  set the discount rate",
    "tip <percent>       set the tip rate",
    "people <count>      set the party size",
    "currency <code>     switch display currency (CLP, USD, EUR)",
    "mode <mode>         switch between discount and tip",
    "show                print the current result",
    "reset               clear every field",
    "help                show this list",
    "quit                leave",
];

impl Command {
    /// Parses one line. Blank lines and `#` comments yield `None`.
    pub fn parse_line(line: &str) -> Result<Option<Command>, ApiError> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(None);
        }

        let (verb, rest) = match line.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, rest.trim()),
            None => (line, ""),
        };
        let verb = verb.to_lowercase();

        let command = match verb.as_str() {
            "currency" => Command::Currency(required(&verb, rest)?.parse()?),
            "mode" => Command::Mode(required(&verb, rest)?.parse()?),
            "show" | "=" => Command::Show,
            "reset" | "clear" => Command::Reset,
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            other => match other.parse::<Field>() {
                Ok(field) => Command::Edit {
                    field,
                    text: rest.to_string(),
                },
                Err(_) => return Err(ApiError::unknown_command(other)),
            },
        };

        Ok(Some(command))
    }
}

fn required<'a>(verb: &str, arg: &'a str) -> Result<&'a str, ApiError> {
    if arg.is_empty() {
        Err(ApiError::missing_argument(verb))
    } else {
        Ok(arg)
    }
}

/// Runs a command against the session.
///
/// On error the session is exactly as it was before the call.
pub fn execute(state: &mut SessionState, command: Command) -> Result<Reply, ApiError> {
    debug!(?command, "Executing command");

    match command {
        Command::Edit { field, text } => edit::apply(state, field, &text)?,
        Command::Currency(currency) => select::currency(state, currency)?,
        Command::Mode(mode) => select::mode(state, mode)?,
        Command::Reset => {
            state.session.reset();
            debug!("Session reset");
        }
        Command::Show => {}
        Command::Help => return Ok(Reply::Help(HELP.to_vec())),
        Command::Quit => return Ok(Reply::Quit),
    }

    Ok(Reply::Result(state.result()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::state::ConfigState;

    fn state() -> SessionState {
        SessionState::from_config(&ConfigState::default()).unwrap()
    }

    fn run(state: &mut SessionState, line: &str) -> Result<Reply, ApiError> {
        let command = Command::parse_line(line)?.expect("line is a command");
        execute(state, command)
    }

    #[test]
    fn test_parse_field_commands() {
        assert_eq!(
            Command::parse_line("amount 100").unwrap(),
            Some(Command::Edit {
                field: Field::Amount,
                text: "100".to_string()
            })
        );
        assert_eq!(
            Command::parse_line("  PEOPLE   4 ").unwrap(),
            Some(Command::Edit {
                field: Field::PartySize,
                text: "4".to_string()
            })
        );
        assert_eq!(
            Command::parse_line("discount").unwrap(),
            Some(Command::Edit {
                field: Field::Discount,
                text: String::new()
            })
        );
    }

    #[test]
    fn test_parse_selectors() {
        assert_eq!(Command::parse_line("currency usd").unwrap(), Some(Command::Currency(Currency::Usd)));
        assert_eq!(Command::parse_line("mode propina").unwrap(), Some(Command::Mode(Mode::Tip)));
        assert_eq!(Command::parse_line("quit").unwrap(), Some(Command::Quit));
    }

    #[test]
    fn test_parse_skips_blank_and_comments() {
        assert_eq!(Command::parse_line("").unwrap(), None);
        assert_eq!(Command::parse_line("   ").unwrap(), None);
        assert_eq!(Command::parse_line("# a note").unwrap(), None);
    }

    #[test]
    fn test_parse_errors() {
        let err = Command::parse_line("fly 3").unwrap_err();
        assert_eq!(err.code, ErrorCode::UnknownCommand);

        let err = Command::parse_line("currency").unwrap_err();
        assert_eq!(err.code, ErrorCode::MissingArgument);

        let err = Command::parse_line("currency GBP").unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidInput);
    }

    #[test]
    fn test_discount_flow() {
        let mut state = state();
        run(&mut state, "amount 100").unwrap();
        let reply = run(&mut state, "discount 20").unwrap();
        match reply {
            Reply::Result(CalculationResult::Discount(d)) => {
                assert_eq!(d.discount_amount, "$20");
                assert_eq!(d.final_amount, "$80");
                assert_eq!(d.saved_amount, "$20");
            }
            other => panic!("unexpected reply: {:?}", other),
        }
    }

    #[test]
    fn test_rejected_edit_keeps_state() {
        let mut state = state();
        run(&mut state, "discount 20").unwrap();
        let err = run(&mut state, "discount 150").unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(state.session.inputs().get(Field::Discount), "20");
    }

    #[test]
    fn test_help_and_quit() {
        let mut state = state();
        assert_eq!(run(&mut state, "help").unwrap(), Reply::Help(HELP.to_vec()));
        assert_eq!(run(&mut state, "quit").unwrap(), Reply::Quit);
    }
}
