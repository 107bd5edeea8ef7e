//! # pricecalc Shell Library
//!
//! Line-oriented front end for `pricecalc-core`. Reads one command per
//! line, applies it to a [`CalculatorSession`](pricecalc_core::CalculatorSession)
//! and prints the recomputed result.
//!
//! ## Module Organization
//! ```text
//! pricecalc_cli/
//! ├── lib.rs          ◄─── You are here (flags, startup, input loop)
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── config.rs   ◄─── File / env / flag configuration
//! │   └── session.rs  ◄─── Session + formatter owned by the loop
//! ├── commands/
//! │   ├── mod.rs      ◄─── Line parsing and dispatch
//! │   ├── edit.rs     ◄─── amount, discount, tip, people
//! │   └── select.rs   ◄─── currency, mode
//! ├── output.rs       ◄─── Text and JSON rendering
//! └── error.rs        ◄─── ApiError / ConfigError
//! ```
//!
//! ## Example Session
//! ```text
//! $ pricecalc --variant combined --currency USD
//! amount 100
//! [USD discount] discount $0.00 | final $100.00 | saved $0.00
//! discount 20
//! [USD discount] discount $20.00 | final $80.00 | saved $20.00
//! discount 150
//! error: discount must be between 0 and 100
//! quit
//! ```

pub mod commands;
pub mod error;
pub mod output;
pub mod state;

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use pricecalc_core::{Currency, EditPolicy, NumberLocale, Variant};

use commands::{Command, Reply};
use state::{ConfigState, SessionState};

/// Discount and tip calculator.
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "pricecalc")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Config file (default: <config dir>/pricecalc/config.toml).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Calculator variant: discount, tip or combined.
    #[arg(long)]
    pub variant: Option<Variant>,

    /// Initial display currency: CLP, USD or EUR.
    #[arg(long)]
    pub currency: Option<Currency>,

    /// Number formatting locale: en-US, es-CL or de-DE.
    #[arg(long)]
    pub locale: Option<NumberLocale>,

    /// Edit policy: strict or lenient.
    #[arg(long)]
    pub policy: Option<EditPolicy>,

    /// Print one JSON object per line.
    #[arg(long)]
    pub json: bool,
}

/// Runs the shell over stdin/stdout.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  1. Initialize Logging ───► stderr, RUST_LOG or warn,pricecalc_cli=info │
/// │  2. Parse Flags ──────────► clap                                        │
/// │  3. Load Config ──────────► file, then PRICECALC_* env, then flags      │
/// │  4. Build Session ────────► variant, policy, currency, locale           │
/// │  5. Input Loop ───────────► until `quit` or end of input                │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn run() -> ExitCode {
    init_tracing();

    let cli = Cli::parse();

    let state = ConfigState::load(cli.config.clone()).and_then(|mut config| {
        config.apply_cli(&cli);
        SessionState::from_config(&config)
    });

    let mut state = match state {
        Ok(state) => state,
        Err(e) => {
            tracing::error!("Startup failed: {}", e);
            eprintln!("pricecalc: {}", e);
            return ExitCode::FAILURE;
        }
    };

    info!(
        variant = %state.session.variant(),
        policy = %state.session.policy(),
        currency = %state.session.currency(),
        locale = %state.formatter.locale(),
        "Starting pricecalc"
    );

    let stdin = io::stdin();
    let stdout = io::stdout();
    match run_session(&mut state, stdin.lock(), stdout.lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("I/O error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Reads commands from `input` until `quit` or end of input, writing one
/// reply per command to `out`.
///
/// Refused commands print an error line; the session continues.
pub fn run_session<R: BufRead, W: Write>(
    state: &mut SessionState,
    input: R,
    mut out: W,
) -> io::Result<()> {
    for line in input.lines() {
        let line = line?;

        let outcome = Command::parse_line(&line).and_then(|command| match command {
            Some(command) => commands::execute(state, command).map(Some),
            None => Ok(None),
        });

        match outcome {
            Ok(None) => continue,
            Ok(Some(Reply::Quit)) => break,
            Ok(Some(reply)) => output::write_reply(&mut out, &reply, state.json)?,
            Err(e) => output::write_error(&mut out, &e, state.json)?,
        }
        out.flush()?;
    }

    info!("Session ended");
    Ok(())
}

/// Initializes the tracing subscriber.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show every command and edit
/// - `RUST_LOG=pricecalc_cli=warn` - Only rejected edits
/// - Default: `warn,pricecalc_cli=info`
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,pricecalc_cli=info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(config: ConfigState, script: &str) -> String {
        let mut state = SessionState::from_config(&config).unwrap();
        let mut out = Vec::new();
        run_session(&mut state, script.as_bytes(), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_scripted_discount_session() {
        let config = ConfigState {
            currency: Some(Currency::Usd),
            ..ConfigState::default()
        };
        let out = session(
            config,
            "# price check\namount 100\ndiscount 20\n\ndiscount 150\nquit\namount 5\n",
        );
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(
            lines,
            vec![
                "[USD discount] discount $0.00 | final $100.00 | saved $0.00",
                "[USD discount] discount $20.00 | final $80.00 | saved $20.00",
                "error: discount must be between 0 and 100",
            ]
        );
    }

    #[test]
    fn test_scripted_tip_session() {
        let config = ConfigState {
            variant: Variant::Tip,
            ..ConfigState::default()
        };
        let out = session(config, "amount 200\ntip 10\npeople 2\ncurrency usd\ncurrency eur\n");
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[2], "[CLP tip] tip $20 | total $220 | per person $110");
        assert_eq!(lines[3], "[USD tip] tip $20.00 | total $220.00 | per person $110.00");
        assert!(lines[4].starts_with("error: currency must be one of"));
    }

    #[test]
    fn test_json_session() {
        let config = ConfigState {
            json: true,
            ..ConfigState::default()
        };
        let out = session(config, "amount 100\nfly\n");
        let lines: Vec<serde_json::Value> = out
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(lines[0]["finalAmount"], "$100");
        assert_eq!(lines[1]["error"]["code"], "UNKNOWN_COMMAND");
    }

    #[test]
    fn test_end_of_input_ends_session() {
        assert_eq!(session(ConfigState::default(), ""), "");
    }

    #[test]
    fn test_cli_flags_parse() {
        let cli = Cli::parse_from([
            "pricecalc",
            "--variant",
            "tip",
            "--currency",
            "usd",
            "--locale",
            "es-CL",
            "--policy",
            "lenient",
        ]);
        assert_eq!(cli.variant, Some(Variant::Tip));
        assert_eq!(cli.currency, Some(Currency::Usd));
        assert_eq!(cli.locale, Some(NumberLocale::EsCl));
        assert_eq!(cli.policy, Some(EditPolicy::Lenient));
        assert!(!cli.json);
    }

    #[test]
    fn test_cli_rejects_unknown_variant() {
        assert!(Cli::try_parse_from(["pricecalc", "--variant", "bicycle"]).is_err());
    }
}
