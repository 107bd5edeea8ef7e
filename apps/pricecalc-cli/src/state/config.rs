//! # Configuration State
//!
//! Startup settings for the shell.
//!
//! ## Configuration Sources (later overrides earlier)
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. Defaults (this file)                                                │
//! │  2. Config file                                                         │
//! │     ~/.config/pricecalc/config.toml (Linux)                             │
//! │     ~/Library/Application Support/pricecalc/config.toml (macOS)         │
//! │  3. Environment variables (PRICECALC_*)                                 │
//! │  4. Command-line flags                                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//! ```toml
//! # config.toml
//! variant = "tip"
//! currency = "USD"
//! locale = "en-US"
//! policy = "lenient"
//! json = false
//! ```

use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use pricecalc_core::{Currency, EditPolicy, NumberLocale, Variant};

use crate::error::{ConfigError, ConfigResult};
use crate::Cli;

/// Shell configuration.
///
/// `currency: None` means "the first currency the variant offers".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigState {
    pub variant: Variant,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<Currency>,
    pub locale: NumberLocale,
    pub policy: EditPolicy,
    /// Print JSON lines instead of text.
    pub json: bool,
}

impl ConfigState {
    /// Loads configuration from file and environment.
    ///
    /// A missing file is not an error; an unreadable or malformed one is.
    pub fn load(config_path: Option<PathBuf>) -> ConfigResult<Self> {
        let mut config = match config_path.or_else(Self::default_config_path) {
            Some(path) if path.exists() => Self::from_file(&path)?,
            Some(path) => {
                debug!(?path, "Config file not found, using defaults");
                Self::default()
            }
            None => Self::default(),
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// Loads config or returns defaults if the file is unusable.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load config: {}. Using defaults.", e);
            let mut config = Self::default();
            config.apply_env_overrides();
            config
        })
    }

    /// Reads one TOML file.
    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        info!(?path, "Loading config from file");
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// Applies `PRICECALC_*` environment variables.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|key| std::env::var(key).ok());
    }

    /// Applies overrides read through `lookup`. Unparseable values are
    /// logged and ignored.
    pub fn apply_overrides_from(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(value) = lookup("PRICECALC_VARIANT") {
            if let Some(variant) = parse_override("PRICECALC_VARIANT", &value) {
                debug!(%variant, "Overriding variant from environment");
                self.variant = variant;
            }
        }

        if let Some(value) = lookup("PRICECALC_CURRENCY") {
            if let Some(currency) = parse_override("PRICECALC_CURRENCY", &value) {
                debug!(%currency, "Overriding currency from environment");
                self.currency = Some(currency);
            }
        }

        if let Some(value) = lookup("PRICECALC_LOCALE") {
            if let Some(locale) = parse_override("PRICECALC_LOCALE", &value) {
                self.locale = locale;
            }
        }

        if let Some(value) = lookup("PRICECALC_POLICY") {
            if let Some(policy) = parse_override("PRICECALC_POLICY", &value) {
                self.policy = policy;
            }
        }
    }

    /// Applies command-line flags, which win over everything else.
    pub fn apply_cli(&mut self, cli: &Cli) {
        if let Some(variant) = cli.variant {
            self.variant = variant;
        }
        if let Some(currency) = cli.currency {
            self.currency = Some(currency);
        }
        if let Some(locale) = cli.locale {
            self.locale = locale;
        }
        if let Some(policy) = cli.policy {
            self.policy = policy;
        }
        if cli.json {
            self.json = true;
        }
    }

    /// Checks that the settings fit together.
    pub fn validate(&self) -> ConfigResult<()> {
        if let Some(currency) = self.currency {
            if !self.variant.supports_currency(currency) {
                return Err(ConfigError::Invalid(format!(
                    "currency {} is not offered by the {} variant",
                    currency, self.variant
                )));
            }
        }
        Ok(())
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "pricecalc")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }
}

fn parse_override<T: FromStr>(key: &str, value: &str) -> Option<T>
where
    T::Err: std::fmt::Display,
{
    match value.parse() {
        Ok(parsed) => Some(parsed),
        Err(e) => {
            warn!(key, value, "Ignoring environment override: {}", e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    fn scratch_file(name: &str, contents: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("pricecalc-test-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_defaults() {
        let config = ConfigState::default();
        assert_eq!(config.variant, Variant::Combined);
        assert_eq!(config.currency, None);
        assert_eq!(config.locale, NumberLocale::EnUs);
        assert_eq!(config.policy, EditPolicy::Strict);
        assert!(!config.json);
    }

    #[test]
    fn test_toml_round_trip() {
        let config = ConfigState {
            variant: Variant::Tip,
            currency: Some(Currency::Usd),
            locale: NumberLocale::EsCl,
            policy: EditPolicy::Lenient,
            json: true,
        };
        let text = toml::to_string_pretty(&config).unwrap();
        assert!(text.contains("variant = \"tip\""));
        assert!(text.contains("currency = \"USD\""));
        assert!(text.contains("locale = \"es-CL\""));
        let back: ConfigState = toml::from_str(&text).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config: ConfigState = toml::from_str("policy = \"lenient\"\n").unwrap();
        assert_eq!(config.policy, EditPolicy::Lenient);
        assert_eq!(config.variant, Variant::Combined);
    }

    #[test]
    fn test_load_from_file() {
        let path = scratch_file("load.toml", "variant = \"discount\"\ncurrency = \"EUR\"\n");
        let config = ConfigState::from_file(&path).unwrap();
        assert_eq!(config.variant, Variant::Discount);
        assert_eq!(config.currency, Some(Currency::Eur));
    }

    #[test]
    fn test_malformed_file_is_error() {
        let path = scratch_file("bad.toml", "variant = \"bicycle\"\n");
        let err = ConfigState::from_file(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_load_or_default_falls_back_on_bad_file() {
        let path = scratch_file("fallback.toml", "variant = [1, 2]\n");
        assert!(ConfigState::load(Some(path.clone())).is_err());

        let mut expected = ConfigState::default();
        expected.apply_env_overrides();
        assert_eq!(ConfigState::load_or_default(Some(path)), expected);
    }

    #[test]
    fn test_env_overrides_apply() {
        let vars = env(&[
            ("PRICECALC_VARIANT", "tip"),
            ("PRICECALC_CURRENCY", "usd"),
            ("PRICECALC_LOCALE", "de_DE"),
            ("PRICECALC_POLICY", "lenient"),
        ]);
        let mut config = ConfigState::default();
        config.apply_overrides_from(|k| vars.get(k).cloned());
        assert_eq!(config.variant, Variant::Tip);
        assert_eq!(config.currency, Some(Currency::Usd));
        assert_eq!(config.locale, NumberLocale::DeDe);
        assert_eq!(config.policy, EditPolicy::Lenient);
    }

    #[test]
    fn test_bad_env_value_is_ignored() {
        let vars = env(&[("PRICECALC_CURRENCY", "GBP")]);
        let mut config = ConfigState {
            currency: Some(Currency::Clp),
            ..ConfigState::default()
        };
        config.apply_overrides_from(|k| vars.get(k).cloned());
        assert_eq!(config.currency, Some(Currency::Clp));
    }

    #[test]
    fn test_flags_win_over_env() {
        let vars = env(&[("PRICECALC_VARIANT", "discount"), ("PRICECALC_POLICY", "lenient")]);
        let mut config = ConfigState::default();
        config.apply_overrides_from(|k| vars.get(k).cloned());

        let cli = Cli::parse_from(["pricecalc", "--variant", "tip", "--json"]);
        config.apply_cli(&cli);
        assert_eq!(config.variant, Variant::Tip);
        assert_eq!(config.policy, EditPolicy::Lenient);
        assert!(config.json);
    }

    #[test]
    fn test_validate_rejects_unoffered_currency() {
        let config = ConfigState {
            variant: Variant::Tip,
            currency: Some(Currency::Eur),
            ..ConfigState::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let config = ConfigState {
            variant: Variant::Combined,
            currency: Some(Currency::Eur),
            ..ConfigState::default()
        };
        assert!(config.validate().is_ok());
    }
}
