//! # Cash Configuration
//!
//! Chooses the currency configuration a program works in.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     CASH_PRESET=eur                                                    │
//! │     CASH_FRACTION_DIGITS=3                                             │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     passed explicitly, e.g. --config ./cash.toml                       │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     Preset::Usd, no overrides                                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # cash.toml
//! [currency]
//! preset = "eur"            # usd | eur | btc
//! symbol = "€"              # optional field overrides on top of the preset
//! decimal_separator = ","
//! group_separator = "."
//! fraction_digits = 2
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, warn};

use crate::currency::{CurrencyConfig, Preset, MAX_FRACTION_DIGITS};
use crate::error::{MoneyError, MoneyResult};

// =============================================================================
// Currency Settings
// =============================================================================

/// Preset plus optional per-field overrides.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencySettings {
    /// Preset the configuration starts from.
    #[serde(default)]
    pub preset: Preset,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbol: Option<char>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decimal_separator: Option<char>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_separator: Option<char>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fraction_digits: Option<u32>,
}

impl CurrencySettings {
    /// The preset with every override applied.
    pub fn resolve(&self) -> CurrencyConfig {
        let mut config = self.preset.config();
        if let Some(symbol) = self.symbol {
            config.symbol = symbol;
        }
        if let Some(decimal) = self.decimal_separator {
            config.decimal_separator = decimal;
        }
        if let Some(group) = self.group_separator {
            config.group_separator = group;
        }
        if let Some(digits) = self.fraction_digits {
            config.fraction_digits = digits;
        }
        config
    }
}

// =============================================================================
// Cash Config
// =============================================================================

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CashConfig {
    #[serde(default)]
    pub currency: CurrencySettings,
}

impl CashConfig {
    /// Loads configuration from an optional file, then the environment.
    ///
    /// A missing file is not an error; defaults are used instead.
    pub fn load(config_path: Option<&Path>) -> MoneyResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path {
            if path.exists() {
                info!(?path, "Loading cash config from file");
                let contents = std::fs::read_to_string(path)?;
                config = Self::from_toml_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Parses configuration from TOML text.
    pub fn from_toml_str(contents: &str) -> MoneyResult<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// The resolved currency configuration.
    pub fn currency(&self) -> CurrencyConfig {
        self.currency.resolve()
    }

    /// Validates the resolved currency configuration.
    ///
    /// ## Rules
    /// - `fraction_digits` at most 10
    /// - decimal and group separators differ
    /// - the symbol differs from both separators
    /// - no digit, sign or parenthesis is used as symbol or separator
    pub fn validate(&self) -> MoneyResult<()> {
        let currency = self.currency();

        if currency.fraction_digits > MAX_FRACTION_DIGITS {
            return Err(MoneyError::InvalidConfig(format!(
                "fraction_digits must be at most {}, got {}",
                MAX_FRACTION_DIGITS, currency.fraction_digits
            )));
        }

        if currency.decimal_separator == currency.group_separator {
            return Err(MoneyError::InvalidConfig(format!(
                "decimal and group separators are both '{}'",
                currency.decimal_separator
            )));
        }

        if currency.symbol == currency.decimal_separator
            || currency.symbol == currency.group_separator
        {
            return Err(MoneyError::InvalidConfig(format!(
                "symbol '{}' collides with a separator",
                currency.symbol
            )));
        }

        for (field, c) in [
            ("symbol", currency.symbol),
            ("decimal_separator", currency.decimal_separator),
            ("group_separator", currency.group_separator),
        ] {
            if c.is_ascii_digit() || matches!(c, '-' | '+' | '(' | ')') {
                return Err(MoneyError::InvalidConfig(format!(
                    "{} cannot be '{}'",
                    field, c
                )));
            }
        }

        Ok(())
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(preset) = std::env::var("CASH_PRESET") {
            match preset.parse() {
                Ok(parsed) => {
                    debug!(preset = %preset, "Overriding currency preset from environment");
                    self.currency.preset = parsed;
                }
                Err(_) => warn!(preset = %preset, "Unknown currency preset in environment"),
            }
        }

        if let Ok(digits) = std::env::var("CASH_FRACTION_DIGITS") {
            match digits.parse::<u32>() {
                Ok(d) => {
                    debug!(fraction_digits = d, "Overriding fraction digits from environment");
                    self.currency.fraction_digits = Some(d);
                }
                Err(_) => warn!(value = %digits, "Invalid CASH_FRACTION_DIGITS in environment"),
            }
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
