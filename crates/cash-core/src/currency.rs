//! # Currency Configuration
//!
//! The formatting/precision settings a money value carries, and the named
//! presets every value starts from.
//!
//! ## Compatibility
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Two values may be combined iff ALL four fields match:                 │
//! │                                                                         │
//! │    fraction_digits   symbol   decimal_separator   group_separator      │
//! │                                                                         │
//! │  USD  2  '$'  '.'  ','      ┐                                          │
//! │  EUR  2  '€'  '.'  ','      ├─ pairwise incompatible                   │
//! │  BTC  8  '฿'  '.'  ','      ┘                                          │
//! │                                                                         │
//! │  The amount itself never affects compatibility.                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::MoneyError;

/// Powers of ten indexed by fraction digits (0..=10).
pub const MINOR_UNIT: [i64; 11] = [
    1,
    10,
    100,
    1_000,
    10_000,
    100_000,
    1_000_000,
    10_000_000,
    100_000_000,
    1_000_000_000,
    10_000_000_000,
];

/// Largest supported number of fraction digits.
pub const MAX_FRACTION_DIGITS: u32 = 10;

/// Panics unless `digits` is within `0..=MAX_FRACTION_DIGITS`.
#[inline]
pub(crate) fn assert_fraction_digits(digits: u32) {
    assert!(
        digits <= MAX_FRACTION_DIGITS,
        "fraction digits {} out of range 0..={}",
        digits,
        MAX_FRACTION_DIGITS
    );
}

// =============================================================================
// Currency Configuration
// =============================================================================

/// Precision and symbol set of a currency.
///
/// Used only for formatting, parsing and the compatibility check; arithmetic
/// works on the integer amount alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CurrencyConfig {
    /// Currency sign written before the amount.
    pub symbol: char,

    /// Separator between major and minor units.
    pub decimal_separator: char,

    /// Separator inserted every three integer digits.
    pub group_separator: char,

    /// Number of minor-unit digits (2 for cents, 8 for satoshis).
    pub fraction_digits: u32,
}

impl CurrencyConfig {
    /// US dollar: `$1,234.56`.
    pub const USD: CurrencyConfig = CurrencyConfig {
        symbol: '$',
        decimal_separator: '.',
        group_separator: ',',
        fraction_digits: 2,
    };

    /// Euro: `€1,234.56`.
    pub const EUR: CurrencyConfig = CurrencyConfig {
        symbol: '€',
        decimal_separator: '.',
        group_separator: ',',
        fraction_digits: 2,
    };

    /// Bitcoin: `฿0.00000001`.
    pub const BTC: CurrencyConfig = CurrencyConfig {
        symbol: '฿',
        decimal_separator: '.',
        group_separator: ',',
        fraction_digits: 8,
    };

    /// Returns `10^fraction_digits`.
    ///
    /// ## Panics
    /// If `fraction_digits` exceeds [`MAX_FRACTION_DIGITS`]. That is a
    /// programming error, not a runtime condition.
    #[inline]
    pub fn minor_unit_factor(&self) -> i64 {
        assert_fraction_digits(self.fraction_digits);
        MINOR_UNIT[self.fraction_digits as usize]
    }

    /// Can values with these two configurations be combined?
    #[inline]
    pub fn is_compatible(&self, other: &CurrencyConfig) -> bool {
        self == other
    }
}

impl Default for CurrencyConfig {
    fn default() -> Self {
        CurrencyConfig::USD
    }
}

impl fmt::Display for CurrencyConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({} digits, '{}' '{}')",
            self.symbol, self.fraction_digits, self.decimal_separator, self.group_separator
        )
    }
}

// =============================================================================
// Presets
// =============================================================================

/// Named currency presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Preset {
    #[default]
    Usd,
    Eur,
    Btc,
}

impl Preset {
    /// Returns a fresh copy of the preset's configuration.
    pub const fn config(&self) -> CurrencyConfig {
        match self {
            Preset::Usd => CurrencyConfig::USD,
            Preset::Eur => CurrencyConfig::EUR,
            Preset::Btc => CurrencyConfig::BTC,
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Preset::Usd => write!(f, "usd"),
            Preset::Eur => write!(f, "eur"),
            Preset::Btc => write!(f, "btc"),
        }
    }
}

impl FromStr for Preset {
    type Err = MoneyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "usd" | "$" => Ok(Preset::Usd),
            "eur" | "€" => Ok(Preset::Eur),
            "btc" | "xbt" | "฿" => Ok(Preset::Btc),
            other => Err(MoneyError::InvalidConfig(format!(
                "Unknown currency preset: '{}'. Valid options: usd, eur, btc",
                other
            ))),
        }
    }
}

impl From<Preset> for CurrencyConfig {
    fn from(preset: Preset) -> Self {
        preset.config()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minor_unit_factor() {
        assert_eq!(CurrencyConfig::USD.minor_unit_factor(), 100);
        assert_eq!(CurrencyConfig::BTC.minor_unit_factor(), 100_000_000);

        let mut whole = CurrencyConfig::USD;
        whole.fraction_digits = 0;
        assert_eq!(whole.minor_unit_factor(), 1);
    }

    #[test]
    fn test_assert_fraction_digits_accepts_full_range() {
        for digits in 0..=MAX_FRACTION_DIGITS {
            assert_fraction_digits(digits);
        }
    }

    #[test]
    #[should_panic(expected = "fraction digits 11 out of range 0..=10")]
    fn test_assert_fraction_digits_rejects_too_many() {
        assert_fraction_digits(MAX_FRACTION_DIGITS + 1);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_minor_unit_factor_out_of_range() {
        let mut bad = CurrencyConfig::USD;
        bad.fraction_digits = 11;
        bad.minor_unit_factor();
    }

    #[test]
    fn test_compatibility_ignores_nothing_but_amount() {
        assert!(CurrencyConfig::USD.is_compatible(&CurrencyConfig::USD));
        assert!(!CurrencyConfig::USD.is_compatible(&CurrencyConfig::EUR));
        assert!(!CurrencyConfig::USD.is_compatible(&CurrencyConfig::BTC));

        let mut comma_decimal = CurrencyConfig::USD;
        comma_decimal.decimal_separator = ',';
        comma_decimal.group_separator = '.';
        assert!(!CurrencyConfig::USD.is_compatible(&comma_decimal));
    }

    #[test]
    fn test_preset_from_str() {
        assert_eq!("usd".parse::<Preset>().unwrap(), Preset::Usd);
        assert_eq!(" EUR ".parse::<Preset>().unwrap(), Preset::Eur);
        assert_eq!("xbt".parse::<Preset>().unwrap(), Preset::Btc);
        assert!("gbp".parse::<Preset>().is_err());
    }

    #[test]
    fn test_preset_copy_is_independent() {
        let mut config = Preset::Usd.config();
        config.symbol = 'X';
        assert_eq!(Preset::Usd.config().symbol, '$');
        assert_eq!(CurrencyConfig::from(Preset::Btc).fraction_digits, 8);
    }
}
