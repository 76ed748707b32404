//! # Error Types
//!
//! Domain-specific error types for cash-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  MoneyError (this file)                                                │
//! │  ├── Input        MalformedInput, InvalidDigits                        │
//! │  ├── Operands     IncompatibleOperands, Overflow                       │
//! │  ├── Allocation   InvalidAllocation                                    │
//! │  ├── Decode hook  UnsupportedScanInput                                 │
//! │  └── Config       InvalidConfig, ConfigRead, ConfigParse               │
//! │                                                                         │
//! │  Every failure leaves the receiver untouched.                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include the offending input in error messages
//! 3. Errors are enum variants, never String

use std::num::ParseIntError;

use thiserror::Error;

use crate::currency::CurrencyConfig;

// =============================================================================
// Money Error
// =============================================================================

/// Errors produced by parsing, arithmetic, allocation and decoding.
#[derive(Debug, Error)]
pub enum MoneyError {
    /// Text does not have the `[-]major[.minor]` shape.
    ///
    /// ## When This Occurs
    /// - More than one decimal separator
    /// - Non-digit characters in the fractional part
    /// - Unbalanced parentheses
    #[error("malformed input string '{input}': {reason}")]
    MalformedInput { input: String, reason: String },

    /// A numeric part failed integer parsing.
    #[error("malformed input string '{input}': {source}")]
    InvalidDigits {
        input: String,
        #[source]
        source: ParseIntError,
    },

    /// Binary operation across two different currency configurations.
    ///
    /// ## User Workflow
    /// ```text
    /// $10.00 + €5.00
    ///      │
    ///      ▼
    /// IncompatibleOperands { expected: USD, found: EUR }
    /// ```
    #[error("money values have incompatible fields: expected {expected}, found {found}")]
    IncompatibleOperands {
        expected: CurrencyConfig,
        found: CurrencyConfig,
    },

    /// Decode hook received a value that is neither an integer nor text.
    #[error("cannot decode money from {kind} value")]
    UnsupportedScanInput { kind: String },

    /// Result does not fit in i64 minor units.
    #[error("arithmetic overflow in {operation}")]
    Overflow { operation: &'static str },

    /// Allocation request cannot be satisfied.
    #[error("invalid allocation: {reason}")]
    InvalidAllocation { reason: String },

    /// Configuration values are inconsistent.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Config file could not be read.
    #[error("failed to read config: {0}")]
    ConfigRead(#[from] std::io::Error),

    /// Config file is not valid TOML.
    #[error("failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),
}

impl MoneyError {
    /// Builds a [`MoneyError::MalformedInput`].
    pub(crate) fn malformed(input: &str, reason: impl Into<String>) -> Self {
        MoneyError::MalformedInput {
            input: input.to_string(),
            reason: reason.into(),
        }
    }

    /// True for both input-shape and integer-parse failures.
    pub fn is_malformed(&self) -> bool {
        matches!(
            self,
            MoneyError::MalformedInput { .. } | MoneyError::InvalidDigits { .. }
        )
    }

    /// True when operands had different currency configurations.
    pub fn is_incompatible(&self) -> bool {
        matches!(self, MoneyError::IncompatibleOperands { .. })
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with MoneyError.
pub type MoneyResult<T> = Result<T, MoneyError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = MoneyError::malformed("1.2.3", "more than one decimal separator");
        assert_eq!(
            err.to_string(),
            "malformed input string '1.2.3': more than one decimal separator"
        );

        let err = MoneyError::IncompatibleOperands {
            expected: CurrencyConfig::USD,
            found: CurrencyConfig::EUR,
        };
        assert_eq!(
            err.to_string(),
            "money values have incompatible fields: expected $ (2 digits, '.' ','), found € (2 digits, '.' ',')"
        );
    }

    #[test]
    fn test_parse_int_error_is_malformed() {
        let source = "abc".parse::<i64>().unwrap_err();
        let err = MoneyError::InvalidDigits {
            input: "abc".to_string(),
            source,
        };
        assert!(err.is_malformed());
        assert!(!err.is_incompatible());
    }
}
