//! # cash-core: A Realistic Money Type
//!
//! Currency amounts as integer minor units, with parsing, formatting,
//! arithmetic, comparison and fair division.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        cash-core Modules                                │
//! │                                                                         │
//! │   ┌───────────┐      ┌───────────┐      ┌───────────┐                  │
//! │   │ currency  │─────►│   money   │◄─────│ allocation│                  │
//! │   │ presets   │      │  Money    │      │ split / N │                  │
//! │   └───────────┘      │ arithmetic│      │ by ratio  │                  │
//! │                      │ compare   │      └───────────┘                  │
//! │   ┌───────────┐      └─────┬─────┘      ┌───────────┐                  │
//! │   │  parse    │◄───────────┼───────────►│  format   │                  │
//! │   │ "12.39"   │            │            │ "$12.39"  │                  │
//! │   └─────┬─────┘            ▼            └───────────┘                  │
//! │         │            ┌───────────┐                                     │
//! │   ┌─────▼─────┐      │   codec   │   serde hooks, driver values        │
//! │   │ rounding  │      └───────────┘                                     │
//! │   │ half-even │                                                        │
//! │   └───────────┘      config: TOML + env → CurrencyConfig               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`currency`] - Currency configuration and presets (USD, EUR, BTC)
//! - [`money`] - The `Money` value type
//! - [`parse`] / [`format`] - Text conversion
//! - [`rounding`] - Half-to-even rounding
//! - [`allocation`] - Divide by N and by ratio without losing a unit
//! - [`codec`] - Serialization hooks for storage/transport layers
//! - [`config`] - Configuration loading
//! - [`error`] - Error types
//!
//! ## Example Usage
//!
//! ```rust
//! use cash_core::{CurrencyConfig, Money};
//!
//! let bill = Money::parse(CurrencyConfig::USD, "100.00").unwrap();
//! let shares = bill.divide_by_scalar(3).unwrap();
//!
//! let rendered: Vec<String> = shares.iter().map(Money::to_string).collect();
//! assert_eq!(rendered, ["$33.34", "$33.33", "$33.33"]);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod allocation;
pub mod codec;
pub mod config;
pub mod currency;
pub mod error;
pub mod format;
pub mod money;
pub mod parse;
pub mod rounding;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use codec::{MoneyDecoder, RawValue};
pub use config::CashConfig;
pub use currency::{CurrencyConfig, Preset};
pub use error::{MoneyError, MoneyResult};
pub use money::Money;
