//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In binary floating point:                                             │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Minor Units                                     │
//! │    amount = 1099, fraction_digits = 2  →  $10.99                       │
//! │    Every rounding step is explicit and half-to-even                    │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Receiver-Style API
//! Operations write their result into the receiver and hand it back, the
//! way big-number libraries do. A value can be reused across many calls
//! without allocating:
//!
//! ```rust
//! use cash_core::{CurrencyConfig, Money};
//!
//! let a = Money::parse(CurrencyConfig::USD, "18.18").unwrap();
//! let b = Money::new(CurrencyConfig::USD).with_cents(500);
//!
//! let mut total = Money::new(CurrencyConfig::USD);
//! total.add(&a, &b).unwrap();
//! assert_eq!(total.to_string(), "$23.18");
//!
//! total.mul_by_scalar(&a, 3).unwrap();
//! assert_eq!(total.amount(), 5454);
//! ```

use num_bigint::BigInt;
use num_integer::Integer;
use num_rational::BigRational;
use num_traits::Signed;
use std::cmp::Ordering;
use std::fmt;
use tracing::trace;

use crate::currency::{assert_fraction_digits, CurrencyConfig, Preset};
use crate::error::{MoneyError, MoneyResult};
use crate::format::write_amount;
use crate::parse::parse_minor_units;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in integer minor units of a configured currency.
///
/// ## Fields
/// - `amount`: signed count of minor units (cents for USD)
/// - `currency`: precision and symbols; must match for binary operations
/// - `exact`: exact rational shadow, present only after
///   [`Money::mul_by_rational`]
///
/// ## Concurrency
/// Methods take `&mut self`; sharing one value between threads needs
/// external synchronization.
#[derive(Debug, Clone)]
pub struct Money {
    amount: i64,
    currency: CurrencyConfig,
    exact: Option<BigRational>,
}

impl Money {
    /// Creates a zero value with the given configuration.
    ///
    /// The configuration is copied; changing this value never affects the
    /// preset it came from.
    pub const fn new(currency: CurrencyConfig) -> Self {
        Money {
            amount: 0,
            currency,
            exact: None,
        }
    }

    /// Creates a zero value from a named preset.
    pub const fn from_preset(preset: Preset) -> Self {
        Money::new(preset.config())
    }

    /// Convenience factory for US dollar values.
    pub const fn usd() -> Self {
        Money::new(CurrencyConfig::USD)
    }

    /// Parses `text` into a new value (see [`Money::set_str`]).
    pub fn parse(currency: CurrencyConfig, text: &str) -> MoneyResult<Self> {
        let mut money = Money::new(currency);
        money.set_str(text)?;
        Ok(money)
    }

    /// Builder-style [`Money::set_cents`].
    pub fn with_cents(mut self, cents: i64) -> Self {
        self.set_cents(cents);
        self
    }

    // =========================================================================
    // Getters
    // =========================================================================

    /// Amount in minor units.
    #[inline]
    pub const fn amount(&self) -> i64 {
        self.amount
    }

    /// Currency configuration.
    #[inline]
    pub const fn currency(&self) -> &CurrencyConfig {
        &self.currency
    }

    #[inline]
    pub const fn fraction_digits(&self) -> u32 {
        self.currency.fraction_digits
    }

    /// The exact rational shadow, if the last operation produced one.
    #[inline]
    pub fn exact(&self) -> Option<&BigRational> {
        self.exact.as_ref()
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.amount == 0
    }

    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.amount > 0
    }

    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.amount < 0
    }

    /// Can `self` and `other` be combined?
    #[inline]
    pub fn is_compatible(&self, other: &Money) -> bool {
        self.currency.is_compatible(&other.currency)
    }

    // =========================================================================
    // Setters
    // =========================================================================

    /// Sets the amount directly, in already-scaled minor units.
    pub fn set_cents(&mut self, cents: i64) -> &mut Self {
        self.amount = cents;
        self.exact = None;
        self
    }

    /// Reinterprets the amount at a different precision WITHOUT rescaling.
    ///
    /// ## Warning
    /// `1099` at 2 digits is `$10.99`; after `set_fraction_digits(3)` the
    /// same `1099` reads as `$1.099`. Only call this when that change of
    /// meaning is intended, e.g. right before formatting at a nonstandard
    /// precision. It also changes compatibility with other values.
    ///
    /// ## Panics
    /// If `digits` exceeds [`crate::currency::MAX_FRACTION_DIGITS`].
    pub fn set_fraction_digits(&mut self, digits: u32) -> &mut Self {
        assert_fraction_digits(digits);

        self.currency.fraction_digits = digits;
        self.exact = None;
        self
    }

    /// Parses `text` into the receiver.
    ///
    /// See [`crate::parse`] for the accepted shapes. A string without a
    /// decimal separator is taken as minor units. On error the receiver is
    /// left unchanged.
    pub fn set_str(&mut self, text: &str) -> MoneyResult<&mut Self> {
        let amount = parse_minor_units(text, &self.currency)?;
        Ok(self.set_cents(amount))
    }

    // =========================================================================
    // Rational Interop
    // =========================================================================

    /// Returns `amount / 10^fraction_digits` as an exact fraction.
    ///
    /// ## Example
    /// ```rust
    /// use cash_core::Money;
    /// use num_rational::BigRational;
    ///
    /// let price = Money::usd().with_cents(1050);
    /// assert_eq!(price.to_rational(), BigRational::new(21.into(), 2.into()));
    /// ```
    pub fn to_rational(&self) -> BigRational {
        BigRational::new(
            BigInt::from(self.amount),
            BigInt::from(self.currency.minor_unit_factor()),
        )
    }

    /// Sets the receiver from an exact fraction, rounding half to even.
    pub fn set_rational(&mut self, value: &BigRational) -> MoneyResult<&mut Self> {
        let text = render_guarded(value, &self.currency);
        self.set_str(&text)
    }

    // =========================================================================
    // Arithmetic
    // =========================================================================

    fn ensure_compatible(&self, other: &Money) -> MoneyResult<()> {
        if self.is_compatible(other) {
            Ok(())
        } else {
            Err(MoneyError::IncompatibleOperands {
                expected: self.currency,
                found: other.currency,
            })
        }
    }

    /// `self = x + y`.
    pub fn add(&mut self, x: &Money, y: &Money) -> MoneyResult<&mut Self> {
        self.ensure_compatible(x)?;
        self.ensure_compatible(y)?;
        let sum = x
            .amount
            .checked_add(y.amount)
            .ok_or(MoneyError::Overflow { operation: "add" })?;
        Ok(self.set_cents(sum))
    }

    /// `self = x - y`.
    pub fn sub(&mut self, x: &Money, y: &Money) -> MoneyResult<&mut Self> {
        self.ensure_compatible(x)?;
        self.ensure_compatible(y)?;
        let difference = x
            .amount
            .checked_sub(y.amount)
            .ok_or(MoneyError::Overflow { operation: "sub" })?;
        Ok(self.set_cents(difference))
    }

    /// `self = x * scalar`, e.g. a unit price times a quantity.
    pub fn mul_by_scalar(&mut self, x: &Money, scalar: i64) -> MoneyResult<&mut Self> {
        self.ensure_compatible(x)?;
        let product = x
            .amount
            .checked_mul(scalar)
            .ok_or(MoneyError::Overflow {
                operation: "mul_by_scalar",
            })?;
        Ok(self.set_cents(product))
    }

    /// `self = x * p` for an exact fraction `p`, rounded half to even.
    ///
    /// The unrounded product is kept as the receiver's exact shadow, and
    /// `x`'s shadow is used in place of its amount when present, so chained
    /// rational multiplications round only once at each step's output.
    ///
    /// ## Example
    /// ```rust
    /// use cash_core::Money;
    /// use num_rational::BigRational;
    ///
    /// let price = Money::usd().with_cents(1818);
    /// let mut share = Money::usd();
    /// share.mul_by_rational(&price, &BigRational::new(3.into(), 4.into())).unwrap();
    /// assert_eq!(share.amount(), 1364); // 13.635 → 13.64
    /// ```
    pub fn mul_by_rational(&mut self, x: &Money, p: &BigRational) -> MoneyResult<&mut Self> {
        self.ensure_compatible(x)?;

        let base = x.exact.clone().unwrap_or_else(|| x.to_rational());
        let product = base * p;
        let text = render_guarded(&product, &self.currency);
        trace!(product = %product, rendered = %text, "Rounding rational product");

        let amount = parse_minor_units(&text, &self.currency)?;
        self.set_cents(amount);
        self.exact = Some(product);
        Ok(self)
    }

    /// `self = x * y / 10^fraction_digits`, truncated toward zero.
    ///
    /// ## Note
    /// Money times money has no real unit; this exists for completeness and
    /// is not rounding-correct (the double-scaled product is truncated).
    pub fn mul_by_money(&mut self, x: &Money, y: &Money) -> MoneyResult<&mut Self> {
        self.ensure_compatible(x)?;
        self.ensure_compatible(y)?;
        let product = x.amount as i128 * y.amount as i128
            / self.currency.minor_unit_factor() as i128;
        let product = i64::try_from(product).map_err(|_| MoneyError::Overflow {
            operation: "mul_by_money",
        })?;
        Ok(self.set_cents(product))
    }

    // =========================================================================
    // Comparison
    // =========================================================================

    /// Three-way comparison of two compatible values.
    pub fn compare(&self, other: &Money) -> MoneyResult<Ordering> {
        self.ensure_compatible(other)?;
        Ok(self.amount.cmp(&other.amount))
    }

    pub fn is_greater_than(&self, other: &Money) -> MoneyResult<bool> {
        Ok(self.compare(other)? == Ordering::Greater)
    }

    pub fn is_less_than(&self, other: &Money) -> MoneyResult<bool> {
        Ok(self.compare(other)? == Ordering::Less)
    }

    pub fn equals(&self, other: &Money) -> MoneyResult<bool> {
        Ok(self.compare(other)? == Ordering::Equal)
    }
}

/// Renders `value` with one guard digit past the currency precision,
/// truncated toward zero, e.g. `13.635` for `1818/100 * 3/4` in USD.
fn render_guarded(value: &BigRational, currency: &CurrencyConfig) -> String {
    let scale = currency.fraction_digits + 1;
    let factor = BigInt::from(10u32).pow(scale);
    let scaled = (value * BigRational::from_integer(factor.clone())).to_integer();

    let sign = if scaled.is_negative() { "-" } else { "" };
    let (integer, fraction) = scaled.abs().div_rem(&factor);
    format!(
        "{}{}{}{:0>width$}",
        sign,
        integer,
        currency.decimal_separator,
        fraction.to_string(),
        width = scale as usize
    )
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display renders the accounting format: `$10,018.97`, `($5.50)`.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_amount(f, self.amount, &self.currency)
    }
}

/// Default money is zero US dollars.
impl Default for Money {
    fn default() -> Self {
        Money::usd()
    }
}

/// Equality of amount and configuration; the exact shadow is a cache and
/// does not take part.
impl PartialEq for Money {
    fn eq(&self, other: &Self) -> bool {
        self.amount == other.amount && self.currency == other.currency
    }
}

impl Eq for Money {}

// =============================================================================
// Unit Tests
// =============================================================================
