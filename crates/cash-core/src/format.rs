//! # Formatter
//!
//! Integer minor units → display text.
//!
//! ## Output Format
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  [ "(" ] symbol  grouped-integer  decimal  fraction-digits  [ ")" ]     │
//! │                                                                         │
//! │   1001897  →  $10,018.97                                                │
//! │  -1001897  →  ($10,018.97)     accounting-style negative                │
//! │         8  →  $0.08                                                     │
//! │         0  →  $0.00                                                     │
//! │         5  →  ฿0.00000005      (BTC, 8 fraction digits)                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The amount is never mutated; rendering works on its unsigned magnitude.

use std::fmt::{self, Write};

use crate::currency::CurrencyConfig;

/// Inserts `separator` every three digits from the right.
///
/// ## Example
/// ```rust
/// use cash_core::format::group_thousands;
///
/// assert_eq!(group_thousands("10018", ','), "10,018");
/// assert_eq!(group_thousands("123456", ','), "123,456");
/// assert_eq!(group_thousands("12", ','), "12");
/// ```
pub fn group_thousands(digits: &str, separator: char) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);

    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(separator);
        }
        out.push(c);
    }
    out
}

/// Writes `amount` minor units in the display format of `currency`.
pub fn write_amount<W: Write>(out: &mut W, amount: i64, currency: &CurrencyConfig) -> fmt::Result {
    let negative = amount < 0;
    let width = currency.fraction_digits as usize;

    // Pad so there is always at least one integer digit: 8 → "008" → 0 | 08
    let digits = format!("{:0>pad$}", amount.unsigned_abs(), pad = width + 1);
    let (integer, fraction) = digits.split_at(digits.len() - width);

    if negative {
        out.write_char('(')?;
    }
    out.write_char(currency.symbol)?;
    out.write_str(&group_thousands(integer, currency.group_separator))?;
    if width > 0 {
        out.write_char(currency.decimal_separator)?;
        out.write_str(fraction)?;
    }
    if negative {
        out.write_char(')')?;
    }
    Ok(())
}

/// Formats `amount` minor units as a new string.
///
/// ## Example
/// ```rust
/// use cash_core::currency::CurrencyConfig;
/// use cash_core::format::format_amount;
///
/// assert_eq!(format_amount(1001897, &CurrencyConfig::USD), "$10,018.97");
/// assert_eq!(format_amount(-550, &CurrencyConfig::USD), "($5.50)");
/// ```
pub fn format_amount(amount: i64, currency: &CurrencyConfig) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = write_amount(&mut out, amount, currency);
    out
}

// =============================================================================
// Unit Tests
// =============================================================================
