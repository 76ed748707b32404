//! # Parser
//!
//! Decimal text → integer minor units.
//!
//! ## Accepted Shapes
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  [ "(" ] [ "-" ] [ symbol ] digits[,digits...] [ "." digits ] [ ")" ]   │
//! │                                                                         │
//! │  "12.392"        → 1239    (guard digit 2 rounds away)                  │
//! │  "666.995"       → 66700   (tie on odd 66699 → even 66700)              │
//! │  "12.5"          → 1250    (short fraction is right-padded)             │
//! │  "($10,018.97)"  → -1001897 (formatter output round-trips)              │
//! │  "1250"          → 1250    (NO separator = already minor units!)        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A leading `+` is accepted and ignored; either sign is rejected inside
//! parentheses.
//!
//! The bare-integer rule means `"5"` is five cents, not five dollars. Only
//! text containing the decimal separator is read as major units, so the
//! round-trip guarantee covers formatter output, not arbitrary integers.

use tracing::debug;

use crate::currency::CurrencyConfig;
use crate::error::{MoneyError, MoneyResult};
use crate::rounding::round_half_to_even;

/// Parses `text` into minor units of `currency`.
///
/// ## Example
/// ```rust
/// use cash_core::currency::CurrencyConfig;
/// use cash_core::parse::parse_minor_units;
///
/// assert_eq!(parse_minor_units("18.2123", &CurrencyConfig::USD).unwrap(), 1821);
/// assert_eq!(parse_minor_units("-0.50", &CurrencyConfig::USD).unwrap(), -50);
/// assert!(parse_minor_units("1.2.3", &CurrencyConfig::USD).is_err());
/// ```
pub fn parse_minor_units(text: &str, currency: &CurrencyConfig) -> MoneyResult<i64> {
    parse_inner(text, currency).map_err(|err| {
        debug!(input = %text, error = %err, "Rejected money string");
        err
    })
}

fn parse_inner(text: &str, currency: &CurrencyConfig) -> MoneyResult<i64> {
    let (negative, body) = strip_sign(text, currency)?;

    let parts: Vec<&str> = body.split(currency.decimal_separator).collect();
    let magnitude: i128 = match parts.as_slice() {
        [integer] => parse_digits(text, &strip_groups(integer, currency))? as i128,
        [major, minor] => {
            let major = parse_digits(text, &strip_groups(major, currency))?;
            let minor = parse_fraction(text, minor, currency.fraction_digits, major % 10)?;
            major as i128 * currency.minor_unit_factor() as i128 + minor as i128
        }
        _ => {
            return Err(MoneyError::malformed(
                text,
                "more than one decimal separator",
            ))
        }
    };

    let signed = if negative { -magnitude } else { magnitude };
    i64::try_from(signed).map_err(|_| MoneyError::Overflow { operation: "parse" })
}

/// Removes surrounding whitespace, accounting parentheses, a leading sign
/// and the currency symbol. Returns `(negative, remainder)`.
fn strip_sign<'a>(text: &'a str, currency: &CurrencyConfig) -> MoneyResult<(bool, &'a str)> {
    let mut body = text.trim();
    let mut negative = false;

    if let Some(inner) = body.strip_prefix('(') {
        body = inner
            .strip_suffix(')')
            .ok_or_else(|| MoneyError::malformed(text, "unbalanced parentheses"))?;
        negative = true;
    } else if body.ends_with(')') {
        return Err(MoneyError::malformed(text, "unbalanced parentheses"));
    }

    if let Some(sign) = body.chars().next().filter(|c| matches!(c, '-' | '+')) {
        if negative {
            return Err(MoneyError::malformed(text, "sign inside parentheses"));
        }
        negative = sign == '-';
        body = &body[1..];
    }

    let body = body.strip_prefix(currency.symbol).unwrap_or(body);
    Ok((negative, body))
}

fn strip_groups(part: &str, currency: &CurrencyConfig) -> String {
    part.chars()
        .filter(|c| *c != currency.group_separator)
        .collect()
}

fn parse_digits(input: &str, digits: &str) -> MoneyResult<u64> {
    if digits.starts_with(&['+', '-'][..]) {
        return Err(MoneyError::malformed(input, "unexpected sign"));
    }
    digits.parse::<u64>().map_err(|source| MoneyError::InvalidDigits {
        input: input.to_string(),
        source,
    })
}

/// Parses the fractional digits to exactly `fraction_digits` places.
///
/// Longer input is cut to one guard digit and rounded half to even; the
/// result may equal `10^fraction_digits` and carry into the major part.
fn parse_fraction(
    input: &str,
    digits: &str,
    fraction_digits: u32,
    last_major_digit: u64,
) -> MoneyResult<i64> {
    if digits.is_empty() {
        return Err(MoneyError::malformed(input, "empty fractional part"));
    }
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(MoneyError::malformed(
            input,
            "fractional part must contain only digits",
        ));
    }

    let width = fraction_digits as usize;
    if digits.len() > width {
        let guarded = parse_digits(input, &digits[..width + 1])? as i64;
        // With no fraction digits kept, ties break on the major part's parity.
        let prefix = if width == 0 { last_major_digit as i64 } else { 0 };
        return Ok(round_half_to_even(prefix * 10 + guarded) - prefix);
    }
    if width == 0 {
        return Ok(0);
    }

    let padded = format!("{:0<width$}", digits, width = width);
    Ok(parse_digits(input, &padded)? as i64)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn usd(text: &str) -> MoneyResult<i64> {
        parse_minor_units(text, &CurrencyConfig::USD)
    }

    #[test]
    fn test_exact_precision() {
        assert_eq!(usd("10.99").unwrap(), 1099);
        assert_eq!(usd("0.08").unwrap(), 8);
        assert_eq!(usd("25.60").unwrap(), 2560);
    }

    #[test]
    fn test_extra_digits_round_half_to_even() {
        assert_eq!(usd("12.392").unwrap(), 1239);
        assert_eq!(usd("666.995").unwrap(), 66700);
        assert_eq!(usd("666.985").unwrap(), 66698);
        assert_eq!(usd("18.2123").unwrap(), 1821);
        // Only one guard digit is kept; later digits are ignored.
        assert_eq!(usd("1.0049999").unwrap(), 100);
    }

    #[test]
    fn test_rounding_carries_into_major_part() {
        assert_eq!(usd("0.999").unwrap(), 100);
        assert_eq!(usd("9.996").unwrap(), 1000);
    }

    #[test]
    fn test_short_fraction_is_padded() {
        assert_eq!(usd("12.5").unwrap(), 1250);
        assert_eq!(parse_minor_units("0.1", &CurrencyConfig::BTC).unwrap(), 10_000_000);
    }

    #[test]
    fn test_bare_integer_is_minor_units() {
        assert_eq!(usd("1250").unwrap(), 1250);
        assert_eq!(usd("-7").unwrap(), -7);
    }

    #[test]
    fn test_sign_applies_to_whole_amount() {
        assert_eq!(usd("-0.50").unwrap(), -50);
        assert_eq!(usd("-13.635").unwrap(), -1364);
        assert_eq!(usd("(0.50)").unwrap(), -50);
    }

    #[test]
    fn test_accepts_formatter_output() {
        assert_eq!(usd("$10,018.97").unwrap(), 1001897);
        assert_eq!(usd("($10,018.97)").unwrap(), -1001897);
        assert_eq!(usd("  $0.08 ").unwrap(), 8);
    }

    #[test]
    fn test_leading_plus() {
        assert_eq!(usd("+5.00").unwrap(), 500);
        assert_eq!(usd("+$10,018.97").unwrap(), 1001897);
        assert!(usd("(+5.00)").unwrap_err().is_malformed());
        assert!(usd("+-5.00").unwrap_err().is_malformed());
    }

    #[test]
    fn test_comma_decimal_separator() {
        let mut euro = CurrencyConfig::EUR;
        euro.decimal_separator = ',';
        euro.group_separator = '.';

        assert_eq!(parse_minor_units("€1.234.567,89", &euro).unwrap(), 123456789);
        assert_eq!(parse_minor_units("(€0,05)", &euro).unwrap(), -5);
        assert_eq!(parse_minor_units("12,345", &euro).unwrap(), 1234);
        assert!(parse_minor_units("1,2,3", &euro).unwrap_err().is_malformed());
    }

    #[test]
    fn test_space_group_separator() {
        let mut spaced = CurrencyConfig::EUR;
        spaced.decimal_separator = ',';
        spaced.group_separator = ' ';

        assert_eq!(parse_minor_units("€1 234 567,89", &spaced).unwrap(), 123456789);
        assert_eq!(parse_minor_units(" (€92 233 720 368 547 758,08) ", &spaced).unwrap(), i64::MIN);
    }

    #[test]
    fn test_zero_fraction_digits() {
        let mut yen_like = CurrencyConfig::USD;
        yen_like.fraction_digits = 0;
        assert_eq!(parse_minor_units("12", &yen_like).unwrap(), 12);
        assert_eq!(parse_minor_units("12.5", &yen_like).unwrap(), 12);
        assert_eq!(parse_minor_units("13.5", &yen_like).unwrap(), 14);
    }

    #[test]
    fn test_malformed_input() {
        assert!(matches!(
            usd("1.2.3"),
            Err(MoneyError::MalformedInput { .. })
        ));
        assert!(matches!(
            usd("12.3a"),
            Err(MoneyError::MalformedInput { .. })
        ));
        assert!(matches!(usd("12."), Err(MoneyError::MalformedInput { .. })));
        assert!(matches!(usd("(12.00"), Err(MoneyError::MalformedInput { .. })));
        assert!(matches!(usd("(-12.00)"), Err(MoneyError::MalformedInput { .. })));
        assert!(matches!(usd("1.-5"), Err(MoneyError::MalformedInput { .. })));
    }

    #[test]
    fn test_invalid_digits() {
        assert!(matches!(usd("abc"), Err(MoneyError::InvalidDigits { .. })));
        assert!(matches!(usd("x.50"), Err(MoneyError::InvalidDigits { .. })));
        assert!(matches!(usd(".50"), Err(MoneyError::InvalidDigits { .. })));
        assert!(usd("").unwrap_err().is_malformed());
    }

    #[test]
    fn test_overflow() {
        assert!(matches!(
            usd("92233720368547758.08"),
            Err(MoneyError::Overflow { .. })
        ));
        assert_eq!(usd("-92233720368547758.08").unwrap(), i64::MIN);
    }
}
