//! # Serialization Hooks
//!
//! Encode/decode entry points for persistence and transport layers.
//!
//! ## Data Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  Money ── Serialize ──►  "$10,018.97"      (always the display text)    │
//! │                                                                         │
//! │  "\"$10,018.97\"" ─┐                                                    │
//! │  "10018.97"       ─┼─► MoneyDecoder { currency } ──► Money              │
//! │  1001897 (i64)    ─┘        ▲                                           │
//! │                             └── currency is ALWAYS supplied by the      │
//! │                                 caller; there is no built-in default    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Integers are taken as minor units. Text may arrive wrapped in one pair
//! of double quotes, which is stripped before parsing.

use serde::de::{self, DeserializeSeed, Deserializer, Visitor};
use serde::{Serialize, Serializer};
use std::fmt;

use crate::currency::CurrencyConfig;
use crate::error::{MoneyError, MoneyResult};
use crate::money::Money;

// =============================================================================
// Encoding
// =============================================================================

impl Money {
    /// Encodes to the display text, e.g. `($10,018.97)`.
    pub fn encode(&self) -> String {
        self.to_string()
    }
}

/// Money serializes as its display text.
impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

// =============================================================================
// Raw Values
// =============================================================================

/// A value as handed over by a storage or transport driver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RawValue<'a> {
    Int(i64),
    Text(&'a str),
    Bytes(&'a [u8]),
    Float(f64),
    Bool(bool),
    Null,
}

impl RawValue<'_> {
    fn kind(&self) -> &'static str {
        match self {
            RawValue::Int(_) => "integer",
            RawValue::Text(_) => "text",
            RawValue::Bytes(_) => "bytes",
            RawValue::Float(_) => "float",
            RawValue::Bool(_) => "boolean",
            RawValue::Null => "null",
        }
    }
}

// =============================================================================
// Decoder
// =============================================================================

/// Decodes money values in an explicitly supplied currency.
///
/// ## Example
/// ```rust
/// use cash_core::codec::{MoneyDecoder, RawValue};
/// use cash_core::CurrencyConfig;
///
/// let decoder = MoneyDecoder::new(CurrencyConfig::USD);
/// assert_eq!(decoder.decode(RawValue::Text("55.10")).unwrap().amount(), 5510);
/// assert_eq!(decoder.decode(RawValue::Int(6629)).unwrap().amount(), 6629);
/// assert!(decoder.decode(RawValue::Float(1.5)).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoneyDecoder {
    currency: CurrencyConfig,
}

impl MoneyDecoder {
    pub const fn new(currency: CurrencyConfig) -> Self {
        MoneyDecoder { currency }
    }

    pub const fn currency(&self) -> &CurrencyConfig {
        &self.currency
    }

    /// Integer minor units.
    pub fn decode_cents(&self, cents: i64) -> Money {
        Money::new(self.currency).with_cents(cents)
    }

    /// Text, optionally wrapped in one pair of double quotes.
    pub fn decode_text(&self, text: &str) -> MoneyResult<Money> {
        Money::parse(self.currency, unquote(text))
    }

    /// Any driver value; only integers and text-like values are accepted.
    pub fn decode(&self, value: RawValue<'_>) -> MoneyResult<Money> {
        match value {
            RawValue::Int(cents) => Ok(self.decode_cents(cents)),
            RawValue::Text(text) => self.decode_text(text),
            RawValue::Bytes(bytes) => match std::str::from_utf8(bytes) {
                Ok(text) => self.decode_text(text),
                Err(_) => Err(MoneyError::UnsupportedScanInput {
                    kind: "non-UTF-8 bytes".to_string(),
                }),
            },
            other => Err(MoneyError::UnsupportedScanInput {
                kind: other.kind().to_string(),
            }),
        }
    }

    /// A JSON value: integer numbers are minor units, strings are parsed.
    pub fn decode_json(&self, value: &serde_json::Value) -> MoneyResult<Money> {
        match value {
            serde_json::Value::String(text) => self.decode_text(text),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(cents) => Ok(self.decode_cents(cents)),
                None => Err(MoneyError::UnsupportedScanInput {
                    kind: format!("non-integer number {}", n),
                }),
            },
            serde_json::Value::Null => self.decode(RawValue::Null),
            serde_json::Value::Bool(b) => self.decode(RawValue::Bool(*b)),
            serde_json::Value::Array(_) => Err(MoneyError::UnsupportedScanInput {
                kind: "array".to_string(),
            }),
            serde_json::Value::Object(_) => Err(MoneyError::UnsupportedScanInput {
                kind: "object".to_string(),
            }),
        }
    }
}

fn unquote(text: &str) -> &str {
    text.strip_prefix('"')
        .and_then(|inner| inner.strip_suffix('"'))
        .unwrap_or(text)
}

/// Lets serde formats decode money in a caller-chosen currency:
///
/// ```rust
/// use cash_core::codec::MoneyDecoder;
/// use cash_core::CurrencyConfig;
/// use serde::de::DeserializeSeed;
///
/// let mut de = serde_json::Deserializer::from_str("\"$10,018.97\"");
/// let money = MoneyDecoder::new(CurrencyConfig::USD).deserialize(&mut de).unwrap();
/// assert_eq!(money.amount(), 1001897);
/// ```
impl<'de> DeserializeSeed<'de> for MoneyDecoder {
    type Value = Money;

    fn deserialize<D: Deserializer<'de>>(self, deserializer: D) -> Result<Money, D::Error> {
        deserializer.deserialize_any(MoneyVisitor(self))
    }
}

struct MoneyVisitor(MoneyDecoder);

impl<'de> Visitor<'de> for MoneyVisitor {
    type Value = Money;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a money string or an integer count of minor units")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Money, E> {
        Ok(self.0.decode_cents(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Money, E> {
        let cents = i64::try_from(v)
            .map_err(|_| E::invalid_value(de::Unexpected::Unsigned(v), &self))?;
        Ok(self.0.decode_cents(cents))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Money, E> {
        self.0.decode_text(v).map_err(E::custom)
    }

    fn visit_bytes<E: de::Error>(self, v: &[u8]) -> Result<Money, E> {
        self.0.decode(RawValue::Bytes(v)).map_err(E::custom)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::currency::Preset;

    #[test]
    fn test_encode() {
        assert_eq!(Money::usd().with_cents(1001897).encode(), "$10,018.97");
        assert_eq!(
            serde_json::to_string(&Money::usd().with_cents(-550)).unwrap(),
            "\"($5.50)\""
        );
    }

    #[test]
    fn test_decode_text_and_cents() {
        let decoder = MoneyDecoder::new(CurrencyConfig::USD);
        assert_eq!(decoder.decode(RawValue::Text("55.10")).unwrap().amount(), 5510);
        assert_eq!(decoder.decode(RawValue::Int(6629)).unwrap().amount(), 6629);
        assert_eq!(decoder.decode(RawValue::Bytes(b"1.25")).unwrap().amount(), 125);
    }

    #[test]
    fn test_decode_strips_quotes() {
        let decoder = MoneyDecoder::new(CurrencyConfig::USD);
        assert_eq!(decoder.decode_text("\"55.10\"").unwrap().amount(), 5510);
        assert_eq!(decoder.decode_text("\"($1.00)\"").unwrap().amount(), -100);
        // A lone quote is not a pair.
        assert!(decoder.decode_text("\"55.10").is_err());
    }

    #[test]
    fn test_decode_uses_supplied_currency() {
        let decoder = MoneyDecoder::new(Preset::Btc.config());
        let money = decoder.decode_text("0.5").unwrap();
        assert_eq!(money.amount(), 50_000_000);
        assert_eq!(*money.currency(), CurrencyConfig::BTC);
    }

    #[test]
    fn test_decode_unsupported() {
        let decoder = MoneyDecoder::new(CurrencyConfig::USD);
        for value in [RawValue::Float(1.5), RawValue::Bool(true), RawValue::Null] {
            assert!(matches!(
                decoder.decode(value),
                Err(MoneyError::UnsupportedScanInput { .. })
            ));
        }
        assert!(matches!(
            decoder.decode(RawValue::Bytes(&[0xff, 0xfe])),
            Err(MoneyError::UnsupportedScanInput { .. })
        ));
    }

    #[test]
    fn test_decode_json() {
        let decoder = MoneyDecoder::new(CurrencyConfig::USD);
        assert_eq!(
            decoder.decode_json(&serde_json::json!("$1,000.00")).unwrap().amount(),
            100000
        );
        assert_eq!(decoder.decode_json(&serde_json::json!(42)).unwrap().amount(), 42);
        assert!(decoder.decode_json(&serde_json::json!(4.2)).is_err());
        assert!(decoder.decode_json(&serde_json::json!([1])).is_err());
        assert!(decoder.decode_json(&serde_json::json!(null)).is_err());
    }

    #[test]
    fn test_deserialize_seed_round_trip() {
        let original = Money::usd().with_cents(-1001897);
        let json = serde_json::to_string(&original).unwrap();

        let mut de = serde_json::Deserializer::from_str(&json);
        let decoded = MoneyDecoder::new(CurrencyConfig::USD)
            .deserialize(&mut de)
            .unwrap();
        assert_eq!(decoded, original);

        let mut de = serde_json::Deserializer::from_str("6629");
        let decoded = MoneyDecoder::new(CurrencyConfig::USD)
            .deserialize(&mut de)
            .unwrap();
        assert_eq!(decoded.amount(), 6629);

        let mut de = serde_json::Deserializer::from_str("true");
        assert!(MoneyDecoder::new(CurrencyConfig::USD)
            .deserialize(&mut de)
            .is_err());
    }
}
