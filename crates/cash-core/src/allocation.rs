//! # Allocation
//!
//! Fair division of a money value into parts that sum EXACTLY to the
//! original amount.
//!
//! ## Remainder Distribution
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  $1.00 / 3                                                              │
//! │                                                                         │
//! │    minima    = 100 / 3 = 33                                             │
//! │    remainder = 100 % 3 = 1                                              │
//! │                                                                         │
//! │    [ 33+1, 33, 33 ]  =  [ 34, 33, 33 ]   sum = 100 ✓                    │
//! │      ▲                                                                  │
//! │      └── leftover units go to the FRONT, one each                       │
//! │                                                                         │
//! │  Negative amounts hand out -1 units the same way:                       │
//! │    -$1.00 / 3  →  [ -34, -33, -33 ]                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use tracing::debug;

use crate::error::{MoneyError, MoneyResult};
use crate::money::Money;

impl Money {
    /// Splits the value into `parts` amounts differing by at most one unit.
    ///
    /// ## Example
    /// ```rust
    /// use cash_core::Money;
    ///
    /// let parts = Money::usd().with_cents(100).divide_by_scalar(3).unwrap();
    /// let cents: Vec<i64> = parts.iter().map(Money::amount).collect();
    /// assert_eq!(cents, vec![34, 33, 33]);
    /// ```
    pub fn divide_by_scalar(&self, parts: usize) -> MoneyResult<Vec<Money>> {
        if parts == 0 {
            return Err(MoneyError::InvalidAllocation {
                reason: "cannot divide into zero parts".to_string(),
            });
        }
        let divisor = i64::try_from(parts).map_err(|_| MoneyError::InvalidAllocation {
            reason: format!("too many parts: {}", parts),
        })?;

        let minima = self.amount() / divisor;
        let remainder = self.amount() % divisor;
        let extra = remainder.unsigned_abs() as usize;
        debug!(amount = self.amount(), parts, minima, remainder, "Dividing by scalar");

        Ok((0..parts)
            .map(|i| {
                let share = if i < extra {
                    minima + remainder.signum()
                } else {
                    minima
                };
                self.part(share)
            })
            .collect())
    }

    /// Splits the value proportionally to `ratio`.
    ///
    /// Each part is first truncated to `amount * weight / sum(weights)`;
    /// the units lost to truncation (fewer than `ratio.len()`) then go one
    /// each to the leading parts.
    ///
    /// ## Example
    /// ```rust
    /// use cash_core::Money;
    ///
    /// let parts = Money::usd().with_cents(1000).divide_into_ratio(&[70, 20, 10]).unwrap();
    /// let cents: Vec<i64> = parts.iter().map(Money::amount).collect();
    /// assert_eq!(cents, vec![700, 200, 100]);
    /// ```
    pub fn divide_into_ratio(&self, ratio: &[i64]) -> MoneyResult<Vec<Money>> {
        if ratio.is_empty() {
            return Err(MoneyError::InvalidAllocation {
                reason: "ratio is empty".to_string(),
            });
        }
        if let Some(weight) = ratio.iter().find(|w| **w < 0) {
            return Err(MoneyError::InvalidAllocation {
                reason: format!("negative weight {}", weight),
            });
        }
        let denominator: i128 = ratio.iter().map(|w| *w as i128).sum();
        if denominator == 0 {
            return Err(MoneyError::InvalidAllocation {
                reason: "ratio sums to zero".to_string(),
            });
        }

        let amount = self.amount() as i128;
        let mut shares: Vec<i64> = ratio
            .iter()
            .map(|w| (amount * *w as i128 / denominator) as i64)
            .collect();

        let allocated: i128 = shares.iter().map(|s| *s as i128).sum();
        let leftover = amount - allocated;
        debug!(amount = self.amount(), ?ratio, %leftover, "Dividing into ratio");

        let step = leftover.signum() as i64;
        for share in shares.iter_mut().take(leftover.unsigned_abs() as usize) {
            *share += step;
        }

        Ok(shares.into_iter().map(|s| self.part(s)).collect())
    }

    /// A new value in this value's currency.
    fn part(&self, cents: i64) -> Money {
        Money::new(*self.currency()).with_cents(cents)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use crate::currency::{CurrencyConfig, Preset};
    use crate::error::MoneyError;
    use crate::money::Money;

    fn cents(parts: &[Money]) -> Vec<i64> {
        parts.iter().map(Money::amount).collect()
    }

    #[test]
    fn test_divide_by_scalar() {
        let a = Money::usd().with_cents(100);
        let res = a.divide_by_scalar(3).unwrap();
        assert_eq!(res.len(), 3);
        assert_eq!(cents(&res), vec![34, 33, 33]);
    }

    #[test]
    fn test_divide_by_scalar_even_and_small() {
        assert_eq!(
            cents(&Money::usd().with_cents(100).divide_by_scalar(4).unwrap()),
            vec![25, 25, 25, 25]
        );
        assert_eq!(
            cents(&Money::usd().with_cents(2).divide_by_scalar(5).unwrap()),
            vec![1, 1, 0, 0, 0]
        );
        assert_eq!(
            cents(&Money::usd().with_cents(7).divide_by_scalar(1).unwrap()),
            vec![7]
        );
    }

    #[test]
    fn test_divide_by_scalar_negative() {
        let res = Money::usd().with_cents(-100).divide_by_scalar(3).unwrap();
        assert_eq!(cents(&res), vec![-34, -33, -33]);
        assert_eq!(res.iter().map(Money::amount).sum::<i64>(), -100);
    }

    #[test]
    fn test_divide_by_zero_parts() {
        assert!(matches!(
            Money::usd().with_cents(100).divide_by_scalar(0),
            Err(MoneyError::InvalidAllocation { .. })
        ));
    }

    #[test]
    fn test_parts_keep_currency() {
        let btc = Money::from_preset(Preset::Btc).with_cents(10);
        for part in btc.divide_by_scalar(3).unwrap() {
            assert_eq!(*part.currency(), CurrencyConfig::BTC);
            assert!(part.exact().is_none());
        }
    }

    #[test]
    fn test_divide_into_ratio() {
        let a = Money::usd().with_cents(100);
        let ratio = [1, 1, 1];
        let res = a.divide_into_ratio(&ratio).unwrap();
        assert_eq!(res.len(), ratio.len());
        assert_eq!(cents(&res), vec![34, 33, 33]);
    }

    #[test]
    fn test_divide_into_uneven_ratio() {
        let res = Money::usd().with_cents(100).divide_into_ratio(&[3, 7]).unwrap();
        assert_eq!(cents(&res), vec![30, 70]);

        // 5 * 1/6 = 0, 5 * 2/6 = 1, 5 * 3/6 = 2 → leftover 2
        let res = Money::usd().with_cents(5).divide_into_ratio(&[1, 2, 3]).unwrap();
        assert_eq!(cents(&res), vec![1, 2, 2]);
    }

    #[test]
    fn test_divide_into_ratio_negative_amount() {
        let res = Money::usd().with_cents(-100).divide_into_ratio(&[1, 1, 1]).unwrap();
        assert_eq!(cents(&res), vec![-34, -33, -33]);
    }

    #[test]
    fn test_divide_into_ratio_large_amount() {
        let res = Money::usd()
            .with_cents(i64::MAX)
            .divide_into_ratio(&[i64::MAX, 1])
            .unwrap();
        assert_eq!(res.iter().map(|m| m.amount() as i128).sum::<i128>(), i64::MAX as i128);
    }

    #[test]
    fn test_invalid_ratios() {
        let a = Money::usd().with_cents(100);
        assert!(a.divide_into_ratio(&[]).is_err());
        assert!(a.divide_into_ratio(&[0, 0]).is_err());
        assert!(a.divide_into_ratio(&[2, -1]).is_err());
    }
}
