//! # Rounding
//!
//! The single rounding policy of the crate: round half to even.
//!
//! ## Bankers Rounding Explained
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  Input carries ONE guard digit past the target precision:           │
//! │                                                                     │
//! │    66699|5  →  guard 5, kept 66699 (odd)   →  66700                 │
//! │    66698|5  →  guard 5, kept 66698 (even)  →  66698                 │
//! │    1239|2   →  guard 2                     →  1239                  │
//! │    1363|7   →  guard 7                     →  1364                  │
//! │                                                                     │
//! │  Ties go to the even neighbour, so over many roundings the          │
//! │  errors cancel instead of drifting upward.                          │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

/// Drops the last (guard) digit of `x`, rounding half to even.
///
/// Negative inputs round symmetrically: `-125 → -12`, `-135 → -14`.
///
/// ## Example
/// ```rust
/// use cash_core::rounding::round_half_to_even;
///
/// assert_eq!(round_half_to_even(1234), 123);
/// assert_eq!(round_half_to_even(1236), 124);
/// assert_eq!(round_half_to_even(1225), 122);
/// assert_eq!(round_half_to_even(1235), 124);
/// ```
#[inline]
pub const fn round_half_to_even(x: i64) -> i64 {
    let kept = x / 10;
    let guard = (x % 10).abs();
    let away = if x < 0 { kept - 1 } else { kept + 1 };

    if guard < 5 {
        kept
    } else if guard > 5 {
        away
    } else if kept % 2 == 0 {
        kept
    } else {
        away
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
