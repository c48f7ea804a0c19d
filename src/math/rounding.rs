//! Rounding helpers for wide integer division.
//!
//! [`div_round`] is the low-level building block behind every decimal
//! multiplication and division: the exact product or scaled dividend is
//! formed in 512 bits and then divided with an explicit [`Rounding`].
//!
//! # Convention
//!
//! **Always round in favour of the pool**:
//!
//! | Quantity | Direction |
//! |----------|-----------|
//! | Amount the user pays in | [`Rounding::Up`] |
//! | Amount the user receives | [`Rounding::Down`] |
//! | Spread charge | [`Rounding::Up`] |

use primitive_types::U512;

use crate::domain::Rounding;

/// Division of `U512` values with explicit rounding direction.
///
/// - [`Rounding::Down`]: truncation toward zero.
/// - [`Rounding::Up`]: smallest integer ≥ the exact quotient.
///
/// Returns [`None`] if `denominator` is zero or the rounded quotient
/// overflows.
///
/// # Examples
///
/// ```
/// use concentrated_swap::domain::Rounding;
/// use concentrated_swap::math::div_round;
/// use primitive_types::U512;
///
/// let ten = U512::from(10u8);
/// let three = U512::from(3u8);
/// assert_eq!(div_round(ten, three, Rounding::Down), Some(U512::from(3u8)));
/// assert_eq!(div_round(ten, three, Rounding::Up), Some(U512::from(4u8)));
/// assert_eq!(div_round(ten, U512::zero(), Rounding::Down), None);
/// ```
#[must_use]
pub fn div_round(numerator: U512, denominator: U512, rounding: Rounding) -> Option<U512> {
    if denominator.is_zero() {
        return None;
    }
    let (quotient, remainder) = numerator.div_mod(denominator);
    match rounding {
        Rounding::Down => Some(quotient),
        Rounding::Up if remainder.is_zero() => Some(quotient),
        Rounding::Up => quotient.checked_add(U512::one()),
    }
}
