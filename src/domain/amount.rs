//! Whole token amounts.

use core::fmt;

use super::Rounding;
use crate::error::ArithmeticError;
use crate::math::Dec;

/// A whole amount of a token in its smallest unit.
///
/// Swap math runs on [`Dec`]; amounts enter as `Amount`, are widened with
/// [`to_dec`](Self::to_dec) and are converted back with
/// [`from_dec`](Self::from_dec) using the pool-favourable direction
/// (inputs up, outputs down).
///
/// # Examples
///
/// ```
/// use concentrated_swap::domain::{Amount, Rounding};
/// use concentrated_swap::math::Dec;
///
/// let a = Amount::new(100);
/// assert_eq!(a.checked_add(&Amount::new(1)), Some(Amount::new(101)));
///
/// let fractional: Dec = "2.5".parse().expect("literal");
/// assert_eq!(Amount::from_dec(&fractional, Rounding::Up), Ok(Amount::new(3)));
/// assert_eq!(Amount::from_dec(&fractional, Rounding::Down), Ok(Amount::new(2)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[must_use]
pub struct Amount(u128);

impl Amount {
    /// Zero amount.
    pub const ZERO: Self = Self(0);

    /// Maximum representable amount.
    pub const MAX: Self = Self(u128::MAX);

    /// Creates a new `Amount`.
    pub const fn new(value: u128) -> Self {
        Self(value)
    }

    /// Returns the underlying value.
    #[must_use]
    pub const fn get(&self) -> u128 {
        self.0
    }

    /// Returns `true` if the amount is zero.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checked addition. `None` on overflow.
    #[must_use]
    pub const fn checked_add(&self, other: &Self) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }

    /// Checked subtraction. `None` on underflow.
    #[must_use]
    pub const fn checked_sub(&self, other: &Self) -> Option<Self> {
        match self.0.checked_sub(other.0) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }

    /// Widens to a decimal.
    ///
    /// # Errors
    ///
    /// Never fails for `u128` inputs; the signature propagates the decimal
    /// constructor's contract.
    pub fn to_dec(&self) -> Result<Dec, ArithmeticError> {
        Dec::from_integer(self.0)
    }

    /// Converts a decimal to a whole amount with the given rounding.
    ///
    /// # Errors
    ///
    /// [`ArithmeticError::Overflow`] if the value exceeds `u128`.
    pub fn from_dec(value: &Dec, rounding: Rounding) -> Result<Self, ArithmeticError> {
        value.to_integer(rounding).map(Self)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u128> for Amount {
    fn from(value: u128) -> Self {
        Self(value)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn new_and_get() {
        assert_eq!(Amount::new(42).get(), 42);
        assert_eq!(Amount::default(), Amount::ZERO);
        assert!(Amount::ZERO.is_zero());
    }

    #[test]
    fn checked_add_and_sub() {
        assert_eq!(Amount::MAX.checked_add(&Amount::new(1)), None);
        assert_eq!(Amount::new(1).checked_sub(&Amount::new(2)), None);
        assert_eq!(Amount::new(5).checked_sub(&Amount::new(2)), Some(Amount::new(3)));
    }

    #[test]
    fn dec_round_trip_for_whole_amounts() {
        let a = Amount::new(1_000_000_007);
        let Ok(d) = a.to_dec() else {
            panic!("expected Ok");
        };
        assert_eq!(Amount::from_dec(&d, Rounding::Down), Ok(a));
        assert_eq!(Amount::from_dec(&d, Rounding::Up), Ok(a));
    }

    #[test]
    fn max_amount_widens() {
        assert!(Amount::MAX.to_dec().is_ok());
    }

    #[test]
    fn fractional_amounts_round_by_direction() {
        let Ok(d) = "7.000000000000000001".parse::<Dec>() else {
            panic!("literal");
        };
        assert_eq!(Amount::from_dec(&d, Rounding::Up), Ok(Amount::new(8)));
        assert_eq!(Amount::from_dec(&d, Rounding::Down), Ok(Amount::new(7)));
    }

    #[test]
    fn display() {
        assert_eq!(Amount::new(1_000_000).to_string(), "1000000");
    }
}
