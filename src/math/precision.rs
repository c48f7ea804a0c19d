//! Precision trait shared by the standard and high-precision decimals.
//!
//! The conversion formulas in [`sqrt_price_math`](super::sqrt_price_math)
//! are generic over `P: Precision`, so the same algorithm runs at 18 and
//! 36 decimals with identical semantics:
//!
//! | Type | Decimals | Use |
//! |------|----------|-----|
//! | [`Dec`](super::Dec) | 18 | every swap step |
//! | [`BigDec`](super::BigDec) | 36 | precision-loss recovery |

use super::decimal::Decimal;
use crate::domain::Rounding;
use crate::error::ArithmeticError;

/// Abstraction over the decimal precisions used in swap math.
///
/// # Contract
///
/// - Checked methods return [`Err`] on overflow, underflow or division by
///   zero. They never panic and never clamp.
/// - Multiplication and division take an explicit [`Rounding`]; there is
///   no round-to-nearest.
pub trait Precision: Clone + Copy + core::fmt::Debug + PartialEq + PartialOrd {
    /// Returns `true` if the value is zero.
    #[must_use]
    fn is_zero(&self) -> bool;

    /// Checked addition.
    ///
    /// # Errors
    ///
    /// [`ArithmeticError::Overflow`] if the result is not representable.
    fn checked_add(&self, other: &Self) -> Result<Self, ArithmeticError>;

    /// Checked subtraction.
    ///
    /// # Errors
    ///
    /// [`ArithmeticError::Underflow`] if the result would be negative.
    fn checked_sub(&self, other: &Self) -> Result<Self, ArithmeticError>;

    /// Checked multiplication with explicit rounding.
    ///
    /// # Errors
    ///
    /// [`ArithmeticError::Overflow`] if the result is not representable.
    fn checked_mul(&self, other: &Self, rounding: Rounding) -> Result<Self, ArithmeticError>;

    /// Checked division with explicit rounding.
    ///
    /// # Errors
    ///
    /// [`ArithmeticError::DivisionByZero`] if `other` is zero.
    fn checked_div(&self, other: &Self, rounding: Rounding) -> Result<Self, ArithmeticError>;

    /// Rounds up to a whole number.
    ///
    /// # Errors
    ///
    /// [`ArithmeticError::Overflow`] if the ceiling is not representable.
    fn ceil(&self) -> Result<Self, ArithmeticError>;
}

impl<const D: usize> Precision for Decimal<D> {
    fn is_zero(&self) -> bool {
        Decimal::is_zero(self)
    }

    fn checked_add(&self, other: &Self) -> Result<Self, ArithmeticError> {
        Decimal::checked_add(self, other)
    }

    fn checked_sub(&self, other: &Self) -> Result<Self, ArithmeticError> {
        Decimal::checked_sub(self, other)
    }

    fn checked_mul(&self, other: &Self, rounding: Rounding) -> Result<Self, ArithmeticError> {
        Decimal::checked_mul(self, other, rounding)
    }

    fn checked_div(&self, other: &Self, rounding: Rounding) -> Result<Self, ArithmeticError> {
        Decimal::checked_div(self, other, rounding)
    }

    fn ceil(&self) -> Result<Self, ArithmeticError> {
        Decimal::ceil(self)
    }
}
