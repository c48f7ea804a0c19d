//! Signed liquidity deltas.
//!
//! Liquidity itself is never negative, but the net change stored on a tick
//! is: positive on a position's lower bound, negative on its upper bound.
//! [`SignedDec`] is a sign-magnitude wrapper over [`Dec`] used only for
//! those deltas.

use core::fmt;
use core::ops::Neg;
use std::io;

use borsh::{BorshDeserialize, BorshSerialize};

use super::decimal::Dec;
use crate::domain::Rounding;
use crate::error::ArithmeticError;

/// Sign-magnitude decimal. Zero is always stored as non-negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SignedDec {
    negative: bool,
    magnitude: Dec,
}

impl SignedDec {
    /// Zero.
    pub const ZERO: Self = Self {
        negative: false,
        magnitude: Dec::ZERO,
    };

    /// Builds a value from a sign and a magnitude.
    #[must_use]
    pub fn new(negative: bool, magnitude: Dec) -> Self {
        Self {
            negative: negative && !magnitude.is_zero(),
            magnitude,
        }
    }

    /// Positive value.
    #[must_use]
    pub fn positive(magnitude: Dec) -> Self {
        Self::new(false, magnitude)
    }

    /// Negative value.
    #[must_use]
    pub fn negative(magnitude: Dec) -> Self {
        Self::new(true, magnitude)
    }

    /// Returns `true` for values strictly below zero.
    #[must_use]
    pub const fn is_negative(&self) -> bool {
        self.negative
    }

    /// Returns `true` for zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.magnitude.is_zero()
    }

    /// Absolute value.
    #[must_use]
    pub const fn magnitude(&self) -> Dec {
        self.magnitude
    }

    /// Checked signed addition.
    ///
    /// # Errors
    ///
    /// [`ArithmeticError::Overflow`] if the magnitude does not fit.
    pub fn checked_add(&self, other: &Self) -> Result<Self, ArithmeticError> {
        if self.negative == other.negative {
            let magnitude = self.magnitude.checked_add(&other.magnitude)?;
            return Ok(Self::new(self.negative, magnitude));
        }
        if self.magnitude >= other.magnitude {
            let magnitude = self.magnitude.checked_sub(&other.magnitude)?;
            Ok(Self::new(self.negative, magnitude))
        } else {
            let magnitude = other.magnitude.checked_sub(&self.magnitude)?;
            Ok(Self::new(other.negative, magnitude))
        }
    }

    /// Checked signed subtraction.
    ///
    /// # Errors
    ///
    /// [`ArithmeticError::Overflow`] if the magnitude does not fit.
    pub fn checked_sub(&self, other: &Self) -> Result<Self, ArithmeticError> {
        self.checked_add(&-*other)
    }

    /// Adds this delta to a non-negative base.
    ///
    /// # Errors
    ///
    /// [`ArithmeticError::Underflow`] if the result would be negative.
    pub fn apply_to(&self, base: Dec) -> Result<Dec, ArithmeticError> {
        if self.negative {
            base.checked_sub(&self.magnitude)
        } else {
            base.checked_add(&self.magnitude)
        }
    }

    /// Square root of a non-negative value.
    ///
    /// # Errors
    ///
    /// [`ArithmeticError::NegativeSqrt`] for negative values.
    pub fn sqrt(&self, rounding: Rounding) -> Result<Dec, ArithmeticError> {
        if self.negative {
            return Err(ArithmeticError::NegativeSqrt);
        }
        self.magnitude.sqrt(rounding)
    }
}

impl Neg for SignedDec {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(!self.negative, self.magnitude)
    }
}

impl From<Dec> for SignedDec {
    fn from(value: Dec) -> Self {
        Self::positive(value)
    }
}

impl fmt::Display for SignedDec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negative {
            write!(f, "-{}", self.magnitude)
        } else {
            write!(f, "{}", self.magnitude)
        }
    }
}

impl BorshSerialize for SignedDec {
    fn serialize<W: io::Write>(&self, writer: &mut W) -> io::Result<()> {
        BorshSerialize::serialize(&self.negative, writer)?;
        BorshSerialize::serialize(&self.magnitude, writer)
    }
}

impl BorshDeserialize for SignedDec {
    fn deserialize_reader<R: io::Read>(reader: &mut R) -> io::Result<Self> {
        let negative = bool::deserialize_reader(reader)?;
        let magnitude = Dec::deserialize_reader(reader)?;
        Ok(Self::new(negative, magnitude))
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for SignedDec {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for SignedDec {
    fn deserialize<De: serde::Deserializer<'de>>(deserializer: De) -> Result<Self, De::Error> {
        let literal = <String as serde::Deserialize>::deserialize(deserializer)?;
        let (negative, digits) = match literal.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, literal.as_str()),
        };
        let magnitude: Dec = digits.parse().map_err(serde::de::Error::custom)?;
        Ok(Self::new(negative, magnitude))
    }
}
