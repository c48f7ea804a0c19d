//! Swap fee rate.

use core::fmt;
use std::io;

use borsh::{BorshDeserialize, BorshSerialize};

use crate::error::SwapError;
use crate::math::Dec;

/// Basis-point denominator (10 000 = 100%).
const BPS_DENOMINATOR: u128 = 10_000;

/// Fraction of each swap's input retained by the pool, in `[0, 1)`.
///
/// # Examples
///
/// ```
/// use concentrated_swap::domain::SpreadFactor;
///
/// let fee = SpreadFactor::from_basis_points(30).expect("0.30%");
/// assert_eq!(fee.get().to_string(), "0.003000000000000000");
/// assert!(SpreadFactor::from_basis_points(10_000).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SpreadFactor(Dec);

impl SpreadFactor {
    /// No fee.
    pub const ZERO: Self = Self(Dec::ZERO);

    /// Creates a spread factor.
    ///
    /// # Errors
    ///
    /// [`SwapError::InvalidSpreadFactor`] unless `0 ≤ value < 1`.
    pub fn new(value: Dec) -> crate::error::Result<Self> {
        if value >= Dec::one() {
            return Err(SwapError::InvalidSpreadFactor(
                "spread factor must be less than one",
            ));
        }
        Ok(Self(value))
    }

    /// Creates a spread factor from basis points.
    ///
    /// # Errors
    ///
    /// [`SwapError::InvalidSpreadFactor`] for 10 000 bps or more.
    pub fn from_basis_points(bps: u32) -> crate::error::Result<Self> {
        let value = Dec::from_ratio(u128::from(bps), BPS_DENOMINATOR, crate::domain::Rounding::Down)?;
        Self::new(value)
    }

    /// Returns the rate.
    #[must_use]
    pub const fn get(&self) -> Dec {
        self.0
    }

    /// Returns `true` for a zero fee.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Returns `1 - rate`, always strictly positive.
    ///
    /// # Errors
    ///
    /// Unreachable for a validated factor; propagates the subtraction
    /// contract.
    pub fn complement(&self) -> crate::error::Result<Dec> {
        Ok(Dec::one().checked_sub(&self.0)?)
    }
}

impl fmt::Display for SpreadFactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl BorshSerialize for SpreadFactor {
    fn serialize<W: io::Write>(&self, writer: &mut W) -> io::Result<()> {
        BorshSerialize::serialize(&self.0, writer)
    }
}

impl BorshDeserialize for SpreadFactor {
    fn deserialize_reader<R: io::Read>(reader: &mut R) -> io::Result<Self> {
        let raw = Dec::deserialize_reader(reader)?;
        Self::new(raw).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e.to_string()))
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for SpreadFactor {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = <Dec as serde::Deserialize>::deserialize(deserializer)?;
        Self::new(raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn basis_points_conversion() {
        let Ok(f) = SpreadFactor::from_basis_points(30) else {
            panic!("expected Ok");
        };
        assert_eq!(f.to_string(), "0.003000000000000000");
        assert!(SpreadFactor::from_basis_points(0).is_ok_and(|f| f.is_zero()));
    }

    #[test]
    fn rejects_one_and_above() {
        assert_eq!(
            SpreadFactor::new(Dec::one()),
            Err(SwapError::InvalidSpreadFactor("spread factor must be less than one"))
        );
        assert!(SpreadFactor::from_basis_points(20_000).is_err());
    }

    #[test]
    fn complement() {
        let Ok(f) = SpreadFactor::from_basis_points(2_500) else {
            panic!("expected Ok");
        };
        let Ok(c) = f.complement() else {
            panic!("expected Ok");
        };
        assert_eq!(c.to_string(), "0.750000000000000000");
    }
}
