//! Token denominations and coins.

use core::fmt;
use std::io;

use borsh::{BorshDeserialize, BorshSerialize};

use super::Amount;
use crate::error::SwapError;

/// Maximum denomination length in bytes.
const MAX_DENOM_LEN: usize = 128;

/// Minimum denomination length in bytes.
const MIN_DENOM_LEN: usize = 3;

/// A validated token denomination such as `uosmo` or `ibc/27394F…`.
///
/// Must start with an ASCII letter and contain only ASCII alphanumerics
/// and `/ : . _ -`, between 3 and 128 bytes.
///
/// # Examples
///
/// ```
/// use concentrated_swap::domain::Denom;
///
/// assert!(Denom::new("uosmo").is_ok());
/// assert!(Denom::new("ibc/27394FB092D2ECCD").is_ok());
/// assert!(Denom::new("1abc").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Denom(String);

impl Denom {
    /// Creates a validated denomination.
    ///
    /// # Errors
    ///
    /// [`SwapError::InvalidDenom`] if the string is malformed.
    pub fn new(value: impl Into<String>) -> crate::error::Result<Self> {
        let value = value.into();
        Self::validate(&value)?;
        Ok(Self(value))
    }

    fn validate(value: &str) -> crate::error::Result<()> {
        if value.len() < MIN_DENOM_LEN || value.len() > MAX_DENOM_LEN {
            return Err(SwapError::InvalidDenom("denom must be 3 to 128 bytes long"));
        }
        let mut bytes = value.bytes();
        if !bytes.next().is_some_and(|b| b.is_ascii_alphabetic()) {
            return Err(SwapError::InvalidDenom("denom must start with a letter"));
        }
        if !bytes.all(|b| b.is_ascii_alphanumeric() || matches!(b, b'/' | b':' | b'.' | b'_' | b'-')) {
            return Err(SwapError::InvalidDenom("denom contains an invalid character"));
        }
        Ok(())
    }

    /// Returns the denomination string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Denom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl BorshSerialize for Denom {
    fn serialize<W: io::Write>(&self, writer: &mut W) -> io::Result<()> {
        BorshSerialize::serialize(&self.0, writer)
    }
}

impl BorshDeserialize for Denom {
    fn deserialize_reader<R: io::Read>(reader: &mut R) -> io::Result<Self> {
        let raw = String::deserialize_reader(reader)?;
        Self::new(raw).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e.to_string()))
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Denom {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Denom {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = <String as serde::Deserialize>::deserialize(deserializer)?;
        Self::new(raw).map_err(serde::de::Error::custom)
    }
}

/// An amount of a specific denomination.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coin {
    denom: Denom,
    amount: Amount,
}

impl Coin {
    /// Creates a coin.
    pub const fn new(denom: Denom, amount: Amount) -> Self {
        Self { denom, amount }
    }

    /// Returns the denomination.
    #[must_use]
    pub const fn denom(&self) -> &Denom {
        &self.denom
    }

    /// Returns the amount.
    pub const fn amount(&self) -> Amount {
        self.amount
    }
}

impl fmt::Display for Coin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.amount, self.denom)
    }
}
