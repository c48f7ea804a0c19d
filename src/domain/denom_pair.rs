//! The two denominations of a pool.

use std::io;

use borsh::{BorshDeserialize, BorshSerialize};

use super::Denom;
use crate::error::SwapError;

/// Position of a denomination within its pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenIndex {
    /// The base asset; selling it moves the price down.
    Zero,
    /// The quote asset; selling it moves the price up.
    One,
}

impl TokenIndex {
    /// The other side of the pair.
    #[must_use]
    pub const fn other(&self) -> Self {
        match self {
            Self::Zero => Self::One,
            Self::One => Self::Zero,
        }
    }
}

/// The pool's `(token0, token1)` pair of distinct denominations.
///
/// Unlike a canonically sorted pair, order matters here: the spot price is
/// quoted as units of `token1` per unit of `token0`.
///
/// # Examples
///
/// ```
/// use concentrated_swap::domain::{Denom, DenomPair, TokenIndex};
///
/// let eth = Denom::new("ueth").expect("valid");
/// let usdc = Denom::new("uusdc").expect("valid");
/// let pair = DenomPair::new(eth.clone(), usdc.clone()).expect("distinct");
/// assert_eq!(pair.index_of(&usdc), Some(TokenIndex::One));
/// assert_eq!(pair.other(&eth), Some(&usdc));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DenomPair {
    token0: Denom,
    token1: Denom,
}

impl DenomPair {
    /// Creates a pair.
    ///
    /// # Errors
    ///
    /// [`SwapError::DenomsEqual`] if both denominations are the same.
    pub fn new(token0: Denom, token1: Denom) -> crate::error::Result<Self> {
        if token0 == token1 {
            return Err(SwapError::DenomsEqual {
                denom: token0.to_string(),
            });
        }
        Ok(Self { token0, token1 })
    }

    /// First denomination.
    #[must_use]
    pub const fn token0(&self) -> &Denom {
        &self.token0
    }

    /// Second denomination.
    #[must_use]
    pub const fn token1(&self) -> &Denom {
        &self.token1
    }

    /// Denomination at `index`.
    #[must_use]
    pub const fn get(&self, index: TokenIndex) -> &Denom {
        match index {
            TokenIndex::Zero => &self.token0,
            TokenIndex::One => &self.token1,
        }
    }

    /// Returns where `denom` sits in the pair, if it does.
    #[must_use]
    pub fn index_of(&self, denom: &Denom) -> Option<TokenIndex> {
        if *denom == self.token0 {
            Some(TokenIndex::Zero)
        } else if *denom == self.token1 {
            Some(TokenIndex::One)
        } else {
            None
        }
    }

    /// Returns `true` if `denom` is part of the pair.
    #[must_use]
    pub fn contains(&self, denom: &Denom) -> bool {
        self.index_of(denom).is_some()
    }

    /// Returns the counterpart of `denom`.
    #[must_use]
    pub fn other(&self, denom: &Denom) -> Option<&Denom> {
        self.index_of(denom).map(|index| self.get(index.other()))
    }
}

impl BorshSerialize for DenomPair {
    fn serialize<W: io::Write>(&self, writer: &mut W) -> io::Result<()> {
        BorshSerialize::serialize(&self.token0, writer)?;
        BorshSerialize::serialize(&self.token1, writer)
    }
}

impl BorshDeserialize for DenomPair {
    fn deserialize_reader<R: io::Read>(reader: &mut R) -> io::Result<Self> {
        let token0 = Denom::deserialize_reader(reader)?;
        let token1 = Denom::deserialize_reader(reader)?;
        Self::new(token0, token1).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e.to_string()))
    }
}
