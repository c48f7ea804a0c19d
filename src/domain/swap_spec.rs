//! Swap request specification.

use core::fmt;

use super::{Coin, Denom};
use crate::error::SwapError;

/// Which side of a swap the caller fixes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum SwapType {
    /// The input amount is fixed; output is computed.
    ExactIn = 0,
    /// The output amount is fixed; input is computed.
    ExactOut = 1,
}

impl SwapType {
    /// Returns `true` for [`SwapType::ExactIn`].
    #[must_use]
    pub const fn is_exact_in(&self) -> bool {
        matches!(self, Self::ExactIn)
    }
}

impl fmt::Display for SwapType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ExactIn => write!(f, "ExactIn"),
            Self::ExactOut => write!(f, "ExactOut"),
        }
    }
}

/// A swap request: the specified coin and the denomination on the other
/// side.
///
/// # Invariants
///
/// - The specified amount is non-zero.
/// - The two denominations differ.
///
/// # Examples
///
/// ```
/// use concentrated_swap::domain::{Amount, Coin, Denom, SwapSpec};
///
/// let uosmo = Denom::new("uosmo").expect("valid");
/// let uatom = Denom::new("uatom").expect("valid");
/// let spec = SwapSpec::exact_in(Coin::new(uosmo, Amount::new(1_000)), uatom);
/// assert!(spec.is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SwapSpec {
    /// Sell exactly `token_in` for as much `denom_out` as possible.
    ExactIn {
        /// The fixed input.
        token_in: Coin,
        /// Denomination received.
        denom_out: Denom,
    },
    /// Buy exactly `token_out` for as little `denom_in` as possible.
    ExactOut {
        /// The fixed output.
        token_out: Coin,
        /// Denomination paid.
        denom_in: Denom,
    },
}

impl SwapSpec {
    /// Creates an exact-input request.
    ///
    /// # Errors
    ///
    /// - [`SwapError::InvalidAmount`] if the input amount is zero.
    /// - [`SwapError::DenomsEqual`] if both denominations are the same.
    pub fn exact_in(token_in: Coin, denom_out: Denom) -> crate::error::Result<Self> {
        Self::validate(&token_in, &denom_out)?;
        Ok(Self::ExactIn {
            token_in,
            denom_out,
        })
    }

    /// Creates an exact-output request.
    ///
    /// # Errors
    ///
    /// - [`SwapError::InvalidAmount`] if the output amount is zero.
    /// - [`SwapError::DenomsEqual`] if both denominations are the same.
    pub fn exact_out(token_out: Coin, denom_in: Denom) -> crate::error::Result<Self> {
        Self::validate(&token_out, &denom_in)?;
        Ok(Self::ExactOut {
            token_out,
            denom_in,
        })
    }

    fn validate(specified: &Coin, counter: &Denom) -> crate::error::Result<()> {
        if specified.amount().is_zero() {
            return Err(SwapError::InvalidAmount("swap amount must be non-zero"));
        }
        if specified.denom() == counter {
            return Err(SwapError::DenomsEqual {
                denom: counter.to_string(),
            });
        }
        Ok(())
    }

    /// Returns the coin whose amount the caller fixed.
    #[must_use]
    pub const fn specified(&self) -> &Coin {
        match self {
            Self::ExactIn { token_in, .. } => token_in,
            Self::ExactOut { token_out, .. } => token_out,
        }
    }

    /// Denomination entering the pool.
    #[must_use]
    pub const fn denom_in(&self) -> &Denom {
        match self {
            Self::ExactIn { token_in, .. } => token_in.denom(),
            Self::ExactOut { denom_in, .. } => denom_in,
        }
    }

    /// Denomination leaving the pool.
    #[must_use]
    pub const fn denom_out(&self) -> &Denom {
        match self {
            Self::ExactIn { denom_out, .. } => denom_out,
            Self::ExactOut { token_out, .. } => token_out.denom(),
        }
    }

    /// Returns the [`SwapType`] descriptor.
    #[must_use]
    pub const fn swap_type(&self) -> SwapType {
        match self {
            Self::ExactIn { .. } => SwapType::ExactIn,
            Self::ExactOut { .. } => SwapType::ExactOut,
        }
    }
}

impl fmt::Display for SwapSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ExactIn {
                token_in,
                denom_out,
            } => write!(f, "ExactIn({token_in} -> {denom_out})"),
            Self::ExactOut {
                token_out,
                denom_in,
            } => write!(f, "ExactOut({denom_in} -> {token_out})"),
        }
    }
}
