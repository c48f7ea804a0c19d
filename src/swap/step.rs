//! Result of one swap step within a single liquidity bucket.

use crate::domain::{Rounding, SpreadFactor};
use crate::error::ArithmeticError;
use crate::math::Dec;

/// Movement of the price inside one bucket and the amounts it moved.
///
/// "Specified" is the token whose amount the caller fixed (input for
/// exact-in, output for exact-out); "computed" is the other side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwapStep {
    pub(crate) sqrt_price_start: Dec,
    pub(crate) sqrt_price_target: Dec,
    pub(crate) sqrt_price_next: Dec,
    pub(crate) amount_specified: Dec,
    pub(crate) amount_computed: Dec,
    pub(crate) spread_charge: Dec,
    pub(crate) reached_target: bool,
    pub(crate) recovered: bool,
}

impl SwapStep {
    /// Sqrt price before the step.
    #[must_use]
    pub const fn sqrt_price_start(&self) -> Dec {
        self.sqrt_price_start
    }

    /// Sqrt price the step aimed for.
    #[must_use]
    pub const fn sqrt_price_target(&self) -> Dec {
        self.sqrt_price_target
    }

    /// Sqrt price after the step.
    #[must_use]
    pub const fn sqrt_price_next(&self) -> Dec {
        self.sqrt_price_next
    }

    /// Amount of the specified token consumed, excluding the spread charge.
    #[must_use]
    pub const fn amount_specified(&self) -> Dec {
        self.amount_specified
    }

    /// Amount of the computed token, excluding the spread charge.
    #[must_use]
    pub const fn amount_computed(&self) -> Dec {
        self.amount_computed
    }

    /// Spread charged on the input token.
    #[must_use]
    pub const fn spread_charge(&self) -> Dec {
        self.spread_charge
    }

    /// Whether the price landed on the target.
    #[must_use]
    pub const fn reached_target(&self) -> bool {
        self.reached_target
    }

    /// Whether the step fell back to precision-loss recovery.
    #[must_use]
    pub const fn recovered(&self) -> bool {
        self.recovered
    }
}

/// Spread owed on top of `amount_in` so that the pool keeps the fraction
/// `f` of the gross input: `amount_in · f / (1 − f)`, rounded up.
pub(crate) fn spread_on_net_input(
    amount_in: Dec,
    spread_factor: SpreadFactor,
) -> Result<Dec, ArithmeticError> {
    if spread_factor.is_zero() {
        return Ok(Dec::ZERO);
    }
    let complement = Dec::one().checked_sub(&spread_factor.get())?;
    amount_in
        .checked_mul(&spread_factor.get(), Rounding::Up)?
        .checked_div(&complement, Rounding::Up)
}

/// Spread of an exact-in step.
///
/// When the target was reached only part of `remaining` was used and the
/// charge is derived from the net input, capped at what is left. Otherwise
/// the step consumed all of `remaining` and everything above the net input
/// is spread.
pub(crate) fn spread_for_exact_in(
    reached_target: bool,
    amount_in: Dec,
    remaining: Dec,
    spread_factor: SpreadFactor,
) -> Result<Dec, ArithmeticError> {
    if spread_factor.is_zero() {
        return Ok(Dec::ZERO);
    }
    let headroom = remaining.checked_sub(&amount_in)?;
    if reached_target {
        Ok(spread_on_net_input(amount_in, spread_factor)?.min(headroom))
    } else {
        Ok(headroom)
    }
}
