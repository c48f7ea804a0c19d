//! Concentrated liquidity pool record.

use borsh::{BorshDeserialize, BorshSerialize};

use super::{Denom, DenomPair, Rounding, SpreadFactor, Tick, TokenIndex};
use crate::error::SwapError;
use crate::math::Dec;

/// Persistent state of one pool.
///
/// The swap engine reads a pool, mutates a working copy and writes it back
/// only when a swap commits. Tick-level state lives in the tick index, not
/// here.
///
/// # Invariants
///
/// - `current_tick` is the greatest tick whose sqrt price is at most
///   `current_sqrt_price`, or the tick left behind by the last crossing.
/// - `liquidity` equals the sum of `liquidity_net` over initialized ticks
///   at or below `current_tick`.
#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Pool {
    id: u64,
    denoms: DenomPair,
    current_sqrt_price: Dec,
    current_tick: Tick,
    liquidity: Dec,
    spread_factor: SpreadFactor,
    tick_spacing: u64,
    fee_growth_global0: Dec,
    fee_growth_global1: Dec,
}

impl Pool {
    /// Creates a pool record with no liquidity and zeroed accumulators.
    #[must_use]
    pub fn new(
        id: u64,
        denoms: DenomPair,
        current_sqrt_price: Dec,
        current_tick: Tick,
        spread_factor: SpreadFactor,
        tick_spacing: u64,
    ) -> Self {
        Self {
            id,
            denoms,
            current_sqrt_price,
            current_tick,
            liquidity: Dec::ZERO,
            spread_factor,
            tick_spacing,
            fee_growth_global0: Dec::ZERO,
            fee_growth_global1: Dec::ZERO,
        }
    }

    /// Pool identifier.
    #[must_use]
    pub const fn id(&self) -> u64 {
        self.id
    }

    /// The two denominations.
    #[must_use]
    pub const fn denoms(&self) -> &DenomPair {
        &self.denoms
    }

    /// Current sqrt price.
    #[must_use]
    pub const fn current_sqrt_price(&self) -> Dec {
        self.current_sqrt_price
    }

    /// Current tick.
    #[must_use]
    pub const fn current_tick(&self) -> Tick {
        self.current_tick
    }

    /// Active liquidity.
    #[must_use]
    pub const fn liquidity(&self) -> Dec {
        self.liquidity
    }

    /// Fee rate charged on swap input.
    #[must_use]
    pub const fn spread_factor(&self) -> SpreadFactor {
        self.spread_factor
    }

    /// Spacing that initialized ticks must be multiples of.
    #[must_use]
    pub const fn tick_spacing(&self) -> u64 {
        self.tick_spacing
    }

    /// Global fee growth per unit of liquidity for one token.
    #[must_use]
    pub const fn fee_growth_global(&self, token: TokenIndex) -> Dec {
        match token {
            TokenIndex::Zero => self.fee_growth_global0,
            TokenIndex::One => self.fee_growth_global1,
        }
    }

    /// Spot price of `base` quoted in `quote`.
    ///
    /// The stored price is `token1` per `token0`; asking for the inverse
    /// divides one by it, rounding down.
    ///
    /// # Errors
    ///
    /// - [`SwapError::DenomNotInPool`] if either denom is foreign.
    /// - [`SwapError::DenomsEqual`] if `base == quote`.
    /// - [`SwapError::Arithmetic`] on precision failure.
    pub fn spot_price(&self, base: &Denom, quote: &Denom) -> crate::error::Result<Dec> {
        if base == quote {
            return Err(SwapError::DenomsEqual {
                denom: base.to_string(),
            });
        }
        let base_index = self.index_of(base)?;
        self.index_of(quote)?;
        let price = self
            .current_sqrt_price
            .checked_mul(&self.current_sqrt_price, Rounding::Down)?;
        match base_index {
            TokenIndex::Zero => Ok(price),
            TokenIndex::One => Ok(Dec::one().checked_div(&price, Rounding::Down)?),
        }
    }

    /// Resolves `denom` to its side of the pool.
    ///
    /// # Errors
    ///
    /// [`SwapError::DenomNotInPool`] for a foreign denomination.
    pub fn index_of(&self, denom: &Denom) -> crate::error::Result<TokenIndex> {
        self.denoms
            .index_of(denom)
            .ok_or_else(|| SwapError::DenomNotInPool {
                denom: denom.to_string(),
                pool_id: self.id,
            })
    }

    pub(crate) fn set_current_state(&mut self, sqrt_price: Dec, tick: Tick, liquidity: Dec) {
        self.current_sqrt_price = sqrt_price;
        self.current_tick = tick;
        self.liquidity = liquidity;
    }

    pub(crate) fn set_liquidity(&mut self, liquidity: Dec) {
        self.liquidity = liquidity;
    }

    pub(crate) fn add_fee_growth(
        &mut self,
        token: TokenIndex,
        growth: Dec,
    ) -> crate::error::Result<()> {
        let slot = match token {
            TokenIndex::Zero => &mut self.fee_growth_global0,
            TokenIndex::One => &mut self.fee_growth_global1,
        };
        *slot = slot.checked_add(&growth)?;
        Ok(())
    }
}
