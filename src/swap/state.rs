//! Running state of one swap.

use super::step::SwapStep;
use crate::domain::{Pool, Rounding, SwapType, Tick, TokenIndex};
use crate::math::Dec;

/// Working copy of the pool's price state, mutated once per step and
/// written back only when the swap commits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwapState {
    pub(crate) amount_specified_remaining: Dec,
    pub(crate) amount_calculated: Dec,
    pub(crate) sqrt_price: Dec,
    pub(crate) tick: Tick,
    pub(crate) liquidity: Dec,
    pub(crate) spread_charge_total: Dec,
    pub(crate) fee_growth_global0: Dec,
    pub(crate) fee_growth_global1: Dec,
}

impl SwapState {
    /// Snapshots `pool` with `amount_specified` left to swap.
    #[must_use]
    pub fn new(pool: &Pool, amount_specified: Dec) -> Self {
        Self {
            amount_specified_remaining: amount_specified,
            amount_calculated: Dec::ZERO,
            sqrt_price: pool.current_sqrt_price(),
            tick: pool.current_tick(),
            liquidity: pool.liquidity(),
            spread_charge_total: Dec::ZERO,
            fee_growth_global0: pool.fee_growth_global(TokenIndex::Zero),
            fee_growth_global1: pool.fee_growth_global(TokenIndex::One),
        }
    }

    /// Amount of the specified token still to swap.
    #[must_use]
    pub const fn amount_specified_remaining(&self) -> Dec {
        self.amount_specified_remaining
    }

    /// Amount of the computed token accumulated so far.
    #[must_use]
    pub const fn amount_calculated(&self) -> Dec {
        self.amount_calculated
    }

    /// Current sqrt price.
    #[must_use]
    pub const fn sqrt_price(&self) -> Dec {
        self.sqrt_price
    }

    /// Current tick.
    #[must_use]
    pub const fn tick(&self) -> Tick {
        self.tick
    }

    /// Active liquidity.
    #[must_use]
    pub const fn liquidity(&self) -> Dec {
        self.liquidity
    }

    /// Spread charged so far.
    #[must_use]
    pub const fn spread_charge_total(&self) -> Dec {
        self.spread_charge_total
    }

    /// Running global fee growth of `token`.
    #[must_use]
    pub const fn fee_growth_global(&self, token: TokenIndex) -> Dec {
        match token {
            TokenIndex::Zero => self.fee_growth_global0,
            TokenIndex::One => self.fee_growth_global1,
        }
    }

    /// Folds a step into the state.
    ///
    /// Exact-in consumes input plus spread from the remaining amount and
    /// accumulates output. Exact-out consumes output and accumulates input
    /// plus spread. The spread also grows the input token's fee growth by
    /// `spread / liquidity`.
    ///
    /// # Errors
    ///
    /// [`SwapError::Arithmetic`](crate::error::SwapError::Arithmetic) on
    /// overflow or if a step consumed more than remained.
    pub fn apply_step(
        &mut self,
        step: &SwapStep,
        swap_type: SwapType,
        token_in: TokenIndex,
    ) -> crate::error::Result<()> {
        self.sqrt_price = step.sqrt_price_next;
        match swap_type {
            SwapType::ExactIn => {
                let consumed = step.amount_specified.checked_add(&step.spread_charge)?;
                self.amount_specified_remaining =
                    self.amount_specified_remaining.checked_sub(&consumed)?;
                self.amount_calculated = self.amount_calculated.checked_add(&step.amount_computed)?;
            }
            SwapType::ExactOut => {
                self.amount_specified_remaining = self
                    .amount_specified_remaining
                    .checked_sub(&step.amount_specified)?;
                let charged = step.amount_computed.checked_add(&step.spread_charge)?;
                self.amount_calculated = self.amount_calculated.checked_add(&charged)?;
            }
        }
        self.spread_charge_total = self.spread_charge_total.checked_add(&step.spread_charge)?;

        if !self.liquidity.is_zero() && !step.spread_charge.is_zero() {
            let growth = step
                .spread_charge
                .checked_div(&self.liquidity, Rounding::Down)?;
            let slot = match token_in {
                TokenIndex::Zero => &mut self.fee_growth_global0,
                TokenIndex::One => &mut self.fee_growth_global1,
            };
            *slot = slot.checked_add(&growth)?;
        }
        Ok(())
    }
}
