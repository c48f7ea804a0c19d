//! Direction-specific swap rules.
//!
//! A swap moves the price down when token0 is sold ([`SwapStrategy::ZeroForOne`])
//! and up when token1 is sold ([`SwapStrategy::OneForZero`]). Everything that
//! depends on the direction lives here: which delta formula prices the
//! input, how the next boundary is found, how liquidity changes on a
//! crossing and which price limits are acceptable.

use tracing::warn;

use super::step::{spread_for_exact_in, spread_on_net_input, SwapStep};
use crate::domain::{Rounding, SpreadFactor, SwapType, Tick, TokenIndex};
use crate::error::{ArithmeticError, SwapError};
use crate::math::{
    calc_amount0_delta, calc_amount1_delta, get_next_sqrt_price_from_amount0_in_rounding_up,
    get_next_sqrt_price_from_amount0_out_rounding_up,
    get_next_sqrt_price_from_amount1_in_rounding_down,
    get_next_sqrt_price_from_amount1_out_rounding_down, Dec, Precision, SignedDec,
    MAX_SQRT_PRICE, MIN_SQRT_PRICE,
};
use crate::store::{KvStore, TickIndex};

/// Parameters shared by both directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StrategyParams {
    /// The price may not move past this sqrt price.
    pub sqrt_price_limit: Dec,
    /// Spread charged on the input token.
    pub spread_factor: SpreadFactor,
}

/// Swap direction with its parameters.
///
/// # Examples
///
/// ```
/// use concentrated_swap::domain::{SpreadFactor, Tick, TokenIndex};
/// use concentrated_swap::math::{Dec, MIN_SQRT_PRICE};
/// use concentrated_swap::swap::SwapStrategy;
///
/// let strategy = SwapStrategy::new(TokenIndex::Zero, None, SpreadFactor::ZERO);
/// assert_eq!(strategy.params().sqrt_price_limit, MIN_SQRT_PRICE);
/// assert_eq!(strategy.target_sqrt_price(Dec::ZERO), MIN_SQRT_PRICE);
/// assert_eq!(strategy.tick_after_crossing(Tick::ZERO).map(|t| t.get()), Ok(-1));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SwapStrategy {
    /// Token0 in, token1 out; the price decreases.
    ZeroForOne(StrategyParams),
    /// Token1 in, token0 out; the price increases.
    OneForZero(StrategyParams),
}

impl SwapStrategy {
    /// Picks the direction from the input token. A missing limit defaults
    /// to the global bound of that direction.
    #[must_use]
    pub fn new(
        token_in: TokenIndex,
        sqrt_price_limit: Option<Dec>,
        spread_factor: SpreadFactor,
    ) -> Self {
        let bound = match token_in {
            TokenIndex::Zero => MIN_SQRT_PRICE,
            TokenIndex::One => MAX_SQRT_PRICE,
        };
        let params = StrategyParams {
            sqrt_price_limit: sqrt_price_limit.unwrap_or(bound),
            spread_factor,
        };
        match token_in {
            TokenIndex::Zero => Self::ZeroForOne(params),
            TokenIndex::One => Self::OneForZero(params),
        }
    }

    /// Direction parameters.
    #[must_use]
    pub const fn params(&self) -> &StrategyParams {
        match self {
            Self::ZeroForOne(params) | Self::OneForZero(params) => params,
        }
    }

    /// Returns `true` when the price moves down.
    #[must_use]
    pub const fn is_zero_for_one(&self) -> bool {
        matches!(self, Self::ZeroForOne(_))
    }

    /// Token paid into the pool.
    #[must_use]
    pub const fn token_in(&self) -> TokenIndex {
        match self {
            Self::ZeroForOne(_) => TokenIndex::Zero,
            Self::OneForZero(_) => TokenIndex::One,
        }
    }

    /// Furthest sqrt price reachable in this direction.
    #[must_use]
    pub const fn global_bound(&self) -> Dec {
        match self {
            Self::ZeroForOne(_) => MIN_SQRT_PRICE,
            Self::OneForZero(_) => MAX_SQRT_PRICE,
        }
    }

    /// The next boundary's sqrt price, held back by the limit.
    #[must_use]
    pub fn target_sqrt_price(&self, next_tick_sqrt_price: Dec) -> Dec {
        match self {
            Self::ZeroForOne(p) => next_tick_sqrt_price.max(p.sqrt_price_limit),
            Self::OneForZero(p) => next_tick_sqrt_price.min(p.sqrt_price_limit),
        }
    }

    /// Checks the limit against the current sqrt price.
    ///
    /// Moving up requires `current < limit ≤ MAX_SQRT_PRICE`; moving down
    /// requires `MIN_SQRT_PRICE ≤ limit < current`.
    ///
    /// # Errors
    ///
    /// [`SwapError::PriceLimitValidation`] otherwise.
    pub fn validate_sqrt_price_limit(&self, current_sqrt_price: Dec) -> crate::error::Result<()> {
        let limit = self.params().sqrt_price_limit;
        let (lower, upper, valid) = match self {
            Self::ZeroForOne(_) => (
                MIN_SQRT_PRICE,
                current_sqrt_price,
                limit >= MIN_SQRT_PRICE && limit < current_sqrt_price,
            ),
            Self::OneForZero(_) => (
                current_sqrt_price,
                MAX_SQRT_PRICE,
                limit > current_sqrt_price && limit <= MAX_SQRT_PRICE,
            ),
        };
        if valid {
            Ok(())
        } else {
            Err(SwapError::PriceLimitValidation {
                limit,
                lower,
                upper,
            })
        }
    }

    /// Next initialized tick in the direction of travel.
    ///
    /// Moving up skips `current_tick` itself. Moving down includes it: after
    /// a downward crossing the pool sits one below the crossed tick, so the
    /// tick at `current_tick` is always the lower bound of the active range.
    ///
    /// # Errors
    ///
    /// [`SwapError::TickDecode`] if a stored key is malformed.
    pub fn next_initialized_tick<S: KvStore + ?Sized>(
        &self,
        index: &TickIndex<'_, S>,
        current_tick: Tick,
    ) -> crate::error::Result<Option<Tick>> {
        match self {
            Self::ZeroForOne(_) => index.next_initialized_at_or_below(current_tick),
            Self::OneForZero(_) => index.next_initialized_above(current_tick),
        }
    }

    /// Liquidity change applied when crossing a tick with `liquidity_net`.
    #[must_use]
    pub fn liquidity_delta_sign(&self, liquidity_net: SignedDec) -> SignedDec {
        match self {
            Self::ZeroForOne(_) => -liquidity_net,
            Self::OneForZero(_) => liquidity_net,
        }
    }

    /// Current tick after crossing `next_tick`.
    ///
    /// # Errors
    ///
    /// [`SwapError::InvalidTick`] if moving down from the lowest tick.
    pub fn tick_after_crossing(&self, next_tick: Tick) -> crate::error::Result<Tick> {
        match self {
            Self::ZeroForOne(_) => next_tick
                .checked_sub(1)
                .ok_or(SwapError::InvalidTick("cannot cross below the minimum tick")),
            Self::OneForZero(_) => Ok(next_tick),
        }
    }

    /// Moves the price from `sqrt_price_current` toward `sqrt_price_target`
    /// with constant `liquidity`, consuming at most `amount_remaining` of the
    /// specified token.
    ///
    /// # Errors
    ///
    /// [`SwapError::Arithmetic`] if an intermediate value overflows or the
    /// bucket cannot supply the requested output.
    pub fn compute_swap_step(
        &self,
        sqrt_price_current: Dec,
        sqrt_price_target: Dec,
        liquidity: Dec,
        amount_remaining: Dec,
        swap_type: SwapType,
    ) -> crate::error::Result<SwapStep> {
        let (current, target) = (sqrt_price_current, sqrt_price_target);
        match swap_type {
            SwapType::ExactIn => self.step_exact_in(current, target, liquidity, amount_remaining),
            SwapType::ExactOut => self.step_exact_out(current, target, liquidity, amount_remaining),
        }
    }

    fn step_exact_in(
        &self,
        current: Dec,
        target: Dec,
        liquidity: Dec,
        remaining: Dec,
    ) -> crate::error::Result<SwapStep> {
        let spread_factor = self.params().spread_factor;
        let amount_in_to_target = self.input_delta(liquidity, current, target, true)?;
        let remaining_less_spread =
            remaining.checked_mul(&spread_factor.complement()?, Rounding::Down)?;

        let reached_target = remaining_less_spread >= amount_in_to_target;
        let next = if reached_target {
            target
        } else {
            let solved = self.next_from_input(current, liquidity, remaining_less_spread)?;
            self.clamp_to_target(solved, target)
        };

        let mut amount_in = if reached_target {
            amount_in_to_target
        } else {
            self.input_delta(liquidity, current, next, true)?.min(remaining)
        };
        let mut amount_out = self.output_delta(liquidity, current, next, false)?;

        let recovered =
            !reached_target && next == current && amount_in.is_zero() && !remaining.is_zero();
        if recovered {
            warn!(
                sqrt_price = %current,
                %remaining,
                "price did not move at standard precision, retrying at high precision"
            );
            let liquidity_big = liquidity.to_big()?;
            let current_big = current.to_big()?;
            let next_big = self.next_from_input(current_big, liquidity_big, remaining.to_big()?)?;
            amount_out = self
                .output_delta(liquidity_big, current_big, next_big, false)?
                .to_dec()?;
            amount_in = remaining;
        }

        let spread_charge =
            spread_for_exact_in(reached_target, amount_in, remaining, spread_factor)?;
        Ok(SwapStep {
            sqrt_price_start: current,
            sqrt_price_target: target,
            sqrt_price_next: next,
            amount_specified: amount_in,
            amount_computed: amount_out,
            spread_charge,
            reached_target,
            recovered,
        })
    }

    fn step_exact_out(
        &self,
        current: Dec,
        target: Dec,
        liquidity: Dec,
        remaining: Dec,
    ) -> crate::error::Result<SwapStep> {
        let amount_out_to_target = self.output_delta(liquidity, current, target, false)?;

        let reached_target = remaining >= amount_out_to_target;
        let next = if reached_target {
            target
        } else {
            let solved = self.next_from_output(current, liquidity, remaining)?;
            self.clamp_to_target(solved, target)
        };

        let mut amount_out = if reached_target {
            amount_out_to_target
        } else {
            self.output_delta(liquidity, current, next, false)?.min(remaining)
        };
        let mut amount_in = self.input_delta(liquidity, current, next, true)?;

        let recovered = !reached_target && amount_out.is_zero() && !remaining.is_zero();
        if recovered {
            warn!(
                sqrt_price = %current,
                sqrt_price_next = %next,
                %remaining,
                "output rounded to zero, consuming the remaining output"
            );
            let end = if next == current {
                match self {
                    Self::ZeroForOne(_) => next.checked_sub(&Dec::ULP)?,
                    Self::OneForZero(_) => next.checked_add(&Dec::ULP)?,
                }
            } else {
                next
            };
            amount_in = self.input_delta(liquidity, current, end, true)?;
            amount_out = remaining;
        }

        let spread_charge = spread_on_net_input(amount_in, self.params().spread_factor)?;
        Ok(SwapStep {
            sqrt_price_start: current,
            sqrt_price_target: target,
            sqrt_price_next: next,
            amount_specified: amount_out,
            amount_computed: amount_in,
            spread_charge,
            reached_target,
            recovered,
        })
    }

    fn clamp_to_target(&self, solved: Dec, target: Dec) -> Dec {
        match self {
            Self::ZeroForOne(_) => solved.max(target),
            Self::OneForZero(_) => solved.min(target),
        }
    }

    fn input_delta<P: Precision>(
        &self,
        liquidity: P,
        a: P,
        b: P,
        round_up: bool,
    ) -> Result<P, ArithmeticError> {
        match self {
            Self::ZeroForOne(_) => calc_amount0_delta(liquidity, a, b, round_up),
            Self::OneForZero(_) => calc_amount1_delta(liquidity, a, b, round_up),
        }
    }

    fn output_delta<P: Precision>(
        &self,
        liquidity: P,
        a: P,
        b: P,
        round_up: bool,
    ) -> Result<P, ArithmeticError> {
        match self {
            Self::ZeroForOne(_) => calc_amount1_delta(liquidity, a, b, round_up),
            Self::OneForZero(_) => calc_amount0_delta(liquidity, a, b, round_up),
        }
    }

    fn next_from_input<P: Precision>(
        &self,
        current: P,
        liquidity: P,
        amount_in: P,
    ) -> Result<P, ArithmeticError> {
        match self {
            Self::ZeroForOne(_) => {
                get_next_sqrt_price_from_amount0_in_rounding_up(current, liquidity, amount_in)
            }
            Self::OneForZero(_) => {
                get_next_sqrt_price_from_amount1_in_rounding_down(current, liquidity, amount_in)
            }
        }
    }

    fn next_from_output(
        &self,
        current: Dec,
        liquidity: Dec,
        amount_out: Dec,
    ) -> Result<Dec, ArithmeticError> {
        match self {
            Self::ZeroForOne(_) => {
                get_next_sqrt_price_from_amount1_out_rounding_down(current, liquidity, amount_out)
            }
            Self::OneForZero(_) => {
                get_next_sqrt_price_from_amount0_out_rounding_up(current, liquidity, amount_out)
            }
        }
    }
}
