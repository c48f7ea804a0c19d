//! Swap execution over a key-value store.

use tracing::{debug, info, instrument};

use super::state::SwapState;
use super::strategy::SwapStrategy;
use crate::config::{PoolConfig, SwapEngineConfig};
use crate::domain::{
    Amount, Coin, Denom, Pool, Rounding, SpreadFactor, SwapOutcome, SwapSpec, SwapTermination,
    SwapType, Tick,
};
use crate::error::{ArithmeticError, SwapError};
use crate::factory::PoolFactory;
use crate::math::{sqrt_price_to_tick, tick_to_sqrt_price, Dec};
use crate::store::{get_pool_by_id, save_pool, KvStore, TickIndex, WriteBatch};
use crate::traits::SwapPool;

/// Executes swaps against pools persisted in `S`.
///
/// Every swap runs the same loop: find the next initialized tick in the
/// direction of travel, move the price toward it (or toward the limit),
/// cross it if reached, and repeat until the specified amount is used up
/// or the limit is hit. Crossed ticks and the updated pool are staged in a
/// [`WriteBatch`] that is written to the store only after the loop
/// terminates successfully. The `calc_*` quotes run the identical loop and
/// discard the batch.
///
/// # Examples
///
/// ```
/// use concentrated_swap::config::PoolConfig;
/// use concentrated_swap::domain::{Amount, Coin, Denom, DenomPair, Position, SpreadFactor, Tick};
/// use concentrated_swap::math::Dec;
/// use concentrated_swap::store::MemStore;
/// use concentrated_swap::swap::SwapEngine;
///
/// let ueth = Denom::new("ueth").expect("valid");
/// let uusdc = Denom::new("uusdc").expect("valid");
/// let position = Position::new(
///     Tick::new(-9_000).expect("tick"),
///     Tick::new(9_000).expect("tick"),
///     Dec::from_integer(1_000_000_000).expect("fits"),
/// )
/// .expect("ordered");
/// let config = PoolConfig::new(
///     1,
///     DenomPair::new(ueth.clone(), uusdc.clone()).expect("distinct"),
///     SpreadFactor::ZERO,
///     100,
///     Tick::ZERO,
///     vec![position],
/// )
/// .expect("valid");
///
/// let mut engine = SwapEngine::new(MemStore::new());
/// engine.create_pool(&config).expect("created");
///
/// let outcome = engine
///     .swap_out_given_in(1, Coin::new(ueth, Amount::new(1_000)), uusdc, None, None)
///     .expect("swapped");
/// assert_eq!(outcome.token_in().amount(), Amount::new(1_000));
/// assert!(outcome.token_out().amount().get() > 0);
/// ```
#[derive(Debug)]
pub struct SwapEngine<S: KvStore> {
    store: S,
    config: SwapEngineConfig,
}

impl<S: KvStore> SwapEngine<S> {
    /// Creates an engine with the default configuration.
    pub fn new(store: S) -> Self {
        Self {
            store,
            config: SwapEngineConfig::default(),
        }
    }

    /// Creates an engine with a custom configuration.
    ///
    /// # Errors
    ///
    /// [`SwapError::InvalidConfiguration`] if `config` fails validation.
    pub fn with_config(store: S, config: SwapEngineConfig) -> crate::error::Result<Self> {
        config.validate()?;
        Ok(Self { store, config })
    }

    /// Engine configuration.
    pub const fn config(&self) -> &SwapEngineConfig {
        &self.config
    }

    /// Backing store.
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Releases the backing store.
    pub fn into_store(self) -> S {
        self.store
    }

    /// Read-only view of a pool's initialized ticks.
    pub const fn tick_index(&self, pool_id: u64) -> TickIndex<'_, S> {
        TickIndex::new(&self.store, pool_id)
    }

    /// Creates a pool from a validated blueprint.
    ///
    /// # Errors
    ///
    /// See [`PoolFactory::create`].
    pub fn create_pool(&mut self, config: &PoolConfig) -> crate::error::Result<Pool> {
        PoolFactory::create(&mut self.store, config)
    }

    /// Loads a pool.
    ///
    /// # Errors
    ///
    /// [`SwapError::PoolNotFound`] or [`SwapError::RecordDecode`].
    pub fn get_pool(&self, pool_id: u64) -> crate::error::Result<Pool> {
        get_pool_by_id(&self.store, pool_id)
    }

    /// Spot price of `base` in units of `quote`.
    ///
    /// # Errors
    ///
    /// [`SwapError::PoolNotFound`], [`SwapError::DenomNotInPool`] or
    /// [`SwapError::DenomsEqual`].
    pub fn spot_price(
        &self,
        pool_id: u64,
        base: &Denom,
        quote: &Denom,
    ) -> crate::error::Result<Dec> {
        self.get_pool(pool_id)?.spot_price(base, quote)
    }

    /// Sells exactly `token_in` and commits.
    ///
    /// `spread_override` replaces the pool's spread factor for this swap.
    /// `sqrt_price_limit` defaults to the global bound of the direction.
    ///
    /// # Errors
    ///
    /// Any [`SwapError`]; on error nothing is written.
    #[instrument(skip(self), fields(swap_type = "exact_in"))]
    pub fn swap_out_given_in(
        &mut self,
        pool_id: u64,
        token_in: Coin,
        denom_out: Denom,
        spread_override: Option<SpreadFactor>,
        sqrt_price_limit: Option<Dec>,
    ) -> crate::error::Result<SwapOutcome> {
        let spec = SwapSpec::exact_in(token_in, denom_out)?;
        self.execute(pool_id, &spec, spread_override, sqrt_price_limit)
    }

    /// Buys exactly `token_out` and commits.
    ///
    /// # Errors
    ///
    /// Any [`SwapError`]; on error nothing is written.
    #[instrument(skip(self), fields(swap_type = "exact_out"))]
    pub fn swap_in_given_out(
        &mut self,
        pool_id: u64,
        token_out: Coin,
        denom_in: Denom,
        spread_override: Option<SpreadFactor>,
        sqrt_price_limit: Option<Dec>,
    ) -> crate::error::Result<SwapOutcome> {
        let spec = SwapSpec::exact_out(token_out, denom_in)?;
        self.execute(pool_id, &spec, spread_override, sqrt_price_limit)
    }

    /// Quotes [`swap_out_given_in`](Self::swap_out_given_in) without
    /// writing anything.
    ///
    /// # Errors
    ///
    /// Same as the committing variant.
    pub fn calc_out_amt_given_in(
        &self,
        pool_id: u64,
        token_in: Coin,
        denom_out: Denom,
        spread_override: Option<SpreadFactor>,
        sqrt_price_limit: Option<Dec>,
    ) -> crate::error::Result<SwapOutcome> {
        let spec = SwapSpec::exact_in(token_in, denom_out)?;
        let (outcome, _) = self.simulate(pool_id, &spec, spread_override, sqrt_price_limit)?;
        Ok(outcome)
    }

    /// Quotes [`swap_in_given_out`](Self::swap_in_given_out) without
    /// writing anything.
    ///
    /// # Errors
    ///
    /// Same as the committing variant.
    pub fn calc_in_amt_given_out(
        &self,
        pool_id: u64,
        token_out: Coin,
        denom_in: Denom,
        spread_override: Option<SpreadFactor>,
        sqrt_price_limit: Option<Dec>,
    ) -> crate::error::Result<SwapOutcome> {
        let spec = SwapSpec::exact_out(token_out, denom_in)?;
        let (outcome, _) = self.simulate(pool_id, &spec, spread_override, sqrt_price_limit)?;
        Ok(outcome)
    }

    /// Exact-in swap that fails unless it pays at least `token_out_min`.
    ///
    /// # Errors
    ///
    /// [`SwapError::AmountOutBelowMinimum`] or any swap error.
    #[instrument(skip(self), fields(swap_type = "exact_in"))]
    pub fn swap_exact_amount_in(
        &mut self,
        pool_id: u64,
        token_in: Coin,
        denom_out: Denom,
        token_out_min: Amount,
        spread_override: Option<SpreadFactor>,
    ) -> crate::error::Result<SwapOutcome> {
        let spec = SwapSpec::exact_in(token_in, denom_out)?;
        let (outcome, batch) = self.simulate(pool_id, &spec, spread_override, None)?;
        let amount = outcome.token_out().amount();
        if amount < token_out_min {
            return Err(SwapError::AmountOutBelowMinimum {
                amount,
                minimum: token_out_min,
            });
        }
        self.commit(pool_id, outcome, batch)
    }

    /// Exact-out swap that fails if it charges more than `token_in_max`.
    ///
    /// # Errors
    ///
    /// [`SwapError::AmountInAboveMaximum`] or any swap error.
    #[instrument(skip(self), fields(swap_type = "exact_out"))]
    pub fn swap_exact_amount_out(
        &mut self,
        pool_id: u64,
        token_out: Coin,
        denom_in: Denom,
        token_in_max: Amount,
        spread_override: Option<SpreadFactor>,
    ) -> crate::error::Result<SwapOutcome> {
        let spec = SwapSpec::exact_out(token_out, denom_in)?;
        let (outcome, batch) = self.simulate(pool_id, &spec, spread_override, None)?;
        let amount = outcome.token_in().amount();
        if amount > token_in_max {
            return Err(SwapError::AmountInAboveMaximum {
                amount,
                maximum: token_in_max,
            });
        }
        self.commit(pool_id, outcome, batch)
    }

    pub(crate) fn execute(
        &mut self,
        pool_id: u64,
        spec: &SwapSpec,
        spread_override: Option<SpreadFactor>,
        sqrt_price_limit: Option<Dec>,
    ) -> crate::error::Result<SwapOutcome> {
        let (outcome, batch) = self.simulate(pool_id, spec, spread_override, sqrt_price_limit)?;
        self.commit(pool_id, outcome, batch)
    }

    fn commit(
        &mut self,
        pool_id: u64,
        outcome: SwapOutcome,
        batch: WriteBatch,
    ) -> crate::error::Result<SwapOutcome> {
        let writes = batch.len();
        self.store.write(batch);
        info!(
            pool_id,
            token_in = %outcome.token_in(),
            token_out = %outcome.token_out(),
            tick = outcome.new_tick().get(),
            termination = %outcome.termination(),
            writes,
            "swap committed"
        );
        Ok(outcome)
    }

    /// Runs the swap loop against the current store contents and returns
    /// the outcome with the writes it would make.
    pub(crate) fn simulate(
        &self,
        pool_id: u64,
        spec: &SwapSpec,
        spread_override: Option<SpreadFactor>,
        sqrt_price_limit: Option<Dec>,
    ) -> crate::error::Result<(SwapOutcome, WriteBatch)> {
        let mut pool = self.get_pool(pool_id)?;
        let token_in = pool.index_of(spec.denom_in())?;
        let token_out = pool.index_of(spec.denom_out())?;
        let spread_factor = spread_override.unwrap_or(pool.spread_factor());
        let strategy = SwapStrategy::new(token_in, sqrt_price_limit, spread_factor);
        strategy.validate_sqrt_price_limit(pool.current_sqrt_price())?;

        let swap_type = spec.swap_type();
        let amount_specified = spec.specified().amount().to_dec()?;
        let limit = strategy.params().sqrt_price_limit;
        let index = TickIndex::new(&self.store, pool_id);
        let mut state = SwapState::new(&pool, amount_specified);
        let mut batch = WriteBatch::new();
        let mut steps = 0u32;
        let mut ticks_crossed = 0u32;

        let termination = loop {
            if state.amount_specified_remaining.is_zero() {
                break SwapTermination::Exhausted;
            }
            if state.sqrt_price == limit {
                break SwapTermination::PriceLimitReached;
            }
            if steps >= self.config.max_steps() {
                return Err(SwapError::IterationLimitExceeded {
                    steps: self.config.max_steps(),
                });
            }
            steps += 1;

            let next_tick = strategy.next_initialized_tick(&index, state.tick)?;
            let next_tick_sqrt_price = match next_tick {
                Some(tick) => tick_to_sqrt_price(tick)?,
                None if state.liquidity.is_zero() => {
                    return Err(SwapError::NoLiquidity { pool_id });
                }
                None => strategy.global_bound(),
            };
            let target = strategy.target_sqrt_price(next_tick_sqrt_price);
            let step = strategy.compute_swap_step(
                state.sqrt_price,
                target,
                state.liquidity,
                state.amount_specified_remaining,
                swap_type,
            )?;
            debug!(
                step = steps,
                sqrt_price_start = %step.sqrt_price_start(),
                sqrt_price_next = %step.sqrt_price_next(),
                amount_specified = %step.amount_specified(),
                amount_computed = %step.amount_computed(),
                spread_charge = %step.spread_charge(),
                "swap step"
            );
            state.apply_step(&step, swap_type, token_in)?;

            match next_tick {
                Some(tick) if step.sqrt_price_next() == next_tick_sqrt_price => {
                    cross_tick(&index, &mut batch, &strategy, &mut state, tick)?;
                    ticks_crossed += 1;
                }
                _ if step.sqrt_price_next() != step.sqrt_price_start() => {
                    state.tick = sqrt_price_to_tick(state.sqrt_price)?;
                }
                _ => {}
            }
        };

        let consumed = amount_specified.checked_sub(&state.amount_specified_remaining)?;
        let (amount_in, amount_out) = match swap_type {
            SwapType::ExactIn => (consumed, state.amount_calculated),
            SwapType::ExactOut => (state.amount_calculated, consumed),
        };
        let token_out_amount = Amount::from_dec(&amount_out, Rounding::Down)?;
        if token_out_amount.is_zero() {
            return Err(SwapError::InvalidAmountCalculated { amount: amount_out });
        }
        let token_in_amount = Amount::from_dec(&amount_in, Rounding::Up)?;
        if token_in_amount.is_zero() {
            return Err(SwapError::InvalidAmountCalculated { amount: amount_in });
        }

        let growth = state
            .fee_growth_global(token_in)
            .checked_sub(&pool.fee_growth_global(token_in))?;
        pool.add_fee_growth(token_in, growth)?;
        pool.set_current_state(state.sqrt_price, state.tick, state.liquidity);
        save_pool(&mut batch, &pool)?;

        let outcome = SwapOutcome {
            token_in: Coin::new(pool.denoms().get(token_in).clone(), token_in_amount),
            token_out: Coin::new(pool.denoms().get(token_out).clone(), token_out_amount),
            new_tick: state.tick,
            new_sqrt_price: state.sqrt_price,
            new_liquidity: state.liquidity,
            spread_charge: state.spread_charge_total,
            termination,
            steps,
            ticks_crossed,
        };
        debug!(%outcome, "swap simulated");
        Ok((outcome, batch))
    }
}

impl<S: KvStore> SwapPool for SwapEngine<S> {
    fn swap(
        &mut self,
        pool_id: u64,
        spec: &SwapSpec,
        spread_override: Option<SpreadFactor>,
        sqrt_price_limit: Option<Dec>,
    ) -> crate::error::Result<SwapOutcome> {
        self.execute(pool_id, spec, spread_override, sqrt_price_limit)
    }

    fn quote(
        &self,
        pool_id: u64,
        spec: &SwapSpec,
        spread_override: Option<SpreadFactor>,
        sqrt_price_limit: Option<Dec>,
    ) -> crate::error::Result<SwapOutcome> {
        let (outcome, _) = self.simulate(pool_id, spec, spread_override, sqrt_price_limit)?;
        Ok(outcome)
    }

    fn spot_price(&self, pool_id: u64, base: &Denom, quote: &Denom) -> crate::error::Result<Dec> {
        self.get_pool(pool_id)?.spot_price(base, quote)
    }

    fn pool(&self, pool_id: u64) -> crate::error::Result<Pool> {
        self.get_pool(pool_id)
    }
}

/// Crosses `tick`: flips its fee growth outside, stages the record and
/// applies its net liquidity in the direction of travel.
fn cross_tick<S: KvStore + ?Sized>(
    index: &TickIndex<'_, S>,
    batch: &mut WriteBatch,
    strategy: &SwapStrategy,
    state: &mut SwapState,
    tick: Tick,
) -> crate::error::Result<()> {
    let mut info = index
        .get_staged(batch, tick)?
        .ok_or(SwapError::TickNotFound { tick: tick.get() })?;
    info.cross(state.fee_growth_global0, state.fee_growth_global1)?;
    index.stage(batch, tick, &info)?;

    let delta = strategy.liquidity_delta_sign(info.liquidity_net());
    state.liquidity = match delta.apply_to(state.liquidity) {
        Ok(liquidity) => liquidity,
        Err(ArithmeticError::Underflow(_)) => {
            return Err(SwapError::NegativeLiquidity { tick: tick.get() });
        }
        Err(e) => return Err(e.into()),
    };
    state.tick = strategy.tick_after_crossing(tick)?;
    debug!(
        tick = tick.get(),
        delta = %delta,
        liquidity = %state.liquidity,
        "tick crossed"
    );
    Ok(())
}
