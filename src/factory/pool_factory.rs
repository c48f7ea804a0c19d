//! Pool creation from a configuration blueprint.

use tracing::info;

use crate::config::PoolConfig;
use crate::domain::{Pool, TokenIndex};
use crate::error::SwapError;
use crate::math::SignedDec;
use crate::store::{pool_exists, save_pool, KvStore, TickIndex, WriteBatch};

/// Stateless factory that writes a new pool and its seed positions.
///
/// # Flow
///
/// 1. Validate the configuration via [`PoolConfig::validate`].
/// 2. Reject an id that is already taken.
/// 3. Stage the lower and upper tick of every position: gross liquidity
///    grows on both, net liquidity grows on the lower bound and shrinks on
///    the upper one. Positions spanning the current tick add to active
///    liquidity.
/// 4. Stage the pool record and apply everything in one write.
///
/// # Example
///
/// ```rust
/// use concentrated_swap::config::PoolConfig;
/// use concentrated_swap::domain::{Denom, DenomPair, Position, SpreadFactor, Tick};
/// use concentrated_swap::factory::PoolFactory;
/// use concentrated_swap::math::Dec;
/// use concentrated_swap::store::MemStore;
///
/// let pair = DenomPair::new(Denom::new("ueth").expect("ok"), Denom::new("uusdc").expect("ok"))
///     .expect("distinct");
/// let position = Position::new(
///     Tick::new(-1_000).expect("tick"),
///     Tick::new(1_000).expect("tick"),
///     Dec::from_integer(1_000_000).expect("fits"),
/// )
/// .expect("ordered");
/// let config = PoolConfig::new(1, pair, SpreadFactor::ZERO, 100, Tick::ZERO, vec![position])
///     .expect("valid");
///
/// let mut store = MemStore::new();
/// let pool = PoolFactory::create(&mut store, &config).expect("created");
/// assert_eq!(pool.liquidity(), position.liquidity());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PoolFactory;

impl PoolFactory {
    /// Creates and persists a pool described by `config`.
    ///
    /// # Errors
    ///
    /// - Any validation error of [`PoolConfig::validate`].
    /// - [`SwapError::PoolAlreadyExists`] if the id is taken.
    /// - [`SwapError::Arithmetic`] if seeded liquidity overflows.
    pub fn create<S: KvStore + ?Sized>(
        store: &mut S,
        config: &PoolConfig,
    ) -> crate::error::Result<Pool> {
        config.validate()?;
        let pool_id = config.pool_id();
        if pool_exists(store, pool_id) {
            return Err(SwapError::PoolAlreadyExists { pool_id });
        }

        let mut pool = Pool::new(
            pool_id,
            config.denoms().clone(),
            config.initial_sqrt_price()?,
            config.current_tick(),
            config.spread_factor(),
            config.tick_spacing(),
        );
        let fee_growth = (
            pool.fee_growth_global(TokenIndex::Zero),
            pool.fee_growth_global(TokenIndex::One),
        );

        let mut batch = WriteBatch::new();
        let mut active = pool.liquidity();
        {
            let index = TickIndex::new(&*store, pool_id);
            for position in config.positions() {
                let delta = SignedDec::positive(position.liquidity());
                index.update_liquidity(
                    &mut batch,
                    position.lower_tick(),
                    pool.current_tick(),
                    delta,
                    false,
                    fee_growth,
                )?;
                index.update_liquidity(
                    &mut batch,
                    position.upper_tick(),
                    pool.current_tick(),
                    delta,
                    true,
                    fee_growth,
                )?;
                if position.is_in_range(pool.current_tick()) {
                    active = active.checked_add(&position.liquidity())?;
                }
            }
        }
        pool.set_liquidity(active);
        save_pool(&mut batch, &pool)?;
        store.write(batch);

        info!(
            pool_id,
            tick = pool.current_tick().get(),
            sqrt_price = %pool.current_sqrt_price(),
            liquidity = %pool.liquidity(),
            positions = config.positions().len(),
            "pool created"
        );
        Ok(pool)
    }
}
