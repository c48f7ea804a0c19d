//! Caller-facing swap trait.
//!
//! [`SwapPool`] is what settlement layers and routers program against. It
//! covers the lifecycle of a swap over any pool the implementor manages:
//!
//! 1. **Execute**: [`SwapPool::swap`] runs a swap and commits it.
//! 2. **Quote**: [`SwapPool::quote`] runs the same swap without writing.
//! 3. **Price**: [`SwapPool::spot_price`] returns the current exchange rate.
//! 4. **Inspect**: [`SwapPool::pool`] loads the pool record.
//!
//! # Atomicity
//!
//! A swap either commits every write it staged (crossed ticks and the pool
//! record) or none of them. Implementations must not leave partial state
//! behind on error.
//!
//! # Settlement
//!
//! Moving tokens between accounts is the caller's job: the returned
//! [`SwapOutcome`] names the coins to collect and pay out.

use crate::domain::{Denom, Pool, SpreadFactor, SwapOutcome, SwapSpec};
use crate::math::Dec;

/// Swap execution and queries over a set of pools.
///
/// # Errors
///
/// Methods return [`SwapError`](crate::error::SwapError). Common variants:
///
/// - [`PoolNotFound`](crate::error::SwapError::PoolNotFound) for an unknown id
/// - [`DenomNotInPool`](crate::error::SwapError::DenomNotInPool) for a foreign denom
/// - [`NoLiquidity`](crate::error::SwapError::NoLiquidity) when the pool cannot fill the swap
/// - [`PriceLimitValidation`](crate::error::SwapError::PriceLimitValidation) for a bad limit
pub trait SwapPool {
    /// Executes `spec` against `pool_id` and commits the result.
    ///
    /// `spread_override` replaces the pool's spread factor for this swap;
    /// `sqrt_price_limit` defaults to the global bound of the direction.
    ///
    /// # Errors
    ///
    /// Any swap error; nothing is committed.
    fn swap(
        &mut self,
        pool_id: u64,
        spec: &SwapSpec,
        spread_override: Option<SpreadFactor>,
        sqrt_price_limit: Option<Dec>,
    ) -> crate::error::Result<SwapOutcome>;

    /// Computes what [`swap`](Self::swap) would return without writing.
    ///
    /// # Errors
    ///
    /// Same as [`swap`](Self::swap).
    fn quote(
        &self,
        pool_id: u64,
        spec: &SwapSpec,
        spread_override: Option<SpreadFactor>,
        sqrt_price_limit: Option<Dec>,
    ) -> crate::error::Result<SwapOutcome>;

    /// Price of `base` in units of `quote`.
    ///
    /// # Errors
    ///
    /// If the pool is unknown or a denomination is not part of it.
    fn spot_price(&self, pool_id: u64, base: &Denom, quote: &Denom) -> crate::error::Result<Dec>;

    /// Loads the pool record.
    ///
    /// # Errors
    ///
    /// If the pool is unknown or its record is corrupt.
    fn pool(&self, pool_id: u64) -> crate::error::Result<Pool>;
}
