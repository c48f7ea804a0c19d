//! Configuration blueprint for a concentrated liquidity pool.

use crate::domain::{DenomPair, Position, SpreadFactor, Tick};
use crate::error::SwapError;
use crate::math::{sqrt_price_to_tick, tick_to_sqrt_price, Dec, MAX_SQRT_PRICE, MIN_SQRT_PRICE};

/// Immutable parameters of a pool at creation, plus the positions that
/// seed its tick index.
///
/// The starting price is either the sqrt price of `current_tick` or an
/// explicit sqrt price set with [`with_sqrt_price`](Self::with_sqrt_price),
/// which must resolve to `current_tick`.
///
/// # Validation
///
/// - `tick_spacing` must be greater than zero.
/// - `current_tick` must be initializable, and aligned to `tick_spacing`
///   unless an explicit sqrt price places the pool between ticks.
/// - Each position bound must be aligned to `tick_spacing`, and each
///   position must carry non-zero liquidity. Bound ordering is enforced by
///   [`Position`] construction.
/// - An explicit sqrt price must lie in `[MIN_SQRT_PRICE, MAX_SQRT_PRICE]`
///   and resolve to `current_tick`.
/// - The denominations are validated at [`DenomPair`] construction.
///
/// # Examples
///
/// ```
/// use concentrated_swap::config::PoolConfig;
/// use concentrated_swap::domain::{Denom, DenomPair, SpreadFactor, Tick};
///
/// let pair = DenomPair::new(
///     Denom::new("ueth").expect("valid"),
///     Denom::new("uusdc").expect("valid"),
/// )
/// .expect("distinct");
/// let fee = SpreadFactor::from_basis_points(30).expect("valid");
/// let config = PoolConfig::new(1, pair, fee, 100, Tick::ZERO, vec![]);
/// assert!(config.is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PoolConfig {
    pool_id: u64,
    denoms: DenomPair,
    spread_factor: SpreadFactor,
    tick_spacing: u64,
    current_tick: Tick,
    sqrt_price: Option<Dec>,
    positions: Vec<Position>,
}

impl PoolConfig {
    /// Creates a validated configuration priced at `current_tick`.
    ///
    /// # Errors
    ///
    /// - [`SwapError::InvalidConfiguration`] if `tick_spacing` is zero.
    /// - [`SwapError::InvalidTick`] if `current_tick` is not initializable
    ///   or not aligned.
    /// - [`SwapError::InvalidTickRange`] if a position bound is not aligned.
    /// - [`SwapError::InvalidAmount`] if a position has zero liquidity.
    pub fn new(
        pool_id: u64,
        denoms: DenomPair,
        spread_factor: SpreadFactor,
        tick_spacing: u64,
        current_tick: Tick,
        positions: Vec<Position>,
    ) -> crate::error::Result<Self> {
        let config = Self {
            pool_id,
            denoms,
            spread_factor,
            tick_spacing,
            current_tick,
            sqrt_price: None,
            positions,
        };
        config.validate()?;
        Ok(config)
    }

    /// Sets an explicit starting sqrt price.
    ///
    /// # Errors
    ///
    /// - [`SwapError::InvalidSqrtPrice`] if out of bounds.
    /// - [`SwapError::InvalidConfiguration`] if it does not resolve to the
    ///   configured current tick.
    pub fn with_sqrt_price(mut self, sqrt_price: Dec) -> crate::error::Result<Self> {
        self.sqrt_price = Some(sqrt_price);
        self.validate()?;
        Ok(self)
    }

    /// Validates all configuration invariants.
    ///
    /// # Errors
    ///
    /// See [`new`](Self::new) and [`with_sqrt_price`](Self::with_sqrt_price).
    pub fn validate(&self) -> crate::error::Result<()> {
        if self.tick_spacing == 0 {
            return Err(SwapError::InvalidConfiguration(
                "tick spacing must be greater than zero",
            ));
        }
        if !self.current_tick.is_initializable() {
            return Err(SwapError::InvalidTick(
                "current tick must be initializable",
            ));
        }
        match self.sqrt_price {
            Some(sqrt_price) => {
                if sqrt_price < MIN_SQRT_PRICE || sqrt_price > MAX_SQRT_PRICE {
                    return Err(SwapError::InvalidSqrtPrice(
                        "sqrt price is outside [10^-6, 10^19]",
                    ));
                }
                if sqrt_price_to_tick(sqrt_price)? != self.current_tick {
                    return Err(SwapError::InvalidConfiguration(
                        "sqrt price does not resolve to the current tick",
                    ));
                }
            }
            None => {
                if !self.current_tick.is_aligned(self.tick_spacing) {
                    return Err(SwapError::InvalidTick(
                        "current tick must be aligned to tick spacing",
                    ));
                }
            }
        }
        for pos in &self.positions {
            if !pos.lower_tick().is_aligned(self.tick_spacing) {
                return Err(SwapError::InvalidTickRange(
                    "position lower tick must be aligned to tick spacing",
                ));
            }
            if !pos.upper_tick().is_aligned(self.tick_spacing) {
                return Err(SwapError::InvalidTickRange(
                    "position upper tick must be aligned to tick spacing",
                ));
            }
            if pos.liquidity().is_zero() {
                return Err(SwapError::InvalidAmount(
                    "position liquidity must be non-zero",
                ));
            }
        }
        Ok(())
    }

    /// Returns the pool id.
    #[must_use]
    pub const fn pool_id(&self) -> u64 {
        self.pool_id
    }

    /// Returns the denominations.
    #[must_use]
    pub const fn denoms(&self) -> &DenomPair {
        &self.denoms
    }

    /// Returns the spread factor.
    #[must_use]
    pub const fn spread_factor(&self) -> SpreadFactor {
        self.spread_factor
    }

    /// Returns the tick spacing.
    #[must_use]
    pub const fn tick_spacing(&self) -> u64 {
        self.tick_spacing
    }

    /// Returns the starting tick.
    #[must_use]
    pub const fn current_tick(&self) -> Tick {
        self.current_tick
    }

    /// Returns the starting sqrt price: the explicit one if set, otherwise
    /// the sqrt price of `current_tick`.
    ///
    /// # Errors
    ///
    /// Propagates [`tick_to_sqrt_price`] failures.
    pub fn initial_sqrt_price(&self) -> crate::error::Result<Dec> {
        match self.sqrt_price {
            Some(sqrt_price) => Ok(sqrt_price),
            None => tick_to_sqrt_price(self.current_tick),
        }
    }

    /// Returns the initial positions.
    #[must_use]
    pub fn positions(&self) -> &[Position] {
        &self.positions
    }
}
