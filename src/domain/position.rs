//! Concentrated liquidity position.

use core::fmt;

use super::Tick;
use crate::error::SwapError;
use crate::math::Dec;

/// A liquidity position over the half-open tick range `[lower, upper)`.
///
/// Position accounting (ownership, withdrawals, fee collection) lives
/// outside the swap core; the pool only needs the bounds and the liquidity
/// to seed its tick records.
///
/// # Invariants
///
/// - `lower_tick < upper_tick`.
/// - Both ticks are initializable.
///
/// # Examples
///
/// ```
/// use concentrated_swap::domain::{Position, Tick};
/// use concentrated_swap::math::Dec;
///
/// let lower = Tick::new(-100).expect("tick");
/// let upper = Tick::new(100).expect("tick");
/// let liquidity = Dec::from_integer(1_000_000).expect("fits");
/// assert!(Position::new(lower, upper, liquidity).is_ok());
/// assert!(Position::new(upper, lower, liquidity).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    lower_tick: Tick,
    upper_tick: Tick,
    liquidity: Dec,
}

impl Position {
    /// Creates a position with validated bounds.
    ///
    /// # Errors
    ///
    /// [`SwapError::InvalidTickRange`] if `lower_tick >= upper_tick` or a
    /// bound is not initializable.
    pub fn new(lower_tick: Tick, upper_tick: Tick, liquidity: Dec) -> crate::error::Result<Self> {
        if lower_tick >= upper_tick {
            return Err(SwapError::InvalidTickRange(
                "lower tick must be less than upper tick",
            ));
        }
        if !lower_tick.is_initializable() || !upper_tick.is_initializable() {
            return Err(SwapError::InvalidTickRange(
                "position bounds must be initializable ticks",
            ));
        }
        Ok(Self {
            lower_tick,
            upper_tick,
            liquidity,
        })
    }

    /// Lower bound (inclusive).
    #[must_use]
    pub const fn lower_tick(&self) -> Tick {
        self.lower_tick
    }

    /// Upper bound (exclusive).
    #[must_use]
    pub const fn upper_tick(&self) -> Tick {
        self.upper_tick
    }

    /// Liquidity provided over the range.
    #[must_use]
    pub const fn liquidity(&self) -> Dec {
        self.liquidity
    }

    /// `lower ≤ current < upper`.
    #[must_use]
    pub fn is_in_range(&self, current_tick: Tick) -> bool {
        self.lower_tick <= current_tick && current_tick < self.upper_tick
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Position([{}, {}), liquidity={})",
            self.lower_tick, self.upper_tick, self.liquidity
        )
    }
}
