//! Result of a swap or quote.

use core::fmt;

use super::{Coin, Tick};
use crate::math::Dec;

/// Why the swap loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SwapTermination {
    /// The specified amount was fully consumed.
    Exhausted,
    /// The sqrt price reached the caller's limit with amount left over.
    PriceLimitReached,
}

impl fmt::Display for SwapTermination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exhausted => write!(f, "Exhausted"),
            Self::PriceLimitReached => write!(f, "PriceLimitReached"),
        }
    }
}

/// What a swap paid, what it received and where it left the pool.
///
/// Amounts are whole tokens: the input is rounded up and the output is
/// rounded down, so neither side can extract value from rounding.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SwapOutcome {
    pub(crate) token_in: Coin,
    pub(crate) token_out: Coin,
    pub(crate) new_tick: Tick,
    pub(crate) new_sqrt_price: Dec,
    pub(crate) new_liquidity: Dec,
    pub(crate) spread_charge: Dec,
    pub(crate) termination: SwapTermination,
    pub(crate) steps: u32,
    pub(crate) ticks_crossed: u32,
}

impl SwapOutcome {
    /// Coin paid into the pool.
    #[must_use]
    pub const fn token_in(&self) -> &Coin {
        &self.token_in
    }

    /// Coin paid out by the pool.
    #[must_use]
    pub const fn token_out(&self) -> &Coin {
        &self.token_out
    }

    /// Current tick after the swap.
    #[must_use]
    pub const fn new_tick(&self) -> Tick {
        self.new_tick
    }

    /// Sqrt price after the swap.
    #[must_use]
    pub const fn new_sqrt_price(&self) -> Dec {
        self.new_sqrt_price
    }

    /// Active liquidity after the swap.
    #[must_use]
    pub const fn new_liquidity(&self) -> Dec {
        self.new_liquidity
    }

    /// Total spread charged, in units of the input token.
    #[must_use]
    pub const fn spread_charge(&self) -> Dec {
        self.spread_charge
    }

    /// Terminal state of the loop.
    #[must_use]
    pub const fn termination(&self) -> SwapTermination {
        self.termination
    }

    /// Number of loop iterations.
    #[must_use]
    pub const fn steps(&self) -> u32 {
        self.steps
    }

    /// Number of initialized ticks crossed.
    #[must_use]
    pub const fn ticks_crossed(&self) -> u32 {
        self.ticks_crossed
    }
}

impl fmt::Display for SwapOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SwapOutcome(in={}, out={}, tick={}, termination={})",
            self.token_in, self.token_out, self.new_tick, self.termination
        )
    }
}
