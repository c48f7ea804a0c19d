//! Convenience re-exports for common types and traits.
//!
//! ```rust
//! use concentrated_swap::prelude::*;
//! ```

pub use crate::domain::{
    Amount, Coin, Denom, DenomPair, Pool, Position, Rounding, SpreadFactor, SwapOutcome, SwapSpec,
    SwapTermination, SwapType, Tick, TickInfo, TokenIndex,
};

pub use crate::traits::SwapPool;

pub use crate::math::{BigDec, Dec, SignedDec};

pub use crate::config::{PoolConfig, SwapEngineConfig};

pub use crate::error::{ArithmeticError, Result, SwapError};

pub use crate::factory::PoolFactory;

pub use crate::store::{KvStore, MemStore, WriteBatch};

pub use crate::swap::SwapEngine;
