//! # Concentrated Swap
//!
//! Swap execution core for concentrated-liquidity pools: liquidity is
//! provided over tick ranges, and a swap walks the price across those
//! ranges one bucket at a time until the requested amount is used up or a
//! price limit is hit.
//!
//! The crate provides exact decimal arithmetic, tick/price conversion, the
//! per-step swap formulas, a tick index over an ordered key-value store and
//! the swap loop with a transactional commit.
//!
//! # Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `serde` | no | `Serialize`/`Deserialize` for configuration and value types |
//!
//! # Quick Start
//!
//! ```rust
//! use concentrated_swap::config::PoolConfig;
//! use concentrated_swap::domain::{
//!     Amount, Coin, Denom, DenomPair, Position, SpreadFactor, SwapSpec, SwapTermination, Tick,
//! };
//! use concentrated_swap::math::Dec;
//! use concentrated_swap::store::MemStore;
//! use concentrated_swap::swap::SwapEngine;
//! use concentrated_swap::traits::SwapPool;
//!
//! // 1. Describe the pool: denoms, spread, tick spacing and liquidity
//! let ueth = Denom::new("ueth").expect("valid denom");
//! let uusdc = Denom::new("uusdc").expect("valid denom");
//! let position = Position::new(
//!     Tick::new(-100_000).expect("tick"),
//!     Tick::new(100_000).expect("tick"),
//!     Dec::from_integer(1_000_000_000).expect("fits"),
//! )
//! .expect("ordered bounds");
//! let config = PoolConfig::new(
//!     1,
//!     DenomPair::new(ueth.clone(), uusdc.clone()).expect("distinct denoms"),
//!     SpreadFactor::from_basis_points(30).expect("valid spread"),
//!     100,
//!     Tick::ZERO,
//!     vec![position],
//! )
//! .expect("valid config");
//!
//! // 2. Create the pool in a store
//! let mut engine = SwapEngine::new(MemStore::new());
//! engine.create_pool(&config).expect("pool created");
//!
//! // 3. Sell exactly 10 000 ueth for uusdc
//! let spec = SwapSpec::exact_in(Coin::new(ueth, Amount::new(10_000)), uusdc)
//!     .expect("valid spec");
//! let outcome = engine.swap(1, &spec, None, None).expect("swap succeeded");
//!
//! assert_eq!(outcome.termination(), SwapTermination::Exhausted);
//! assert!(outcome.token_out().amount().get() > 0);
//! assert!(!outcome.spread_charge().is_zero());
//! ```
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │   Caller     │  settles coins, chooses limits
//! └──────┬──────┘
//!        │ SwapPool
//!        ▼
//! ┌─────────────┐
//! │ SwapEngine   │  swap loop, tick crossing, WriteBatch commit
//! └──────┬──────┘
//!        │ SwapStrategy (ZeroForOne / OneForZero)
//!        ▼
//! ┌─────────────┐
//! │    Math      │  Dec/BigDec, tick math, amount deltas
//! └──────┬──────┘
//!        │
//!        ▼
//! ┌─────────────┐
//! │    Store     │  KvStore, TickIndex, pool records
//! └─────────────┘
//! ```
//!
//! # Module Guide
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`domain`] | Value types: [`Tick`](domain::Tick), [`Coin`](domain::Coin), [`Pool`](domain::Pool), etc. |
//! | [`math`] | [`Dec`](math::Dec)/[`BigDec`](math::BigDec), tick conversion, delta formulas |
//! | [`store`] | [`KvStore`](store::KvStore), key layout and [`TickIndex`](store::TickIndex) |
//! | [`config`] | [`PoolConfig`](config::PoolConfig) and [`SwapEngineConfig`](config::SwapEngineConfig) |
//! | [`factory`] | [`PoolFactory`](factory::PoolFactory) for validated pool creation |
//! | [`swap`] | [`SwapEngine`](swap::SwapEngine) and the per-direction strategy |
//! | [`traits`] | [`SwapPool`](traits::SwapPool) |
//! | [`error`] | [`SwapError`](error::SwapError) and [`ArithmeticError`](error::ArithmeticError) |
//! | [`prelude`] | Convenience re-exports |

pub mod config;
pub mod domain;
pub mod error;
pub mod factory;
pub mod math;
pub mod prelude;
pub mod store;
pub mod swap;
pub mod traits;
