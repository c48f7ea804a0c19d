//! Pool instantiation via the factory pattern.
//!
//! The [`PoolFactory`] validates a [`PoolConfig`], seeds the tick index
//! with the configured positions and persists the pool record in a single
//! batch.
//!
//! [`PoolConfig`]: crate::config::PoolConfig

mod pool_factory;

pub use pool_factory::PoolFactory;
