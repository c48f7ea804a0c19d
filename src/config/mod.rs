//! Pool and engine configuration.
//!
//! [`PoolConfig`] is the declarative blueprint a pool is created from;
//! [`SwapEngineConfig`] bounds the swap loop at runtime.

mod engine_config;
mod pool_config;

pub use engine_config::{SwapEngineConfig, DEFAULT_MAX_STEPS};
pub use pool_config::PoolConfig;
