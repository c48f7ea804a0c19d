//! Core trait abstractions for swap execution.
//!
//! [`SwapPool`] is the seam between the swap core and the layers around
//! it (settlement, routing). [`SwapEngine`](crate::swap::SwapEngine)
//! implements it over any [`KvStore`](crate::store::KvStore).

mod swap_pool;

pub use swap_pool::SwapPool;
