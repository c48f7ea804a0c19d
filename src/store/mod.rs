//! Persistence: an ordered key-value store, the key layout, the tick
//! index and the pool repository.
//!
//! Every mutation made by a swap is staged in a [`WriteBatch`] and applied
//! with a single [`KvStore::write`] once the swap succeeds.

mod keys;
mod kv;
mod pool_store;
mod tick_index;

pub use keys::{
    decode_tick, encode_tick, pool_key, tick_key, tick_prefix, POOL_PREFIX, TICK_KEY_LEN,
    TICK_PREFIX,
};
pub use kv::{IterDirection, KvStore, MemStore, WriteBatch};
pub use pool_store::{get_pool_by_id, pool_exists, save_pool};
pub use tick_index::TickIndex;
