//! Pool record repository.

use borsh::{BorshDeserialize, BorshSerialize};

use super::keys::pool_key;
use super::kv::{KvStore, WriteBatch};
use crate::domain::Pool;
use crate::error::SwapError;

/// Loads the pool stored under `pool_id`.
///
/// # Errors
///
/// - [`SwapError::PoolNotFound`] if no record exists.
/// - [`SwapError::RecordDecode`] if the record is corrupt.
pub fn get_pool_by_id<S: KvStore + ?Sized>(store: &S, pool_id: u64) -> crate::error::Result<Pool> {
    let bytes = store
        .get(&pool_key(pool_id))
        .ok_or(SwapError::PoolNotFound { pool_id })?;
    Pool::try_from_slice(&bytes).map_err(|e| SwapError::RecordDecode {
        record: "pool",
        reason: e.to_string(),
    })
}

/// Returns `true` if a record exists under `pool_id`.
#[must_use]
pub fn pool_exists<S: KvStore + ?Sized>(store: &S, pool_id: u64) -> bool {
    store.get(&pool_key(pool_id)).is_some()
}

/// Stages `pool` for writing.
///
/// # Errors
///
/// [`SwapError::RecordEncode`] if serialization fails.
pub fn save_pool(batch: &mut WriteBatch, pool: &Pool) -> crate::error::Result<()> {
    let bytes = pool.try_to_vec().map_err(|e| SwapError::RecordEncode {
        record: "pool",
        reason: e.to_string(),
    })?;
    batch.set(pool_key(pool.id()), bytes);
    Ok(())
}
