//! Initialized-tick index of one pool.

use borsh::{BorshDeserialize, BorshSerialize};

use super::keys::{decode_tick, encode_tick, tick_key, tick_prefix};
use super::kv::{IterDirection, KvStore, WriteBatch};
use crate::domain::{Tick, TickInfo};
use crate::error::SwapError;
use crate::math::{Dec, SignedDec};

fn decode_info(bytes: &[u8]) -> crate::error::Result<TickInfo> {
    TickInfo::try_from_slice(bytes).map_err(|e| SwapError::RecordDecode {
        record: "tick",
        reason: e.to_string(),
    })
}

/// Ordered view over the tick records of a single pool.
///
/// Only initialized ticks are stored, so walking the index visits exactly
/// the liquidity boundaries. Reads go to the underlying store; writes are
/// staged in a [`WriteBatch`] owned by the caller.
///
/// # Examples
///
/// ```
/// use concentrated_swap::domain::Tick;
/// use concentrated_swap::math::{Dec, SignedDec};
/// use concentrated_swap::store::{KvStore, MemStore, TickIndex, WriteBatch};
///
/// let mut store = MemStore::new();
/// let mut batch = WriteBatch::new();
/// let lower = Tick::new(-100).expect("tick");
/// let delta = SignedDec::positive(Dec::one());
/// TickIndex::new(&store, 1)
///     .update_liquidity(&mut batch, lower, Tick::ZERO, delta, false, (Dec::ZERO, Dec::ZERO))
///     .expect("staged");
/// store.write(batch);
///
/// let index = TickIndex::new(&store, 1);
/// assert_eq!(index.next_initialized_at_or_below(Tick::ZERO).expect("ok"), Some(lower));
/// assert_eq!(index.next_initialized_above(Tick::ZERO).expect("ok"), None);
/// ```
#[derive(Debug)]
pub struct TickIndex<'a, S: KvStore + ?Sized> {
    store: &'a S,
    pool_id: u64,
}

impl<'a, S: KvStore + ?Sized> TickIndex<'a, S> {
    /// Creates a view over `pool_id`'s ticks.
    pub const fn new(store: &'a S, pool_id: u64) -> Self {
        Self { store, pool_id }
    }

    /// Reads a tick record from the store.
    ///
    /// # Errors
    ///
    /// [`SwapError::RecordDecode`] if the stored bytes are corrupt.
    pub fn get(&self, tick: Tick) -> crate::error::Result<Option<TickInfo>> {
        self.store
            .get(&tick_key(self.pool_id, tick))
            .map(|bytes| decode_info(&bytes))
            .transpose()
    }

    /// Reads a tick record, preferring a version staged in `batch`.
    ///
    /// # Errors
    ///
    /// [`SwapError::RecordDecode`] if the bytes are corrupt.
    pub fn get_staged(
        &self,
        batch: &WriteBatch,
        tick: Tick,
    ) -> crate::error::Result<Option<TickInfo>> {
        match batch.staged(&tick_key(self.pool_id, tick)) {
            Some(Some(bytes)) => decode_info(bytes).map(Some),
            Some(None) => Ok(None),
            None => self.get(tick),
        }
    }

    /// First initialized tick strictly above `tick`.
    ///
    /// # Errors
    ///
    /// [`SwapError::TickDecode`] if a stored key is malformed.
    pub fn next_initialized_above(&self, tick: Tick) -> crate::error::Result<Option<Tick>> {
        let prefix = tick_prefix(self.pool_id);
        for (key, _) in self.store.iterate(&prefix, &encode_tick(tick), IterDirection::Forward) {
            let found = decode_tick(&key)?;
            if found != tick {
                return Ok(Some(found));
            }
        }
        Ok(None)
    }

    /// First initialized tick at or below `tick`.
    ///
    /// Including `tick` itself keeps `lower ≤ current < upper` true after
    /// a downward crossing leaves the pool at `crossed − 1`.
    ///
    /// # Errors
    ///
    /// [`SwapError::TickDecode`] if a stored key is malformed.
    pub fn next_initialized_at_or_below(
        &self,
        tick: Tick,
    ) -> crate::error::Result<Option<Tick>> {
        let prefix = tick_prefix(self.pool_id);
        let mut iter = match tick.checked_add(1) {
            Some(exclusive_end) => {
                self.store
                    .iterate(&prefix, &encode_tick(exclusive_end), IterDirection::Reverse)
            }
            None => self.store.iterate(&prefix, &[], IterDirection::Reverse),
        };
        iter.next().map(|(key, _)| decode_tick(&key)).transpose()
    }

    /// All initialized ticks in ascending order.
    ///
    /// # Errors
    ///
    /// [`SwapError::TickDecode`] or [`SwapError::RecordDecode`] on corrupt
    /// entries.
    pub fn initialized_ticks(&self) -> crate::error::Result<Vec<(Tick, TickInfo)>> {
        let prefix = tick_prefix(self.pool_id);
        self.store
            .iterate(&prefix, &[], IterDirection::Forward)
            .map(|(key, value)| Ok((decode_tick(&key)?, decode_info(&value)?)))
            .collect()
    }

    /// Stages `info` under `tick`, or a deletion if it holds no liquidity.
    ///
    /// # Errors
    ///
    /// [`SwapError::RecordEncode`] if serialization fails.
    pub fn stage(
        &self,
        batch: &mut WriteBatch,
        tick: Tick,
        info: &TickInfo,
    ) -> crate::error::Result<()> {
        let key = tick_key(self.pool_id, tick);
        if !info.is_initialized() {
            batch.delete(key);
            return Ok(());
        }
        let bytes = info.try_to_vec().map_err(|e| SwapError::RecordEncode {
            record: "tick",
            reason: e.to_string(),
        })?;
        batch.set(key, bytes);
        Ok(())
    }

    /// Adds a position bound's liquidity to `tick` and stages the result.
    ///
    /// A tick initialized at or below `current_tick` starts with its fee
    /// growth outside equal to the global growth, so that growth already
    /// accrued is attributed below it.
    ///
    /// # Errors
    ///
    /// - [`SwapError::Arithmetic`] if gross liquidity would go negative.
    /// - [`SwapError::RecordDecode`] / [`SwapError::RecordEncode`] on codec
    ///   failure.
    pub fn update_liquidity(
        &self,
        batch: &mut WriteBatch,
        tick: Tick,
        current_tick: Tick,
        delta: SignedDec,
        is_upper: bool,
        fee_growth_global: (Dec, Dec),
    ) -> crate::error::Result<TickInfo> {
        let mut info = self.get_staged(batch, tick)?.unwrap_or_default();
        let was_initialized = info.is_initialized();
        info.apply_liquidity_delta(delta, is_upper)?;
        if !was_initialized && info.is_initialized() && tick <= current_tick {
            info.set_fee_growth_outside(fee_growth_global.0, fee_growth_global.1);
        }
        self.stage(batch, tick, &info)?;
        Ok(info)
    }
}
