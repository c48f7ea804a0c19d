//! Store key layout.
//!
//! | Record | Key |
//! |--------|-----|
//! | tick | `0x01 ‖ pool_id (u64 BE) ‖ tick (i64 BE, sign bit flipped)` |
//! | pool | `0x02 ‖ pool_id (u64 BE)` |
//!
//! Flipping the sign bit of the big-endian two's complement tick makes
//! byte order agree with numeric order, so negative ticks sort before
//! positive ones.

use crate::domain::Tick;
use crate::error::SwapError;

/// Leading byte of tick keys.
pub const TICK_PREFIX: u8 = 0x01;

/// Leading byte of pool keys.
pub const POOL_PREFIX: u8 = 0x02;

/// Encoded tick length in bytes.
pub const TICK_KEY_LEN: usize = 8;

/// Prefix under which all ticks of `pool_id` are stored.
#[must_use]
pub fn tick_prefix(pool_id: u64) -> Vec<u8> {
    let mut key = Vec::with_capacity(1 + 8);
    key.push(TICK_PREFIX);
    key.extend_from_slice(&pool_id.to_be_bytes());
    key
}

/// Order-preserving encoding of a tick.
#[must_use]
pub fn encode_tick(tick: Tick) -> [u8; TICK_KEY_LEN] {
    let mut bytes = tick.get().to_be_bytes();
    bytes[0] ^= 0x80;
    bytes
}

/// Inverse of [`encode_tick`].
///
/// # Errors
///
/// [`SwapError::TickDecode`] if `bytes` is not exactly eight bytes or
/// decodes to a tick outside the supported range.
pub fn decode_tick(bytes: &[u8]) -> crate::error::Result<Tick> {
    let decode_error = || SwapError::TickDecode {
        key: bytes.to_vec(),
    };
    let mut raw: [u8; TICK_KEY_LEN] = bytes.try_into().map_err(|_| decode_error())?;
    raw[0] ^= 0x80;
    Tick::new(i64::from_be_bytes(raw)).map_err(|_| decode_error())
}

/// Full key of one tick record.
#[must_use]
pub fn tick_key(pool_id: u64, tick: Tick) -> Vec<u8> {
    let mut key = tick_prefix(pool_id);
    key.extend_from_slice(&encode_tick(tick));
    key
}

/// Key of a pool record.
#[must_use]
pub fn pool_key(pool_id: u64) -> Vec<u8> {
    let mut key = Vec::with_capacity(1 + 8);
    key.push(POOL_PREFIX);
    key.extend_from_slice(&pool_id.to_be_bytes());
    key
}
