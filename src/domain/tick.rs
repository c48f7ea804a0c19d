//! Discrete price point for concentrated liquidity.

use core::fmt;
use std::io;

use borsh::{BorshDeserialize, BorshSerialize};

use crate::error::SwapError;

/// Lowest tick a position bound may use (spot price `10^-12`).
const MIN_INITIALIZED_TICK: i64 = -108_000_000;

/// Highest tick (spot price `10^38`).
const MAX_TICK: i64 = 342_000_000;

/// Lowest tick the pool can sit at: one below the lowest initializable
/// tick, reached only by crossing it downward.
const MIN_CURRENT_TICK: i64 = MIN_INITIALIZED_TICK - 1;

/// A tick index in the geometric tick scheme.
///
/// Prices are exact decimals: each power of ten is split into
/// `9 × 10^6` ticks, and within the decade starting at `10^k` every tick
/// adds `10^(k-6)` to the price. Tick `0` is price `1`.
///
/// # Examples
///
/// ```
/// use concentrated_swap::domain::Tick;
///
/// let tick = Tick::new(9_000_000).expect("in range");
/// assert!(tick.is_initializable());
/// assert!(Tick::new(400_000_000).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Tick(i64);

impl Tick {
    /// Lowest current tick (`-108_000_001`).
    pub const MIN_CURRENT: Self = Self(MIN_CURRENT_TICK);

    /// Lowest initializable tick (`-108_000_000`).
    pub const MIN_INITIALIZED: Self = Self(MIN_INITIALIZED_TICK);

    /// Highest tick (`342_000_000`).
    pub const MAX: Self = Self(MAX_TICK);

    /// Tick at price one.
    pub const ZERO: Self = Self(0);

    /// Creates a tick with range validation.
    ///
    /// # Errors
    ///
    /// [`SwapError::InvalidTick`] outside `[MIN_CURRENT, MAX]`.
    pub const fn new(value: i64) -> crate::error::Result<Self> {
        if value < MIN_CURRENT_TICK || value > MAX_TICK {
            return Err(SwapError::InvalidTick(
                "tick out of range [-108000001, 342000000]",
            ));
        }
        Ok(Self(value))
    }

    /// Returns the underlying index.
    #[must_use]
    pub const fn get(&self) -> i64 {
        self.0
    }

    /// Returns `true` if a position bound may sit on this tick.
    #[must_use]
    pub const fn is_initializable(&self) -> bool {
        self.0 >= MIN_INITIALIZED_TICK && self.0 <= MAX_TICK
    }

    /// Returns `true` if the tick is a multiple of `spacing`.
    ///
    /// A zero spacing aligns nothing.
    #[must_use]
    pub const fn is_aligned(&self, spacing: u64) -> bool {
        if spacing == 0 || spacing > i64::MAX as u64 {
            return false;
        }
        self.0 % (spacing as i64) == 0
    }

    /// Checked addition. `None` if the result leaves the valid range.
    #[must_use]
    pub const fn checked_add(&self, delta: i64) -> Option<Self> {
        match self.0.checked_add(delta) {
            Some(v) if v >= MIN_CURRENT_TICK && v <= MAX_TICK => Some(Self(v)),
            _ => None,
        }
    }

    /// Checked subtraction. `None` if the result leaves the valid range.
    #[must_use]
    pub const fn checked_sub(&self, delta: i64) -> Option<Self> {
        match self.0.checked_sub(delta) {
            Some(v) if v >= MIN_CURRENT_TICK && v <= MAX_TICK => Some(Self(v)),
            _ => None,
        }
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl BorshSerialize for Tick {
    fn serialize<W: io::Write>(&self, writer: &mut W) -> io::Result<()> {
        BorshSerialize::serialize(&self.0, writer)
    }
}

impl BorshDeserialize for Tick {
    fn deserialize_reader<R: io::Read>(reader: &mut R) -> io::Result<Self> {
        let raw = i64::deserialize_reader(reader)?;
        Self::new(raw).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e.to_string()))
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Tick {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(self.0)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Tick {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = <i64 as serde::Deserialize>::deserialize(deserializer)?;
        Self::new(raw).map_err(serde::de::Error::custom)
    }
}
