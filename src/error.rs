//! Unified error types for the swap core.
//!
//! Every fallible operation in the crate returns [`SwapError`]. Failures
//! raised by the precision library are carried as [`ArithmeticError`] and
//! converted with `?`. Any error aborts the operation before the write
//! batch is applied, so callers never observe partially committed state.

use thiserror::Error;

use crate::domain::Amount;
use crate::math::Dec;

/// Failure conditions of the decimal arithmetic library.
///
/// Results are never clamped: an operation that cannot be represented
/// exactly under the requested rounding fails with one of these variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum ArithmeticError {
    /// The result exceeds the representable range.
    #[error("arithmetic overflow: {0}")]
    Overflow(&'static str),

    /// The result would be negative where only non-negative values exist.
    #[error("arithmetic underflow: {0}")]
    Underflow(&'static str),

    /// Division by zero.
    #[error("division by zero")]
    DivisionByZero,

    /// Square root of a negative value.
    #[error("square root of a negative value")]
    NegativeSqrt,

    /// A power-of-ten exponent cannot be represented at this precision.
    #[error("power-of-ten exponent {0} is outside the representable range")]
    ExponentOutOfRange(i32),

    /// A decimal literal could not be parsed.
    #[error("invalid decimal literal: {0}")]
    Parse(&'static str),
}

/// Errors returned by pool, tick index and swap operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SwapError {
    /// Active liquidity is zero and no initialized tick lies ahead while
    /// amount remains to be swapped.
    #[error("no liquidity available in pool {pool_id} in the swap direction")]
    NoLiquidity {
        /// Pool being swapped against.
        pool_id: u64,
    },

    /// The sqrt price limit is outside the bound allowed for the direction.
    #[error("sqrt price limit {limit} is outside the allowed range [{lower}, {upper}]")]
    PriceLimitValidation {
        /// Limit requested by the caller.
        limit: Dec,
        /// Lowest acceptable limit.
        lower: Dec,
        /// Highest acceptable limit.
        upper: Dec,
    },

    /// The swap computed a zero counter-amount.
    #[error("invalid amount calculated: {amount}")]
    InvalidAmountCalculated {
        /// The computed amount before integer conversion.
        amount: Dec,
    },

    /// Arithmetic failure in the precision library.
    #[error(transparent)]
    Arithmetic(#[from] ArithmeticError),

    /// A stored tick key could not be parsed back into a tick index.
    #[error("failed to decode tick key {key:?}")]
    TickDecode {
        /// Raw key bytes, without the pool prefix.
        key: Vec<u8>,
    },

    /// A stored record could not be decoded.
    #[error("failed to decode {record} record: {reason}")]
    RecordDecode {
        /// Kind of record (`"pool"` or `"tick"`).
        record: &'static str,
        /// Decoder message.
        reason: String,
    },

    /// A record could not be encoded for storage.
    #[error("failed to encode {record} record: {reason}")]
    RecordEncode {
        /// Kind of record (`"pool"` or `"tick"`).
        record: &'static str,
        /// Encoder message.
        reason: String,
    },

    /// Tick index outside the supported range or misaligned.
    #[error("invalid tick: {0}")]
    InvalidTick(&'static str),

    /// Position bounds are inconsistent.
    #[error("invalid tick range: {0}")]
    InvalidTickRange(&'static str),

    /// Sqrt price outside `[MIN_SQRT_PRICE, MAX_SQRT_PRICE]` or otherwise
    /// unusable.
    #[error("invalid sqrt price: {0}")]
    InvalidSqrtPrice(&'static str),

    /// Denomination is malformed.
    #[error("invalid denom: {0}")]
    InvalidDenom(&'static str),

    /// Denomination is not one of the pool's two tokens.
    #[error("denom {denom} is not part of pool {pool_id}")]
    DenomNotInPool {
        /// Offending denomination.
        denom: String,
        /// Pool being queried.
        pool_id: u64,
    },

    /// Input and output denominations are the same.
    #[error("token in and token out denoms must differ, got {denom} for both")]
    DenomsEqual {
        /// The repeated denomination.
        denom: String,
    },

    /// Swap or position amount is not acceptable.
    #[error("invalid amount: {0}")]
    InvalidAmount(&'static str),

    /// Spread factor outside `[0, 1)`.
    #[error("invalid spread factor: {0}")]
    InvalidSpreadFactor(&'static str),

    /// Configuration blueprint failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(&'static str),

    /// No pool is stored under this id.
    #[error("pool {pool_id} not found")]
    PoolNotFound {
        /// Requested pool id.
        pool_id: u64,
    },

    /// A pool is already stored under this id.
    #[error("pool {pool_id} already exists")]
    PoolAlreadyExists {
        /// Conflicting pool id.
        pool_id: u64,
    },

    /// The tick index returned a tick whose record cannot be found.
    #[error("tick {tick} is indexed but its record is missing")]
    TickNotFound {
        /// Tick index.
        tick: i64,
    },

    /// Crossing a tick would drive active liquidity below zero.
    #[error("crossing tick {tick} would make active liquidity negative")]
    NegativeLiquidity {
        /// Tick being crossed.
        tick: i64,
    },

    /// The swap loop hit its configured step cap.
    #[error("swap exceeded the maximum of {steps} steps")]
    IterationLimitExceeded {
        /// Configured cap.
        steps: u32,
    },

    /// Exact-in swap produced less than the caller's minimum.
    #[error("amount out {amount} is below the minimum {minimum}")]
    AmountOutBelowMinimum {
        /// Amount the swap would pay out.
        amount: Amount,
        /// Caller-supplied minimum.
        minimum: Amount,
    },

    /// Exact-out swap requires more than the caller's maximum.
    #[error("amount in {amount} exceeds the maximum {maximum}")]
    AmountInAboveMaximum {
        /// Amount the swap would charge.
        amount: Amount,
        /// Caller-supplied maximum.
        maximum: Amount,
    },
}

/// Convenience alias used across the crate.
pub type Result<T, E = SwapError> = core::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arithmetic_error_converts_transparently() {
        let err: SwapError = ArithmeticError::DivisionByZero.into();
        assert_eq!(err, SwapError::Arithmetic(ArithmeticError::DivisionByZero));
        assert_eq!(err.to_string(), "division by zero");
    }

    #[test]
    fn invalid_amount_calculated_carries_amount() {
        let err = SwapError::InvalidAmountCalculated { amount: Dec::ZERO };
        let SwapError::InvalidAmountCalculated { amount } = &err else {
            unreachable!();
        };
        assert!(amount.is_zero());
        assert!(err.to_string().starts_with("invalid amount calculated"));
    }

    #[test]
    fn no_liquidity_message_names_pool() {
        let err = SwapError::NoLiquidity { pool_id: 7 };
        assert!(err.to_string().contains("pool 7"));
    }
}
