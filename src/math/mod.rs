//! Arithmetic and precision utilities for the swap core.
//!
//! This module provides the fixed-point [`Decimal`] family ([`Dec`] and
//! [`BigDec`]), the [`SignedDec`] liquidity delta, the [`Precision`] trait
//! the price formulas are generic over, `div_round` for explicitly rounded
//! wide division, and the tick and sqrt price helpers.
//!
//! # Precisions
//!
//! | Type | Decimals | Use case |
//! |------|----------|----------|
//! | `Dec` | 18 | prices, liquidity, amounts |
//! | `BigDec` | 36 | precision-loss recovery, tick price sums |

mod decimal;
mod precision;
mod rounding;
mod signed;
mod sqrt_price_math;
mod tick_math;

pub use decimal::{BigDec, Dec, Decimal};
pub use precision::Precision;
pub use rounding::div_round;
pub use signed::SignedDec;
pub use sqrt_price_math::{
    calc_amount0_delta, calc_amount1_delta, get_next_sqrt_price_from_amount0_in_rounding_up,
    get_next_sqrt_price_from_amount0_out_rounding_up,
    get_next_sqrt_price_from_amount1_in_rounding_down,
    get_next_sqrt_price_from_amount1_out_rounding_down,
};
pub use tick_math::{
    price_to_tick, sqrt_price_to_tick, tick_to_price, tick_to_sqrt_price, EXPONENT_AT_PRICE_ONE,
    MAX_SPOT_PRICE, MAX_SQRT_PRICE, MIN_SPOT_PRICE, MIN_SQRT_PRICE, TICKS_PER_DECADE,
};
