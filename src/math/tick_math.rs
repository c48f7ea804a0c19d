//! Tick-to-price and price-to-tick conversion.
//!
//! Ticks follow a geometric scheme with exact decimal prices rather than
//! `1.0001^tick`: each power of ten is split into `9 × 10^6` ticks, and in
//! the decade starting at `10^k` every tick adds `10^(k-6)` to the price.
//! Tick `0` is price `1`, tick `9_000_000` is price `10`, tick `-1` is
//! price `0.9999999`.
//!
//! # Functions
//!
//! - [`tick_to_price`] / [`tick_to_sqrt_price`]: strictly increasing in the
//!   tick, defined on `[MIN_INITIALIZED, MAX]`.
//! - [`price_to_tick`]: the tick whose price is the greatest one not above
//!   the given price.
//! - [`sqrt_price_to_tick`]: inverse of [`tick_to_sqrt_price`]; a sqrt
//!   price exactly on a tick boundary resolves to that tick.
//!
//! # Examples
//!
//! ```
//! use concentrated_swap::domain::Tick;
//! use concentrated_swap::math::{sqrt_price_to_tick, tick_to_price, tick_to_sqrt_price};
//!
//! let tick = Tick::new(9_000_000).expect("in range");
//! assert_eq!(tick_to_price(tick).expect("valid").to_string(), "10.000000000000000000");
//!
//! let sqrt = tick_to_sqrt_price(tick).expect("valid");
//! assert_eq!(sqrt_price_to_tick(sqrt).expect("in bounds"), tick);
//! ```

use primitive_types::U256;

use super::{BigDec, Dec};
use crate::domain::{Rounding, Tick};
use crate::error::SwapError;

/// Power of ten of the per-tick price increment in the decade `[1, 10)`.
pub const EXPONENT_AT_PRICE_ONE: i32 = -6;

/// Number of ticks spanning one power of ten.
pub const TICKS_PER_DECADE: i64 = 9_000_000;

/// Lowest spot price, `10^-12`.
pub const MIN_SPOT_PRICE: Dec = Dec::from_raw(U256([1_000_000, 0, 0, 0]));

/// Highest spot price, `10^38`.
pub const MAX_SPOT_PRICE: Dec = Dec::from_raw(U256([
    2_377_900_603_251_621_888,
    18_302_566_799_529_756_941,
    293_873_587_705_571_876,
    0,
]));

/// Lowest sqrt price, `10^-6`.
pub const MIN_SQRT_PRICE: Dec = Dec::from_raw(U256([1_000_000_000_000, 0, 0, 0]));

/// Highest sqrt price, `10^19`.
pub const MAX_SQRT_PRICE: Dec = Dec::from_raw(U256([
    68_739_955_140_067_328,
    542_101_086_242_752_217,
    0,
    0,
]));

/// Decade exponents covered by the supported price range.
const MIN_DECADE: i32 = -12;
const MAX_DECADE: i32 = 38;

/// Computes the spot price at `tick`.
///
/// The sum is formed at 36 decimals so the lowest decade, whose increment
/// is `10^-18`, stays exact before narrowing.
///
/// # Errors
///
/// - [`SwapError::InvalidTick`] for [`Tick::MIN_CURRENT`], which has no
///   price of its own.
/// - [`SwapError::Arithmetic`] on precision failure (unreachable for valid
///   ticks).
pub fn tick_to_price(tick: Tick) -> crate::error::Result<Dec> {
    if tick == Tick::ZERO {
        return Ok(Dec::one());
    }
    if !tick.is_initializable() {
        return Err(SwapError::InvalidTick(
            "tick is below the minimum initialized tick",
        ));
    }
    let value = tick.get();
    let decades = value / TICKS_PER_DECADE;
    let decades_exponent = i32::try_from(decades)
        .map_err(|_| SwapError::InvalidTick("tick decade out of range"))?;

    let mut increment_exponent = EXPONENT_AT_PRICE_ONE + decades_exponent;
    if value < 0 {
        increment_exponent -= 1;
    }
    let increment = BigDec::pow_ten(increment_exponent)?;
    let decade_start = BigDec::pow_ten(decades_exponent)?;

    let additive_ticks = value - decades * TICKS_PER_DECADE;
    let offset = BigDec::from_integer(u128::from(additive_ticks.unsigned_abs()))?
        .checked_mul(&increment, Rounding::Down)?;
    let price = if additive_ticks < 0 {
        decade_start.checked_sub(&offset)?
    } else {
        decade_start.checked_add(&offset)?
    };
    Ok(price.to_dec()?)
}

/// Computes the sqrt price at `tick`, floored at 18 decimals.
///
/// # Errors
///
/// Same as [`tick_to_price`].
pub fn tick_to_sqrt_price(tick: Tick) -> crate::error::Result<Dec> {
    let price = tick_to_price(tick)?;
    Ok(price.sqrt(Rounding::Down)?)
}

/// Returns the tick whose price is the greatest tick price `≤ price`.
///
/// # Errors
///
/// [`SwapError::InvalidTick`] if `price` is outside
/// `[MIN_SPOT_PRICE, MAX_SPOT_PRICE]`.
pub fn price_to_tick(price: Dec) -> crate::error::Result<Tick> {
    if price == Dec::one() {
        return Ok(Tick::ZERO);
    }
    if price < MIN_SPOT_PRICE || price > MAX_SPOT_PRICE {
        return Err(SwapError::InvalidTick(
            "price is outside [10^-12, 10^38]",
        ));
    }

    let decade = decade_of(price)?;
    let decade_start = Dec::pow_ten(decade)?;
    let increment = Dec::pow_ten(decade + EXPONENT_AT_PRICE_ONE)?;
    let ticks_into_decade = price
        .checked_sub(&decade_start)?
        .checked_div(&increment, Rounding::Down)?
        .to_integer(Rounding::Down)?;
    let ticks_into_decade = i64::try_from(ticks_into_decade)
        .map_err(|_| SwapError::InvalidTick("tick offset out of range"))?;

    Tick::new(i64::from(decade) * TICKS_PER_DECADE + ticks_into_decade)
}

/// Exponent `k` with `10^k ≤ price < 10^(k+1)`.
fn decade_of(price: Dec) -> crate::error::Result<i32> {
    let one = Dec::one();
    if price >= one {
        let mut k = 0;
        while k < MAX_DECADE && Dec::pow_ten(k + 1)? <= price {
            k += 1;
        }
        Ok(k)
    } else {
        let mut k = -1;
        while k > MIN_DECADE && Dec::pow_ten(k)? > price {
            k -= 1;
        }
        Ok(k)
    }
}

/// Returns the greatest tick whose sqrt price is `≤ sqrt_price`.
///
/// The estimate from the squared price can land one tick off on either
/// side because squaring and flooring the root both round; the result is
/// corrected against neighbouring [`tick_to_sqrt_price`] values.
///
/// # Errors
///
/// - [`SwapError::InvalidSqrtPrice`] if `sqrt_price` is outside
///   `[MIN_SQRT_PRICE, MAX_SQRT_PRICE]`.
/// - [`SwapError::Arithmetic`] on precision failure.
pub fn sqrt_price_to_tick(sqrt_price: Dec) -> crate::error::Result<Tick> {
    if sqrt_price < MIN_SQRT_PRICE || sqrt_price > MAX_SQRT_PRICE {
        return Err(SwapError::InvalidSqrtPrice(
            "sqrt price is outside [10^-6, 10^19]",
        ));
    }
    let price = sqrt_price
        .checked_mul(&sqrt_price, Rounding::Down)?
        .max(MIN_SPOT_PRICE);
    let mut tick = price_to_tick(price)?;

    while tick < Tick::MAX {
        let Some(next) = tick.checked_add(1) else {
            break;
        };
        if tick_to_sqrt_price(next)? > sqrt_price {
            break;
        }
        tick = next;
    }
    while tick > Tick::MIN_INITIALIZED && tick_to_sqrt_price(tick)? > sqrt_price {
        let Some(prev) = tick.checked_sub(1) else {
            break;
        };
        tick = prev;
    }
    Ok(tick)
}
