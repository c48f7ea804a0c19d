//! Token deltas between sqrt prices and the inverse "next price" solvers.
//!
//! With liquidity `L` active between sqrt prices `a < b`:
//!
//! - token0 held: `L · (b − a) / (a · b)`
//! - token1 held: `L · (b − a)`
//!
//! Every function is generic over [`Precision`] so that the recovery path
//! can rerun a step at 36 decimals. Rounding is chosen per call so that
//! the pool never pays out more, or charges less, than the exact value.

use super::Precision;
use crate::domain::Rounding;
use crate::error::ArithmeticError;

fn ordered<P: Precision>(a: P, b: P) -> (P, P) {
    if a > b {
        (b, a)
    } else {
        (a, b)
    }
}

/// Amount of token0 between two sqrt prices, in either argument order.
///
/// Rounding up rounds every operation up and then ceils to a whole token;
/// rounding down truncates each division and keeps the fraction.
///
/// # Errors
///
/// - [`ArithmeticError::DivisionByZero`] if a sqrt price is zero.
/// - [`ArithmeticError::Overflow`] if an intermediate does not fit.
pub fn calc_amount0_delta<P: Precision>(
    liquidity: P,
    sqrt_price_a: P,
    sqrt_price_b: P,
    round_up: bool,
) -> Result<P, ArithmeticError> {
    let (lower, upper) = ordered(sqrt_price_a, sqrt_price_b);
    let diff = upper.checked_sub(&lower)?;
    let rounding = Rounding::from_round_up(round_up);
    let amount = liquidity
        .checked_mul(&diff, rounding)?
        .checked_div(&upper, rounding)?
        .checked_div(&lower, rounding)?;
    if round_up {
        amount.ceil()
    } else {
        Ok(amount)
    }
}

/// Amount of token1 between two sqrt prices, in either argument order.
///
/// # Errors
///
/// [`ArithmeticError::Overflow`] if the product does not fit.
pub fn calc_amount1_delta<P: Precision>(
    liquidity: P,
    sqrt_price_a: P,
    sqrt_price_b: P,
    round_up: bool,
) -> Result<P, ArithmeticError> {
    let (lower, upper) = ordered(sqrt_price_a, sqrt_price_b);
    let diff = upper.checked_sub(&lower)?;
    let amount = liquidity.checked_mul(&diff, Rounding::from_round_up(round_up))?;
    if round_up {
        amount.ceil()
    } else {
        Ok(amount)
    }
}

/// Sqrt price after adding `amount_in` of token0: `L·√P / (L + Δx·√P)`.
///
/// Rounded up so the price drops no further than the input pays for.
///
/// # Errors
///
/// [`ArithmeticError`] on overflow or zero liquidity.
pub fn get_next_sqrt_price_from_amount0_in_rounding_up<P: Precision>(
    sqrt_price: P,
    liquidity: P,
    amount_in: P,
) -> Result<P, ArithmeticError> {
    if amount_in.is_zero() {
        return Ok(sqrt_price);
    }
    let numerator = liquidity.checked_mul(&sqrt_price, Rounding::Up)?;
    let product = amount_in.checked_mul(&sqrt_price, Rounding::Down)?;
    let denominator = liquidity.checked_add(&product)?;
    numerator.checked_div(&denominator, Rounding::Up)
}

/// Sqrt price after removing `amount_out` of token0: `L·√P / (L − Δx·√P)`.
///
/// # Errors
///
/// [`ArithmeticError::Underflow`] if the pool does not hold `amount_out`
/// between here and infinity (non-positive denominator).
pub fn get_next_sqrt_price_from_amount0_out_rounding_up<P: Precision>(
    sqrt_price: P,
    liquidity: P,
    amount_out: P,
) -> Result<P, ArithmeticError> {
    if amount_out.is_zero() {
        return Ok(sqrt_price);
    }
    let numerator = liquidity.checked_mul(&sqrt_price, Rounding::Up)?;
    let product = amount_out.checked_mul(&sqrt_price, Rounding::Up)?;
    let denominator = liquidity
        .checked_sub(&product)
        .map_err(|_| ArithmeticError::Underflow("token0 out exceeds available liquidity"))?;
    if denominator.is_zero() {
        return Err(ArithmeticError::Underflow(
            "token0 out exceeds available liquidity",
        ));
    }
    numerator.checked_div(&denominator, Rounding::Up)
}

/// Sqrt price after adding `amount_in` of token1: `√P + Δy / L`.
///
/// # Errors
///
/// [`ArithmeticError`] on overflow or zero liquidity.
pub fn get_next_sqrt_price_from_amount1_in_rounding_down<P: Precision>(
    sqrt_price: P,
    liquidity: P,
    amount_in: P,
) -> Result<P, ArithmeticError> {
    let step = amount_in.checked_div(&liquidity, Rounding::Down)?;
    sqrt_price.checked_add(&step)
}

/// Sqrt price after removing `amount_out` of token1: `√P − Δy / L`.
///
/// # Errors
///
/// [`ArithmeticError::Underflow`] if the pool does not hold `amount_out`
/// between here and zero.
pub fn get_next_sqrt_price_from_amount1_out_rounding_down<P: Precision>(
    sqrt_price: P,
    liquidity: P,
    amount_out: P,
) -> Result<P, ArithmeticError> {
    let step = amount_out.checked_div(&liquidity, Rounding::Up)?;
    sqrt_price.checked_sub(&step)
}
