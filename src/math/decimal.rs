//! Fixed-point decimals backed by 256-bit unsigned integers.
//!
//! A [`Decimal<D>`] stores `value × 10^D` as a [`U256`]. Two precisions are
//! used by the swap core:
//!
//! | Alias | Decimals | Role |
//! |-------|----------|------|
//! | [`Dec`] | 18 | prices, liquidity and amounts |
//! | [`BigDec`] | 36 | recovery path when 18 decimals lose a step |
//!
//! Multiplication and division form the exact intermediate in 512 bits
//! and then round with the caller's [`Rounding`]. Nothing rounds to
//! nearest, and nothing saturates: every unrepresentable result is an
//! [`ArithmeticError`].
//!
//! # Examples
//!
//! ```
//! use concentrated_swap::domain::Rounding;
//! use concentrated_swap::math::Dec;
//!
//! let one = Dec::one();
//! let three = Dec::from_integer(3).expect("fits");
//! let down = one.checked_div(&three, Rounding::Down).expect("non-zero");
//! let up = one.checked_div(&three, Rounding::Up).expect("non-zero");
//! assert_eq!(down.to_string(), "0.333333333333333333");
//! assert_eq!(up.to_string(), "0.333333333333333334");
//! ```

use core::fmt;
use core::str::FromStr;
use std::io;

use borsh::{BorshDeserialize, BorshSerialize};
use primitive_types::{U256, U512};

use super::rounding::div_round;
use crate::domain::Rounding;
use crate::error::ArithmeticError;

/// Standard precision: 18 decimal places.
pub type Dec = Decimal<18>;

/// High precision: 36 decimal places.
pub type BigDec = Decimal<36>;

/// Largest `n` such that `10^n` fits in a `U256`.
const MAX_POW10_U256: usize = 77;

/// Unsigned fixed-point decimal with `D` fractional digits.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Decimal<const D: usize>(U256);

fn narrow(value: U512, context: &'static str) -> Result<U256, ArithmeticError> {
    U256::try_from(value).map_err(|_| ArithmeticError::Overflow(context))
}

fn pow10(exponent: usize) -> Result<U256, ArithmeticError> {
    if exponent > MAX_POW10_U256 {
        return Err(ArithmeticError::Overflow("power of ten exceeds 256 bits"));
    }
    Ok(U256::exp10(exponent))
}

impl<const D: usize> Decimal<D> {
    /// Number of fractional digits.
    pub const DECIMALS: usize = D;

    /// Zero.
    pub const ZERO: Self = Self(U256([0, 0, 0, 0]));

    /// Smallest positive value, `10^-D`.
    pub const ULP: Self = Self(U256([1, 0, 0, 0]));

    /// Returns `10^D`, the raw representation of one.
    #[must_use]
    pub fn scale() -> U256 {
        U256::exp10(D)
    }

    /// One.
    #[must_use]
    pub fn one() -> Self {
        Self(Self::scale())
    }

    /// Wraps a raw scaled integer.
    #[must_use]
    pub const fn from_raw(raw: U256) -> Self {
        Self(raw)
    }

    /// Returns the raw scaled integer.
    #[must_use]
    pub const fn raw(&self) -> U256 {
        self.0
    }

    /// Converts a whole number.
    ///
    /// # Errors
    ///
    /// [`ArithmeticError::Overflow`] if `value × 10^D` exceeds 256 bits.
    pub fn from_integer(value: u128) -> Result<Self, ArithmeticError> {
        U256::from(value)
            .checked_mul(Self::scale())
            .map(Self)
            .ok_or(ArithmeticError::Overflow("integer does not fit in decimal"))
    }

    /// Builds `numerator / denominator` with the given rounding.
    ///
    /// # Errors
    ///
    /// [`ArithmeticError::DivisionByZero`] if `denominator` is zero.
    pub fn from_ratio(
        numerator: u128,
        denominator: u128,
        rounding: Rounding,
    ) -> Result<Self, ArithmeticError> {
        let scaled = U256::from(numerator).full_mul(Self::scale());
        let quotient = div_round(scaled, U512::from(denominator), rounding)
            .ok_or(ArithmeticError::DivisionByZero)?;
        narrow(quotient, "ratio does not fit in decimal").map(Self)
    }

    /// Returns `10^exponent`.
    ///
    /// # Errors
    ///
    /// [`ArithmeticError::ExponentOutOfRange`] if the exponent is below
    /// `-D` or the result does not fit.
    pub fn pow_ten(exponent: i32) -> Result<Self, ArithmeticError> {
        let magnitude = usize::try_from(exponent.unsigned_abs())
            .map_err(|_| ArithmeticError::ExponentOutOfRange(exponent))?;
        let digits = if exponent >= 0 {
            D.checked_add(magnitude)
        } else {
            D.checked_sub(magnitude)
        }
        .ok_or(ArithmeticError::ExponentOutOfRange(exponent))?;
        pow10(digits)
            .map(Self)
            .map_err(|_| ArithmeticError::ExponentOutOfRange(exponent))
    }

    /// Returns `true` if the value is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Checked addition.
    ///
    /// # Errors
    ///
    /// [`ArithmeticError::Overflow`] if the sum exceeds 256 bits.
    pub fn checked_add(&self, other: &Self) -> Result<Self, ArithmeticError> {
        self.0
            .checked_add(other.0)
            .map(Self)
            .ok_or(ArithmeticError::Overflow("decimal addition"))
    }

    /// Checked subtraction.
    ///
    /// # Errors
    ///
    /// [`ArithmeticError::Underflow`] if `other > self`.
    pub fn checked_sub(&self, other: &Self) -> Result<Self, ArithmeticError> {
        self.0
            .checked_sub(other.0)
            .map(Self)
            .ok_or(ArithmeticError::Underflow("decimal subtraction"))
    }

    /// Multiplication rounded in the given direction.
    ///
    /// # Errors
    ///
    /// [`ArithmeticError::Overflow`] if the product does not fit.
    pub fn checked_mul(&self, other: &Self, rounding: Rounding) -> Result<Self, ArithmeticError> {
        let product = self.0.full_mul(other.0);
        let quotient = div_round(product, U512::from(Self::scale()), rounding)
            .ok_or(ArithmeticError::Overflow("decimal multiplication"))?;
        narrow(quotient, "decimal multiplication").map(Self)
    }

    /// Division rounded in the given direction.
    ///
    /// # Errors
    ///
    /// - [`ArithmeticError::DivisionByZero`] if `other` is zero.
    /// - [`ArithmeticError::Overflow`] if the quotient does not fit.
    pub fn checked_div(&self, other: &Self, rounding: Rounding) -> Result<Self, ArithmeticError> {
        if other.is_zero() {
            return Err(ArithmeticError::DivisionByZero);
        }
        let scaled = self.0.full_mul(Self::scale());
        let quotient = div_round(scaled, U512::from(other.0), rounding)
            .ok_or(ArithmeticError::Overflow("decimal division"))?;
        narrow(quotient, "decimal division").map(Self)
    }

    /// Square root at full precision, rounded in the given direction.
    ///
    /// The floor variant is monotonic: `a ≤ b ⇒ sqrt(a) ≤ sqrt(b)`.
    ///
    /// # Errors
    ///
    /// [`ArithmeticError::Overflow`] only if rounding up the largest
    /// representable root overflows.
    pub fn sqrt(&self, rounding: Rounding) -> Result<Self, ArithmeticError> {
        let radicand = self.0.full_mul(Self::scale());
        let mut root = radicand.integer_sqrt();
        if rounding.is_up() && root * root != radicand {
            root = root
                .checked_add(U512::one())
                .ok_or(ArithmeticError::Overflow("decimal square root"))?;
        }
        narrow(root, "decimal square root").map(Self)
    }

    /// Integer power by repeated squaring; every intermediate product is
    /// rounded in the given direction.
    ///
    /// # Errors
    ///
    /// [`ArithmeticError::Overflow`] if any intermediate does not fit.
    pub fn pow(&self, exponent: u32, rounding: Rounding) -> Result<Self, ArithmeticError> {
        let mut result = Self::one();
        let mut base = *self;
        let mut remaining = exponent;
        while remaining > 0 {
            if remaining & 1 == 1 {
                result = result.checked_mul(&base, rounding)?;
            }
            remaining >>= 1;
            if remaining > 0 {
                base = base.checked_mul(&base, rounding)?;
            }
        }
        Ok(result)
    }

    /// Drops the fractional part.
    #[must_use]
    pub fn truncate(&self) -> Self {
        let scale = Self::scale();
        Self(self.0 - self.0 % scale)
    }

    /// Rounds up to the next whole number.
    ///
    /// # Errors
    ///
    /// [`ArithmeticError::Overflow`] if the ceiling does not fit.
    pub fn ceil(&self) -> Result<Self, ArithmeticError> {
        let truncated = self.truncate();
        if truncated == *self {
            return Ok(truncated);
        }
        truncated.checked_add(&Self::one())
    }

    /// Converts to a whole number, rounding in the given direction.
    ///
    /// # Errors
    ///
    /// [`ArithmeticError::Overflow`] if the result exceeds `u128`.
    pub fn to_integer(&self, rounding: Rounding) -> Result<u128, ArithmeticError> {
        let quotient = div_round(U512::from(self.0), U512::from(Self::scale()), rounding)
            .ok_or(ArithmeticError::Overflow("decimal to integer"))?;
        let narrowed = narrow(quotient, "decimal to integer")?;
        u128::try_from(narrowed).map_err(|_| ArithmeticError::Overflow("decimal to integer"))
    }

    /// Converts to another precision. Widening is exact; narrowing rounds
    /// in the given direction.
    ///
    /// # Errors
    ///
    /// [`ArithmeticError::Overflow`] if the value does not fit at the
    /// target precision.
    pub fn rescale<const E: usize>(&self, rounding: Rounding) -> Result<Decimal<E>, ArithmeticError> {
        if E >= D {
            let factor = pow10(E - D)?;
            self.0
                .checked_mul(factor)
                .map(Decimal)
                .ok_or(ArithmeticError::Overflow("decimal rescale"))
        } else {
            let factor = pow10(D - E)?;
            let quotient = div_round(U512::from(self.0), U512::from(factor), rounding)
                .ok_or(ArithmeticError::Overflow("decimal rescale"))?;
            narrow(quotient, "decimal rescale").map(Decimal)
        }
    }
}

impl Dec {
    /// Lossless conversion to 36 decimals.
    ///
    /// # Errors
    ///
    /// [`ArithmeticError::Overflow`] for values above roughly `10^41`.
    pub fn to_big(&self) -> Result<BigDec, ArithmeticError> {
        self.rescale::<36>(Rounding::Down)
    }
}

impl BigDec {
    /// Truncating conversion to 18 decimals.
    ///
    /// # Errors
    ///
    /// Never fails in practice; the signature mirrors [`Decimal::rescale`].
    pub fn to_dec(&self) -> Result<Dec, ArithmeticError> {
        self.rescale::<18>(Rounding::Down)
    }
}

impl<const D: usize> fmt::Display for Decimal<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (integer, fraction) = self.0.div_mod(Self::scale());
        if D == 0 {
            return write!(f, "{integer}");
        }
        let fraction = fraction.to_string();
        write!(f, "{integer}.{fraction:0>width$}", width = D)
    }
}

impl<const D: usize> fmt::Debug for Decimal<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Decimal<{D}>({self})")
    }
}

impl<const D: usize> FromStr for Decimal<D> {
    type Err = ArithmeticError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (integer, fraction) = s.split_once('.').unwrap_or((s, ""));
        if integer.is_empty() && fraction.is_empty() {
            return Err(ArithmeticError::Parse("empty literal"));
        }
        if !integer.bytes().chain(fraction.bytes()).all(|b| b.is_ascii_digit()) {
            return Err(ArithmeticError::Parse("unexpected character"));
        }
        if fraction.len() > D {
            return Err(ArithmeticError::Parse("too many fractional digits"));
        }
        let whole = if integer.is_empty() {
            U256::zero()
        } else {
            U256::from_dec_str(integer).map_err(|_| ArithmeticError::Parse("integer part out of range"))?
        };
        let frac = if fraction.is_empty() {
            U256::zero()
        } else {
            U256::from_dec_str(fraction)
                .map_err(|_| ArithmeticError::Parse("fraction out of range"))?
                .checked_mul(pow10(D - fraction.len())?)
                .ok_or(ArithmeticError::Parse("fraction out of range"))?
        };
        whole
            .checked_mul(Self::scale())
            .and_then(|w| w.checked_add(frac))
            .map(Self)
            .ok_or(ArithmeticError::Parse("value out of range"))
    }
}

impl<const D: usize> BorshSerialize for Decimal<D> {
    fn serialize<W: io::Write>(&self, writer: &mut W) -> io::Result<()> {
        BorshSerialize::serialize(&self.0 .0, writer)
    }
}

impl<const D: usize> BorshDeserialize for Decimal<D> {
    fn deserialize_reader<R: io::Read>(reader: &mut R) -> io::Result<Self> {
        let limbs = <[u64; 4]>::deserialize_reader(reader)?;
        Ok(Self(U256(limbs)))
    }
}

#[cfg(feature = "serde")]
impl<const D: usize> serde::Serialize for Decimal<D> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de, const D: usize> serde::Deserialize<'de> for Decimal<D> {
    fn deserialize<De: serde::Deserializer<'de>>(deserializer: De) -> Result<Self, De::Error> {
        let literal = <String as serde::Deserialize>::deserialize(deserializer)?;
        literal.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Dec {
        let Ok(d) = s.parse() else {
            panic!("valid literal {s}");
        };
        d
    }

    fn big(s: &str) -> BigDec {
        let Ok(d) = s.parse() else {
            panic!("valid literal {s}");
        };
        d
    }

    // -- Parsing and formatting ---------------------------------------------

    #[test]
    fn parse_and_display() {
        assert_eq!(dec("1.5").to_string(), "1.500000000000000000");
        assert_eq!(dec(".25").to_string(), "0.250000000000000000");
        assert_eq!(dec("42").to_string(), "42.000000000000000000");
        assert_eq!(dec("0.000000000000000001"), Dec::ULP);
    }

    #[test]
    fn parse_rejects_garbage() {
        assert_eq!("".parse::<Dec>(), Err(ArithmeticError::Parse("empty literal")));
        assert_eq!("-1".parse::<Dec>(), Err(ArithmeticError::Parse("unexpected character")));
        assert_eq!(
            "0.0000000000000000001".parse::<Dec>(),
            Err(ArithmeticError::Parse("too many fractional digits"))
        );
        assert!("1.2.3".parse::<Dec>().is_err());
    }

    #[test]
    fn debug_shows_precision() {
        assert_eq!(format!("{:?}", Dec::one()), "Decimal<18>(1.000000000000000000)");
    }

    // -- Arithmetic ---------------------------------------------------------

    #[test]
    fn add_and_sub() {
        let Ok(sum) = dec("1.25").checked_add(&dec("2.5")) else {
            panic!("expected Ok");
        };
        assert_eq!(sum, dec("3.75"));
        assert_eq!(
            dec("1").checked_sub(&dec("2")),
            Err(ArithmeticError::Underflow("decimal subtraction"))
        );
    }

    #[test]
    fn add_overflow() {
        let max = Dec::from_raw(U256::MAX);
        assert_eq!(
            max.checked_add(&Dec::ULP),
            Err(ArithmeticError::Overflow("decimal addition"))
        );
    }

    #[test]
    fn mul_truncates_or_rounds_up() {
        let third = dec("0.333333333333333333");
        let Ok(down) = third.checked_mul(&dec("0.5"), Rounding::Down) else {
            panic!("expected Ok");
        };
        let Ok(up) = third.checked_mul(&dec("0.5"), Rounding::Up) else {
            panic!("expected Ok");
        };
        assert_eq!(down, dec("0.166666666666666666"));
        assert_eq!(up, dec("0.166666666666666667"));
    }

    #[test]
    fn mul_of_tiny_values_truncates_to_zero() {
        let Ok(product) = Dec::ULP.checked_mul(&Dec::ULP, Rounding::Down) else {
            panic!("expected Ok");
        };
        assert!(product.is_zero());
        let Ok(product) = Dec::ULP.checked_mul(&Dec::ULP, Rounding::Up) else {
            panic!("expected Ok");
        };
        assert_eq!(product, Dec::ULP);
    }

    #[test]
    fn div_by_zero() {
        assert_eq!(
            Dec::one().checked_div(&Dec::ZERO, Rounding::Down),
            Err(ArithmeticError::DivisionByZero)
        );
    }

    #[test]
    fn div_overflow() {
        let max = Dec::from_raw(U256::MAX);
        assert_eq!(
            max.checked_div(&dec("0.5"), Rounding::Down),
            Err(ArithmeticError::Overflow("decimal division"))
        );
    }

    #[test]
    fn sqrt_exact_and_inexact() {
        let Ok(root) = dec("2.25").sqrt(Rounding::Down) else {
            panic!("expected Ok");
        };
        assert_eq!(root, dec("1.5"));
        let Ok(down) = dec("2").sqrt(Rounding::Down) else {
            panic!("expected Ok");
        };
        let Ok(up) = dec("2").sqrt(Rounding::Up) else {
            panic!("expected Ok");
        };
        assert_eq!(down, dec("1.414213562373095048"));
        assert_eq!(up, dec("1.414213562373095049"));
    }

    #[test]
    fn pow_matches_repeated_mul() {
        let Ok(p) = dec("1.1").pow(3, Rounding::Down) else {
            panic!("expected Ok");
        };
        assert_eq!(p, dec("1.331"));
        let Ok(p) = dec("7").pow(0, Rounding::Down) else {
            panic!("expected Ok");
        };
        assert_eq!(p, Dec::one());
    }

    #[test]
    fn pow_ten_bounds() {
        assert_eq!(Dec::pow_ten(-18), Ok(Dec::ULP));
        assert_eq!(Dec::pow_ten(0), Ok(Dec::one()));
        assert_eq!(Dec::pow_ten(38), Ok(dec("100000000000000000000000000000000000000")));
        assert_eq!(Dec::pow_ten(-19), Err(ArithmeticError::ExponentOutOfRange(-19)));
        assert_eq!(Dec::pow_ten(60), Err(ArithmeticError::ExponentOutOfRange(60)));
        assert_eq!(BigDec::pow_ten(-36), Ok(BigDec::ULP));
    }

    #[test]
    fn integer_conversions() {
        assert_eq!(dec("2.000000000000000001").to_integer(Rounding::Down), Ok(2));
        assert_eq!(dec("2.000000000000000001").to_integer(Rounding::Up), Ok(3));
        assert_eq!(dec("2").to_integer(Rounding::Up), Ok(2));
        assert_eq!(dec("2.7").truncate(), dec("2"));
        assert_eq!(dec("2.1").ceil(), Ok(dec("3")));
        assert_eq!(dec("2").ceil(), Ok(dec("2")));
    }

    #[test]
    fn from_ratio_rounds() {
        assert_eq!(Dec::from_ratio(1, 3, Rounding::Down), Ok(dec("0.333333333333333333")));
        assert_eq!(Dec::from_ratio(1, 3, Rounding::Up), Ok(dec("0.333333333333333334")));
        assert_eq!(Dec::from_ratio(1, 0, Rounding::Up), Err(ArithmeticError::DivisionByZero));
    }

    // -- Precision conversions ----------------------------------------------

    #[test]
    fn widening_is_lossless() {
        let value = dec("123.456789012345678");
        let Ok(wide) = value.to_big() else {
            panic!("expected Ok");
        };
        assert_eq!(wide.to_dec(), Ok(value));
    }

    #[test]
    fn narrowing_truncates() {
        let value = big("1.000000000000000000999999999999999999");
        assert_eq!(value.to_dec(), Ok(dec("1")));
        let Ok(up) = value.rescale::<18>(Rounding::Up) else {
            panic!("expected Ok");
        };
        assert_eq!(up, dec("1.000000000000000001"));
    }

    #[test]
    fn big_dec_resolves_what_dec_cannot() {
        let tiny = Dec::ULP;
        let Ok(two) = Dec::from_integer(2) else {
            panic!("expected Ok");
        };
        let Ok(half) = tiny.checked_div(&two, Rounding::Down) else {
            panic!("expected Ok");
        };
        assert!(half.is_zero());
        let Ok(tiny_big) = tiny.to_big() else {
            panic!("expected Ok");
        };
        let Ok(two) = BigDec::from_integer(2) else {
            panic!("expected Ok");
        };
        let Ok(half_big) = tiny_big.checked_div(&two, Rounding::Down) else {
            panic!("expected Ok");
        };
        assert!(!half_big.is_zero());
    }

    // -- Codec --------------------------------------------------------------

    #[test]
    fn borsh_round_trip() {
        let value = dec("98765.4321");
        let Ok(bytes) = value.try_to_vec() else {
            panic!("serializable");
        };
        assert_eq!(bytes.len(), 32);
        let Ok(decoded) = Dec::try_from_slice(&bytes) else {
            panic!("decodable");
        };
        assert_eq!(decoded, value);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_uses_decimal_strings() {
        let value = dec("0.25");
        let Ok(json) = serde_json::to_string(&value) else {
            panic!("serializable");
        };
        assert_eq!(json, "\"0.250000000000000000\"");
        let Ok(back) = serde_json::from_str::<Dec>(&json) else {
            panic!("decodable");
        };
        assert_eq!(back, value);
        assert!(serde_json::from_str::<Dec>("\"1.2.3\"").is_err());
    }
}
