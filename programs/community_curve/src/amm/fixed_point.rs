//! # Scaled Integer Arithmetic
//!
//! Every value that needs a fractional part (growth factors, multipliers)
//! is a 256-bit integer scaled by `10¹²`. All operations are checked and
//! truncate toward zero.

use anchor_lang::prelude::*;

use super::CurveError;

mod u256 {
    use uint::construct_uint;

    construct_uint! {
        /// 256-bit unsigned integer for intermediate products
        pub struct U256(4);
    }
}

pub use u256::U256;

/// Number of fractional units in one [`FixedPoint`]
pub const FIXED_SCALE: u64 = 1_000_000_000_000;

/// Unsigned fixed-point number with 12 fractional decimal digits
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct FixedPoint(U256);

impl FixedPoint {
    pub const ZERO: FixedPoint = FixedPoint(U256([0, 0, 0, 0]));
    pub const ONE: FixedPoint = FixedPoint(U256([FIXED_SCALE, 0, 0, 0]));

    /// Fraction `parts / 10¹²`
    pub fn from_parts(parts: u64) -> Self {
        FixedPoint(U256::from(parts))
    }

    /// `whole + parts / 10¹²`
    pub fn from_whole(whole: u64, parts: u64) -> Self {
        FixedPoint(U256::from(whole) * U256::from(FIXED_SCALE) + U256::from(parts))
    }

    /// Growth factor `1 + parts / 10¹²`
    pub fn growth(parts: u64) -> Result<Self> {
        Self::ONE.checked_add(Self::from_parts(parts))
    }

    pub fn raw(&self) -> U256 {
        self.0
    }

    pub fn checked_add(self, other: Self) -> Result<Self> {
        let sum = self.0.checked_add(other.0).ok_or(CurveError::ArithmeticOverflow)?;
        Ok(FixedPoint(sum))
    }

    /// Product, truncated to 12 fractional digits
    pub fn checked_mul(self, other: Self) -> Result<Self> {
        mul_div_floor(self.0, other.0, U256::from(FIXED_SCALE)).map(FixedPoint)
    }

    /// `self^exponent` by repeated squaring
    ///
    /// Each intermediate product truncates, so the result never exceeds the
    /// exact power.
    pub fn checked_pow(self, exponent: u64) -> Result<Self> {
        let mut result = Self::ONE;
        let mut base = self;
        let mut remaining = exponent;

        while remaining > 0 {
            if remaining & 1 == 1 {
                result = result.checked_mul(base)?;
            }
            remaining >>= 1;
            if remaining > 0 {
                base = base.checked_mul(base)?;
            }
        }

        Ok(result)
    }

    /// Integer part and the remaining `parts / 10¹²`
    pub fn split(self) -> Result<(u64, u64)> {
        let scale = U256::from(FIXED_SCALE);
        Ok((narrow_u64(self.0 / scale)?, (self.0 % scale).low_u64()))
    }
}

/// `⌊a · b / d⌋` with a 256-bit intermediate
pub fn mul_div_floor(a: U256, b: U256, d: U256) -> Result<U256> {
    require!(!d.is_zero(), CurveError::ArithmeticOverflow);
    let (product, overflow) = a.overflowing_mul(b);
    require!(!overflow, CurveError::ArithmeticOverflow);
    Ok(product / d)
}

/// Narrow back to `u64`, failing if the value does not fit
pub fn narrow_u64(value: U256) -> Result<u64> {
    require!(value <= U256::from(u64::MAX), CurveError::ArithmeticOverflow);
    Ok(value.low_u64())
}
