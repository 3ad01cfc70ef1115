//! # Price Polynomial
//!
//! The marginal price of the next token is a cubic in supply with unsigned
//! coefficients, so it can never decrease:
//!
//! ```text
//! p(s) = c0 + c1·s + c2·s² + c3·s³
//! F(s) = c0·s + c1·s²/2 + c2·s³/3 + c3·s⁴/4
//! ```
//!
//! `F` is evaluated over the common denominator 12 (`lcm(1, 2, 3, 4)`), so the
//! integral is an exact integer until the single truncating division by
//! `12 · 10¹²` that applies the multiplier.

use anchor_lang::prelude::*;

use super::fixed_point::{mul_div_floor, narrow_u64, U256};
use super::{CurveError, MAX_COEFFICIENTS, MULTIPLIER_UNIT};

/// Common denominator of every antiderivative term
pub const ANTIDERIVATIVE_DENOMINATOR: u64 = 12;

/// Non-decreasing price curve
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Polynomial {
    coefficients: [u64; MAX_COEFFICIENTS],
}

impl Polynomial {
    /// Build a curve from `[c0, c1, c2, c3]`
    ///
    /// At least one coefficient must be non-zero, otherwise every token would
    /// be free.
    pub fn new(coefficients: [u64; MAX_COEFFICIENTS]) -> Result<Self> {
        require!(
            coefficients.iter().any(|c| *c != 0),
            CurveError::InvalidCoefficients
        );
        Ok(Self { coefficients })
    }

    pub fn coefficients(&self) -> [u64; MAX_COEFFICIENTS] {
        self.coefficients
    }

    /// Highest power with a non-zero coefficient
    fn degree(&self) -> usize {
        self.coefficients
            .iter()
            .rposition(|c| *c != 0)
            .unwrap_or(0)
    }

    /// `12 · F(supply)` computed exactly
    fn scaled_antiderivative(&self, supply: u64) -> Result<U256> {
        let s = U256::from(supply);
        let mut power = U256::one();
        let mut total = U256::zero();

        for (i, coefficient) in self.coefficients.iter().enumerate().take(self.degree() + 1) {
            // power = s^(i+1)
            power = power.checked_mul(s).ok_or(CurveError::ArithmeticOverflow)?;
            if *coefficient == 0 {
                continue;
            }

            let weight = ANTIDERIVATIVE_DENOMINATOR / (i as u64 + 1);
            let term = U256::from(*coefficient)
                .checked_mul(U256::from(weight))
                .and_then(|t| t.checked_mul(power))
                .ok_or(CurveError::ArithmeticOverflow)?;
            total = total.checked_add(term).ok_or(CurveError::ArithmeticOverflow)?;
        }

        Ok(total)
    }

    /// Collateral backing `supply` tokens under `multiplier`
    ///
    /// `⌊F(supply) · multiplier / 10¹²⌋`
    pub fn collateral_at(&self, supply: u64, multiplier: u64) -> Result<u64> {
        let scaled = self.scaled_antiderivative(supply)?;
        let value = mul_div_floor(scaled, U256::from(multiplier), curve_denominator())?;
        narrow_u64(value)
    }

    /// Collateral between two supplies
    ///
    /// Ascending ranges give the cost of a buy; descending ranges give the
    /// refund of a sell. Both ends truncate through [`Self::collateral_at`].
    pub fn price_integral(&self, supply_from: u64, supply_to: u64, multiplier: u64) -> Result<u64> {
        let from = self.collateral_at(supply_from, multiplier)?;
        let to = self.collateral_at(supply_to, multiplier)?;

        let (high, low) = if supply_to >= supply_from { (to, from) } else { (from, to) };
        Ok(high.checked_sub(low).ok_or(CurveError::ArithmeticOverflow)?)
    }

    /// Largest multiplier whose `collateral_at(supply)` does not exceed `pool`
    ///
    /// `⌊pool · 12 · 10¹² / (12 · F(supply))⌋`
    pub fn rebase_multiplier(&self, supply: u64, pool: u64) -> Result<u64> {
        let scaled = self.scaled_antiderivative(supply)?;
        require!(!scaled.is_zero(), CurveError::InvalidAmount);

        let multiplier = narrow_u64(mul_div_floor(U256::from(pool), curve_denominator(), scaled)?)?;
        require!(multiplier > 0, CurveError::MultiplierExhausted);
        Ok(multiplier)
    }
}

fn curve_denominator() -> U256 {
    U256::from(ANTIDERIVATIVE_DENOMINATOR) * U256::from(MULTIPLIER_UNIT)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Price `2s`, collateral `s²`
    fn square_curve() -> Polynomial {
        Polynomial::new([0, 2, 0, 0]).unwrap()
    }

    #[test]
    fn test_square_curve_fixture() {
        let curve = square_curve();
        assert_eq!(curve.collateral_at(100, MULTIPLIER_UNIT).unwrap(), 10_000);
        assert_eq!(curve.price_integral(0, 100, MULTIPLIER_UNIT).unwrap(), 10_000);
        assert_eq!(curve.price_integral(100, 101, MULTIPLIER_UNIT).unwrap(), 201);
        assert_eq!(curve.price_integral(101, 91, MULTIPLIER_UNIT).unwrap(), 1_920);
    }

    #[test]
    fn test_integral_direction_is_symmetric() {
        let curve = Polynomial::new([3, 1, 4, 1]).unwrap();
        let up = curve.price_integral(40, 95, 700_000_000_000).unwrap();
        let down = curve.price_integral(95, 40, 700_000_000_000).unwrap();
        assert_eq!(up, down);
        assert_eq!(curve.price_integral(40, 40, MULTIPLIER_UNIT).unwrap(), 0);
    }

    #[test]
    fn test_every_degree_is_exact() {
        // F(10) = 5·10 + 6·100/2 + 3·1000/3 + 8·10000/4
        let curve = Polynomial::new([5, 6, 3, 8]).unwrap();
        assert_eq!(curve.collateral_at(10, MULTIPLIER_UNIT).unwrap(), 50 + 300 + 1_000 + 20_000);

        // F(3) = 27/3 + 81/4 = 29.25, truncated
        let curve = Polynomial::new([0, 0, 1, 1]).unwrap();
        assert_eq!(curve.collateral_at(3, MULTIPLIER_UNIT).unwrap(), 29);
        assert_eq!(curve.collateral_at(3, 4 * MULTIPLIER_UNIT).unwrap(), 117);
    }

    #[test]
    fn test_multiplier_scales_output() {
        let curve = square_curve();
        assert_eq!(curve.collateral_at(120, 826_446_280_991).unwrap(), 11_900);
        assert_eq!(curve.collateral_at(55, 907_029_478_458).unwrap(), 2_743);
    }

    #[test]
    fn test_rebase_fixtures() {
        let curve = square_curve();
        assert_eq!(curve.rebase_multiplier(110, 10_000).unwrap(), 826_446_280_991);
        assert_eq!(curve.rebase_multiplier(105, 10_000).unwrap(), 907_029_478_458);
    }

    #[test]
    fn test_rebase_never_overshoots_pool() {
        let curve = Polynomial::new([1, 3, 0, 2]).unwrap();
        for (supply, pool) in [(17u64, 9_999u64), (1_000, 1), (3, 123_456_789)] {
            let multiplier = curve.rebase_multiplier(supply, pool).unwrap();
            assert!(curve.collateral_at(supply, multiplier).unwrap() <= pool);
        }
    }

    #[test]
    fn test_rebase_rejects_degenerate_inputs() {
        let curve = square_curve();
        assert_eq!(
            curve.rebase_multiplier(0, 10).unwrap_err(),
            CurveError::InvalidAmount.into()
        );
        assert_eq!(
            curve.rebase_multiplier(1_000_000_000, 1).unwrap_err(),
            CurveError::MultiplierExhausted.into()
        );
    }

    #[test]
    fn test_zero_curve_rejected() {
        assert_eq!(
            Polynomial::new([0, 0, 0, 0]).unwrap_err(),
            CurveError::InvalidCoefficients.into()
        );
    }

    #[test]
    fn test_overflow_is_reported() {
        let curve = Polynomial::new([0, 0, 0, u64::MAX]).unwrap();
        assert_eq!(
            curve.collateral_at(u64::MAX, MULTIPLIER_UNIT).unwrap_err(),
            CurveError::ArithmeticOverflow.into()
        );

        // Lower unused powers never overflow on their own
        let linear = Polynomial::new([1, 0, 0, 0]).unwrap();
        assert_eq!(linear.collateral_at(u64::MAX, MULTIPLIER_UNIT).unwrap(), u64::MAX);
    }
}
