//! # Community Bonding Curve
//!
//! Buy, sell, inflate and deflate as pure transitions on a [`CurveSnapshot`].
//!
//! ## The Core Invariant
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                                                              │
//! │     collateral_at(supply)  ≤  pool                           │
//! │                                                              │
//! │   with equality after every buy and sell, where              │
//! │   collateral_at(s) = ⌊ F(s) · multiplier / 10¹² ⌋            │
//! │                                                              │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Trading
//!
//! ```text
//! buy:   cost   = collateral_at(supply + amount) − pool
//!        pool  := collateral_at(supply + amount)
//!
//! sell:  refund = pool − collateral_at(supply − amount)
//!        pool  := collateral_at(supply − amount)
//! ```
//!
//! Settling the pool to the curve value (instead of adding the integral to
//! whatever the pool held) is what keeps truncation from accumulating.
//!
//! ## Supply Administration
//!
//! Inflate and deflate move supply without collateral and then re-solve the
//! multiplier, so holders are diluted (or concentrated) instead of the pool
//! going under- or over-collateralized. Inflating needs a funded pool.
//!
//! Every method takes `&self` and returns the next snapshot. A failed call
//! therefore leaves the input exactly as it was.

use anchor_lang::prelude::*;

use super::polynomial::Polynomial;
use super::{CurveError, MULTIPLIER_UNIT};

/// Mutable part of a curve, copied out of the account for every call
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CurveSnapshot {
    /// Community tokens in circulation
    pub supply: u64,
    /// Collateral held by the vault
    pub collateral_pool: u64,
    /// Curve multiplier (10¹² = 1.0)
    pub multiplier: u64,
    /// Unix timestamp of the last touch
    pub last_update_time: i64,
    /// Auto-inflation accrued below one token, in parts per 10¹² of a token
    pub inflation_carry: u64,
}

/// Snapshot to commit plus the collateral that moves with it
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Settlement {
    pub next: CurveSnapshot,
    /// Cost of a buy or refund of a sell
    pub collateral: u64,
}

impl CurveSnapshot {
    /// Empty curve at the baseline multiplier
    pub fn genesis(now: i64) -> Self {
        Self {
            supply: 0,
            collateral_pool: 0,
            multiplier: MULTIPLIER_UNIT,
            last_update_time: now,
            inflation_carry: 0,
        }
    }

    /// Collateral the curve assigns to the current supply
    pub fn backing(&self, curve: &Polynomial) -> Result<u64> {
        curve.collateral_at(self.supply, self.multiplier)
    }

    /// Mint `amount` tokens for at most `max_collateral`
    pub fn buy(&self, curve: &Polynomial, amount: u64, max_collateral: u64) -> Result<Settlement> {
        require!(amount > 0, CurveError::InvalidAmount);

        let supply = self
            .supply
            .checked_add(amount)
            .ok_or(CurveError::ArithmeticOverflow)?;
        let target = curve.collateral_at(supply, self.multiplier)?;
        let cost = target.saturating_sub(self.collateral_pool);

        // A free mint would hand out the pool's rounding residue
        require!(cost > 0, CurveError::InvalidAmount);
        require!(cost <= max_collateral, CurveError::SlippageExceeded);

        Ok(Settlement {
            next: Self {
                supply,
                collateral_pool: target,
                ..*self
            },
            collateral: cost,
        })
    }

    /// Burn `amount` tokens for at least `min_collateral`
    pub fn sell(&self, curve: &Polynomial, amount: u64, min_collateral: u64) -> Result<Settlement> {
        require!(amount > 0, CurveError::InvalidAmount);

        let supply = self
            .supply
            .checked_sub(amount)
            .ok_or(CurveError::InsufficientBalance)?;
        let target = curve.collateral_at(supply, self.multiplier)?;
        let refund = self
            .collateral_pool
            .checked_sub(target)
            .ok_or(CurveError::ArithmeticOverflow)?;

        require!(refund >= min_collateral, CurveError::SlippageExceeded);

        Ok(Settlement {
            next: Self {
                supply,
                collateral_pool: target,
                ..*self
            },
            collateral: refund,
        })
    }

    /// Add `amount` tokens without collateral and dilute the multiplier
    ///
    /// An empty pool has no value to dilute, so the new tokens would be
    /// unbacked and the next buyer would pay for them.
    pub fn inflate(&self, curve: &Polynomial, amount: u64) -> Result<Self> {
        require!(amount > 0, CurveError::InvalidAmount);
        require!(self.collateral_pool > 0, CurveError::InvalidAmount);

        let mut next = *self;
        next.supply = self
            .supply
            .checked_add(amount)
            .ok_or(CurveError::ArithmeticOverflow)?;
        next.rebase(curve, true)?;
        Ok(next)
    }

    /// Remove `amount` tokens without collateral and concentrate the multiplier
    ///
    /// Burning the whole supply while the pool still holds collateral is
    /// rejected; nothing could ever redeem it.
    pub fn deflate(&self, curve: &Polynomial, amount: u64) -> Result<Self> {
        require!(amount > 0, CurveError::InvalidAmount);

        let mut next = *self;
        next.supply = self
            .supply
            .checked_sub(amount)
            .ok_or(CurveError::InsufficientBalance)?;
        require!(
            next.supply > 0 || self.collateral_pool == 0,
            CurveError::InvalidAmount
        );
        next.rebase(curve, false)?;
        Ok(next)
    }
}
