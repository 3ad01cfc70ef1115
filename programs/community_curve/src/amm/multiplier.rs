//! # Curve Multiplier
//!
//! The multiplier scales the raw curve integral (`F(s) · m / 10¹²`) so the
//! curve values the supply at what the collateral pool can actually pay. It
//! only moves when supply changes without collateral:
//!
//! - **Auto-inflation** (`touch`): supply compounds once per elapsed second at
//!   the governance ratio and the new tokens go to the owner. Growth below one
//!   token is carried to the next touch, so the amount minted over a period
//!   does not depend on how often the curve is touched.
//! - **Owner inflate / deflate**: see [`super::bonding_curve`].
//!
//! In both cases the pool is left alone and the multiplier is solved so the
//! curve values the new supply at no more than the pool.

use anchor_lang::prelude::*;

use super::bonding_curve::CurveSnapshot;
use super::fixed_point::FixedPoint;
use super::polynomial::Polynomial;
use super::CurveError;

/// Snapshot after elapsed time has been applied
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Accrual {
    pub next: CurveSnapshot,
    /// Tokens to issue to the inflation beneficiary
    pub minted: u64,
}

impl CurveSnapshot {
    /// Apply auto-inflation for the time since the last update
    ///
    /// `ratio` is the per-second growth in parts per 10¹². Time moving
    /// backwards is ignored and never rewinds `last_update_time`. Supply with
    /// no collateral behind it does not inflate.
    pub fn touch(&self, curve: &Polynomial, now: i64, ratio: u64) -> Result<Accrual> {
        let mut next = *self;
        if now <= self.last_update_time {
            return Ok(Accrual { next, minted: 0 });
        }

        let elapsed = u64::try_from(now - self.last_update_time)
            .map_err(|_| error!(CurveError::ArithmeticOverflow))?;
        next.last_update_time = now;

        if ratio == 0 || self.supply == 0 || self.collateral_pool == 0 {
            return Ok(Accrual { next, minted: 0 });
        }

        let (grown, carry) = FixedPoint::from_whole(self.supply, self.inflation_carry)
            .checked_mul(FixedPoint::growth(ratio)?.checked_pow(elapsed)?)?
            .split()?;
        let minted = grown
            .checked_sub(self.supply)
            .ok_or(CurveError::ArithmeticOverflow)?;
        next.inflation_carry = carry;

        if minted > 0 {
            next.supply = grown;
            next.rebase(curve, true)?;
        }

        Ok(Accrual { next, minted })
    }

    /// Re-solve the multiplier for the current supply against the pool
    ///
    /// With `cap` set the multiplier may only fall, which is the case for
    /// every supply increase. An empty pool or empty supply has nothing to
    /// rebase against and keeps the current multiplier.
    pub(crate) fn rebase(&mut self, curve: &Polynomial, cap: bool) -> Result<()> {
        if self.collateral_pool == 0 || self.supply == 0 {
            return Ok(());
        }

        let solved = curve.rebase_multiplier(self.supply, self.collateral_pool)?;
        self.multiplier = if cap { solved.min(self.multiplier) } else { solved };
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::amm::{MAX_INFLATION_RATIO, MULTIPLIER_UNIT};

    const MONTH: i64 = 2_592_000;
    const TEN_PERCENT_MONTHLY: u64 = 38_581;

    fn square_curve() -> Polynomial {
        Polynomial::new([0, 2, 0, 0]).unwrap()
    }

    fn funded(now: i64) -> CurveSnapshot {
        CurveSnapshot {
            supply: 100,
            collateral_pool: 10_000,
            multiplier: MULTIPLIER_UNIT,
            last_update_time: now,
            inflation_carry: 0,
        }
    }

    #[test]
    fn test_one_month_of_inflation() {
        let start = 1_546_300_800;
        let accrual = funded(start)
            .touch(&square_curve(), start + MONTH, TEN_PERCENT_MONTHLY)
            .unwrap();

        assert_eq!(accrual.minted, 10);
        assert_eq!(accrual.next.supply, 110);
        assert_eq!(accrual.next.collateral_pool, 10_000);
        assert_eq!(accrual.next.multiplier, 826_446_280_991);
        assert_eq!(accrual.next.last_update_time, start + MONTH);
    }

    #[test]
    fn test_single_period_compounding() {
        // 10% for one second
        let accrual = funded(0).touch(&square_curve(), 1, 100_000_000_000).unwrap();
        assert_eq!(accrual.minted, 10);
        assert_eq!(accrual.next.multiplier, 826_446_280_991);

        // Two periods compound: 100 → 121
        let accrual = funded(0).touch(&square_curve(), 2, 100_000_000_000).unwrap();
        assert_eq!(accrual.minted, 21);
    }

    #[test]
    fn test_zero_ratio_only_advances_clock() {
        let before = funded(10);
        let accrual = before.touch(&square_curve(), 10 + MONTH, 0).unwrap();
        assert_eq!(accrual.minted, 0);
        assert_eq!(accrual.next.multiplier, before.multiplier);
        assert_eq!(accrual.next.supply, before.supply);
        assert_eq!(accrual.next.last_update_time, 10 + MONTH);
    }

    #[test]
    fn test_no_elapsed_time_is_noop() {
        let before = funded(500);
        assert_eq!(before.touch(&square_curve(), 500, TEN_PERCENT_MONTHLY).unwrap().next, before);
        // Clock skew never rewinds
        assert_eq!(before.touch(&square_curve(), 400, TEN_PERCENT_MONTHLY).unwrap().next, before);
    }

    #[test]
    fn test_sub_unit_growth_is_carried() {
        // One second at 10%/month grows 100 tokens by far less than one
        let before = funded(0);
        let accrual = before.touch(&square_curve(), 1, TEN_PERCENT_MONTHLY).unwrap();
        assert_eq!(accrual.minted, 0);
        assert_eq!(accrual.next.multiplier, MULTIPLIER_UNIT);
        assert_eq!(accrual.next.last_update_time, 1);
        assert!(accrual.next.inflation_carry > 0);
    }

    #[test]
    fn test_touch_cadence_does_not_change_issuance() {
        let curve = square_curve();
        let once = funded(0).touch(&curve, MONTH, TEN_PERCENT_MONTHLY).unwrap();

        for step in [3_600, 86_400, 604_800] {
            let mut state = funded(0);
            let mut minted = 0;
            let mut now = 0;
            while now < MONTH {
                now = (now + step).min(MONTH);
                let accrual = state.touch(&curve, now, TEN_PERCENT_MONTHLY).unwrap();
                minted += accrual.minted;
                state = accrual.next;
            }

            assert_eq!(minted, once.minted, "step = {}", step);
            assert_eq!(state.supply, 110);
            assert_eq!(state.multiplier, 826_446_280_991);
        }
    }

    #[test]
    fn test_capped_ratio_survives_long_idle() {
        // Collateral equals supply on a flat price curve
        let flat = Polynomial::new([1, 0, 0, 0]).unwrap();
        let state = CurveSnapshot {
            supply: 1_000_000_000_000_000,
            collateral_pool: 1_000_000_000_000_000,
            multiplier: MULTIPLIER_UNIT,
            last_update_time: 0,
            inflation_carry: 0,
        };

        let hundred_days = 100 * 86_400;
        let accrual = state.touch(&flat, hundred_days, MAX_INFLATION_RATIO).unwrap();
        assert!(accrual.minted > 0);
        assert!(accrual.next.backing(&flat).unwrap() <= state.collateral_pool);
    }

    #[test]
    fn test_empty_supply_mints_nothing() {
        let genesis = CurveSnapshot::genesis(0);
        let accrual = genesis.touch(&square_curve(), MONTH, TEN_PERCENT_MONTHLY).unwrap();
        assert_eq!(accrual.minted, 0);
        assert_eq!(accrual.next.multiplier, MULTIPLIER_UNIT);
    }

    #[test]
    fn test_unfunded_supply_does_not_inflate() {
        let mut state = funded(0);
        state.collateral_pool = 0;
        let accrual = state.touch(&square_curve(), MONTH, TEN_PERCENT_MONTHLY).unwrap();
        assert_eq!(accrual.minted, 0);
        assert_eq!(accrual.next.supply, 100);
        assert_eq!(accrual.next.multiplier, MULTIPLIER_UNIT);
        assert_eq!(accrual.next.last_update_time, MONTH);
    }

    #[test]
    fn test_growth_never_raises_multiplier() {
        // Pool carries more than the curve value of one extra token
        let state = CurveSnapshot {
            supply: 1_000,
            collateral_pool: 1_005_000,
            multiplier: MULTIPLIER_UNIT,
            last_update_time: 0,
            inflation_carry: 0,
        };

        let mut capped = state;
        capped.supply += 1;
        capped.rebase(&square_curve(), true).unwrap();
        assert_eq!(capped.multiplier, MULTIPLIER_UNIT);

        let mut solved = state;
        solved.supply += 1;
        solved.rebase(&square_curve(), false).unwrap();
        assert!(solved.multiplier > MULTIPLIER_UNIT);
    }
}
