//! Read-only Views
//!
//! Values are returned through transaction return data. Quotes apply pending
//! auto-inflation to a copy of the curve, so they match what a trade in the
//! same slot would be charged.

use anchor_lang::prelude::*;

use crate::state::{Curve, ParameterOracle, Parameters};

#[derive(Accounts)]
pub struct CurveView<'info> {
    #[account(has_one = parameters)]
    pub curve: Account<'info, Curve>,

    pub parameters: Account<'info, Parameters>,
}

impl<'info> CurveView<'info> {
    pub fn curve_multiplier(&self) -> Result<u64> {
        Ok(self.curve.multiplier)
    }

    /// Collateral a buy of `amount` would cost now
    pub fn buy_quote(&self, amount: u64) -> Result<u64> {
        let polynomial = self.curve.polynomial()?;
        let accrual = self.curve.snapshot().touch(
            &polynomial,
            Clock::get()?.unix_timestamp,
            self.parameters.inflation_ratio(),
        )?;
        Ok(accrual.next.buy(&polynomial, amount, u64::MAX)?.collateral)
    }

    /// Collateral a sell of `amount` would refund now
    pub fn sell_quote(&self, amount: u64) -> Result<u64> {
        let polynomial = self.curve.polynomial()?;
        let accrual = self.curve.snapshot().touch(
            &polynomial,
            Clock::get()?.unix_timestamp,
            self.parameters.inflation_ratio(),
        )?;
        Ok(accrual.next.sell(&polynomial, amount, 0)?.collateral)
    }
}
