//! # Community Curve
//!
//! A bonding-curve market that mints and burns a community token against a
//! reserve (collateral) token on Solana.
//!
//! ## Overview
//!
//! Anyone can buy community tokens by paying collateral into the curve's vault
//! and sell them back for a refund. The price follows a polynomial in supply,
//! and the vault always holds exactly what the curve says the supply is worth.
//!
//! ## How it works
//! - A governance-set inflation ratio mints new supply to the owner over time.
//! - The owner can inflate or deflate supply directly.
//! - Either way the curve multiplier is rebased so the vault stays the backing.
//!

use anchor_lang::prelude::*;

pub mod amm;
pub mod instructions;
pub mod ledger;
pub mod state;

pub use amm::*;
pub use instructions::*;

// Replace with your deployed program ID
declare_id!("CURVzWGgBvYhBbDRxmtAXz1fcfdxJ3ZdX7GiHD6jQbBe");

/// Main Community Curve program
#[program]
pub mod community_curve {
    use super::*;

    /// Create a curve with the given price polynomial
    pub fn initialize(
        ctx: Context<Initialize>,
        curve_id: u64,
        coefficients: [u64; MAX_COEFFICIENTS],
        governance: Pubkey,
    ) -> Result<()> {
        ctx.accounts.initialize(curve_id, coefficients, governance, &ctx.bumps)
    }

    /// Buy `amount` community tokens for at most `max_collateral`
    pub fn buy(ctx: Context<Trade>, amount: u64, max_collateral: u64) -> Result<u64> {
        ctx.accounts.buy(amount, max_collateral)
    }

    /// Sell `amount` community tokens for at least `min_collateral`
    pub fn sell(ctx: Context<Trade>, amount: u64, min_collateral: u64) -> Result<u64> {
        ctx.accounts.sell(amount, min_collateral)
    }

    /// Mint to the target account without collateral (owner only)
    pub fn inflate(ctx: Context<AdjustSupply>, amount: u64) -> Result<()> {
        ctx.accounts.inflate(amount)
    }

    /// Burn from the target account without collateral (owner only)
    pub fn deflate(ctx: Context<AdjustSupply>, amount: u64) -> Result<()> {
        ctx.accounts.deflate(amount)
    }

    /// Update the inflation ratio (parameters authority only)
    pub fn set_inflation_ratio(ctx: Context<SetInflationRatio>, inflation_ratio: u64) -> Result<()> {
        ctx.accounts.set_inflation_ratio(inflation_ratio)
    }

    /// Hand the curve to a new owner
    pub fn transfer_ownership(ctx: Context<TransferOwnership>, new_owner: Pubkey) -> Result<()> {
        ctx.accounts.transfer_ownership(new_owner)
    }

    /// Current curve multiplier
    pub fn curve_multiplier(ctx: Context<CurveView>) -> Result<u64> {
        ctx.accounts.curve_multiplier()
    }

    /// Collateral a buy would cost now
    pub fn buy_quote(ctx: Context<CurveView>, amount: u64) -> Result<u64> {
        ctx.accounts.buy_quote(amount)
    }

    /// Collateral a sell would refund now
    pub fn sell_quote(ctx: Context<CurveView>, amount: u64) -> Result<u64> {
        ctx.accounts.sell_quote(amount)
    }
}
