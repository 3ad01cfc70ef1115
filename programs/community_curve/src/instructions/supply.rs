//! Supply Administration
//!
//! The curve owner can mint (`inflate`) or burn (`deflate`) community tokens
//! without moving collateral. The multiplier is rebased so the vault keeps
//! backing the new supply exactly; holders absorb the change pro rata.

use anchor_lang::prelude::*;
use anchor_spl::{
    token_2022::Token2022,
    token_interface::{Mint, TokenAccount},
};

use crate::amm::CurveError;
use crate::instructions::tokens::{burn_community, issue_inflation, mint_community};
use crate::ledger::Holding;
use crate::state::{Curve, ParameterOracle, Parameters};

/// Event emitted when the owner inflates supply
#[event]
pub struct SupplyInflated {
    pub curve: Pubkey,
    pub recipient: Pubkey,
    pub amount: u64,
    pub supply: u64,
    pub multiplier: u64,
}

/// Event emitted when the owner deflates supply
#[event]
pub struct SupplyDeflated {
    pub curve: Pubkey,
    pub holder: Pubkey,
    pub amount: u64,
    pub supply: u64,
    pub multiplier: u64,
}

/// Accounts for owner supply adjustments
#[derive(Accounts)]
pub struct AdjustSupply<'info> {
    /// Curve owner
    pub owner: Signer<'info>,

    /// Curve being adjusted
    #[account(
        mut,
        constraint = curve.is_owner(&owner.key()) @ CurveError::Unauthorized,
        has_one = community_mint,
        has_one = parameters,
    )]
    pub curve: Box<Account<'info, Curve>>,

    /// Source of the inflation ratio
    pub parameters: Box<Account<'info, Parameters>>,

    /// Community token mint
    #[account(mut, mint::token_program = community_token_program)]
    pub community_mint: Box<InterfaceAccount<'info, Mint>>,

    /// Recipient (inflate) or holder (deflate)
    #[account(
        mut,
        token::mint = community_mint,
        token::token_program = community_token_program,
    )]
    pub target: Box<InterfaceAccount<'info, TokenAccount>>,

    /// Owner's community token account (receives auto-inflation)
    #[account(
        mut,
        token::mint = community_mint,
        token::authority = curve.owner,
        token::token_program = community_token_program,
    )]
    pub beneficiary: Box<InterfaceAccount<'info, TokenAccount>>,

    /// Token-2022 program (community mint)
    pub community_token_program: Program<'info, Token2022>,
}

impl<'info> AdjustSupply<'info> {
    /// Mint `amount` to the target account with no collateral movement
    pub fn inflate(&mut self, amount: u64) -> Result<()> {
        let clock = Clock::get()?;
        let polynomial = self.curve.polynomial()?;

        let accrual = self.curve.snapshot().touch(
            &polynomial,
            clock.unix_timestamp,
            self.parameters.inflation_ratio(),
        )?;
        let next = accrual.next.inflate(&polynomial, amount)?;

        mint_community(
            &self.curve,
            self.community_token_program.to_account_info(),
            self.community_mint.to_account_info(),
            self.target.to_account_info(),
            amount,
        )?;

        issue_inflation(
            &self.curve,
            self.community_token_program.to_account_info(),
            self.community_mint.to_account_info(),
            self.beneficiary.to_account_info(),
            accrual.minted,
            accrual.next.multiplier,
            clock.unix_timestamp,
        )?;

        self.curve.commit(next);

        msg!("Inflated {} to {}", amount, self.target.owner);
        emit!(SupplyInflated {
            curve: self.curve.key(),
            recipient: self.target.owner,
            amount,
            supply: next.supply,
            multiplier: next.multiplier,
        });

        Ok(())
    }

    /// Burn `amount` from the target account with no collateral movement
    pub fn deflate(&mut self, amount: u64) -> Result<()> {
        let clock = Clock::get()?;
        let polynomial = self.curve.polynomial()?;

        let accrual = self.curve.snapshot().touch(
            &polynomial,
            clock.unix_timestamp,
            self.parameters.inflation_ratio(),
        )?;

        Holding::from_account(&self.target).require_balance(amount)?;
        let next = accrual.next.deflate(&polynomial, amount)?;

        // Curve is the mint's permanent delegate
        burn_community(
            &self.curve,
            self.community_token_program.to_account_info(),
            self.community_mint.to_account_info(),
            self.target.to_account_info(),
            amount,
        )?;

        issue_inflation(
            &self.curve,
            self.community_token_program.to_account_info(),
            self.community_mint.to_account_info(),
            self.beneficiary.to_account_info(),
            accrual.minted,
            accrual.next.multiplier,
            clock.unix_timestamp,
        )?;

        self.curve.commit(next);

        msg!("Deflated {} from {}", amount, self.target.owner);
        emit!(SupplyDeflated {
            curve: self.curve.key(),
            holder: self.target.owner,
            amount,
            supply: next.supply,
            multiplier: next.multiplier,
        });

        Ok(())
    }
}
