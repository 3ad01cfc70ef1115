//! Community Token Trading
//!
//! Buys and sells priced by the bonding curve. Each call:
//! 1. Applies pending auto-inflation (`touch`)
//! 2. Prices the trade and checks the caller's limit
//! 3. Checks the trader's balance / approval
//! 4. Moves tokens
//! 5. Commits the new curve state

use anchor_lang::prelude::*;
use anchor_spl::{
    token_2022::Token2022,
    token_interface::{burn, transfer_checked, Burn, Mint, TokenAccount, TokenInterface, TransferChecked},
};

use crate::amm::CurveError;
use crate::instructions::tokens::{issue_inflation, mint_community, release_collateral};
use crate::ledger::Holding;
use crate::state::{Curve, ParameterOracle, Parameters};

/// Event emitted when community tokens are bought
#[event]
pub struct CommunityBought {
    pub curve: Pubkey,
    pub buyer: Pubkey,
    pub amount: u64,
    pub collateral_in: u64,
    pub supply: u64,
    pub multiplier: u64,
}

/// Event emitted when community tokens are sold
#[event]
pub struct CommunitySold {
    pub curve: Pubkey,
    pub seller: Pubkey,
    pub amount: u64,
    pub collateral_out: u64,
    pub supply: u64,
    pub multiplier: u64,
}

/// Accounts for trading operations
#[derive(Accounts)]
pub struct Trade<'info> {
    /// Trader (owner or approved delegate of the debited account)
    #[account(mut)]
    pub trader: Signer<'info>,

    /// Curve being traded on
    #[account(
        mut,
        has_one = collateral_mint,
        has_one = community_mint,
        has_one = vault,
        has_one = parameters,
    )]
    pub curve: Box<Account<'info, Curve>>,

    /// Source of the inflation ratio
    pub parameters: Box<Account<'info, Parameters>>,

    /// Collateral mint
    #[account(mint::token_program = collateral_token_program)]
    pub collateral_mint: Box<InterfaceAccount<'info, Mint>>,

    /// Community token mint
    #[account(mut, mint::token_program = community_token_program)]
    pub community_mint: Box<InterfaceAccount<'info, Mint>>,

    /// Trader's collateral account
    #[account(
        mut,
        token::mint = collateral_mint,
        token::token_program = collateral_token_program,
    )]
    pub trader_collateral: Box<InterfaceAccount<'info, TokenAccount>>,

    /// Trader's community token account
    #[account(
        mut,
        token::mint = community_mint,
        token::token_program = community_token_program,
    )]
    pub trader_community: Box<InterfaceAccount<'info, TokenAccount>>,

    /// Owner's community token account (receives auto-inflation)
    #[account(
        mut,
        token::mint = community_mint,
        token::authority = curve.owner,
        token::token_program = community_token_program,
    )]
    pub beneficiary: Box<InterfaceAccount<'info, TokenAccount>>,

    /// Curve's collateral vault
    #[account(mut)]
    pub vault: Box<InterfaceAccount<'info, TokenAccount>>,

    /// Token program of the collateral mint
    pub collateral_token_program: Interface<'info, TokenInterface>,
    /// Token-2022 program (community mint)
    pub community_token_program: Program<'info, Token2022>,
}

impl<'info> Trade<'info> {
    /// Buy exactly `amount` community tokens, paying at most `max_collateral`
    pub fn buy(&mut self, amount: u64, max_collateral: u64) -> Result<u64> {
        let clock = Clock::get()?;
        let polynomial = self.curve.polynomial()?;

        let accrual = self.curve.snapshot().touch(
            &polynomial,
            clock.unix_timestamp,
            self.parameters.inflation_ratio(),
        )?;
        let settlement = accrual.next.buy(&polynomial, amount, max_collateral)?;
        let cost = settlement.collateral;

        Holding::from_account(&self.trader_collateral).authorize_debit(&self.trader.key(), cost)?;

        // Transfer collateral to vault
        transfer_checked(
            CpiContext::new(
                self.collateral_token_program.to_account_info(),
                TransferChecked {
                    from: self.trader_collateral.to_account_info(),
                    mint: self.collateral_mint.to_account_info(),
                    to: self.vault.to_account_info(),
                    authority: self.trader.to_account_info(),
                },
            ),
            cost,
            self.collateral_mint.decimals,
        )?;

        // Mint community tokens to trader
        mint_community(
            &self.curve,
            self.community_token_program.to_account_info(),
            self.community_mint.to_account_info(),
            self.trader_community.to_account_info(),
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

        self.curve.commit(settlement.next);

        emit!(CommunityBought {
            curve: self.curve.key(),
            buyer: self.trader.key(),
            amount,
            collateral_in: cost,
            supply: settlement.next.supply,
            multiplier: settlement.next.multiplier,
        });

        Ok(cost)
    }

    /// Sell exactly `amount` community tokens, receiving at least `min_collateral`
    pub fn sell(&mut self, amount: u64, min_collateral: u64) -> Result<u64> {
        let clock = Clock::get()?;
        let polynomial = self.curve.polynomial()?;

        let accrual = self.curve.snapshot().touch(
            &polynomial,
            clock.unix_timestamp,
            self.parameters.inflation_ratio(),
        )?;

        Holding::from_account(&self.trader_community).authorize_debit(&self.trader.key(), amount)?;
        let settlement = accrual.next.sell(&polynomial, amount, min_collateral)?;
        let refund = settlement.collateral;

        require_keys_eq!(
            self.trader_collateral.owner,
            self.trader_community.owner,
            CurveError::Unauthorized
        );

        // Burn community tokens
        burn(
            CpiContext::new(
                self.community_token_program.to_account_info(),
                Burn {
                    mint: self.community_mint.to_account_info(),
                    from: self.trader_community.to_account_info(),
                    authority: self.trader.to_account_info(),
                },
            ),
            amount,
        )?;

        // Transfer collateral back to the holder
        if refund > 0 {
            release_collateral(
                &self.curve,
                self.collateral_token_program.to_account_info(),
                self.vault.to_account_info(),
                self.collateral_mint.to_account_info(),
                self.trader_collateral.to_account_info(),
                refund,
                self.collateral_mint.decimals,
            )?;
        }

        issue_inflation(
            &self.curve,
            self.community_token_program.to_account_info(),
            self.community_mint.to_account_info(),
            self.beneficiary.to_account_info(),
            accrual.minted,
            accrual.next.multiplier,
            clock.unix_timestamp,
        )?;

        self.curve.commit(settlement.next);

        emit!(CommunitySold {
            curve: self.curve.key(),
            seller: self.trader.key(),
            amount,
            collateral_out: refund,
            supply: settlement.next.supply,
            multiplier: settlement.next.multiplier,
        });

        Ok(refund)
    }
}
