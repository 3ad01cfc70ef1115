//! Curve Initialization
//!
//! Creates everything a community needs in one step:
//! 1. The curve account (signer becomes the owner)
//! 2. The parameters account, handed to a governance authority
//! 3. The community mint (Token-2022, curve is authority and permanent delegate)
//! 4. The collateral vault owned by the curve

use anchor_lang::prelude::*;
use anchor_spl::{
    associated_token::AssociatedToken,
    token_2022::Token2022,
    token_interface::{Mint, TokenAccount, TokenInterface},
};

use crate::amm::{CurveSnapshot, Polynomial, MAX_COEFFICIENTS};
use crate::state::{Curve, Parameters};

/// Event emitted when a new curve is created
#[event]
pub struct CurveInitialized {
    pub curve: Pubkey,
    pub owner: Pubkey,
    pub collateral_mint: Pubkey,
    pub community_mint: Pubkey,
    pub coefficients: [u64; MAX_COEFFICIENTS],
    pub multiplier: u64,
}

/// Accounts required for curve initialization
#[derive(Accounts)]
#[instruction(curve_id: u64)]
pub struct Initialize<'info> {
    /// Curve creator (becomes the owner)
    #[account(mut)]
    pub creator: Signer<'info>,

    /// Curve account (created)
    #[account(
        init,
        payer = creator,
        space = 8 + Curve::INIT_SPACE,
        seeds = [Curve::SEED, creator.key().as_ref(), curve_id.to_le_bytes().as_ref()],
        bump,
    )]
    pub curve: Box<Account<'info, Curve>>,

    /// Parameters account (created)
    #[account(
        init,
        payer = creator,
        space = 8 + Parameters::INIT_SPACE,
        seeds = [Parameters::SEED, curve.key().as_ref()],
        bump,
    )]
    pub parameters: Box<Account<'info, Parameters>>,

    /// Reserve token mint (e.g., USDC)
    #[account(mint::token_program = collateral_token_program)]
    pub collateral_mint: Box<InterfaceAccount<'info, Mint>>,

    /// Community token mint (created)
    #[account(
        init,
        payer = creator,
        mint::decimals = collateral_mint.decimals,
        mint::authority = curve,
        mint::token_program = community_token_program,
        extensions::permanent_delegate::delegate = curve,
        seeds = [Curve::COMMUNITY_MINT_SEED, curve.key().as_ref()],
        bump,
    )]
    pub community_mint: Box<InterfaceAccount<'info, Mint>>,

    /// Collateral vault (created)
    #[account(
        init,
        payer = creator,
        associated_token::mint = collateral_mint,
        associated_token::authority = curve,
        associated_token::token_program = collateral_token_program,
    )]
    pub vault: Box<InterfaceAccount<'info, TokenAccount>>,

    /// Token program of the collateral mint
    pub collateral_token_program: Interface<'info, TokenInterface>,
    /// Token-2022 program (community mint)
    pub community_token_program: Program<'info, Token2022>,
    /// Associated token program
    pub associated_token_program: Program<'info, AssociatedToken>,
    /// System program
    pub system_program: Program<'info, System>,
}

impl<'info> Initialize<'info> {
    /// Initialize the curve and its parameters
    pub fn initialize(
        &mut self,
        curve_id: u64,
        coefficients: [u64; MAX_COEFFICIENTS],
        governance: Pubkey,
        bumps: &InitializeBumps,
    ) -> Result<()> {
        let polynomial = Polynomial::new(coefficients)?;
        let clock = Clock::get()?;
        let genesis = CurveSnapshot::genesis(clock.unix_timestamp);

        self.curve.set_inner(Curve {
            creator: self.creator.key(),
            id: curve_id,
            owner: self.creator.key(),
            collateral_mint: self.collateral_mint.key(),
            community_mint: self.community_mint.key(),
            vault: self.vault.key(),
            parameters: self.parameters.key(),
            coefficients: polynomial.coefficients(),
            supply: genesis.supply,
            collateral_pool: genesis.collateral_pool,
            multiplier: genesis.multiplier,
            last_update_time: genesis.last_update_time,
            inflation_carry: genesis.inflation_carry,
            bump: bumps.curve,
        });

        self.parameters.set_inner(Parameters {
            curve: self.curve.key(),
            authority: governance,
            inflation_ratio: 0,
            updated_at: clock.unix_timestamp,
            bump: bumps.parameters,
        });

        msg!("Curve {} initialized!", curve_id);
        msg!("Owner: {}", self.creator.key());
        msg!("Collateral: {}", self.collateral_mint.key());
        msg!("Coefficients: {:?}", coefficients);

        emit!(CurveInitialized {
            curve: self.curve.key(),
            owner: self.creator.key(),
            collateral_mint: self.collateral_mint.key(),
            community_mint: self.community_mint.key(),
            coefficients,
            multiplier: genesis.multiplier,
        });

        Ok(())
    }
}
