//! Governance and Ownership
//!
//! - `set_inflation_ratio` - parameters authority updates the ratio the curve reads
//! - `transfer_ownership` - curve owner hands the inflate/deflate capability on

use anchor_lang::prelude::*;

use crate::amm::CurveError;
use crate::state::{Curve, Parameters};

/// Event emitted when the inflation ratio changes
#[event]
pub struct InflationRatioUpdated {
    pub parameters: Pubkey,
    pub curve: Pubkey,
    pub previous: u64,
    pub inflation_ratio: u64,
    pub timestamp: i64,
}

/// Event emitted when the curve changes owner
#[event]
pub struct OwnershipTransferred {
    pub curve: Pubkey,
    pub previous_owner: Pubkey,
    pub new_owner: Pubkey,
}

/// Accounts for updating the inflation ratio
#[derive(Accounts)]
pub struct SetInflationRatio<'info> {
    /// Governance authority
    #[account(
        constraint = authority.key() == parameters.authority @ ParametersError::Unauthorized
    )]
    pub authority: Signer<'info>,

    /// Parameters account
    #[account(mut)]
    pub parameters: Account<'info, Parameters>,
}

impl<'info> SetInflationRatio<'info> {
    pub fn set_inflation_ratio(&mut self, inflation_ratio: u64) -> Result<()> {
        let clock = Clock::get()?;
        let previous = self
            .parameters
            .set_inflation_ratio(inflation_ratio, clock.unix_timestamp)?;

        msg!("Inflation ratio: {} -> {}", previous, inflation_ratio);
        emit!(InflationRatioUpdated {
            parameters: self.parameters.key(),
            curve: self.parameters.curve,
            previous,
            inflation_ratio,
            timestamp: clock.unix_timestamp,
        });

        Ok(())
    }
}

/// Accounts for handing over curve ownership
#[derive(Accounts)]
pub struct TransferOwnership<'info> {
    /// Current owner
    pub owner: Signer<'info>,

    /// Curve
    #[account(
        mut,
        constraint = curve.is_owner(&owner.key()) @ CurveError::Unauthorized,
    )]
    pub curve: Account<'info, Curve>,
}

impl<'info> TransferOwnership<'info> {
    pub fn transfer_ownership(&mut self, new_owner: Pubkey) -> Result<()> {
        let previous_owner = self.curve.owner;
        self.curve.owner = new_owner;

        msg!("Curve owner: {} -> {}", previous_owner, new_owner);
        emit!(OwnershipTransferred {
            curve: self.curve.key(),
            previous_owner,
            new_owner,
        });

        Ok(())
    }
}

#[error_code(offset = 7000)]
pub enum ParametersError {
    #[msg("Only the parameters authority may change parameters")]
    Unauthorized,
    #[msg("Inflation ratio exceeds the allowed maximum")]
    InvalidRatio,
}
