//! Token movements signed by the curve PDA
//!
//! The curve is mint authority and permanent delegate of the community mint
//! and owner of the collateral vault, so every outgoing movement needs its
//! seeds.

use anchor_lang::prelude::*;
use anchor_spl::token_interface::{
    burn, mint_to, transfer_checked, Burn, MintTo, TransferChecked,
};

use crate::state::Curve;

/// Event emitted when elapsed time inflates the supply
#[event]
pub struct InflationAccrued {
    pub curve: Pubkey,
    pub beneficiary: Pubkey,
    pub minted: u64,
    pub multiplier: u64,
    pub timestamp: i64,
}

/// Mint community tokens to `to`
pub fn mint_community<'info>(
    curve: &Account<'info, Curve>,
    token_program: AccountInfo<'info>,
    mint: AccountInfo<'info>,
    to: AccountInfo<'info>,
    amount: u64,
) -> Result<()> {
    let id_bytes = curve.id.to_le_bytes();
    let curve_seeds = &[Curve::SEED, curve.creator.as_ref(), &id_bytes, &[curve.bump]];
    let signer_seeds = &[&curve_seeds[..]];

    mint_to(
        CpiContext::new_with_signer(
            token_program,
            MintTo {
                mint,
                to,
                authority: curve.to_account_info(),
            },
            signer_seeds,
        ),
        amount,
    )
}

/// Burn community tokens from any holder as permanent delegate
pub fn burn_community<'info>(
    curve: &Account<'info, Curve>,
    token_program: AccountInfo<'info>,
    mint: AccountInfo<'info>,
    from: AccountInfo<'info>,
    amount: u64,
) -> Result<()> {
    let id_bytes = curve.id.to_le_bytes();
    let curve_seeds = &[Curve::SEED, curve.creator.as_ref(), &id_bytes, &[curve.bump]];
    let signer_seeds = &[&curve_seeds[..]];

    burn(
        CpiContext::new_with_signer(
            token_program,
            Burn {
                mint,
                from,
                authority: curve.to_account_info(),
            },
            signer_seeds,
        ),
        amount,
    )
}

/// Pay collateral out of the vault
pub fn release_collateral<'info>(
    curve: &Account<'info, Curve>,
    token_program: AccountInfo<'info>,
    vault: AccountInfo<'info>,
    mint: AccountInfo<'info>,
    to: AccountInfo<'info>,
    amount: u64,
    decimals: u8,
) -> Result<()> {
    let id_bytes = curve.id.to_le_bytes();
    let curve_seeds = &[Curve::SEED, curve.creator.as_ref(), &id_bytes, &[curve.bump]];
    let signer_seeds = &[&curve_seeds[..]];

    transfer_checked(
        CpiContext::new_with_signer(
            token_program,
            TransferChecked {
                from: vault,
                mint,
                to,
                authority: curve.to_account_info(),
            },
            signer_seeds,
        ),
        amount,
        decimals,
    )
}

/// Deliver auto-inflation to the owner's account, if any accrued
pub fn issue_inflation<'info>(
    curve: &Account<'info, Curve>,
    token_program: AccountInfo<'info>,
    mint: AccountInfo<'info>,
    beneficiary: AccountInfo<'info>,
    minted: u64,
    multiplier: u64,
    timestamp: i64,
) -> Result<()> {
    if minted == 0 {
        return Ok(());
    }

    let beneficiary_key = beneficiary.key();
    mint_community(curve, token_program, mint, beneficiary, minted)?;

    emit!(InflationAccrued {
        curve: curve.key(),
        beneficiary: beneficiary_key,
        minted,
        multiplier,
        timestamp,
    });

    Ok(())
}
