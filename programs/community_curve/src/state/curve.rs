//! Bonding Curve State
//!
//! One account per community token. It owns the supply, the collateral pool
//! and the multiplier; only curve instructions write to it.

use anchor_lang::prelude::*;

use crate::amm::{CurveSnapshot, Polynomial, MAX_COEFFICIENTS};

/// Bonding curve account
///
/// Seeds: ["curve", creator, curve_id.to_le_bytes()]
#[account]
#[derive(InitSpace)]
pub struct Curve {
    /// Account that created the curve (part of the PDA seeds)
    pub creator: Pubkey,

    /// Creator-chosen identifier (part of the PDA seeds)
    pub id: u64,

    /// Holder of the inflate/deflate capability and beneficiary of
    /// auto-inflation
    pub owner: Pubkey,

    /// Reserve token mint
    pub collateral_mint: Pubkey,

    /// Community token mint (Token-2022, curve is mint authority and
    /// permanent delegate)
    pub community_mint: Pubkey,

    /// Collateral vault owned by this account
    pub vault: Pubkey,

    /// Parameters account supplying the inflation ratio
    pub parameters: Pubkey,

    /// Price polynomial `[c0, c1, c2, c3]`
    pub coefficients: [u64; MAX_COEFFICIENTS],

    /// Community tokens in circulation
    pub supply: u64,

    /// Collateral held in the vault on behalf of the curve
    pub collateral_pool: u64,

    /// Curve multiplier (10¹² = 1.0)
    pub multiplier: u64,

    /// Unix timestamp of the last touch
    pub last_update_time: i64,

    /// Auto-inflation accrued below one token (parts per 10¹²)
    pub inflation_carry: u64,

    /// PDA bump seed
    pub bump: u8,
}

impl Curve {
    pub const SEED: &'static [u8] = b"curve";
    pub const COMMUNITY_MINT_SEED: &'static [u8] = b"community_mint";

    /// Owner check guarding supply administration
    pub fn is_owner(&self, caller: &Pubkey) -> bool {
        self.owner == *caller
    }

    pub fn polynomial(&self) -> Result<Polynomial> {
        Polynomial::new(self.coefficients)
    }

    pub fn snapshot(&self) -> CurveSnapshot {
        CurveSnapshot {
            supply: self.supply,
            collateral_pool: self.collateral_pool,
            multiplier: self.multiplier,
            last_update_time: self.last_update_time,
            inflation_carry: self.inflation_carry,
        }
    }

    /// Write a transition back; called only once every CPI has succeeded
    pub fn commit(&mut self, next: CurveSnapshot) {
        self.supply = next.supply;
        self.collateral_pool = next.collateral_pool;
        self.multiplier = next.multiplier;
        self.last_update_time = next.last_update_time;
        self.inflation_carry = next.inflation_carry;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::amm::MULTIPLIER_UNIT;

    fn curve(owner: Pubkey) -> Curve {
        Curve {
            creator: owner,
            id: 1,
            owner,
            collateral_mint: Pubkey::new_unique(),
            community_mint: Pubkey::new_unique(),
            vault: Pubkey::new_unique(),
            parameters: Pubkey::new_unique(),
            coefficients: [0, 2, 0, 0],
            supply: 0,
            collateral_pool: 0,
            multiplier: MULTIPLIER_UNIT,
            last_update_time: 0,
            inflation_carry: 0,
            bump: 255,
        }
    }

    #[test]
    fn test_owner_check() {
        let owner = Pubkey::new_unique();
        let curve = curve(owner);
        assert!(curve.is_owner(&owner));
        assert!(!curve.is_owner(&Pubkey::new_unique()));
    }

    #[test]
    fn test_commit_writes_back_a_buy() {
        let mut curve = curve(Pubkey::new_unique());
        let polynomial = curve.polynomial().unwrap();

        let settlement = curve.snapshot().buy(&polynomial, 100, 10_000).unwrap();
        assert_eq!(curve.supply, 0);

        curve.commit(settlement.next);
        assert_eq!(curve.supply, 100);
        assert_eq!(curve.collateral_pool, 10_000);
        assert_eq!(curve.snapshot(), settlement.next);
    }
}
