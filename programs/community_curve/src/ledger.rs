//! Token Ledger View
//!
//! The token programs own balances; the curve only reads them. `Holding` is
//! the slice of a token account the market needs to decide whether a debit
//! will go through, so a shortfall is reported as a curve error before any
//! CPI is attempted.

use anchor_lang::prelude::*;
use anchor_lang::solana_program::program_option::COption;
use anchor_spl::token_interface::TokenAccount;

use crate::amm::CurveError;

/// Balance and delegation of one token account
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Holding {
    pub owner: Pubkey,
    pub amount: u64,
    pub delegate: Option<Pubkey>,
    pub delegated_amount: u64,
}

impl Holding {
    /// Account with no delegation
    pub fn owned(owner: Pubkey, amount: u64) -> Self {
        Self {
            owner,
            amount,
            delegate: None,
            delegated_amount: 0,
        }
    }

    pub fn from_account(account: &TokenAccount) -> Self {
        let delegate = match account.delegate {
            COption::Some(delegate) => Some(delegate),
            COption::None => None,
        };

        Self {
            owner: account.owner,
            amount: account.amount,
            delegate,
            delegated_amount: account.delegated_amount,
        }
    }

    pub fn require_balance(&self, amount: u64) -> Result<()> {
        require!(self.amount >= amount, CurveError::InsufficientBalance);
        Ok(())
    }

    /// Check that `spender` may move `amount` out of this account
    ///
    /// Balance is checked before approval, matching the token program.
    pub fn authorize_debit(&self, spender: &Pubkey, amount: u64) -> Result<()> {
        self.require_balance(amount)?;
        if *spender == self.owner {
            return Ok(());
        }

        require!(
            self.delegate == Some(*spender) && self.delegated_amount >= amount,
            CurveError::InsufficientAllowance
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_owner_debits_up_to_balance() {
        let owner = Pubkey::new_unique();
        let holding = Holding::owned(owner, 500);
        assert!(holding.authorize_debit(&owner, 500).is_ok());
        assert_eq!(
            holding.authorize_debit(&owner, 501).unwrap_err(),
            CurveError::InsufficientBalance.into()
        );
    }

    #[test]
    fn test_delegate_needs_allowance() {
        let owner = Pubkey::new_unique();
        let delegate = Pubkey::new_unique();
        let stranger = Pubkey::new_unique();

        let holding = Holding {
            owner,
            amount: 1_000,
            delegate: Some(delegate),
            delegated_amount: 300,
        };

        assert!(holding.authorize_debit(&delegate, 300).is_ok());
        assert_eq!(
            holding.authorize_debit(&delegate, 301).unwrap_err(),
            CurveError::InsufficientAllowance.into()
        );
        assert_eq!(
            holding.authorize_debit(&stranger, 1).unwrap_err(),
            CurveError::InsufficientAllowance.into()
        );
    }

    #[test]
    fn test_balance_checked_before_allowance() {
        let holding = Holding::owned(Pubkey::new_unique(), 10);
        assert_eq!(
            holding.authorize_debit(&Pubkey::new_unique(), 11).unwrap_err(),
            CurveError::InsufficientBalance.into()
        );
    }
}
