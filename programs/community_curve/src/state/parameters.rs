//! Curve Parameters
//!
//! Governance-controlled values the curve reads but never writes. Only the
//! inflation ratio lives here today; how the authority reaches a decision
//! (proposals, votes) happens outside this program.

use anchor_lang::prelude::*;

use crate::amm::MAX_INFLATION_RATIO;
use crate::instructions::ParametersError;

/// Read side of the parameter store
pub trait ParameterOracle {
    /// Per-second supply growth in parts per 10¹²
    fn inflation_ratio(&self) -> u64;
}

/// Parameters account (one per curve)
///
/// Seeds: ["parameters", curve]
#[account]
#[derive(InitSpace)]
pub struct Parameters {
    /// Curve these parameters apply to
    pub curve: Pubkey,

    /// Governance authority allowed to change parameters
    /// This could be:
    /// - A multisig
    /// - A voting program's PDA
    /// - A single administrator
    pub authority: Pubkey,

    /// Per-second supply growth in parts per 10¹² (0 disables inflation)
    pub inflation_ratio: u64,

    /// Unix timestamp of the last change
    pub updated_at: i64,

    /// PDA bump seed
    pub bump: u8,
}

impl Parameters {
    pub const SEED: &'static [u8] = b"parameters";

    /// Replace the inflation ratio, returning the previous one
    pub fn set_inflation_ratio(&mut self, inflation_ratio: u64, now: i64) -> Result<u64> {
        require!(
            inflation_ratio <= MAX_INFLATION_RATIO,
            ParametersError::InvalidRatio
        );

        let previous = self.inflation_ratio;
        self.inflation_ratio = inflation_ratio;
        self.updated_at = now;
        Ok(previous)
    }
}

impl ParameterOracle for Parameters {
    fn inflation_ratio(&self) -> u64 {
        self.inflation_ratio
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parameters() -> Parameters {
        Parameters {
            curve: Pubkey::new_unique(),
            authority: Pubkey::new_unique(),
            inflation_ratio: 0,
            updated_at: 0,
            bump: 255,
        }
    }

    #[test]
    fn test_ratio_update() {
        let mut parameters = parameters();
        assert_eq!(parameters.set_inflation_ratio(38_581, 100).unwrap(), 0);
        assert_eq!(parameters.inflation_ratio(), 38_581);
        assert_eq!(parameters.updated_at, 100);

        assert_eq!(parameters.set_inflation_ratio(MAX_INFLATION_RATIO, 200).unwrap(), 38_581);
    }

    #[test]
    fn test_ratio_above_maximum_rejected() {
        let mut parameters = parameters();
        parameters.set_inflation_ratio(38_581, 100).unwrap();

        assert_eq!(
            parameters.set_inflation_ratio(MAX_INFLATION_RATIO + 1, 200).unwrap_err(),
            ParametersError::InvalidRatio.into()
        );
        assert_eq!(parameters.inflation_ratio(), 38_581);
        assert_eq!(parameters.updated_at, 100);
    }
}
