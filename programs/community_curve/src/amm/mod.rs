//! # Bonding Curve Market Maker
//!
//! Pure state-transition core for the community token market. Nothing in
//! this module touches accounts or CPIs; the instruction layer copies the
//! on-chain state into a [`CurveSnapshot`], runs a transition on the copy and
//! writes it back only after every token movement has succeeded.
//!
//! ## Pricing
//!
//! ```text
//!   price p(s)        = c0 + c1·s + c2·s² + c3·s³
//!   collateral F(s)   = ∫₀ˢ p(x) dx
//!   collateral_at(s)  = ⌊ F(s) · multiplier / 10¹² ⌋
//!
//!   ┌────────────────────────────────────────┐
//!   │  price                                 │
//!   │    ▲                        ╱          │
//!   │    │                     ╱             │
//!   │    │                 ╱ ░░░░            │
//!   │    │            ╱ ░░░░░░░░░  ← cost of │
//!   │    │       ╱    ░░░░░░░░░░     a buy   │
//!   │    │  ╱         ░░░░░░░░░░             │
//!   │    └────────────┴─────────┴──▶ supply  │
//!   │               supply   supply+amount   │
//!   └────────────────────────────────────────┘
//! ```
//!
//! The collateral pool always backs `collateral_at(supply)`. Inflation
//! (scheduled or owner driven) changes supply without moving collateral, so
//! the multiplier is rebased to keep the pool and the curve in agreement.

use anchor_lang::prelude::*;

pub mod bonding_curve;
pub mod fixed_point;
pub mod multiplier;
pub mod polynomial;

pub use bonding_curve::*;
pub use fixed_point::*;
pub use polynomial::*;

/// Baseline curve multiplier (1.0 in 12-decimal fixed point)
pub const MULTIPLIER_UNIT: u64 = 1_000_000_000_000;

/// Denominator of the per-second inflation ratio
pub const RATIO_DENOMINATOR: u64 = 1_000_000_000_000;

/// Highest inflation ratio governance may set (about 9% a day)
///
/// At this rate a supply of 10¹⁵ base units still fits a `u64` after more
/// than 100 days without a touch.
pub const MAX_INFLATION_RATIO: u64 = 1_000_000;

/// Number of price polynomial coefficients (degree 3)
pub const MAX_COEFFICIENTS: usize = 4;

/// Errors raised by the curve core
#[error_code]
pub enum CurveError {
    #[msg("Price moved beyond the caller's slippage limit")]
    SlippageExceeded,
    #[msg("Account balance is too low for this operation")]
    InsufficientBalance,
    #[msg("Signer is not approved to spend this amount")]
    InsufficientAllowance,
    #[msg("Only the curve owner may call this")]
    Unauthorized,
    #[msg("Arithmetic overflow")]
    ArithmeticOverflow,
    #[msg("Amount must be positive and priced above zero")]
    InvalidAmount,
    #[msg("Curve coefficients must not all be zero")]
    InvalidCoefficients,
    #[msg("Multiplier would fall to zero")]
    MultiplierExhausted,
}
