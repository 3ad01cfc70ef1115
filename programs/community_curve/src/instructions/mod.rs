//! Instruction handlers for the community curve program
//!
//! Each instruction represents an action users can take:
//! - `initialize` - Create a curve, its parameters, mint and vault
//! - `trade` - Buy/sell community tokens against collateral
//! - `supply` - Owner inflate/deflate without collateral
//! - `governance` - Inflation ratio and ownership changes
//! - `view` - Multiplier and price quotes

pub mod governance;
pub mod initialize;
pub mod supply;
pub mod tokens;
pub mod trade;
pub mod view;

pub use governance::*;
pub use initialize::*;
pub use supply::*;
pub use tokens::*;
pub use trade::*;
pub use view::*;
