//! State structures for the community curve program

pub mod curve;
pub mod parameters;

pub use curve::*;
pub use parameters::*;
