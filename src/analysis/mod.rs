//! Implied move analysis pipeline
//!
//! Four stages, each a pure function of its inputs:
//! 1. Expiration selection: explicit date or earliest listed expiry
//! 2. Freshness filter: drop quotes older than a window before the last trade
//! 3. Strike curves: piecewise-linear price and IV fits per side
//! 4. Calculator: evaluate curves at spot, straddle / spot

pub mod config;
pub mod curve;
pub mod expiration;
pub mod freshness;
pub mod implied_move;

pub use config::*;
pub use curve::*;
pub use expiration::*;
pub use freshness::*;
pub use implied_move::*;
