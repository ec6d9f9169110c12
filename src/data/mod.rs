//! Market data sources
//!
//! Handles:
//! - Yahoo Finance option chains and spot quotes (live)
//! - JSON chain snapshots (offline, reproducible)

pub mod snapshot;
pub mod yahoo;

pub use snapshot::*;
pub use yahoo::*;

use crate::core::{ExpirationCatalog, ImpliedMoveResult};

/// Supplier of option chains and underlying prices
pub trait ChainSource {
    /// Every listed expiry of `symbol` with its calls and puts
    fn option_chain(&self, symbol: &str) -> ImpliedMoveResult<ExpirationCatalog>;

    /// Current regular-market price of `symbol`
    fn spot_price(&self, symbol: &str) -> ImpliedMoveResult<f64>;
}
