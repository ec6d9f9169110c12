//! # Implied Move - Options Implied Move Calculator
//!
//! Estimates the move the options market is pricing in for a stock by a
//! given expiration, from the at-the-money (ATM) straddle.
//!
//! ## Overview
//!
//! Listed strikes rarely sit exactly at the stock price, and option chains
//! mix fresh and stale prints. The pipeline:
//! - **Expiration**: an explicit date, or the nearest listed expiry
//! - **Freshness**: drops quotes traded more than a window (30 min by default)
//!   before the chain's most recent trade
//! - **Strike curves**: piecewise-linear price and IV fits per side, linearly
//!   extrapolated past the listed strikes
//! - **Implied move**: `(ATM call + ATM put) / spot`
//!
//! ## Usage
//!
//! ```rust,no_run
//! use implied_move::prelude::*;
//!
//! let yahoo = YahooClient::new().unwrap();
//! let catalog = yahoo.option_chain("SPY").unwrap();
//! let spot = yahoo.spot_price("SPY").unwrap();
//!
//! let calc = ImpliedMoveCalculator::default();
//! let result = calc.compute(&catalog, spot, None).unwrap();
//! println!("{} implied move: {:.2}%", result.expiration.label, result.implied_move * 100.0);
//! ```
//!
//! ## What This Does NOT Do
//!
//! - Model skew or term structure
//! - Price American exercise
//! - Store or cache historical chains

pub mod analysis;
pub mod core;
pub mod data;
pub mod report;

/// Prelude with commonly used types
pub mod prelude {
    // Core types
    pub use crate::core::{
        ExpirationCatalog, ExpirationChain, ImpliedMoveError, ImpliedMoveResult, OptionQuote,
        OptionType, QuoteField, QuoteSet,
    };

    // Analysis
    pub use crate::analysis::{
        compute_implied_move, filter_fresh, select_expiration, AnalysisConfig, AnalysisResult,
        ChainCurves, ImpliedMoveCalculator, SelectedExpiration, StrikeCurve,
    };

    // Data sources
    pub use crate::data::{ChainSnapshot, ChainSource, SnapshotFile, YahooClient, YahooConfig};

    // Presentation
    pub use crate::report::{render_quote_table, render_summary, PlotData, PlotPoint};
}

// Re-export main types at crate root
pub use crate::analysis::{AnalysisResult, ImpliedMoveCalculator};
pub use crate::core::{ImpliedMoveError, ImpliedMoveResult};
