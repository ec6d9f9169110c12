//! Core data types for the implied move calculator
//!
//! Defines fundamental types:
//! - OptionType: call/put side
//! - OptionQuote: strike, last price, last trade time, IV
//! - QuoteSet: strike-ordered quotes for one side of one expiry
//! - ExpirationCatalog: every expiry of an underlying's chain

pub mod chain;
pub mod error;
pub mod option;
pub mod quote;

pub use chain::*;
pub use error::*;
pub use option::*;
pub use quote::*;
