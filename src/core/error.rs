//! Error types for the implied move pipeline

use thiserror::Error;

use super::option::OptionType;

#[derive(Error, Debug)]
pub enum ImpliedMoveError {
    #[error("Invalid expiration date: {0}")]
    InvalidDate(String),

    #[error("Empty {0} quote set")]
    EmptyQuoteSet(OptionType),

    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    #[error("Invalid spot price: {0}")]
    InvalidSpotPrice(f64),

    #[error("Option chain has no expirations")]
    EmptyCatalog,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Data error: {0}")]
    Data(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("IO error: {0}")]
    IO(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

pub type ImpliedMoveResult<T> = Result<T, ImpliedMoveError>;

impl ImpliedMoveError {
    pub fn invalid_date(msg: impl Into<String>) -> Self {
        Self::InvalidDate(msg.into())
    }

    pub fn insufficient_data(msg: impl Into<String>) -> Self {
        Self::InsufficientData(msg.into())
    }

    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn data(msg: impl Into<String>) -> Self {
        Self::Data(msg.into())
    }
}

impl From<serde_json::Error> for ImpliedMoveError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serialization(e.to_string())
    }
}
