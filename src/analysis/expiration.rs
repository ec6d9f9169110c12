//! Expiration selection
//!
//! Picks the expiry to analyze: an explicit ISO date that must exist in the
//! catalog, or the earliest expiry on offer. The catalog is assumed to hold
//! only current and future expiries; past dates are not filtered here.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::core::{ExpirationCatalog, ImpliedMoveError, ImpliedMoveResult};

/// The chosen expiry and its display label
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedExpiration {
    pub date: NaiveDate,
    /// Month abbreviation plus zero-padded day, e.g. "Mar08"
    pub label: String,
}

impl SelectedExpiration {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            label: expiration_label(date),
        }
    }
}

/// Display label for an expiry
pub fn expiration_label(date: NaiveDate) -> String {
    date.format("%b%d").to_string()
}

/// Parse a `YYYY-MM-DD` expiration date
pub fn parse_expiration(input: &str) -> ImpliedMoveResult<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d")
        .map_err(|e| ImpliedMoveError::invalid_date(format!("'{}': {}", input, e)))
}

/// Resolve the expiry to analyze
pub fn select_expiration(
    catalog: &ExpirationCatalog,
    explicit: Option<&str>,
) -> ImpliedMoveResult<SelectedExpiration> {
    let date = match explicit {
        Some(input) => {
            let date = parse_expiration(input)?;
            if !catalog.contains(date) {
                return Err(ImpliedMoveError::invalid_date(format!(
                    "{} is not a listed expiration for {}",
                    date,
                    catalog.underlying()
                )));
            }
            date
        }
        None => catalog.earliest().ok_or(ImpliedMoveError::EmptyCatalog)?,
    };

    Ok(SelectedExpiration::new(date))
}
