//! Freshness filter
//!
//! Option chains mix prints from very different times of day. Only quotes
//! traded within `max_age` of the set's own most recent trade are kept, so the
//! window works the same on a live chain and on a closed-market snapshot.

use chrono::Duration;

use crate::core::{ImpliedMoveError, ImpliedMoveResult, QuoteSet};

/// Keep quotes with `last_trade > most_recent - max_age`
///
/// Strike order is preserved. The result may hold any number of quotes,
/// including none; sizing is left to the curve builder. A window reaching
/// past the earliest representable time keeps every quote.
pub fn filter_fresh(set: &QuoteSet, max_age: Duration) -> ImpliedMoveResult<QuoteSet> {
    let most_recent = set
        .most_recent_trade()
        .ok_or(ImpliedMoveError::EmptyQuoteSet(set.option_type()))?;
    let fresh = match most_recent.checked_sub_signed(max_age) {
        Some(threshold) => set.retain_new(|q| q.last_trade > threshold),
        None => set.clone(),
    };

    tracing::debug!(
        "{} {}: kept {} of {} quotes within {} min of {}",
        set.expiry(),
        set.option_type().plural(),
        fresh.len(),
        set.len(),
        max_age.num_minutes(),
        most_recent
    );

    Ok(fresh)
}
