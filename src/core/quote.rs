//! Option quote data
//!
//! Last-trade market data for one side of one expiration's option chain.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::option::OptionType;

/// One traded contract at one strike
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionQuote {
    /// Strike price
    pub strike: f64,
    /// Last traded premium, per share
    pub last_price: f64,
    /// Time of the last trade
    pub last_trade: DateTime<Utc>,
    /// Implied volatility as a fraction (0.35 = 35%)
    pub implied_vol: f64,
    /// Contract symbol (exchange-specific)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contract_symbol: Option<String>,
}

impl OptionQuote {
    pub fn new(strike: f64, last_price: f64, last_trade: DateTime<Utc>, implied_vol: f64) -> Self {
        Self {
            strike,
            last_price,
            last_trade,
            implied_vol,
            contract_symbol: None,
        }
    }

    /// Attach the exchange contract symbol
    pub fn with_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.contract_symbol = Some(symbol.into());
        self
    }

    /// Are the numeric fields inside their domains?
    pub fn is_valid(&self) -> bool {
        self.strike.is_finite()
            && self.strike > 0.0
            && self.last_price.is_finite()
            && self.last_price >= 0.0
            && self.implied_vol.is_finite()
            && self.implied_vol >= 0.0
    }
}

/// Quote field a strike curve is fitted over
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuoteField {
    /// Last traded price
    LastPrice,
    /// Implied volatility as a fraction
    ImpliedVol,
    /// Implied volatility in percent (IV x 100)
    ImpliedVolPct,
}

impl QuoteField {
    pub fn value(&self, quote: &OptionQuote) -> f64 {
        match self {
            QuoteField::LastPrice => quote.last_price,
            QuoteField::ImpliedVol => quote.implied_vol,
            QuoteField::ImpliedVolPct => quote.implied_vol * 100.0,
        }
    }
}

/// Strike-ordered quotes for one option type and one expiration
///
/// Strikes are strictly increasing. Duplicate strikes are resolved on
/// construction by keeping the most recently traded quote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawQuoteSet")]
pub struct QuoteSet {
    option_type: OptionType,
    expiry: NaiveDate,
    quotes: Vec<OptionQuote>,
}

#[derive(Deserialize)]
struct RawQuoteSet {
    option_type: OptionType,
    expiry: NaiveDate,
    quotes: Vec<OptionQuote>,
}

impl From<RawQuoteSet> for QuoteSet {
    fn from(raw: RawQuoteSet) -> Self {
        QuoteSet::new(raw.option_type, raw.expiry, raw.quotes)
    }
}

impl QuoteSet {
    pub fn new(option_type: OptionType, expiry: NaiveDate, mut quotes: Vec<OptionQuote>) -> Self {
        // Most recent trade first within a strike so dedup keeps it
        quotes.sort_by(|a, b| {
            a.strike
                .total_cmp(&b.strike)
                .then_with(|| b.last_trade.cmp(&a.last_trade))
        });
        quotes.dedup_by(|later, kept| later.strike == kept.strike);

        Self {
            option_type,
            expiry,
            quotes,
        }
    }

    /// Empty set, used as a placeholder when a side is missing from the feed
    pub fn empty(option_type: OptionType, expiry: NaiveDate) -> Self {
        Self {
            option_type,
            expiry,
            quotes: Vec::new(),
        }
    }

    pub fn option_type(&self) -> OptionType {
        self.option_type
    }

    pub fn expiry(&self) -> NaiveDate {
        self.expiry
    }

    pub fn quotes(&self) -> &[OptionQuote] {
        &self.quotes
    }

    pub fn iter(&self) -> std::slice::Iter<'_, OptionQuote> {
        self.quotes.iter()
    }

    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }

    /// All strikes, ascending
    pub fn strikes(&self) -> Vec<f64> {
        self.quotes.iter().map(|q| q.strike).collect()
    }

    /// Lowest and highest strike
    pub fn strike_range(&self) -> Option<(f64, f64)> {
        match (self.quotes.first(), self.quotes.last()) {
            (Some(lo), Some(hi)) => Some((lo.strike, hi.strike)),
            _ => None,
        }
    }

    /// Time of the most recent trade in the set
    pub fn most_recent_trade(&self) -> Option<DateTime<Utc>> {
        self.quotes.iter().map(|q| q.last_trade).max()
    }

    /// Quote at strike (exact match)
    pub fn at_strike(&self, strike: f64) -> Option<&OptionQuote> {
        self.quotes
            .binary_search_by(|q| q.strike.total_cmp(&strike))
            .ok()
            .map(|i| &self.quotes[i])
    }

    /// New set holding the quotes that satisfy `keep`, order preserved
    pub fn retain_new<F>(&self, mut keep: F) -> Self
    where
        F: FnMut(&OptionQuote) -> bool,
    {
        Self {
            option_type: self.option_type,
            expiry: self.expiry,
            quotes: self.quotes.iter().filter(|q| keep(q)).cloned().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a QuoteSet {
    type Item = &'a OptionQuote;
    type IntoIter = std::slice::Iter<'a, OptionQuote>;

    fn into_iter(self) -> Self::IntoIter {
        self.quotes.iter()
    }
}
