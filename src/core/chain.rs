//! Expiration catalog
//!
//! All expirations of one underlying's option chain, each with its call and
//! put quote sets, as supplied by a data source.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::option::OptionType;
use super::quote::{OptionQuote, QuoteSet};

/// Calls and puts for a single expiry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpirationChain {
    pub expiry: NaiveDate,
    pub calls: QuoteSet,
    pub puts: QuoteSet,
}

impl ExpirationChain {
    pub fn new(expiry: NaiveDate, calls: Vec<OptionQuote>, puts: Vec<OptionQuote>) -> Self {
        Self {
            expiry,
            calls: QuoteSet::new(OptionType::Call, expiry, calls),
            puts: QuoteSet::new(OptionType::Put, expiry, puts),
        }
    }

    /// Quote set for one side
    pub fn side(&self, option_type: OptionType) -> &QuoteSet {
        match option_type {
            OptionType::Call => &self.calls,
            OptionType::Put => &self.puts,
        }
    }
}

/// Mapping from expiration date to its chain, ordered by date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawCatalog", into = "RawCatalog")]
pub struct ExpirationCatalog {
    underlying: String,
    chains: BTreeMap<NaiveDate, ExpirationChain>,
}

#[derive(Serialize, Deserialize)]
struct RawCatalog {
    underlying: String,
    chains: Vec<ExpirationChain>,
}

impl From<RawCatalog> for ExpirationCatalog {
    fn from(raw: RawCatalog) -> Self {
        let mut catalog = ExpirationCatalog::new(raw.underlying);
        for chain in raw.chains {
            catalog.insert(chain);
        }
        catalog
    }
}

impl From<ExpirationCatalog> for RawCatalog {
    fn from(catalog: ExpirationCatalog) -> Self {
        Self {
            underlying: catalog.underlying,
            chains: catalog.chains.into_values().collect(),
        }
    }
}

impl ExpirationCatalog {
    pub fn new(underlying: impl Into<String>) -> Self {
        Self {
            underlying: underlying.into(),
            chains: BTreeMap::new(),
        }
    }

    /// Add a chain, replacing any chain already stored for its expiry
    pub fn insert(&mut self, chain: ExpirationChain) {
        self.chains.insert(chain.expiry, chain);
    }

    pub fn underlying(&self) -> &str {
        &self.underlying
    }

    /// Chain for expiry
    pub fn get(&self, expiry: NaiveDate) -> Option<&ExpirationChain> {
        self.chains.get(&expiry)
    }

    pub fn contains(&self, expiry: NaiveDate) -> bool {
        self.chains.contains_key(&expiry)
    }

    /// All expiries, ascending
    pub fn expiries(&self) -> Vec<NaiveDate> {
        self.chains.keys().copied().collect()
    }

    /// Earliest expiry
    pub fn earliest(&self) -> Option<NaiveDate> {
        self.chains.keys().next().copied()
    }

    pub fn chains(&self) -> impl Iterator<Item = &ExpirationChain> {
        self.chains.values()
    }

    pub fn len(&self) -> usize {
        self.chains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chains.is_empty()
    }

    /// Total number of quotes across all expiries
    pub fn total_quotes(&self) -> usize {
        self.chains
            .values()
            .map(|c| c.calls.len() + c.puts.len())
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn date(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, m, d).unwrap()
    }

    fn chain(expiry: NaiveDate) -> ExpirationChain {
        let t = Utc.with_ymd_and_hms(2024, 3, 15, 15, 0, 0).unwrap();
        ExpirationChain::new(
            expiry,
            vec![OptionQuote::new(100.0, 4.0, t, 0.3)],
            vec![OptionQuote::new(100.0, 4.1, t, 0.31)],
        )
    }

    #[test]
    fn test_catalog_orders_expiries() {
        let mut catalog = ExpirationCatalog::new("TEST");
        catalog.insert(chain(date(4, 19)));
        catalog.insert(chain(date(3, 22)));
        catalog.insert(chain(date(3, 28)));

        assert_eq!(catalog.expiries(), vec![date(3, 22), date(3, 28), date(4, 19)]);
        assert_eq!(catalog.earliest(), Some(date(3, 22)));
        assert_eq!(catalog.total_quotes(), 6);
        assert!(catalog.contains(date(3, 28)));
        assert!(!catalog.contains(date(3, 29)));
    }

    #[test]
    fn test_chain_sides() {
        let c = chain(date(3, 22));
        assert_eq!(c.side(OptionType::Call).option_type(), OptionType::Call);
        assert_eq!(c.side(OptionType::Put).quotes()[0].last_price, 4.1);
    }

    #[test]
    fn test_catalog_json_shape() {
        let mut catalog = ExpirationCatalog::new("TEST");
        catalog.insert(chain(date(3, 22)));

        let json = serde_json::to_value(&catalog).unwrap();
        assert_eq!(json["underlying"], "TEST");
        assert_eq!(json["chains"][0]["expiry"], "2024-03-22");

        let back: ExpirationCatalog = serde_json::from_value(json).unwrap();
        assert_eq!(back, catalog);
    }
}
