//! JSON chain snapshots
//!
//! Reads a previously captured option chain and spot price from disk so an
//! analysis can be rerun offline against the exact same data.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ChainSource;
use crate::core::{
    ExpirationCatalog, ExpirationChain, ImpliedMoveError, ImpliedMoveResult, OptionType, QuoteSet,
};

/// Option chain and spot price of one underlying at one moment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChainSnapshot {
    /// Underlying spot price
    pub spot: f64,
    /// When the chain was captured
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub captured_at: Option<DateTime<Utc>>,
    /// Every expiry of the chain
    pub catalog: ExpirationCatalog,
}

impl ChainSnapshot {
    /// Parse a snapshot, dropping out-of-domain quotes
    ///
    /// Fails if a quote set is filed under the wrong side or expiry.
    pub fn from_json(json: &str) -> ImpliedMoveResult<Self> {
        let mut snapshot: Self = serde_json::from_str(json)?;
        snapshot.catalog = sanitize_catalog(&snapshot.catalog)?;
        Ok(snapshot)
    }

    pub fn load(path: impl AsRef<Path>) -> ImpliedMoveResult<Self> {
        let json = fs::read_to_string(path.as_ref())?;
        let snapshot = Self::from_json(&json)?;

        tracing::info!(
            "Loaded {} snapshot from {:?}: {} expirations, spot {}",
            snapshot.catalog.underlying(),
            path.as_ref(),
            snapshot.catalog.len(),
            snapshot.spot
        );
        Ok(snapshot)
    }

    /// Check the snapshot belongs to `symbol`
    pub fn ensure_symbol(&self, symbol: &str) -> ImpliedMoveResult<()> {
        let underlying = self.catalog.underlying();
        if underlying.eq_ignore_ascii_case(symbol) {
            Ok(())
        } else {
            Err(ImpliedMoveError::data(format!(
                "snapshot holds {} data, not {}",
                underlying, symbol
            )))
        }
    }
}

fn sanitize_catalog(catalog: &ExpirationCatalog) -> ImpliedMoveResult<ExpirationCatalog> {
    let mut clean = ExpirationCatalog::new(catalog.underlying());
    for chain in catalog.chains() {
        clean.insert(ExpirationChain {
            expiry: chain.expiry,
            calls: valid_side(&chain.calls, OptionType::Call, chain)?,
            puts: valid_side(&chain.puts, OptionType::Put, chain)?,
        });
    }
    Ok(clean)
}

fn valid_side(
    set: &QuoteSet,
    option_type: OptionType,
    chain: &ExpirationChain,
) -> ImpliedMoveResult<QuoteSet> {
    if set.option_type() != option_type {
        return Err(ImpliedMoveError::data(format!(
            "{} {} set is labelled {}",
            chain.expiry,
            option_type.plural(),
            set.option_type()
        )));
    }
    if set.expiry() != chain.expiry {
        return Err(ImpliedMoveError::data(format!(
            "{} {} set is dated {}",
            chain.expiry,
            option_type.plural(),
            set.expiry()
        )));
    }

    let valid = set.retain_new(|q| q.is_valid());
    if valid.len() < set.len() {
        tracing::debug!(
            "Skipping {} out-of-domain {} {}",
            set.len() - valid.len(),
            chain.expiry,
            option_type.plural()
        );
    }
    Ok(valid)
}

/// Chain source backed by a snapshot file
///
/// The file is read once on open; chain and spot always come from the same
/// read.
#[derive(Debug, Clone)]
pub struct SnapshotFile {
    path: PathBuf,
    snapshot: ChainSnapshot,
}

impl SnapshotFile {
    pub fn open(path: impl Into<PathBuf>) -> ImpliedMoveResult<Self> {
        let path = path.into();
        let snapshot = ChainSnapshot::load(&path)?;
        Ok(Self { path, snapshot })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn snapshot(&self) -> &ChainSnapshot {
        &self.snapshot
    }

    fn snapshot_for(&self, symbol: &str) -> ImpliedMoveResult<&ChainSnapshot> {
        self.snapshot.ensure_symbol(symbol)?;
        Ok(&self.snapshot)
    }
}

impl ChainSource for SnapshotFile {
    fn option_chain(&self, symbol: &str) -> ImpliedMoveResult<ExpirationCatalog> {
        Ok(self.snapshot_for(symbol)?.catalog.clone())
    }

    fn spot_price(&self, symbol: &str) -> ImpliedMoveResult<f64> {
        Ok(self.snapshot_for(symbol)?.spot)
    }
}
