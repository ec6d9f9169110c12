//! Configuration for the implied move analysis

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::core::{ImpliedMoveError, ImpliedMoveResult};

/// Default freshness window, in minutes
pub const DEFAULT_FRESHNESS_MINUTES: i64 = 30;

/// Longest accepted freshness window: one year, in minutes
pub const MAX_FRESHNESS_MINUTES: i64 = 366 * 24 * 60;

/// Default strike step for sampled plot data
pub const DEFAULT_PLOT_STEP: f64 = 0.1;

/// Finest accepted strike step for sampled plot data
pub const MIN_PLOT_STEP: f64 = 1e-3;

/// Configuration for one analysis run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Freshness window in minutes, measured back from the most recent
    /// trade in each quote set
    /// Default: 30
    pub freshness_minutes: i64,

    /// Strike step used when sampling curves for plotting
    /// Default: 0.1
    pub plot_step: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            freshness_minutes: DEFAULT_FRESHNESS_MINUTES,
            plot_step: DEFAULT_PLOT_STEP,
        }
    }
}

impl AnalysisConfig {
    pub fn with_freshness_minutes(minutes: i64) -> Self {
        Self {
            freshness_minutes: minutes,
            ..Default::default()
        }
    }

    /// Freshness window as a duration
    pub fn max_age(&self) -> ImpliedMoveResult<Duration> {
        Duration::try_minutes(self.freshness_minutes).ok_or_else(|| {
            ImpliedMoveError::invalid_input(format!(
                "freshness window of {} minutes is out of range",
                self.freshness_minutes
            ))
        })
    }

    pub fn validate(&self) -> ImpliedMoveResult<()> {
        if !(0..=MAX_FRESHNESS_MINUTES).contains(&self.freshness_minutes) {
            return Err(ImpliedMoveError::invalid_input(format!(
                "freshness window must be between 0 and {} minutes, got {}",
                MAX_FRESHNESS_MINUTES, self.freshness_minutes
            )));
        }
        if !(self.plot_step.is_finite() && self.plot_step >= MIN_PLOT_STEP) {
            return Err(ImpliedMoveError::invalid_input(format!(
                "plot step must be at least {}, got {}",
                MIN_PLOT_STEP, self.plot_step
            )));
        }
        Ok(())
    }
}
