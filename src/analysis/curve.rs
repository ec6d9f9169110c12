//! Strike curves
//!
//! Piecewise-linear functions from strike to a quote field, fitted through
//! the observed strikes of one quote set. Between samples the curve is the
//! chord of the two neighbouring strikes; beyond the observed range it
//! continues the slope of the nearest edge segment instead of clamping.
//!
//! This is how an option "at strike = spot" gets a price when no such strike
//! is listed: the chain is treated as samples of a locally linear price/strike
//! (or IV/strike) relationship.

use serde::{Deserialize, Serialize};

use crate::core::{ImpliedMoveError, ImpliedMoveResult, OptionType, QuoteField, QuoteSet};

/// Piecewise-linear strike curve with linear extrapolation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrikeCurve {
    option_type: OptionType,
    field: QuoteField,
    strikes: Vec<f64>,
    values: Vec<f64>,
}

impl StrikeCurve {
    /// Fit a curve through `field` of every quote in `set`
    ///
    /// Needs at least two distinct strikes.
    pub fn build(set: &QuoteSet, field: QuoteField) -> ImpliedMoveResult<Self> {
        if set.len() < 2 {
            return Err(ImpliedMoveError::insufficient_data(format!(
                "{} {} curve needs at least 2 strikes, have {}",
                set.expiry(),
                set.option_type(),
                set.len()
            )));
        }

        // QuoteSet strikes are already unique and ascending
        let strikes = set.strikes();
        let values = set.iter().map(|q| field.value(q)).collect();

        Ok(Self {
            option_type: set.option_type(),
            field,
            strikes,
            values,
        })
    }

    pub fn option_type(&self) -> OptionType {
        self.option_type
    }

    pub fn field(&self) -> QuoteField {
        self.field
    }

    /// Observed strike range
    pub fn domain(&self) -> (f64, f64) {
        (self.strikes[0], self.strikes[self.strikes.len() - 1])
    }

    /// Sample points the curve passes through
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.strikes.iter().copied().zip(self.values.iter().copied())
    }

    /// Evaluate at one strike
    pub fn eval(&self, strike: f64) -> f64 {
        let i = self.segment(strike);
        let (k0, k1) = (self.strikes[i], self.strikes[i + 1]);
        let (v0, v1) = (self.values[i], self.values[i + 1]);

        // t is 0 or 1 exactly on a sample, so samples are reproduced bit-for-bit
        let t = (strike - k0) / (k1 - k0);
        v0 * (1.0 - t) + v1 * t
    }

    /// Evaluate at each strike, same order and length
    pub fn eval_many(&self, strikes: &[f64]) -> Vec<f64> {
        strikes.iter().map(|&k| self.eval(k)).collect()
    }

    /// Closure view of the curve
    pub fn as_fn(&self) -> impl Fn(f64) -> f64 + '_ {
        move |strike| self.eval(strike)
    }

    /// Evaluate on `[lo, lo + step, ...)` stopping before `hi`
    pub fn sample(&self, lo: f64, hi: f64, step: f64) -> Vec<(f64, f64)> {
        strike_grid(lo, hi, step)
            .into_iter()
            .map(|k| (k, self.eval(k)))
            .collect()
    }

    /// Index of the segment used for `strike`; edge segments serve the tails
    fn segment(&self, strike: f64) -> usize {
        let last = self.strikes.len() - 2;
        let above = self.strikes.partition_point(|&k| k <= strike);
        above.saturating_sub(1).min(last)
    }
}

/// Most points [`strike_grid`] will produce
pub const MAX_GRID_POINTS: usize = 100_000;

/// Evenly spaced grid on `[lo, hi)`
///
/// Points are computed as `lo + i * step` so they do not accumulate drift.
/// The step is widened when needed to stay within [`MAX_GRID_POINTS`].
pub fn strike_grid(lo: f64, hi: f64, step: f64) -> Vec<f64> {
    if !(step > 0.0) || !(hi > lo) || !lo.is_finite() || !hi.is_finite() {
        return Vec::new();
    }
    let step = step.max((hi - lo) / MAX_GRID_POINTS as f64);
    let n = (((hi - lo) / step).ceil() as usize).min(MAX_GRID_POINTS);
    (0..n)
        .map(|i| lo + i as f64 * step)
        .filter(|&k| k < hi)
        .collect()
}
