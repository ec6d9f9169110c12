//! Sampled curve data for plotting
//!
//! Each side is sampled over its own observed strike range; calls and puts
//! rarely share the same range after freshness filtering.

use std::fmt::Write;

use serde::{Deserialize, Serialize};

use crate::analysis::{strike_grid, AnalysisResult, StrikeCurve};
use crate::core::OptionType;

/// One sampled strike
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlotPoint {
    pub strike: f64,
    pub price: f64,
    pub iv_pct: f64,
}

/// Sampled price and IV curves of both sides
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotData {
    pub spot: f64,
    pub calls: Vec<PlotPoint>,
    pub puts: Vec<PlotPoint>,
    /// Strike range covering both sides
    pub strike_range: (f64, f64),
}

impl PlotData {
    /// Sample every curve of `result` with the given strike step
    pub fn from_result(result: &AnalysisResult, step: f64) -> Self {
        let curves = &result.curves;
        Self {
            spot: result.spot,
            calls: sample_side(&curves.call_price, &curves.call_iv, step),
            puts: sample_side(&curves.put_price, &curves.put_iv, step),
            strike_range: curves.combined_domain(),
        }
    }

    pub fn side(&self, option_type: OptionType) -> &[PlotPoint] {
        match option_type {
            OptionType::Call => &self.calls,
            OptionType::Put => &self.puts,
        }
    }

    /// Largest sampled price, for the price axis limit
    pub fn max_price(&self) -> f64 {
        self.points().map(|p| p.price).fold(0.0, f64::max)
    }

    /// Largest sampled IV, for the IV axis limit
    pub fn max_iv_pct(&self) -> f64 {
        self.points().map(|p| p.iv_pct).fold(0.0, f64::max)
    }

    fn points(&self) -> impl Iterator<Item = &PlotPoint> {
        self.calls.iter().chain(self.puts.iter())
    }

    /// CSV with one row per sampled strike and side
    pub fn to_csv(&self) -> String {
        let mut out = String::from("side,strike,price,iv_pct\n");
        for (side, points) in [(OptionType::Call, &self.calls), (OptionType::Put, &self.puts)] {
            for p in points {
                let _ = writeln!(out, "{},{:.4},{:.6},{:.6}", side, p.strike, p.price, p.iv_pct);
            }
        }
        out
    }
}

fn sample_side(price: &StrikeCurve, iv: &StrikeCurve, step: f64) -> Vec<PlotPoint> {
    let (lo, hi) = price.domain();
    let strikes = strike_grid(lo, hi, step);
    let prices = price.eval_many(&strikes);
    let ivs = iv.eval_many(&strikes);

    strikes
        .into_iter()
        .zip(prices)
        .zip(ivs)
        .map(|((strike, price), iv_pct)| PlotPoint {
            strike,
            price,
            iv_pct,
        })
        .collect()
}
