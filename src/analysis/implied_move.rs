//! Implied move calculator
//!
//! Selects an expiry, filters stale quotes from each side, fits price and IV
//! curves, and reads them at the spot price:
//!
//! ```text
//! straddle     = ATM call + ATM put
//! implied move = straddle / spot
//! ```

use chrono::Duration;
use serde::{Deserialize, Serialize};

use super::config::AnalysisConfig;
use super::curve::StrikeCurve;
use super::expiration::{select_expiration, SelectedExpiration};
use super::freshness::filter_fresh;
use crate::core::{ExpirationCatalog, ImpliedMoveError, ImpliedMoveResult, QuoteField, QuoteSet};

/// The four fitted curves of one analysis
///
/// Call and put curves keep their own strike domains.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChainCurves {
    pub call_price: StrikeCurve,
    pub put_price: StrikeCurve,
    /// Call IV in percent
    pub call_iv: StrikeCurve,
    /// Put IV in percent
    pub put_iv: StrikeCurve,
}

impl ChainCurves {
    pub fn build(calls: &QuoteSet, puts: &QuoteSet) -> ImpliedMoveResult<Self> {
        Ok(Self {
            call_price: StrikeCurve::build(calls, QuoteField::LastPrice)?,
            put_price: StrikeCurve::build(puts, QuoteField::LastPrice)?,
            call_iv: StrikeCurve::build(calls, QuoteField::ImpliedVolPct)?,
            put_iv: StrikeCurve::build(puts, QuoteField::ImpliedVolPct)?,
        })
    }

    /// Strike range covering both sides
    pub fn combined_domain(&self) -> (f64, f64) {
        let (call_lo, call_hi) = self.call_price.domain();
        let (put_lo, put_hi) = self.put_price.domain();
        (call_lo.min(put_lo), call_hi.max(put_hi))
    }
}

/// Result of one implied move analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub underlying: String,
    pub expiration: SelectedExpiration,
    pub spot: f64,
    pub atm_call: f64,
    pub atm_put: f64,
    /// ATM call IV in percent
    pub atm_call_iv_pct: f64,
    /// ATM put IV in percent
    pub atm_put_iv_pct: f64,
    pub straddle: f64,
    /// Straddle over spot, as a fraction (0.08 = +/-8%)
    pub implied_move: f64,
    /// Calls that survived the freshness filter
    pub calls: QuoteSet,
    /// Puts that survived the freshness filter
    pub puts: QuoteSet,
    pub curves: ChainCurves,
}

impl AnalysisResult {
    /// ATM call IV as a fraction
    pub fn atm_call_iv(&self) -> f64 {
        self.atm_call_iv_pct / 100.0
    }

    /// ATM put IV as a fraction
    pub fn atm_put_iv(&self) -> f64 {
        self.atm_put_iv_pct / 100.0
    }

    /// Implied move in dollars
    pub fn implied_move_dollars(&self) -> f64 {
        self.implied_move * self.spot
    }

    /// Spot range implied by the move
    pub fn implied_range(&self) -> (f64, f64) {
        (self.spot - self.straddle, self.spot + self.straddle)
    }
}

/// Implied move calculator
#[derive(Debug, Clone, Default)]
pub struct ImpliedMoveCalculator {
    config: AnalysisConfig,
}

impl ImpliedMoveCalculator {
    pub fn new(config: AnalysisConfig) -> ImpliedMoveResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Run the analysis for an explicit expiry or the earliest one
    pub fn compute(
        &self,
        catalog: &ExpirationCatalog,
        spot: f64,
        explicit_date: Option<&str>,
    ) -> ImpliedMoveResult<AnalysisResult> {
        compute_implied_move(catalog, spot, explicit_date, self.config.max_age()?)
    }
}

/// Compute the implied move of `catalog` at `spot`
///
/// Fails fast: the first error from selection, filtering or curve fitting is
/// returned unchanged.
pub fn compute_implied_move(
    catalog: &ExpirationCatalog,
    spot: f64,
    explicit_date: Option<&str>,
    max_age: Duration,
) -> ImpliedMoveResult<AnalysisResult> {
    if !(spot.is_finite() && spot > 0.0) {
        return Err(ImpliedMoveError::InvalidSpotPrice(spot));
    }

    let expiration = select_expiration(catalog, explicit_date)?;
    let chain = catalog
        .get(expiration.date)
        .ok_or_else(|| ImpliedMoveError::invalid_date(expiration.date.to_string()))?;

    tracing::debug!(
        "{} {}: {} calls, {} puts before filtering",
        catalog.underlying(),
        expiration.label,
        chain.calls.len(),
        chain.puts.len()
    );

    let calls = fresh_side(&chain.calls, max_age)?;
    let puts = fresh_side(&chain.puts, max_age)?;

    let curves = ChainCurves::build(&calls, &puts)?;

    let atm_call = curves.call_price.eval(spot);
    let atm_put = curves.put_price.eval(spot);
    let atm_call_iv_pct = curves.call_iv.eval(spot);
    let atm_put_iv_pct = curves.put_iv.eval(spot);

    let straddle = atm_call + atm_put;
    let implied_move = straddle / spot;

    tracing::debug!(
        "{} {}: straddle {:.3} on spot {:.3}, implied move {:.4}",
        catalog.underlying(),
        expiration.label,
        straddle,
        spot,
        implied_move
    );

    Ok(AnalysisResult {
        underlying: catalog.underlying().to_string(),
        expiration,
        spot,
        atm_call,
        atm_put,
        atm_call_iv_pct,
        atm_put_iv_pct,
        straddle,
        implied_move,
        calls,
        puts,
        curves,
    })
}

fn fresh_side(set: &QuoteSet, max_age: Duration) -> ImpliedMoveResult<QuoteSet> {
    let fresh = filter_fresh(set, max_age)?;
    if fresh.is_empty() {
        return Err(ImpliedMoveError::EmptyQuoteSet(set.option_type()));
    }
    Ok(fresh)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ExpirationChain, OptionQuote, OptionType};
    use chrono::{DateTime, NaiveDate, TimeZone, Utc};

    fn at(hour: u32, minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 15, hour, minute, 0).unwrap()
    }

    fn expiry() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 22).unwrap()
    }

    fn quotes(rows: &[(f64, f64, f64)], t: DateTime<Utc>) -> Vec<OptionQuote> {
        rows.iter()
            .map(|&(k, p, iv)| OptionQuote::new(k, p, t, iv))
            .collect()
    }

    fn scenario_catalog() -> ExpirationCatalog {
        let t = at(15, 55);
        let mut catalog = ExpirationCatalog::new("TEST");
        catalog.insert(ExpirationChain::new(
            expiry(),
            quotes(&[(95.0, 7.0, 0.36), (100.0, 4.0, 0.32), (105.0, 2.0, 0.30)], t),
            quotes(&[(95.0, 2.0, 0.40), (100.0, 4.0, 0.34), (105.0, 7.5, 0.31)], t),
        ));
        catalog
    }

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-9, "{} != {}", a, b);
    }

    #[test]
    fn test_atm_on_listed_strike() {
        let result = compute_implied_move(&scenario_catalog(), 100.0, None, Duration::minutes(30))
            .unwrap();

        assert_eq!(result.atm_call, 4.0);
        assert_eq!(result.atm_put, 4.0);
        assert_eq!(result.straddle, 8.0);
        assert_close(result.implied_move, 0.08);
        assert_close(result.atm_call_iv_pct, 32.0);
        assert_close(result.atm_put_iv(), 0.34);
        assert_eq!(result.expiration.label, "Mar22");
        assert_eq!(result.implied_range(), (92.0, 108.0));
    }

    #[test]
    fn test_atm_between_strikes() {
        let result = compute_implied_move(&scenario_catalog(), 102.0, None, Duration::minutes(30))
            .unwrap();

        assert_close(result.atm_call, 3.2);
        // Puts go 4.0 -> 7.5 over 100..105
        assert_close(result.atm_put, 5.4);
        assert_eq!(result.implied_move, (result.atm_call + result.atm_put) / 102.0);
        assert_close(result.implied_move_dollars(), result.straddle);
    }

    #[test]
    fn test_spot_outside_domain_extrapolates() {
        let result = compute_implied_move(&scenario_catalog(), 110.0, None, Duration::minutes(30))
            .unwrap();

        assert_close(result.atm_call, 0.0);
        assert_close(result.atm_put, 11.0);
    }

    #[test]
    fn test_invalid_spot() {
        for spot in [0.0, -5.0, f64::NAN, f64::INFINITY] {
            let err = compute_implied_move(&scenario_catalog(), spot, None, Duration::minutes(30))
                .unwrap_err();
            assert!(matches!(err, ImpliedMoveError::InvalidSpotPrice(_)));
        }
    }

    #[test]
    fn test_sides_filter_independently() {
        let mut calls = quotes(&[(95.0, 7.0, 0.36), (100.0, 4.0, 0.32)], at(15, 50));
        calls.extend(quotes(&[(90.0, 11.0, 0.4), (105.0, 2.0, 0.3)], at(11, 0)));
        let puts = quotes(
            &[(90.0, 1.0, 0.45), (95.0, 2.0, 0.40), (100.0, 4.0, 0.34), (110.0, 11.0, 0.3)],
            at(14, 0),
        );

        let mut catalog = ExpirationCatalog::new("TEST");
        catalog.insert(ExpirationChain::new(expiry(), calls, puts));

        let result = compute_implied_move(&catalog, 100.0, None, Duration::minutes(30)).unwrap();

        assert_eq!(result.calls.strikes(), vec![95.0, 100.0]);
        assert_eq!(result.puts.strikes(), vec![90.0, 95.0, 100.0, 110.0]);
        assert_eq!(result.curves.call_price.domain(), (95.0, 100.0));
        assert_eq!(result.curves.put_price.domain(), (90.0, 110.0));
        assert_eq!(result.curves.combined_domain(), (90.0, 110.0));
    }

    #[test]
    fn test_single_surviving_quote() {
        let mut calls = quotes(&[(100.0, 4.0, 0.32)], at(15, 50));
        calls.extend(quotes(&[(95.0, 7.0, 0.36), (105.0, 2.0, 0.3)], at(10, 0)));
        let puts = quotes(&[(95.0, 2.0, 0.4), (100.0, 4.0, 0.34)], at(15, 50));

        let mut catalog = ExpirationCatalog::new("TEST");
        catalog.insert(ExpirationChain::new(expiry(), calls, puts));

        let err = compute_implied_move(&catalog, 100.0, None, Duration::minutes(30)).unwrap_err();
        assert!(matches!(err, ImpliedMoveError::InsufficientData(_)));
    }

    #[test]
    fn test_empty_side() {
        let mut catalog = ExpirationCatalog::new("TEST");
        catalog.insert(ExpirationChain::new(
            expiry(),
            Vec::new(),
            quotes(&[(95.0, 2.0, 0.4), (100.0, 4.0, 0.34)], at(15, 50)),
        ));

        let err = compute_implied_move(&catalog, 100.0, None, Duration::minutes(30)).unwrap_err();
        assert!(matches!(err, ImpliedMoveError::EmptyQuoteSet(OptionType::Call)));
    }

    #[test]
    fn test_zero_window_empties_sides() {
        let err = compute_implied_move(&scenario_catalog(), 100.0, None, Duration::zero())
            .unwrap_err();
        assert!(matches!(err, ImpliedMoveError::EmptyQuoteSet(OptionType::Call)));
    }

    #[test]
    fn test_explicit_expiration() {
        let mut catalog = scenario_catalog();
        let later = NaiveDate::from_ymd_opt(2024, 4, 19).unwrap();
        let t = at(15, 55);
        catalog.insert(ExpirationChain::new(
            later,
            quotes(&[(95.0, 9.0, 0.3), (105.0, 4.0, 0.28)], t),
            quotes(&[(95.0, 4.0, 0.33), (105.0, 9.0, 0.29)], t),
        ));

        let calc = ImpliedMoveCalculator::default();
        let nearest = calc.compute(&catalog, 100.0, None).unwrap();
        let april = calc.compute(&catalog, 100.0, Some("2024-04-19")).unwrap();

        assert_eq!(nearest.expiration.date, expiry());
        assert_eq!(april.expiration.date, later);
        assert_close(april.atm_call, 6.5);
        assert_close(april.atm_put, 6.5);
        assert_close(april.implied_move, 0.13);

        let err = calc.compute(&catalog, 100.0, Some("2024-04-20")).unwrap_err();
        assert!(matches!(err, ImpliedMoveError::InvalidDate(_)));
    }

    #[test]
    fn test_calculator_rejects_bad_config() {
        let config = AnalysisConfig::with_freshness_minutes(-10);
        assert!(ImpliedMoveCalculator::new(config).is_err());

        let config = AnalysisConfig::with_freshness_minutes(1_000_000_000_000);
        assert!(matches!(
            ImpliedMoveCalculator::new(config),
            Err(ImpliedMoveError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_widest_window_keeps_stale_quotes() {
        let mut calls = quotes(&[(95.0, 7.0, 0.36), (100.0, 4.0, 0.32)], at(15, 50));
        calls.extend(quotes(&[(105.0, 2.0, 0.3)], at(9, 31)));
        let puts = quotes(&[(95.0, 2.0, 0.4), (100.0, 4.0, 0.34)], at(15, 50));
        let mut catalog = ExpirationCatalog::new("TEST");
        catalog.insert(ExpirationChain::new(expiry(), calls, puts));

        let config = AnalysisConfig::with_freshness_minutes(crate::analysis::MAX_FRESHNESS_MINUTES);
        let calc = ImpliedMoveCalculator::new(config).unwrap();
        let result = calc.compute(&catalog, 100.0, None).unwrap();
        assert_eq!(result.calls.strikes(), vec![95.0, 100.0, 105.0]);

        let result = compute_implied_move(&catalog, 100.0, None, Duration::MAX).unwrap();
        assert_eq!(result.calls.len(), 3);
    }

    #[test]
    fn test_repeatable() {
        let catalog = scenario_catalog();
        let a = compute_implied_move(&catalog, 101.3, None, Duration::minutes(30)).unwrap();
        let b = compute_implied_move(&catalog, 101.3, None, Duration::minutes(30)).unwrap();

        assert_eq!(a.implied_move.to_bits(), b.implied_move.to_bits());
        assert_eq!(a.atm_call_iv_pct.to_bits(), b.atm_call_iv_pct.to_bits());
        assert_eq!(a, b);
    }

    #[test]
    fn test_parallel_runs_share_catalog() {
        let catalog = scenario_catalog();
        let spots = [98.0, 100.0, 102.0, 104.0];

        let results: Vec<AnalysisResult> = std::thread::scope(|s| {
            let handles: Vec<_> = spots
                .iter()
                .map(|&spot| {
                    let catalog = &catalog;
                    s.spawn(move || {
                        compute_implied_move(catalog, spot, None, Duration::minutes(30))
                    })
                })
                .collect();
            handles
                .into_iter()
                .map(|h| h.join().unwrap().unwrap())
                .collect()
        });

        for (spot, result) in spots.iter().zip(&results) {
            let serial = compute_implied_move(&catalog, *spot, None, Duration::minutes(30)).unwrap();
            assert_eq!(&serial, result);
        }
    }
}
