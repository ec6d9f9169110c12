//! Example: implied move of a synthetic option chain
//!
//! Run with: cargo run --example synthetic_chain

use chrono::{Duration, NaiveDate, TimeZone, Utc};
use implied_move::prelude::*;

fn main() -> ImpliedMoveResult<()> {
    let spot = 101.3;
    let expiry = NaiveDate::from_ymd_opt(2024, 3, 22).unwrap();
    let last = Utc.with_ymd_and_hms(2024, 3, 15, 19, 59, 0).unwrap();

    // Fresh prints near the money, stale prints in the wings
    let mut calls = Vec::new();
    let mut puts = Vec::new();
    for i in 0..15 {
        let strike = 90.0 + i as f64 * 1.5;
        let age = if (strike - spot).abs() < 6.0 { 3 * i } else { 120 };
        let traded = last - Duration::minutes(age);

        let call = (spot - strike).max(0.0) + 2.5 * (-(strike - spot).powi(2) / 60.0).exp();
        let put = (strike - spot).max(0.0) + 2.5 * (-(strike - spot).powi(2) / 60.0).exp();
        let iv = 0.30 + 0.002 * (strike - spot).powi(2) / 10.0;

        calls.push(OptionQuote::new(strike, call, traded, iv));
        puts.push(OptionQuote::new(strike, put, traded, iv + 0.01));
    }

    let mut catalog = ExpirationCatalog::new("DEMO");
    catalog.insert(ExpirationChain::new(expiry, calls, puts));

    let calc = ImpliedMoveCalculator::new(AnalysisConfig::default())?;
    let result = calc.compute(&catalog, spot, None)?;

    println!("=== Filtered Quotes ===\n");
    print!("{}", render_quote_table(&result.calls));
    print!("{}", render_quote_table(&result.puts));

    println!("\n=== Implied Move ===\n");
    print!("{}", render_summary(&result));

    let (lo, hi) = result.implied_range();
    println!("\nExpected range by {}: ${:.2} - ${:.2}", result.expiration.date, lo, hi);

    // Extrapolated prices outside the fresh strikes
    let (call_lo, call_hi) = result.curves.call_price.domain();
    println!("\nCall curve domain: {:.1} - {:.1}", call_lo, call_hi);
    for strike in [call_lo - 3.0, call_hi + 3.0] {
        println!(
            "  call @ {:.1} (extrapolated): ${:.3}",
            strike,
            result.curves.call_price.eval(strike)
        );
    }

    Ok(())
}
