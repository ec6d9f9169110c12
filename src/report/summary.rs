//! Text summary of an analysis

use std::fmt::Write;

use crate::analysis::AnalysisResult;
use crate::core::QuoteSet;

const RULE_WIDTH: usize = 82;

/// Summary block: ATM prices, straddle, implied move and ATM IVs
pub fn render_summary(result: &AnalysisResult) -> String {
    let move_label = format!("Options Implied Move for {}", result.expiration.label);
    let width = move_label.len().max(14);

    let rows = [
        ("Underlying".to_string(), format!("${:.3}", result.spot)),
        ("ATM Call".to_string(), format!("${:.3}", result.atm_call)),
        ("ATM Put".to_string(), format!("${:.3}", result.atm_put)),
        ("ATM Straddle".to_string(), format!("${:.3}", result.straddle)),
        (move_label, format!("{:.3}%", result.implied_move * 100.0)),
        ("ATM Call IV".to_string(), format!("{:.3}%", result.atm_call_iv_pct)),
        ("ATM Put IV".to_string(), format!("{:.3}%", result.atm_put_iv_pct)),
    ];

    let mut out = String::new();
    for (label, value) in rows {
        let _ = writeln!(out, "{:>width$}: {}", label, value, width = width);
    }
    out
}

/// Table of the quotes in one set
pub fn render_quote_table(set: &QuoteSet) -> String {
    let mut out = String::new();
    let side = set.option_type().plural();
    let mut title = side.to_string();
    title[..1].make_ascii_uppercase();

    let _ = writeln!(out, "{} {}:", set.expiry(), title);
    let _ = writeln!(out, "{}", "=".repeat(RULE_WIDTH));
    let _ = writeln!(
        out,
        "{:<22} {:>10} {:>10} {:>25} {:>10}",
        "contract", "strike", "last", "last trade", "IV %"
    );

    for q in set {
        let _ = writeln!(
            out,
            "{:<22} {:>10.2} {:>10.2} {:>25} {:>10.2}",
            q.contract_symbol.as_deref().unwrap_or("-"),
            q.strike,
            q.last_price,
            q.last_trade.format("%Y-%m-%d %H:%M:%S UTC"),
            q.implied_vol * 100.0
        );
    }
    out
}
