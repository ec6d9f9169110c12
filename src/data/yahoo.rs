//! Yahoo Finance data fetcher
//!
//! Fetches option chains and spot quotes from Yahoo Finance's unofficial API.
//!
//! Note: This is for educational/research purposes. Yahoo Finance
//! data is delayed ~15 minutes and intended for personal use.

use std::time::Duration;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::Deserialize;

use super::ChainSource;
use crate::core::{
    ExpirationCatalog, ExpirationChain, ImpliedMoveError, ImpliedMoveResult, OptionQuote,
};

/// Yahoo client settings
#[derive(Debug, Clone)]
pub struct YahooConfig {
    /// API base URL
    pub base_url: String,
    /// User agent sent with each request
    pub user_agent: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for YahooConfig {
    fn default() -> Self {
        Self {
            base_url: "https://query1.finance.yahoo.com/v7/finance".to_string(),
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36".to_string(),
            timeout_secs: 30,
        }
    }
}

/// Yahoo Finance API client
pub struct YahooClient {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl YahooClient {
    pub fn new() -> ImpliedMoveResult<Self> {
        Self::with_config(YahooConfig::default())
    }

    pub fn with_config(config: YahooConfig) -> ImpliedMoveResult<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(config.user_agent)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ImpliedMoveError::Network(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url,
        })
    }

    /// Get regular-market price for a symbol
    pub fn get_quote(&self, symbol: &str) -> ImpliedMoveResult<f64> {
        let url = format!("{}/quote?symbols={}", self.base_url, symbol);

        let response: YahooQuoteResponse = self
            .client
            .get(&url)
            .send()
            .map_err(|e| ImpliedMoveError::Network(e.to_string()))?
            .json()
            .map_err(|e| ImpliedMoveError::data(format!("Failed to parse quote: {}", e)))?;

        let result = response
            .quote_response
            .result
            .into_iter()
            .next()
            .ok_or_else(|| ImpliedMoveError::data(format!("No quote data returned for {}", symbol)))?;

        result.regular_market_price.ok_or_else(|| {
            ImpliedMoveError::data(format!("No regular market price for {}", symbol))
        })
    }

    /// Get available option expiration dates
    pub fn get_expirations(&self, symbol: &str) -> ImpliedMoveResult<Vec<NaiveDate>> {
        let url = format!("{}/options/{}", self.base_url, symbol);
        let chain = self.fetch_chain(&url)?;

        Ok(chain
            .expiration_dates
            .iter()
            .filter_map(|&ts| DateTime::from_timestamp(ts, 0).map(|dt| dt.date_naive()))
            .collect())
    }

    /// Get calls and puts for a specific expiration
    pub fn get_expiration_chain(
        &self,
        symbol: &str,
        expiry: NaiveDate,
    ) -> ImpliedMoveResult<ExpirationChain> {
        // Yahoo keys expirations by midnight UTC
        let expiry_ts = expiry.and_time(NaiveTime::MIN).and_utc().timestamp();
        let url = format!("{}/options/{}?date={}", self.base_url, symbol, expiry_ts);
        let chain = self.fetch_chain(&url)?;

        let (calls, puts) = match chain.options.into_iter().next() {
            Some(options) => (convert_quotes(options.calls), convert_quotes(options.puts)),
            None => (Vec::new(), Vec::new()),
        };

        Ok(ExpirationChain::new(expiry, calls, puts))
    }

    /// Get every listed expiration
    ///
    /// Fails on the first expiration that cannot be downloaded.
    pub fn get_catalog(&self, symbol: &str) -> ImpliedMoveResult<ExpirationCatalog> {
        let expiries = self.get_expirations(symbol)?;
        build_catalog(symbol, &expiries, |expiry| {
            self.get_expiration_chain(symbol, expiry)
        })
    }

    fn fetch_chain(&self, url: &str) -> ImpliedMoveResult<YahooOptionChainData> {
        let response: YahooOptionsResponse = self
            .client
            .get(url)
            .send()
            .map_err(|e| ImpliedMoveError::Network(e.to_string()))?
            .json()
            .map_err(|e| ImpliedMoveError::data(format!("Failed to parse options: {}", e)))?;

        response
            .option_chain
            .result
            .into_iter()
            .next()
            .ok_or_else(|| ImpliedMoveError::data("No options data returned"))
    }
}

impl ChainSource for YahooClient {
    fn option_chain(&self, symbol: &str) -> ImpliedMoveResult<ExpirationCatalog> {
        self.get_catalog(symbol)
    }

    fn spot_price(&self, symbol: &str) -> ImpliedMoveResult<f64> {
        self.get_quote(symbol)
    }
}

/// Assemble a catalog from per-expiry fetches, stopping at the first error
fn build_catalog<F>(
    symbol: &str,
    expiries: &[NaiveDate],
    mut fetch: F,
) -> ImpliedMoveResult<ExpirationCatalog>
where
    F: FnMut(NaiveDate) -> ImpliedMoveResult<ExpirationChain>,
{
    let mut catalog = ExpirationCatalog::new(symbol);
    for &expiry in expiries {
        let chain = fetch(expiry).map_err(|e| {
            tracing::warn!("Failed to get chain for {} {}: {}", symbol, expiry, e);
            e
        })?;
        catalog.insert(chain);
    }

    tracing::info!(
        "Fetched {} expirations ({} quotes) for {}",
        catalog.len(),
        catalog.total_quotes(),
        symbol
    );
    Ok(catalog)
}

/// Convert Yahoo rows, dropping rows with missing or out-of-domain fields
fn convert_quotes(rows: Vec<YahooOptionData>) -> Vec<OptionQuote> {
    rows.into_iter().filter_map(convert_option_quote).collect()
}

fn convert_option_quote(data: YahooOptionData) -> Option<OptionQuote> {
    let last_trade = DateTime::<Utc>::from_timestamp(data.last_trade_date?, 0)?;
    let mut quote = OptionQuote::new(
        data.strike?,
        data.last_price?,
        last_trade,
        data.implied_volatility?,
    );
    quote.contract_symbol = data.contract_symbol;

    if !quote.is_valid() {
        tracing::debug!("Skipping out-of-domain quote {:?}", quote);
        return None;
    }
    Some(quote)
}

// Yahoo Finance API response structures

#[derive(Debug, Deserialize)]
struct YahooQuoteResponse {
    #[serde(rename = "quoteResponse")]
    quote_response: YahooQuoteResult,
}

#[derive(Debug, Deserialize)]
struct YahooQuoteResult {
    result: Vec<YahooQuoteData>,
}

#[derive(Debug, Deserialize)]
struct YahooQuoteData {
    #[serde(rename = "regularMarketPrice")]
    regular_market_price: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct YahooOptionsResponse {
    #[serde(rename = "optionChain")]
    option_chain: YahooOptionChain,
}

#[derive(Debug, Deserialize)]
struct YahooOptionChain {
    result: Vec<YahooOptionChainData>,
}

#[derive(Debug, Deserialize)]
struct YahooOptionChainData {
    #[serde(rename = "expirationDates", default)]
    expiration_dates: Vec<i64>,
    #[serde(default)]
    options: Vec<YahooOptions>,
}

#[derive(Debug, Deserialize)]
struct YahooOptions {
    #[serde(default)]
    calls: Vec<YahooOptionData>,
    #[serde(default)]
    puts: Vec<YahooOptionData>,
}

#[derive(Debug, Deserialize)]
struct YahooOptionData {
    #[serde(rename = "contractSymbol")]
    contract_symbol: Option<String>,
    strike: Option<f64>,
    #[serde(rename = "lastPrice")]
    last_price: Option<f64>,
    #[serde(rename = "lastTradeDate")]
    last_trade_date: Option<i64>,
    #[serde(rename = "impliedVolatility")]
    implied_volatility: Option<f64>,
}
