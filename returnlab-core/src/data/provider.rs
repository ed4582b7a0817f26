//! Data provider trait and structured error types.
//!
//! The DataProvider trait abstracts over market data sources (Stooq HTTP,
//! CSV import, synthetic) so implementations can be swapped and mocked in
//! tests. Network failures and unknown tickers are provider concerns; the
//! experiment core never sees them as anything but a `DataError`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::Bar;

/// Structured error types for data operations.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("network unreachable: {0}")]
    NetworkUnreachable(String),

    #[error("symbol not found: {symbol}")]
    SymbolNotFound { symbol: String },

    #[error("response format changed: {0}")]
    ResponseFormatChanged(String),

    #[error("csv parse error: {0}")]
    CsvParse(String),

    #[error("store I/O error: {0}")]
    StoreIo(String),

    #[error("no stored data for symbol '{symbol}' — run `fetch {symbol}` first")]
    NoStoredData { symbol: String },

    #[error("data error: {0}")]
    Other(String),
}

/// Result of a successful data fetch for a single symbol.
#[derive(Debug, Clone)]
pub struct FetchResult {
    pub symbol: String,
    pub bars: Vec<Bar>,
    pub source: DataSource,
}

/// Where the data came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DataSource {
    Stooq,
    CsvImport,
    Store,
    Synthetic,
}

/// Trait for market data providers.
///
/// Implementations handle the specifics of one source. The store layer sits
/// above this trait — providers don't know about local storage.
pub trait DataProvider: Send + Sync {
    /// Human-readable name of this provider.
    fn name(&self) -> &str;

    /// Fetch daily OHLCV bars for a symbol over a date range (inclusive).
    fn fetch(&self, symbol: &str, start: NaiveDate, end: NaiveDate)
        -> Result<FetchResult, DataError>;
}
