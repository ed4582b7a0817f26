//! Bar loading for the experiment runner.
//!
//! Resolves one symbol's history with the fallback policy:
//! 1. If the CSV store has the symbol → use it
//! 2. If not stored and a provider is available → fetch and store
//! 3. If nothing real is available and `synthetic` is set → generate (tagged)
//! 4. Otherwise → fail with a clear error
//!
//! Synthetic data is a developer-only offline mode; results carry the source
//! tag so a synthetic run can never be mistaken for a market one.

use chrono::NaiveDate;
use thiserror::Error;

use returnlab_core::data::{
    generate_synthetic_bars, CsvStore, DataError, DataProvider, DataSource,
};
use returnlab_core::domain::Bar;
use returnlab_core::fingerprint;

/// Store folder for raw downloaded bars.
pub const RAW_FOLDER: &str = "raw";

/// Errors from the data loading layer.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("no stored data for '{symbol}' and no provider (use --synthetic for offline data)")]
    NoDataOffline { symbol: String },

    #[error("no stored data for '{symbol}' and download failed: {reason}")]
    DownloadFailed { symbol: String, reason: String },

    #[error("no bars for '{symbol}' in range {start}..={end}")]
    EmptyRange {
        symbol: String,
        start: NaiveDate,
        end: NaiveDate,
    },

    #[error("data error: {0}")]
    Data(#[from] DataError),
}

/// Options controlling how bars are loaded.
#[derive(Debug, Clone)]
pub struct LoadOptions {
    /// Start date for bars (inclusive).
    pub start: NaiveDate,
    /// End date for bars (inclusive).
    pub end: NaiveDate,
    /// If true, generate synthetic bars when real data is unavailable.
    pub synthetic: bool,
    /// Force re-download even if stored.
    pub force: bool,
}

/// Result of loading bars, including provenance.
#[derive(Debug, Clone)]
pub struct LoadedData {
    pub bars: Vec<Bar>,
    pub source: DataSource,
    /// BLAKE3 over the bars, for the result manifest.
    pub dataset_hash: String,
}

/// Load one symbol's bars from the store, with download or synthetic fallback.
pub fn load_bars(
    symbol: &str,
    store: &CsvStore,
    provider: Option<&dyn DataProvider>,
    opts: &LoadOptions,
) -> Result<LoadedData, LoadError> {
    // Step 1: the store.
    if !opts.force && store.contains(symbol, RAW_FOLDER) {
        let bars = clip_range(store.load(symbol, RAW_FOLDER)?, opts);
        return finish(symbol, bars, DataSource::Store, opts);
    }

    // Step 2: the provider, persisting what it returns.
    let mut fetch_failure: Option<String> = None;
    if let Some(provider) = provider {
        match provider.fetch(symbol, opts.start, opts.end) {
            Ok(result) => {
                store.save(symbol, RAW_FOLDER, &result.bars)?;
                let bars = clip_range(result.bars, opts);
                return finish(symbol, bars, result.source, opts);
            }
            Err(e) => fetch_failure = Some(e.to_string()),
        }
    }

    // Step 3: synthetic fallback.
    if opts.synthetic {
        eprintln!("WARNING: generating synthetic data for {symbol} — results will be tagged");
        let bars = generate_synthetic_bars(symbol, opts.start, opts.end);
        return finish(symbol, bars, DataSource::Synthetic, opts);
    }

    // Step 4: fail.
    match fetch_failure {
        Some(reason) => Err(LoadError::DownloadFailed {
            symbol: symbol.to_string(),
            reason,
        }),
        None => Err(LoadError::NoDataOffline {
            symbol: symbol.to_string(),
        }),
    }
}

fn clip_range(bars: Vec<Bar>, opts: &LoadOptions) -> Vec<Bar> {
    bars.into_iter()
        .filter(|b| b.date >= opts.start && b.date <= opts.end)
        .collect()
}

fn finish(
    symbol: &str,
    bars: Vec<Bar>,
    source: DataSource,
    opts: &LoadOptions,
) -> Result<LoadedData, LoadError> {
    if bars.is_empty() {
        return Err(LoadError::EmptyRange {
            symbol: symbol.to_string(),
            start: opts.start,
            end: opts.end,
        });
    }
    let dataset_hash = fingerprint::dataset_hash(&bars);
    Ok(LoadedData {
        bars,
        source,
        dataset_hash,
    })
}
