//! Stooq data provider.
//!
//! Fetches daily OHLCV history from Stooq's CSV endpoint
//! (`https://stooq.com/q/d/l/?s=<symbol>&i=d`). Stooq serves plain CSV with
//! a `Date,Open,High,Low,Close,Volume` header and uses suffixed symbols
//! (`spy.us` for US tickers); `normalize_symbol` appends `.us` when no
//! exchange suffix is present.
//!
//! Stooq has no adjusted-close column; `adj_close` is set to `close`.

use chrono::NaiveDate;
use std::time::Duration;

use super::provider::{DataError, DataProvider, DataSource, FetchResult};
use crate::domain::Bar;

/// Stooq daily-history provider over blocking HTTP.
pub struct StooqProvider {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl Default for StooqProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl StooqProvider {
    pub fn new() -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent("returnlab/0.1")
            .build()
            .expect("failed to build HTTP client");
        Self {
            client,
            base_url: "https://stooq.com/q/d/l/".to_string(),
        }
    }

    /// Override the endpoint, for tests against a local server.
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.to_string();
        self
    }

    /// Stooq wants lowercase symbols with an exchange suffix.
    fn normalize_symbol(symbol: &str) -> String {
        let lower = symbol.to_lowercase();
        if lower.contains('.') {
            lower
        } else {
            format!("{lower}.us")
        }
    }

    fn history_url(&self, symbol: &str, start: NaiveDate, end: NaiveDate) -> String {
        format!(
            "{}?s={}&d1={}&d2={}&i=d",
            self.base_url,
            Self::normalize_symbol(symbol),
            start.format("%Y%m%d"),
            end.format("%Y%m%d"),
        )
    }

    /// Parse Stooq's CSV body into bars.
    fn parse_csv(symbol: &str, body: &str) -> Result<Vec<Bar>, DataError> {
        // Stooq answers unknown tickers with a short "No data" body.
        if body.trim().is_empty() || body.starts_with("No data") {
            return Err(DataError::SymbolNotFound {
                symbol: symbol.to_string(),
            });
        }

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(body.as_bytes());

        let headers = reader
            .headers()
            .map_err(|e| DataError::CsvParse(e.to_string()))?
            .clone();
        if headers.get(0) != Some("Date") {
            return Err(DataError::ResponseFormatChanged(format!(
                "unexpected header: {headers:?}"
            )));
        }

        let mut bars = Vec::new();
        for record in reader.records() {
            let record = record.map_err(|e| DataError::CsvParse(e.to_string()))?;

            let field = |i: usize| -> Result<&str, DataError> {
                record.get(i).ok_or_else(|| {
                    DataError::CsvParse(format!("row has {} fields, expected 6", record.len()))
                })
            };

            let date = NaiveDate::parse_from_str(field(0)?, "%Y-%m-%d")
                .map_err(|e| DataError::CsvParse(format!("bad date: {e}")))?;
            let open: f64 = field(1)?
                .parse()
                .map_err(|e| DataError::CsvParse(format!("bad open: {e}")))?;
            let high: f64 = field(2)?
                .parse()
                .map_err(|e| DataError::CsvParse(format!("bad high: {e}")))?;
            let low: f64 = field(3)?
                .parse()
                .map_err(|e| DataError::CsvParse(format!("bad low: {e}")))?;
            let close: f64 = field(4)?
                .parse()
                .map_err(|e| DataError::CsvParse(format!("bad close: {e}")))?;
            // Volume is missing for some instruments (indices)
            let volume: u64 = match record.get(5) {
                Some(v) if !v.is_empty() => v
                    .parse::<f64>()
                    .map_err(|e| DataError::CsvParse(format!("bad volume: {e}")))?
                    as u64,
                _ => 0,
            };

            bars.push(Bar {
                symbol: symbol.to_string(),
                date,
                open,
                high,
                low,
                close,
                volume,
                adj_close: close,
            });
        }

        if bars.is_empty() {
            return Err(DataError::SymbolNotFound {
                symbol: symbol.to_string(),
            });
        }
        Ok(bars)
    }
}

impl DataProvider for StooqProvider {
    fn name(&self) -> &str {
        "stooq"
    }

    fn fetch(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<FetchResult, DataError> {
        let url = self.history_url(symbol, start, end);
        let response = self
            .client
            .get(&url)
            .send()
            .map_err(|e| DataError::NetworkUnreachable(e.to_string()))?;

        if !response.status().is_success() {
            return Err(DataError::Other(format!(
                "HTTP {} from stooq for {symbol}",
                response.status()
            )));
        }

        let body = response
            .text()
            .map_err(|e| DataError::NetworkUnreachable(e.to_string()))?;

        let bars = Self::parse_csv(symbol, &body)?;

        Ok(FetchResult {
            symbol: symbol.to_string(),
            bars,
            source: DataSource::Stooq,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "Date,Open,High,Low,Close,Volume\n\
                          2024-01-02,100.0,103.0,99.5,102.0,1200000\n\
                          2024-01-03,102.0,104.0,101.0,103.5,900000\n";

    #[test]
    fn parses_well_formed_csv() {
        let bars = StooqProvider::parse_csv("SPY", SAMPLE).unwrap();
        assert_eq!(bars.len(), 2);
        assert_eq!(bars[0].date, NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());
        assert_eq!(bars[0].close, 102.0);
        assert_eq!(bars[0].adj_close, 102.0);
        assert_eq!(bars[1].volume, 900_000);
        assert!(bars.iter().all(|b| b.is_sane()));
    }

    #[test]
    fn no_data_body_maps_to_symbol_not_found() {
        let err = StooqProvider::parse_csv("NOPE", "No data").unwrap_err();
        assert!(matches!(err, DataError::SymbolNotFound { .. }));
    }

    #[test]
    fn header_drift_is_detected() {
        let err =
            StooqProvider::parse_csv("SPY", "Time,O,H,L,C,V\n1,2,3,4,5,6\n").unwrap_err();
        assert!(matches!(err, DataError::ResponseFormatChanged(_)));
    }

    #[test]
    fn malformed_row_is_a_parse_error() {
        let body = "Date,Open,High,Low,Close,Volume\n2024-01-02,abc,1,1,1,1\n";
        let err = StooqProvider::parse_csv("SPY", body).unwrap_err();
        assert!(matches!(err, DataError::CsvParse(_)));
    }

    #[test]
    fn missing_volume_defaults_to_zero() {
        let body = "Date,Open,High,Low,Close,Volume\n2024-01-02,1,1,1,1,\n";
        let bars = StooqProvider::parse_csv("^SPX", body).unwrap();
        assert_eq!(bars[0].volume, 0);
    }

    #[test]
    fn symbol_normalization() {
        assert_eq!(StooqProvider::normalize_symbol("SPY"), "spy.us");
        assert_eq!(StooqProvider::normalize_symbol("btc.v"), "btc.v");
    }

    #[test]
    fn url_contains_date_range() {
        let provider = StooqProvider::new();
        let url = provider.history_url(
            "SPY",
            NaiveDate::from_ymd_opt(2020, 1, 2).unwrap(),
            NaiveDate::from_ymd_opt(2024, 12, 31).unwrap(),
        );
        assert!(url.contains("s=spy.us"));
        assert!(url.contains("d1=20200102"));
        assert!(url.contains("d2=20241231"));
    }
}
