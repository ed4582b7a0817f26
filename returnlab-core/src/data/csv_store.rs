//! CSV store — load/save bar datasets under a project data directory.
//!
//! Layout: `<root>/<folder>/<SYMBOL>.csv` with folders like `raw` and
//! `processed`. Files carry a `date,open,high,low,close,volume,adj_close`
//! header and are sorted by date on write.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use super::provider::DataError;
use crate::domain::Bar;

/// Flat CSV storage for per-symbol bar files.
#[derive(Debug, Clone)]
pub struct CsvStore {
    root: PathBuf,
}

impl CsvStore {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, symbol: &str, folder: &str) -> PathBuf {
        self.root.join(folder).join(format!("{symbol}.csv"))
    }

    /// True if a dataset exists for the symbol in the folder.
    pub fn contains(&self, symbol: &str, folder: &str) -> bool {
        self.path_for(symbol, folder).is_file()
    }

    /// Write bars for a symbol, creating the folder if needed.
    ///
    /// Bars are sorted by date before writing so stored files always satisfy
    /// the series index invariant on load.
    pub fn save(&self, symbol: &str, folder: &str, bars: &[Bar]) -> Result<(), DataError> {
        let dir = self.root.join(folder);
        fs::create_dir_all(&dir).map_err(|e| DataError::StoreIo(e.to_string()))?;

        let mut sorted: Vec<&Bar> = bars.iter().collect();
        sorted.sort_by_key(|b| b.date);

        let path = self.path_for(symbol, folder);
        let mut writer =
            csv::Writer::from_path(&path).map_err(|e| DataError::StoreIo(e.to_string()))?;

        writer
            .write_record(["date", "open", "high", "low", "close", "volume", "adj_close"])
            .map_err(|e| DataError::StoreIo(e.to_string()))?;

        for bar in sorted {
            writer
                .write_record([
                    bar.date.to_string(),
                    format!("{:.6}", bar.open),
                    format!("{:.6}", bar.high),
                    format!("{:.6}", bar.low),
                    format!("{:.6}", bar.close),
                    bar.volume.to_string(),
                    format!("{:.6}", bar.adj_close),
                ])
                .map_err(|e| DataError::StoreIo(e.to_string()))?;
        }

        writer.flush().map_err(|e| DataError::StoreIo(e.to_string()))?;
        Ok(())
    }

    /// Load bars for a symbol from the folder.
    pub fn load(&self, symbol: &str, folder: &str) -> Result<Vec<Bar>, DataError> {
        let path = self.path_for(symbol, folder);
        if !path.is_file() {
            return Err(DataError::NoStoredData {
                symbol: symbol.to_string(),
            });
        }

        let mut reader =
            csv::Reader::from_path(&path).map_err(|e| DataError::StoreIo(e.to_string()))?;

        let mut bars = Vec::new();
        for record in reader.records() {
            let record = record.map_err(|e| DataError::CsvParse(e.to_string()))?;
            let field = |i: usize| -> Result<&str, DataError> {
                record.get(i).ok_or_else(|| {
                    DataError::CsvParse(format!("row has {} fields, expected 7", record.len()))
                })
            };

            bars.push(Bar {
                symbol: symbol.to_string(),
                date: NaiveDate::parse_from_str(field(0)?, "%Y-%m-%d")
                    .map_err(|e| DataError::CsvParse(format!("bad date: {e}")))?,
                open: parse_f64(field(1)?)?,
                high: parse_f64(field(2)?)?,
                low: parse_f64(field(3)?)?,
                close: parse_f64(field(4)?)?,
                volume: field(5)?
                    .parse()
                    .map_err(|e| DataError::CsvParse(format!("bad volume: {e}")))?,
                adj_close: parse_f64(field(6)?)?,
            });
        }
        Ok(bars)
    }
}

fn parse_f64(s: &str) -> Result<f64, DataError> {
    s.parse()
        .map_err(|e| DataError::CsvParse(format!("bad number '{s}': {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bar(day: u32, close: f64) -> Bar {
        Bar {
            symbol: "TEST".into(),
            date: NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
            open: close - 0.5,
            high: close + 1.0,
            low: close - 1.0,
            close,
            volume: 42_000,
            adj_close: close,
        }
    }

    #[test]
    fn save_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let store = CsvStore::new(dir.path());

        let bars = vec![bar(2, 100.0), bar(3, 101.5), bar(4, 99.25)];
        store.save("TEST", "raw", &bars).unwrap();

        let loaded = store.load("TEST", "raw").unwrap();
        assert_eq!(loaded.len(), 3);
        for (orig, back) in bars.iter().zip(&loaded) {
            assert_eq!(orig.date, back.date);
            assert!((orig.close - back.close).abs() < 1e-6);
            assert_eq!(orig.volume, back.volume);
        }
    }

    #[test]
    fn save_sorts_by_date() {
        let dir = tempfile::tempdir().unwrap();
        let store = CsvStore::new(dir.path());

        store.save("TEST", "raw", &[bar(5, 1.0), bar(2, 2.0)]).unwrap();
        let loaded = store.load("TEST", "raw").unwrap();
        assert!(loaded[0].date < loaded[1].date);
    }

    #[test]
    fn missing_symbol_is_no_stored_data() {
        let dir = tempfile::tempdir().unwrap();
        let store = CsvStore::new(dir.path());
        assert!(matches!(
            store.load("GHOST", "raw"),
            Err(DataError::NoStoredData { .. })
        ));
        assert!(!store.contains("GHOST", "raw"));
    }

    #[test]
    fn folders_are_independent() {
        let dir = tempfile::tempdir().unwrap();
        let store = CsvStore::new(dir.path());

        store.save("TEST", "raw", &[bar(2, 1.0)]).unwrap();
        assert!(store.contains("TEST", "raw"));
        assert!(!store.contains("TEST", "processed"));
    }
}
