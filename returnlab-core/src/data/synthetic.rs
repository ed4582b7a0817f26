//! Synthetic bar generation for offline development and tests.
//!
//! Produces a geometric random walk from a starting price of 100.0, weekdays
//! only. The seed derives from the symbol name via BLAKE3, so the same symbol
//! always yields the same fake history.

use chrono::{Datelike, NaiveDate, Weekday};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};

use crate::domain::Bar;

/// Daily log-return volatility of the synthetic walk.
const SYNTHETIC_SIGMA: f64 = 0.01;
/// Mild upward drift so benchmark rows are not degenerate.
const SYNTHETIC_DRIFT: f64 = 0.0002;

/// Generate deterministic synthetic bars for a symbol over a date range.
pub fn generate_synthetic_bars(symbol: &str, start: NaiveDate, end: NaiveDate) -> Vec<Bar> {
    let seed: [u8; 32] = *blake3::hash(symbol.as_bytes()).as_bytes();
    let mut rng = StdRng::from_seed(seed);
    let normal = Normal::new(SYNTHETIC_DRIFT, SYNTHETIC_SIGMA)
        .expect("constant drift/sigma are valid");

    let mut bars = Vec::new();
    let mut price = 100.0_f64;
    let mut current = start;

    while current <= end {
        if matches!(current.weekday(), Weekday::Sat | Weekday::Sun) {
            current += chrono::Duration::days(1);
            continue;
        }

        let log_return = normal.sample(&mut rng);
        let open = price;
        let close = price * log_return.exp();
        let high = open.max(close) * (1.0 + rng.gen_range(0.0..0.005));
        let low = open.min(close) * (1.0 - rng.gen_range(0.0..0.005));
        let volume = rng.gen_range(500_000..5_000_000u64);

        bars.push(Bar {
            symbol: symbol.to_string(),
            date: current,
            open,
            high,
            low,
            close,
            volume,
            adj_close: close,
        });

        price = close;
        current += chrono::Duration::days(1);
    }

    bars
}
