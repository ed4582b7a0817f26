//! Data access: provider trait, Stooq HTTP provider, CSV store, synthetic bars.

pub mod csv_store;
pub mod provider;
pub mod stooq;
pub mod synthetic;

pub use csv_store::CsvStore;
pub use provider::{DataError, DataProvider, DataSource, FetchResult};
pub use stooq::StooqProvider;
pub use synthetic::generate_synthetic_bars;
