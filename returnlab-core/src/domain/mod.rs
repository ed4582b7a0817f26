//! Domain types: bars, return series, feature frames.

pub mod bar;
pub mod frame;
pub mod series;

pub use bar::Bar;
pub use frame::FeatureFrame;
pub use series::{ReturnSeries, SeriesError};
