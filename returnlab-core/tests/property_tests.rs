//! Property tests for core invariants.
//!
//! Uses proptest to verify:
//! 1. Series index discipline — valid indexes always construct, splits preserve order
//! 2. Transform identities — log-returns compose back to the total price relative
//! 3. Baseline contracts — predictions align to the frame, seeds fix the draws

use chrono::NaiveDate;
use proptest::prelude::*;
use returnlab_core::baselines::{
    Baseline, HistoricalMeanBaseline, RandomNormalBaseline, ZeroBaseline,
};
use returnlab_core::domain::{Bar, FeatureFrame, ReturnSeries};
use returnlab_core::transforms::{log_returns, moving_average, zscore};

// ── Strategies (proptest) ────────────────────────────────────────────

fn base_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2020, 1, 1).unwrap()
}

/// Strictly increasing date vector of the given length.
fn arb_dates(len: usize) -> impl Strategy<Value = Vec<NaiveDate>> {
    prop::collection::vec(1i64..4, len).prop_map(|gaps| {
        let mut dates = Vec::with_capacity(gaps.len());
        let mut current = base_date();
        for gap in gaps {
            current += chrono::Duration::days(gap);
            dates.push(current);
        }
        dates
    })
}

fn arb_returns(len: usize) -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(-0.1..0.1f64, len)
}

fn arb_prices(len: usize) -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(1.0..1000.0f64, len)
}

fn bars_from_prices(prices: &[f64]) -> Vec<Bar> {
    prices
        .iter()
        .enumerate()
        .map(|(i, &close)| Bar {
            symbol: "PROP".into(),
            date: base_date() + chrono::Duration::days(i as i64),
            open: close,
            high: close,
            low: close,
            close,
            volume: 1_000,
            adj_close: close,
        })
        .collect()
}

// ── 1. Series Index Discipline ───────────────────────────────────────

proptest! {
    /// Any strictly increasing index with matching values constructs a series.
    #[test]
    fn valid_index_always_constructs(
        (dates, values) in (2usize..60).prop_flat_map(|n| (arb_dates(n), arb_returns(n)))
    ) {
        let series = ReturnSeries::new(dates.clone(), values);
        prop_assert!(series.is_ok());
        let series = series.unwrap();
        prop_assert_eq!(series.dates(), &dates[..]);
    }

    /// split_at partitions without losing or reordering observations.
    #[test]
    fn split_partitions_cleanly(
        (dates, values) in (2usize..60).prop_flat_map(|n| (arb_dates(n), arb_returns(n))),
        split_frac in 0.0..1.0f64,
    ) {
        let series = ReturnSeries::new(dates, values).unwrap();
        let pos = (series.len() as f64 * split_frac) as usize;
        let (head, tail) = series.split_at(pos);

        prop_assert_eq!(head.len() + tail.len(), series.len());

        let rejoined: Vec<f64> = head
            .values()
            .iter()
            .chain(tail.values())
            .copied()
            .collect();
        prop_assert_eq!(&rejoined[..], series.values());

        if let (Some(last_train), Some(first_test)) = (head.last_date(), tail.first_date()) {
            prop_assert!(last_train < first_test, "split must stay chronological");
        }
    }

    /// Mean lies within [min, max] and sample std is never negative.
    #[test]
    fn mean_and_std_are_bounded(
        (dates, values) in (2usize..60).prop_flat_map(|n| (arb_dates(n), arb_returns(n)))
    ) {
        let series = ReturnSeries::new(dates, values.clone()).unwrap();
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        prop_assert!(series.mean() >= min - 1e-12);
        prop_assert!(series.mean() <= max + 1e-12);
        prop_assert!(series.std_dev() >= 0.0);
    }
}

// ── 2. Transform Identities ──────────────────────────────────────────

proptest! {
    /// exp(sum of log-returns) equals the last/first price ratio.
    #[test]
    fn log_returns_compose_to_price_relative(prices in (2usize..50).prop_flat_map(arb_prices)) {
        let bars = bars_from_prices(&prices);
        let series = log_returns(&bars).unwrap();

        prop_assert_eq!(series.len(), bars.len() - 1);

        let total: f64 = series.values().iter().sum();
        let relative = prices[prices.len() - 1] / prices[0];
        prop_assert!((total.exp() - relative).abs() < 1e-9 * relative);
    }

    /// Moving average output: NaN warmup prefix, finite values inside the data range.
    #[test]
    fn moving_average_warmup_and_bounds(
        values in (1usize..40).prop_flat_map(arb_returns),
        window in 1usize..10,
    ) {
        let ma = moving_average(&values, window);
        prop_assert_eq!(ma.len(), values.len());

        for (i, v) in ma.iter().enumerate() {
            if i + 1 < window {
                prop_assert!(v.is_nan());
            } else {
                let min = values[i + 1 - window..=i].iter().copied().fold(f64::INFINITY, f64::min);
                let max = values[i + 1 - window..=i].iter().copied().fold(f64::NEG_INFINITY, f64::max);
                prop_assert!(*v >= min - 1e-12 && *v <= max + 1e-12);
            }
        }
    }

    /// Z-scored output has mean ~0, and sample std ~1 unless the input is constant.
    #[test]
    fn zscore_standardizes_or_zeroes(values in (2usize..40).prop_flat_map(arb_returns)) {
        let z = zscore(&values);
        prop_assert_eq!(z.len(), values.len());

        let mean: f64 = z.iter().sum::<f64>() / z.len() as f64;
        prop_assert!(mean.abs() < 1e-9);

        let var: f64 = z.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (z.len() - 1) as f64;
        // Constant input normalizes to all zeros, anything else to unit std.
        prop_assert!(var.sqrt() < 1e-9 || (var.sqrt() - 1.0).abs() < 1e-9);
    }
}

// ── 3. Baseline Contracts ────────────────────────────────────────────

proptest! {
    /// Every baseline returns predictions aligned to the frame index.
    #[test]
    fn baselines_align_to_frame(
        (train_dates, train_values) in (2usize..40).prop_flat_map(|n| (arb_dates(n), arb_returns(n))),
        n_test in 1usize..20,
        seed in 0u64..1000,
    ) {
        let y_train = ReturnSeries::new(train_dates.clone(), train_values).unwrap();
        let last = *train_dates.last().unwrap();
        let test_dates: Vec<NaiveDate> = (1..=n_test as i64)
            .map(|i| last + chrono::Duration::days(i))
            .collect();
        let frame = FeatureFrame::from_index(test_dates).unwrap();

        let mut models: Vec<Box<dyn Baseline>> = vec![
            Box::new(ZeroBaseline::new()),
            Box::new(RandomNormalBaseline::new(seed)),
            Box::new(HistoricalMeanBaseline::new()),
        ];

        for model in &mut models {
            model.fit(&y_train).unwrap();
            let pred = model.predict(&frame).unwrap();
            prop_assert_eq!(pred.dates(), frame.dates());
            prop_assert!(pred.values().iter().all(|v| v.is_finite()));
        }
    }

    /// Same seed and training data reproduce the random baseline bit for bit.
    #[test]
    fn random_baseline_is_seed_deterministic(
        (train_dates, train_values) in (2usize..40).prop_flat_map(|n| (arb_dates(n), arb_returns(n))),
        seed in 0u64..1000,
    ) {
        let y_train = ReturnSeries::new(train_dates.clone(), train_values).unwrap();
        let last = *train_dates.last().unwrap();
        let frame = FeatureFrame::from_index(
            (1..=10i64).map(|i| last + chrono::Duration::days(i)).collect(),
        )
        .unwrap();

        let mut a = RandomNormalBaseline::new(seed);
        let mut b = RandomNormalBaseline::new(seed);
        a.fit(&y_train).unwrap();
        b.fit(&y_train).unwrap();

        prop_assert_eq!(a.predict(&frame).unwrap(), b.predict(&frame).unwrap());
    }

    /// The historical-mean baseline predicts exactly the training mean everywhere.
    #[test]
    fn historical_mean_predicts_training_mean(
        (train_dates, train_values) in (2usize..40).prop_flat_map(|n| (arb_dates(n), arb_returns(n))),
    ) {
        let y_train = ReturnSeries::new(train_dates.clone(), train_values).unwrap();
        let last = *train_dates.last().unwrap();
        let frame = FeatureFrame::from_index(
            (1..=5i64).map(|i| last + chrono::Duration::days(i)).collect(),
        )
        .unwrap();

        let mut model = HistoricalMeanBaseline::new();
        model.fit(&y_train).unwrap();
        let pred = model.predict(&frame).unwrap();

        for v in pred.values() {
            prop_assert!((v - y_train.mean()).abs() < 1e-12);
        }
    }
}
