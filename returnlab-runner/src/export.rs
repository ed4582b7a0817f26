//! Reporting and export — JSON, CSV, and text artifact generation.
//!
//! Three surfaces for one `ExperimentResult`:
//! - **JSON**: full round-trip serialization with schema versioning
//! - **CSV**: the comparison table for external analysis tools
//! - **Text**: the fixed-width comparison table printed by the CLI
//!
//! Persisted artifacts carry a `schema_version` field; unknown versions are
//! rejected on load.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

use crate::comparison::ComparisonTable;
use crate::runner::{ExperimentResult, SCHEMA_VERSION};

// ─── JSON export ────────────────────────────────────────────────────

/// Serialize an `ExperimentResult` to pretty JSON.
pub fn export_json(result: &ExperimentResult) -> Result<String> {
    serde_json::to_string_pretty(result).context("failed to serialize ExperimentResult to JSON")
}

/// Deserialize an `ExperimentResult` from JSON, rejecting unknown schema versions.
pub fn import_json(json: &str) -> Result<ExperimentResult> {
    let result: ExperimentResult =
        serde_json::from_str(json).context("failed to deserialize ExperimentResult from JSON")?;
    if result.schema_version > SCHEMA_VERSION {
        bail!(
            "unsupported schema version {} (max supported: {})",
            result.schema_version,
            SCHEMA_VERSION
        );
    }
    Ok(result)
}

// ─── CSV export ─────────────────────────────────────────────────────

/// Export the comparison table as CSV.
///
/// Columns: baseline, mse, strategy_sharpe, directional_accuracy
pub fn export_comparison_csv(table: &ComparisonTable) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record(["baseline", "mse", "strategy_sharpe", "directional_accuracy"])?;
    for row in &table.rows {
        wtr.write_record([
            row.name.as_str(),
            &format!("{:.8e}", row.mse),
            &format!("{:.6}", row.strategy_sharpe),
            &format!("{:.4}", row.directional_accuracy),
        ])?;
    }
    let data = wtr.into_inner().context("failed to flush CSV writer")?;
    String::from_utf8(data).context("CSV output is not valid UTF-8")
}

// ─── Text rendering ─────────────────────────────────────────────────

/// Render the comparison table as fixed-width text.
pub fn render_table(table: &ComparisonTable) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<20} {:>14} {:>16} {:>12}",
        "Baseline", "MSE", "Strategy Sharpe", "Dir. Acc."
    );
    let _ = writeln!(out, "{}", "-".repeat(66));
    for row in &table.rows {
        let _ = writeln!(
            out,
            "{:<20} {:>14.4e} {:>16.4} {:>12.4}",
            row.name, row.mse, row.strategy_sharpe, row.directional_accuracy
        );
    }
    out
}

/// Render the full run summary the CLI prints: provenance, stationarity
/// verdict, then the comparison table.
pub fn render_summary(result: &ExperimentResult) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} | {} to {} | {} bars ({} returns)",
        result.config.symbol, result.config.start_date, result.config.end_date,
        result.n_bars, result.n_returns
    );
    let _ = writeln!(
        out,
        "split: {} train / {} test | trials: {} | source: {:?}",
        result.train_len, result.test_len, result.config.n_trials, result.data_source
    );
    let _ = writeln!(
        out,
        "ADF({}): statistic {:.4}, 5% critical {:.2} -> {}",
        result.stationarity.lags,
        result.stationarity.statistic,
        result.stationarity.critical_5pct,
        result.stationarity.verdict()
    );
    if result.is_synthetic() {
        let _ = writeln!(out, "NOTE: run used synthetic data");
    }
    let _ = writeln!(out);
    out.push_str(&render_table(&result.table));
    let _ = writeln!(out, "\nconfig hash:  {}", result.fingerprint.config_hash);
    let _ = writeln!(out, "dataset hash: {}", result.fingerprint.dataset_hash);
    out
}

// ─── Artifact bundle ────────────────────────────────────────────────

/// Files written for one run.
#[derive(Debug, Clone)]
pub struct ArtifactPaths {
    pub run_dir: PathBuf,
    pub result_json: PathBuf,
    pub comparison_csv: PathBuf,
}

/// Save the artifact set for a single run.
///
/// Creates `{symbol}_{config_hash_prefix}_{dataset_hash_prefix}/` under
/// `output_dir` containing `result.json` and `comparison.csv`. Both hash
/// prefixes key the directory, so the same config re-run against a revised
/// dataset lands next to the old artifacts instead of overwriting them.
pub fn save_artifacts(result: &ExperimentResult, output_dir: &Path) -> Result<ArtifactPaths> {
    let prefix = |hash: &str| hash[..12.min(hash.len())].to_string();
    let run_dir = output_dir.join(format!(
        "{}_{}_{}",
        result.config.symbol,
        prefix(&result.fingerprint.config_hash),
        prefix(&result.fingerprint.dataset_hash),
    ));
    std::fs::create_dir_all(&run_dir)
        .with_context(|| format!("failed to create artifact dir {}", run_dir.display()))?;

    let result_json = run_dir.join("result.json");
    std::fs::write(&result_json, export_json(result)?)
        .with_context(|| format!("failed to write {}", result_json.display()))?;

    let comparison_csv = run_dir.join("comparison.csv");
    std::fs::write(&comparison_csv, export_comparison_csv(&result.table)?)
        .with_context(|| format!("failed to write {}", comparison_csv.display()))?;

    Ok(ArtifactPaths {
        run_dir,
        result_json,
        comparison_csv,
    })
}
