//! Export sweep results.
//!
//! - per-combination CSV (`--export`), one row per grid point in grid order
//! - best-result summary JSON (`--export-best`)

use std::fs::File;
use std::path::Path;

use serde::Serialize;

use crate::domain::SweepSummary;
use crate::error::AppError;
use crate::sweep::SweepOutcome;

#[derive(Debug, Serialize)]
struct ResultRow<'a> {
    index: usize,
    ct: f64,
    at: f64,
    css: f64,
    a2: f64,
    path: &'a str,
    error: Option<f64>,
    status: &'a str,
}

/// Write every evaluated and skipped combination to a CSV file.
pub fn write_results_csv(path: &Path, outcome: &SweepOutcome) -> Result<(), AppError> {
    let mut writer = csv::Writer::from_path(path)
        .map_err(|e| AppError::new(2, format!("Failed to create export CSV '{}': {e}", path.display())))?;

    let mut rows: Vec<ResultRow<'_>> = outcome
        .evaluated
        .iter()
        .map(|r| ResultRow {
            index: r.index,
            ct: r.combo.ct,
            at: r.combo.at,
            css: r.combo.css,
            a2: r.combo.a2,
            path: &r.path,
            error: Some(r.error),
            status: "ok",
        })
        .chain(outcome.skipped.iter().map(|s| ResultRow {
            index: s.index,
            ct: s.combo.ct,
            at: s.combo.at,
            css: s.combo.css,
            a2: s.combo.a2,
            path: &s.path,
            error: None,
            status: &s.reason,
        }))
        .collect();
    rows.sort_by_key(|r| r.index);

    for row in &rows {
        writer
            .serialize(row)
            .map_err(|e| AppError::new(2, format!("Failed to write export CSV row: {e}")))?;
    }
    writer
        .flush()
        .map_err(|e| AppError::new(2, format!("Failed to write export CSV: {e}")))?;

    Ok(())
}

/// Write the sweep summary as pretty-printed JSON.
pub fn write_summary_json(path: &Path, summary: &SweepSummary) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create summary JSON '{}': {e}", path.display())))?;
    serde_json::to_writer_pretty(file, summary)
        .map_err(|e| AppError::new(2, format!("Failed to write summary JSON: {e}")))?;
    Ok(())
}
