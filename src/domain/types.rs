//! Shared domain types.
//!
//! These are kept small and serializable so the same values can be:
//!
//! - passed through the sweep in-memory
//! - written to the results CSV / summary JSON
//! - printed by the report formatter

use std::path::PathBuf;

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::error::EvalError;

/// Default C grid (turbulence constant `Ct`).
pub const DEFAULT_CT: [f64; 13] = [
    3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0, 11.0, 12.0, 13.0, 14.0, 15.0,
];
/// Default A grid (`At`).
pub const DEFAULT_AT: [f64; 11] = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0, 11.0];
/// Default Css grid.
pub const DEFAULT_CSS: [f64; 6] = [0.5, 1.0, 1.5, 2.0, 2.5, 3.0];
/// Default a2 grid.
pub const DEFAULT_A2: [f64; 4] = [0.4, 0.5, 0.6, 0.7];

/// Default experimental reference file (relative to the root directory).
pub const DEFAULT_EXPERIMENTAL_FILE: &str = "t3a_exp.tec";
/// Default simulation output filename inside each combination directory.
pub const DEFAULT_SIMULATION_FILE: &str = "di_uduct.tec";

/// Paired numeric series `(x, y)` with `y[i]` belonging to `x[i]`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Series {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

impl Series {
    pub fn new(x: Vec<f64>, y: Vec<f64>) -> Result<Self, EvalError> {
        if x.len() != y.len() {
            return Err(EvalError::LengthMismatch {
                left: x.len(),
                right: y.len(),
            });
        }
        Ok(Self { x, y })
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// `(min, max)` of the independent variable, if any points exist.
    pub fn x_range(&self) -> Option<(f64, f64)> {
        let mut iter = self.x.iter().copied();
        let first = iter.next()?;
        Some(iter.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v))))
    }
}

/// One point of the search space: a value from each of the four grids.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParamCombo {
    pub ct: f64,
    pub at: f64,
    pub css: f64,
    pub a2: f64,
}

/// The four parameter axes. The search space is their Cartesian product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParamGrid {
    pub ct: Vec<f64>,
    pub at: Vec<f64>,
    pub css: Vec<f64>,
    pub a2: Vec<f64>,
}

impl Default for ParamGrid {
    fn default() -> Self {
        Self {
            ct: DEFAULT_CT.to_vec(),
            at: DEFAULT_AT.to_vec(),
            css: DEFAULT_CSS.to_vec(),
            a2: DEFAULT_A2.to_vec(),
        }
    }
}

/// A scored combination.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvalResult {
    /// Position in grid enumeration order.
    pub index: usize,
    pub combo: ParamCombo,
    /// Candidate path relative to the root (see `grid::candidate_path`).
    pub path: String,
    pub error: f64,
}

/// A combination that could not be scored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkippedCombo {
    pub index: usize,
    pub combo: ParamCombo,
    pub path: String,
    pub reason: String,
}

/// What to do when a single combination fails to load, parse or align.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    /// Log the failure, record it, continue with the next combination.
    Skip,
    /// Stop the sweep and return the failure.
    Abort,
}

/// Fully resolved configuration for one sweep.
#[derive(Debug, Clone)]
pub struct SweepConfig {
    /// Directory containing the `Ct_=_*` tree.
    pub root: PathBuf,
    pub experimental_path: PathBuf,
    /// Filename looked up inside each combination directory.
    pub simulation_file: String,
    pub grid: ParamGrid,
    /// Worker threads; 1 means fully sequential.
    pub jobs: usize,
    pub failure_policy: FailurePolicy,
    /// Where the run log goes; `None` disables the log file.
    pub log_dir: Option<PathBuf>,
    pub top_n: usize,
    pub export_results: Option<PathBuf>,
    pub export_best: Option<PathBuf>,
}

/// Portable summary of a finished sweep (written by `--export-best`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepSummary {
    pub tool: String,
    pub finished_at: DateTime<Local>,
    pub grid: ParamGrid,
    pub total_jobs: usize,
    pub evaluated: usize,
    pub skipped: usize,
    pub best: Option<EvalResult>,
}
