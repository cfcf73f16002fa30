//! Simulation output tree on disk.
//!
//! The external job runner leaves one output file per combination at
//! `<root>/Ct_=_{ct}/At_=_{at}/Css_=_{css}/a2_=_{a2}/<file>`.

use std::path::{Path, PathBuf};

use crate::domain::{ParamCombo, Series};
use crate::error::{AppError, EvalError};
use crate::io::series::{SeriesFormat, read_series_file};
use crate::sweep::CandidateSource;

/// Environment variable overriding the root directory (also read from `.env`).
pub const ROOT_ENV_VAR: &str = "CFSWEEP_ROOT";

#[derive(Debug, Clone)]
pub struct SimulationTree {
    root: PathBuf,
    file_name: String,
}

impl SimulationTree {
    pub fn new(root: impl Into<PathBuf>, file_name: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            file_name: file_name.into(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Full path of the simulation file under a candidate directory.
    pub fn file_path(&self, candidate_path: &str) -> PathBuf {
        self.root.join(candidate_path).join(&self.file_name)
    }
}

impl CandidateSource for SimulationTree {
    fn load(&self, _combo: &ParamCombo, path: &str) -> Result<Series, EvalError> {
        read_series_file(&self.file_path(path), SeriesFormat::Simulation)
    }
}

/// Resolve the sweep root.
///
/// Order: explicit argument, `CFSWEEP_ROOT` (environment or `.env`), current
/// working directory.
pub fn resolve_root(explicit: Option<PathBuf>) -> Result<PathBuf, AppError> {
    if explicit.is_none() {
        dotenvy::dotenv().ok();
    }
    select_root(explicit, std::env::var(ROOT_ENV_VAR).ok(), std::env::current_dir)
}

fn select_root(
    explicit: Option<PathBuf>,
    env_value: Option<String>,
    current_dir: impl FnOnce() -> std::io::Result<PathBuf>,
) -> Result<PathBuf, AppError> {
    if let Some(root) = explicit {
        return Ok(root);
    }

    if let Some(value) = env_value {
        let value = value.trim();
        if !value.is_empty() {
            return Ok(PathBuf::from(value));
        }
    }

    current_dir().map_err(|e| AppError::new(2, format!("Failed to determine working directory: {e}")))
}
