//! Error types.
//!
//! - `EvalError`: typed failures from parsing, alignment and scoring. These are
//!   what the sweep records when it skips a combination.
//! - `AppError`: top-level error carrying the process exit code.
//!
//! Exit codes:
//! - 2: I/O or configuration problem
//! - 3: no usable data
//! - 4: numeric/domain failure

use std::path::PathBuf;

/// Failure while turning one file into a score.
#[derive(thiserror::Error, Debug)]
pub enum EvalError {
    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("no data rows after the {header_lines}-line header")]
    EmptyInput { header_lines: usize },

    #[error("query point {x} is outside the candidate range [{min}, {max}]")]
    Domain { x: f64, min: f64, max: f64 },

    #[error("candidate series needs at least 2 distinct x values (found {distinct})")]
    Degenerate { distinct: usize },

    #[error("series length mismatch: {left} vs {right}")]
    LengthMismatch { left: usize, right: usize },

    #[error("file not found '{}'", path.display())]
    MissingFile { path: PathBuf },

    #[error("failed to read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("error metric is not finite ({value})")]
    NonFinite { value: f64 },

    #[error("invalid {axis} axis: {message}")]
    InvalidGrid { axis: &'static str, message: String },
}

impl EvalError {
    pub fn exit_code(&self) -> u8 {
        match self {
            EvalError::MissingFile { .. } | EvalError::Io { .. } | EvalError::InvalidGrid { .. } => 2,
            EvalError::Parse { .. } | EvalError::EmptyInput { .. } => 3,
            EvalError::Domain { .. }
            | EvalError::Degenerate { .. }
            | EvalError::LengthMismatch { .. }
            | EvalError::NonFinite { .. } => 4,
        }
    }
}

/// Failure that stops a sweep.
#[derive(thiserror::Error, Debug)]
pub enum SweepError {
    #[error("{path}: {source}")]
    Combination {
        path: String,
        #[source]
        source: EvalError,
    },

    #[error(transparent)]
    Grid(#[from] EvalError),

    #[error("failed to write run log: {0}")]
    Log(#[from] std::io::Error),

    #[error("failed to start worker pool: {0}")]
    Pool(#[from] rayon::ThreadPoolBuildError),
}

impl From<SweepError> for AppError {
    fn from(err: SweepError) -> Self {
        let exit_code = match &err {
            SweepError::Combination { source, .. } | SweepError::Grid(source) => source.exit_code(),
            SweepError::Log(_) | SweepError::Pool(_) => 2,
        };
        AppError::new(exit_code, err.to_string())
    }
}

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl From<EvalError> for AppError {
    fn from(err: EvalError) -> Self {
        AppError::new(err.exit_code(), err.to_string())
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}
