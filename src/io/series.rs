//! Series parsers for the two tabular input formats.
//!
//! - Simulation output (`di_uduct.tec`): 3 header lines, then whitespace
//!   separated rows `<raw_x> <ignored> <cf> ...`. The raw streamwise coordinate
//!   is converted to a Reynolds number via `(raw_x - 0.07) * 1e6`.
//! - Experimental reference (`t3a_exp.tec`): 1 header line, then comma
//!   separated rows `<Rex>,<cf>,...`.
//!
//! Blank lines are ignored. Any other short or non-numeric row is an error:
//! a partially parsed curve would silently shift the error metric.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use crate::domain::Series;
use crate::error::EvalError;

pub const SIMULATION_HEADER_LINES: usize = 3;
pub const EXPERIMENTAL_HEADER_LINES: usize = 1;

/// Leading-edge offset of the simulation x coordinate.
pub const REX_OFFSET: f64 = 0.07;
/// Unit Reynolds number of the simulation setup.
pub const REX_SCALE: f64 = 1e6;

/// Which of the two layouts a file uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesFormat {
    Simulation,
    Experimental,
}

impl SeriesFormat {
    pub fn header_lines(self) -> usize {
        match self {
            SeriesFormat::Simulation => SIMULATION_HEADER_LINES,
            SeriesFormat::Experimental => EXPERIMENTAL_HEADER_LINES,
        }
    }
}

/// Convert a raw simulation x coordinate to the Reynolds number used by the
/// experimental data.
pub fn rex_from_raw(raw_x: f64) -> f64 {
    (raw_x - REX_OFFSET) * REX_SCALE
}

/// Parse file contents in the given format.
pub fn parse_series(text: &str, format: SeriesFormat) -> Result<Series, EvalError> {
    match format {
        SeriesFormat::Simulation => parse_simulation(text),
        SeriesFormat::Experimental => parse_experimental(text),
    }
}

/// Read and parse a file. A missing file is reported as `MissingFile` so the
/// sweep can tell "not simulated yet" apart from unreadable output.
pub fn read_series_file(path: &Path, format: SeriesFormat) -> Result<Series, EvalError> {
    let text = fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => EvalError::MissingFile {
            path: path.to_path_buf(),
        },
        _ => EvalError::Io {
            path: path.to_path_buf(),
            source: e,
        },
    })?;
    parse_series(&text, format)
}

/// Simulation format: take the 1st and 3rd whitespace token of each row.
pub fn parse_simulation(text: &str) -> Result<Series, EvalError> {
    let mut x = Vec::new();
    let mut y = Vec::new();

    for (idx, line) in text.lines().enumerate().skip(SIMULATION_HEADER_LINES) {
        let line_no = idx + 1;
        if line.trim().is_empty() {
            continue;
        }

        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.len() < 3 {
            return Err(EvalError::Parse {
                line: line_no,
                message: format!(
                    "expected at least 3 whitespace-separated fields, found {}",
                    tokens.len()
                ),
            });
        }

        let raw_x = parse_number(tokens[0], line_no)?;
        let cf = parse_number(tokens[2], line_no)?;
        x.push(rex_from_raw(raw_x));
        y.push(cf);
    }

    if x.is_empty() {
        return Err(EvalError::EmptyInput {
            header_lines: SIMULATION_HEADER_LINES,
        });
    }

    Series::new(x, y)
}

/// Experimental format: take the 1st and 2nd comma field of each row.
pub fn parse_experimental(text: &str) -> Result<Series, EvalError> {
    // Exactly one header line is dropped, whatever it contains.
    let body = text.split_once('\n').map_or("", |(_, rest)| rest);
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .trim(csv::Trim::All)
        .from_reader(body.as_bytes());

    let mut x = Vec::new();
    let mut y = Vec::new();

    for (idx, result) in reader.records().enumerate() {
        // Fallback assumes one record per line after the header.
        let fallback_line = idx + EXPERIMENTAL_HEADER_LINES + 1;
        let record = result.map_err(|e| EvalError::Parse {
            line: fallback_line,
            message: format!("CSV parse error: {e}"),
        })?;
        let line_no = record
            .position()
            .map(|p| p.line() as usize + EXPERIMENTAL_HEADER_LINES)
            .unwrap_or(fallback_line);

        if record.iter().all(|field| field.is_empty()) {
            continue;
        }
        if record.len() < 2 {
            return Err(EvalError::Parse {
                line: line_no,
                message: format!(
                    "expected at least 2 comma-separated fields, found {}",
                    record.len()
                ),
            });
        }

        x.push(parse_number(&record[0], line_no)?);
        y.push(parse_number(&record[1], line_no)?);
    }

    if x.is_empty() {
        return Err(EvalError::EmptyInput {
            header_lines: EXPERIMENTAL_HEADER_LINES,
        });
    }

    Series::new(x, y)
}

fn parse_number(token: &str, line: usize) -> Result<f64, EvalError> {
    let value: f64 = token.trim().parse().map_err(|_| EvalError::Parse {
        line,
        message: format!("invalid number '{token}'"),
    })?;
    if !value.is_finite() {
        return Err(EvalError::Parse {
            line,
            message: format!("non-finite value '{token}'"),
        });
    }
    Ok(value)
}
