//! Curve discrepancy metric.
//!
//! ```text
//! error(a, b) = sqrt(Σ (a_i - b_i)^2) / n
//! ```
//!
//! This is the Euclidean distance scaled by `n` (not `sqrt(n)`), so it is not
//! an RMS value. It is kept as-is so errors stay comparable with earlier runs.

use nalgebra::DVector;

use crate::error::EvalError;

/// Normalized Euclidean distance between two equal-length sequences.
///
/// Two empty sequences are identical and score `0.0`.
pub fn normalized_distance(a: &[f64], b: &[f64]) -> Result<f64, EvalError> {
    if a.len() != b.len() {
        return Err(EvalError::LengthMismatch {
            left: a.len(),
            right: b.len(),
        });
    }
    if a.is_empty() {
        return Ok(0.0);
    }

    let diff = DVector::from_column_slice(a) - DVector::from_column_slice(b);
    Ok(diff.norm() / a.len() as f64)
}
