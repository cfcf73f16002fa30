//! Parameter search space.
//!
//! - axis parsing for the command line (`axis`)
//! - combination -> directory path (`path`)
//! - enumeration of the Cartesian product (below)
//!
//! Enumeration order is fixed, outer to inner: `ct`, `at`, `css`, `a2`.
//! The sweep relies on this for progress logging and tie-breaking.

pub mod axis;
pub mod path;

pub use axis::*;
pub use path::*;

use crate::domain::{ParamCombo, ParamGrid};
use crate::error::EvalError;

impl ParamGrid {
    /// Every axis must be non-empty and finite.
    pub fn validate(&self) -> Result<(), EvalError> {
        for (axis, values) in self.axes() {
            if values.is_empty() {
                return Err(EvalError::InvalidGrid {
                    axis,
                    message: "no values".to_string(),
                });
            }
            if let Some(v) = values.iter().find(|v| !v.is_finite()) {
                return Err(EvalError::InvalidGrid {
                    axis,
                    message: format!("non-finite value {v}"),
                });
            }
        }
        Ok(())
    }

    /// Size of the search space.
    pub fn total_jobs(&self) -> usize {
        self.ct.len() * self.at.len() * self.css.len() * self.a2.len()
    }

    /// Number of combinations sharing one `ct` value.
    pub fn block_len(&self) -> usize {
        self.at.len() * self.css.len() * self.a2.len()
    }

    /// All combinations in sweep order.
    pub fn combinations(&self) -> impl Iterator<Item = ParamCombo> + '_ {
        self.ct.iter().flat_map(move |&ct| self.block(ct))
    }

    /// Combinations for a single `ct` value, in sweep order.
    pub fn block(&self, ct: f64) -> Vec<ParamCombo> {
        let mut out = Vec::with_capacity(self.block_len());
        for &at in &self.at {
            for &css in &self.css {
                for &a2 in &self.a2 {
                    out.push(ParamCombo { ct, at, css, a2 });
                }
            }
        }
        out
    }

    fn axes(&self) -> [(&'static str, &[f64]); 4] {
        [
            ("ct", self.ct.as_slice()),
            ("at", self.at.as_slice()),
            ("css", self.css.as_slice()),
            ("a2", self.a2.as_slice()),
        ]
    }
}
