//! Domain types used throughout the sweep.
//!
//! This module defines:
//!
//! - numeric series (`Series`)
//! - the parameter search space (`ParamGrid`, `ParamCombo`)
//! - per-combination outcomes (`EvalResult`, `SkippedCombo`)
//! - run configuration (`SweepConfig`, `FailurePolicy`)

pub mod types;

pub use types::*;
