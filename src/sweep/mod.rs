//! Grid search over the four model constants.
//!
//! Responsibilities:
//!
//! - evaluate every combination against the reference curve (`controller`)
//! - keep the running minimum (`tracker`)
//! - optional parallel evaluation with deterministic, grid-ordered results

pub mod controller;
pub mod tracker;

pub use controller::*;
pub use tracker::*;
