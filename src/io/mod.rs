//! Input/output helpers.
//!
//! - series parsers for simulation/experimental files (`series`)
//! - the on-disk simulation tree (`tree`)
//! - the timestamped run log (`log`)
//! - result exports (CSV/JSON) (`export`)

pub mod export;
pub mod log;
pub mod series;
pub mod tree;

pub use export::*;
pub use series::*;
pub use tree::*;
