//! Numeric building blocks: curve alignment and the error metric.

pub mod interp;
pub mod metric;

pub use interp::*;
pub use metric::*;
