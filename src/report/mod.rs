//! Reporting: terminal summaries of a sweep or a single combination.

pub mod format;

pub use format::*;
