//! `cf-sweep` library crate.
//!
//! The binary (`cfsweep`) is a thin wrapper around this library so that:
//!
//! - the sweep is testable without spawning processes
//! - parsers, alignment and scoring are reusable on their own
//! - code stays easy to navigate as the project grows

pub mod app;
pub mod cli;
pub mod domain;
pub mod error;
pub mod grid;
pub mod io;
pub mod math;
pub mod report;
pub mod sweep;
