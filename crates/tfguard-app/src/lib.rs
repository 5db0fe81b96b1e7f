//! Use case orchestration for tfguard.
//!
//! This crate provides the application layer: it coordinates settings, the loader, the rule
//! catalog and the engine. It is intentionally thin and delegates heavy lifting to those crates.
//!
//! A front end depends on this; it only handles argument parsing, rendering and exit codes.

#![forbid(unsafe_code)]

mod logging;
mod scan;

pub use logging::{LOG_ENV, init_tracing};
pub use scan::{ScanInput, ScanOutput, run_scan};
