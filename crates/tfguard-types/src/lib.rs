//! Stable DTOs and IDs used across the tfguard workspace.
//!
//! This crate is intentionally boring:
//! - source paths and ranges attached to every block, attribute and finding
//! - the finding/diagnostic/report shapes handed to reporting collaborators
//! - stable string IDs for diagnostics and the inline ignore marker

#![forbid(unsafe_code)]

pub mod ids;
pub mod path;
pub mod range;
pub mod report;

pub use path::SourcePath;
pub use range::SourceRange;
pub use report::{
    Diagnostic, Finding, LocatorKind, ScanReport, ScanSummary, Severity, SeverityCounts, ToolMeta,
    SCHEMA_REPORT_V1,
};
