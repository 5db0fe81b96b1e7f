//! HCL text → tfguard document model.
//!
//! No filesystem access: callers hand in a path (for ranges and diagnostics) and the file text.
//! Evaluation of attribute values happens later, in `tfguard_model::ModuleBuilder`.

#![forbid(unsafe_code)]

mod file;
mod ignores;
mod lines;
mod lower;
mod tfvars;

#[cfg(test)]
mod proptest;

pub use file::{ParsedFile, parse_file};
pub use ignores::scan_ignores;
pub use lines::LineIndex;
pub use tfvars::parse_tfvars;

use tfguard_types::SourcePath;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("{path}: invalid HCL: {message}")]
    Syntax { path: SourcePath, message: String },
}

impl ParseError {
    pub fn path(&self) -> &SourcePath {
        match self {
            ParseError::Syntax { path, .. } => path,
        }
    }
}

/// Fuzz-friendly API for testing parsing robustness.
/// These functions are designed to never panic on any input.
pub mod fuzz {
    use super::*;

    /// Parse arbitrary text as a `.tf` file. **Never panics** on any input.
    pub fn parse_hcl(text: &str) -> Result<usize, ParseError> {
        let parsed = parse_file(&SourcePath::new("fuzz.tf"), text)?;
        Ok(parsed.blocks.len())
    }

    /// Scan arbitrary text for inline ignore markers. **Never panics** on any input.
    pub fn scan_ignores(text: &str) -> usize {
        super::scan_ignores(&SourcePath::new("fuzz.tf"), text).len()
    }

    /// Parse arbitrary text as a reference such as `data.aws_kms_key.main.arn`.
    pub fn parse_reference(text: &str) -> Option<String> {
        text.parse::<tfguard_model::Reference>()
            .ok()
            .map(|r| r.to_string())
    }
}
