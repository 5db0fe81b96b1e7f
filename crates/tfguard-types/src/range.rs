use crate::SourcePath;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Line range of a block or attribute inside one file. Lines are 1-based and inclusive.
#[derive(
    Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
pub struct SourceRange {
    pub path: SourcePath,
    pub start_line: u32,
    pub end_line: u32,
}

impl SourceRange {
    pub fn new(path: SourcePath, start_line: u32, end_line: u32) -> Self {
        Self {
            path,
            start_line,
            end_line: end_line.max(start_line),
        }
    }

    pub fn contains_line(&self, line: u32) -> bool {
        self.start_line <= line && line <= self.end_line
    }

    /// True when `other` lies entirely inside `self` (same file).
    pub fn encloses(&self, other: &SourceRange) -> bool {
        self.path == other.path
            && self.start_line <= other.start_line
            && other.end_line <= self.end_line
    }
}

impl std::fmt::Display for SourceRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.start_line == self.end_line {
            write!(f, "{}:{}", self.path, self.start_line)
        } else {
            write!(f, "{}:{}-{}", self.path, self.start_line, self.end_line)
        }
    }
}
