use std::ops::Range;
use tfguard_types::{SourcePath, SourceRange};

/// Byte offset → 1-based line lookup for one file.
#[derive(Clone, Debug)]
pub struct LineIndex {
    path: SourcePath,
    /// Byte offset at which each line starts.
    starts: Vec<usize>,
    len: usize,
}

impl LineIndex {
    pub fn new(path: SourcePath, source: &str) -> Self {
        let mut starts = vec![0];
        starts.extend(
            source
                .bytes()
                .enumerate()
                .filter(|&(_, b)| b == b'\n')
                .map(|(i, _)| i + 1),
        );
        Self {
            path,
            starts,
            len: source.len(),
        }
    }

    pub fn path(&self) -> &SourcePath {
        &self.path
    }

    pub fn line_of(&self, offset: usize) -> u32 {
        let offset = offset.min(self.len);
        let line = match self.starts.binary_search(&offset) {
            Ok(i) => i + 1,
            Err(i) => i,
        };
        line as u32
    }

    /// Range covering a byte span. The end offset is exclusive.
    pub fn range(&self, span: Range<usize>) -> SourceRange {
        let start = self.line_of(span.start);
        let end = if span.end > span.start {
            self.line_of(span.end - 1)
        } else {
            start
        };
        SourceRange::new(self.path.clone(), start, end)
    }

    /// Like [`LineIndex::range`], falling back when the syntax node carries no span.
    pub fn range_or(&self, span: Option<Range<usize>>, fallback: &SourceRange) -> SourceRange {
        span.map(|s| self.range(s))
            .unwrap_or_else(|| fallback.clone())
    }
}
