use crate::ParseError;
use crate::ignores::scan_ignores;
use crate::lines::LineIndex;
use crate::lower::lower;
use hcl_edit::Span;
use hcl_edit::structure::{self, BlockLabel, Body, Structure};
use tfguard_model::{Attribute, Block, IgnoreDirective};
use tfguard_types::{SourcePath, SourceRange};

/// Blocks and inline ignore markers from one `.tf` file.
#[derive(Clone, Debug, Default)]
pub struct ParsedFile {
    pub path: SourcePath,
    pub blocks: Vec<Block>,
    pub ignores: Vec<IgnoreDirective>,
}

/// Parse one `.tf` file.
///
/// A redefined attribute key is a syntax error for the whole file, so every lowered block has
/// unique attribute names.
pub fn parse_file(path: &SourcePath, text: &str) -> Result<ParsedFile, ParseError> {
    let body = hcl_edit::parser::parse_body(text).map_err(|e| ParseError::Syntax {
        path: path.clone(),
        message: e.to_string(),
    })?;

    let lines = LineIndex::new(path.clone(), text);
    let whole = lines.range(0..text.len());
    let mut blocks = Vec::new();

    for structure in body.iter() {
        match structure {
            Structure::Block(b) => blocks.push(lower_block(b, &lines, &whole)),
            Structure::Attribute(a) => {
                tracing::debug!(%path, attribute = a.key.as_str(), "ignoring top-level attribute");
            }
        }
    }

    Ok(ParsedFile {
        path: path.clone(),
        blocks,
        ignores: scan_ignores(path, text),
    })
}

fn lower_block(block: &structure::Block, lines: &LineIndex, parent: &SourceRange) -> Block {
    let labels = block
        .labels
        .iter()
        .map(|label| match label {
            BlockLabel::String(s) => s.value().clone(),
            BlockLabel::Ident(i) => i.as_str().to_string(),
        })
        .collect();
    let range = lines.range_or(block.span(), parent);
    let mut out = Block::new(block.ident.as_str(), labels, range.clone());
    lower_body(&block.body, &mut out, lines, &range);
    out
}

fn lower_body(body: &Body, out: &mut Block, lines: &LineIndex, range: &SourceRange) {
    for structure in body.iter() {
        match structure {
            Structure::Attribute(a) => {
                let attr_range = lines.range_or(a.span(), range);
                out.add_attribute(Attribute::new(a.key.as_str(), lower(&a.value), attr_range));
            }
            Structure::Block(b) => {
                let nested = lower_block(b, lines, range);
                out.add_block(nested);
            }
        }
    }
}
