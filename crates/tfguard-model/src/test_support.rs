use crate::attribute::Attribute;
use crate::block::Block;
use crate::expr::{Expr, Step, Traversal};
use crate::module::{Module, ModuleBuilder, ModuleId};
use crate::value::Value;
use tfguard_types::{SourcePath, SourceRange};

pub fn range(line: u32) -> SourceRange {
    SourceRange::new(SourcePath::new("main.tf"), line, line)
}

/// Literal attribute with its value already resolved.
pub fn attr(name: &str, value: Value) -> Attribute {
    let mut a = Attribute::new(name, Expr::Literal(value.clone()), range(1));
    a.value = value;
    a
}

/// Attribute with an arbitrary expression; its value is filled in by the module builder.
pub fn attr_expr(name: &str, expr: Expr) -> Attribute {
    Attribute::new(name, expr, range(1))
}

pub fn traversal(root: &str, attrs: &[&str]) -> Expr {
    Expr::Traversal(Traversal {
        root: root.to_string(),
        steps: attrs.iter().map(|a| Step::Attr(a.to_string())).collect(),
    })
}

pub fn block(kind: &str, labels: &[&str]) -> Block {
    Block::new(
        kind,
        labels.iter().map(|l| l.to_string()).collect(),
        range(1),
    )
}

pub fn block_with(kind: &str, labels: &[&str], attributes: Vec<Attribute>) -> Block {
    let mut b = block(kind, labels);
    for a in attributes {
        b.add_attribute(a);
    }
    b
}

pub fn module_from(blocks: Vec<Block>) -> Module {
    let mut builder = ModuleBuilder::new(ModuleId(0), "root", SourcePath::default());
    builder.add_file(SourcePath::new("main.tf"), blocks, Vec::new());
    builder.build()
}
