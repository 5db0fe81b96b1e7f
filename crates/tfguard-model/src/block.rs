use crate::attribute::Attribute;
use crate::kinds;
use crate::module::ModuleId;
use std::fmt;
use tfguard_types::SourceRange;

/// Identity of a block, unique within its owning module. Assigned in preorder by the builder.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BlockId {
    pub module: ModuleId,
    pub index: u32,
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.module, self.index)
    }
}

/// A `kind "label" "label" { ... }` construct.
#[derive(Clone, Debug, PartialEq)]
pub struct Block {
    id: BlockId,
    kind: String,
    labels: Vec<String>,
    attributes: Vec<Attribute>,
    blocks: Vec<Block>,
    range: SourceRange,
}

impl Block {
    pub fn new(kind: impl Into<String>, labels: Vec<String>, range: SourceRange) -> Self {
        Self {
            id: BlockId::default(),
            kind: kind.into(),
            labels,
            attributes: Vec::new(),
            blocks: Vec::new(),
            range,
        }
    }

    /// Adds an attribute unless one with the same name exists. Returns `false` on a duplicate;
    /// the first definition is kept.
    pub fn add_attribute(&mut self, attribute: Attribute) -> bool {
        if self.attribute(attribute.name()).is_some() {
            return false;
        }
        self.attributes.push(attribute);
        true
    }

    pub fn add_block(&mut self, block: Block) {
        self.blocks.push(block);
    }

    pub fn id(&self) -> BlockId {
        self.id
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn is_kind(&self, kind: &str) -> bool {
        self.kind == kind
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn range(&self) -> &SourceRange {
        &self.range
    }

    /// Attributes in source order.
    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    /// Nested blocks of every kind, in source order.
    pub fn nested_blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|a| a.name() == name)
    }

    pub fn missing_child(&self, name: &str) -> bool {
        self.attribute(name).is_none()
    }

    /// An attribute or a nested block with this name exists.
    pub fn has_child(&self, name: &str) -> bool {
        self.attribute(name).is_some() || self.block(name).is_some()
    }

    /// Nested blocks of one kind; repeated blocks are returned separately, never merged.
    pub fn blocks(&self, kind: &str) -> Vec<&Block> {
        self.blocks.iter().filter(|b| b.kind == kind).collect()
    }

    pub fn block(&self, kind: &str) -> Option<&Block> {
        self.blocks.iter().find(|b| b.kind == kind)
    }

    pub fn is_resource_type(&self, resource_type: &str) -> bool {
        self.type_label() == Some(resource_type)
    }

    pub fn type_label(&self) -> Option<&str> {
        self.labels.first().map(String::as_str)
    }

    pub fn name_label(&self) -> Option<&str> {
        self.labels.last().map(String::as_str)
    }

    /// Address as written in references: `aws_s3_bucket.logs`, `data.aws_kms_key.main`, `module.db`.
    pub fn full_name(&self) -> String {
        if self.kind == kinds::RESOURCE {
            return self.labels.join(".");
        }
        let mut parts = Vec::with_capacity(self.labels.len() + 1);
        parts.push(self.kind.as_str());
        parts.extend(self.labels.iter().map(String::as_str));
        parts.join(".")
    }

    pub(crate) fn assign_ids(&mut self, module: ModuleId, next: &mut u32) {
        self.id = BlockId {
            module,
            index: *next,
        };
        *next += 1;
        for child in &mut self.blocks {
            child.assign_ids(module, next);
        }
    }

    pub(crate) fn attributes_mut(&mut self) -> &mut [Attribute] {
        &mut self.attributes
    }

    pub(crate) fn nested_blocks_mut(&mut self) -> &mut [Block] {
        &mut self.blocks
    }
}
