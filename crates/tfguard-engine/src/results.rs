use tfguard_model::{Attribute, Block};
use tfguard_types::{LocatorKind, SourceRange};

/// Where a result points: the whole block, or one attribute inside it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Locator {
    Block { range: SourceRange, name: String },
    Attribute { range: SourceRange, name: String },
}

impl Locator {
    pub fn range(&self) -> &SourceRange {
        match self {
            Locator::Block { range, .. } | Locator::Attribute { range, .. } => range,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Locator::Block { name, .. } | Locator::Attribute { name, .. } => name,
        }
    }

    pub fn kind(&self) -> LocatorKind {
        match self {
            Locator::Block { .. } => LocatorKind::Block,
            Locator::Attribute { .. } => LocatorKind::Attribute,
        }
    }
}

impl From<&Block> for Locator {
    fn from(block: &Block) -> Self {
        Locator::Block {
            range: block.range().clone(),
            name: block.full_name(),
        }
    }
}

impl From<&Attribute> for Locator {
    fn from(attribute: &Attribute) -> Self {
        Locator::Attribute {
            range: attribute.range().clone(),
            name: attribute.name().to_string(),
        }
    }
}

/// One failed check. Passing checks produce nothing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CheckResult {
    pub message: String,
    pub locator: Locator,
}

/// Results of one rule evaluated against one block.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Results {
    items: Vec<CheckResult>,
}

impl Results {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, message: impl Into<String>, locator: impl Into<Locator>) {
        self.items.push(CheckResult {
            message: message.into(),
            locator: locator.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CheckResult> {
        self.items.iter()
    }

    pub fn extend(&mut self, other: Results) {
        self.items.extend(other.items);
    }
}

impl IntoIterator for Results {
    type Item = CheckResult;
    type IntoIter = std::vec::IntoIter<CheckResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}
