use crate::expr::Expr;
use crate::reference::Reference;
use crate::value::{NULL, Value};
use tfguard_types::SourceRange;

/// One `name = expr` pair inside a block.
#[derive(Clone, Debug, PartialEq)]
pub struct Attribute {
    name: String,
    expr: Expr,
    pub(crate) value: Value,
    range: SourceRange,
}

impl Attribute {
    /// A freshly parsed attribute. Its value stays `Null` until the owning module is built.
    pub fn new(name: impl Into<String>, expr: Expr, range: SourceRange) -> Self {
        Self {
            name: name.into(),
            expr,
            value: Value::Null,
            range,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Raw expression as written.
    pub fn expr(&self) -> &Expr {
        &self.expr
    }

    pub fn range(&self) -> &SourceRange {
        &self.range
    }

    /// Reference written in this attribute, if it is exactly one traversal.
    pub fn reference(&self) -> Option<Reference> {
        Reference::parse(&self.expr)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum CaseSensitivity {
    #[default]
    Ordinal,
    IgnoreCase,
}

/// Total, type-aware predicates over an attribute that may be absent.
///
/// Implemented for [`Attribute`] and for `Option<&Attribute>`, so
/// `block.attribute("encrypted").is_false()` works whether or not the attribute is written.
pub trait AttributeQuery {
    fn attribute_ref(&self) -> Option<&Attribute>;

    /// Absent. A present attribute whose value is `null` is not nil.
    fn is_nil(&self) -> bool {
        self.attribute_ref().is_none()
    }

    fn is_not_nil(&self) -> bool {
        !self.is_nil()
    }

    /// Resolved value; `Null` when absent or unresolvable.
    fn value(&self) -> &Value {
        self.attribute_ref().map(|a| &a.value).unwrap_or(&NULL)
    }

    fn is_empty(&self) -> bool {
        match self.value() {
            Value::String(s) => s.is_empty(),
            Value::List(items) => items.is_empty(),
            Value::Map(m) => m.is_empty(),
            _ => false,
        }
    }

    fn is_true(&self) -> bool {
        self.value().as_bool() == Some(true)
    }

    fn is_false(&self) -> bool {
        self.value().as_bool() == Some(false)
    }

    fn is_string(&self) -> bool {
        matches!(self.value(), Value::String(_))
    }

    fn is_number(&self) -> bool {
        matches!(self.value(), Value::Number(_))
    }

    fn is_bool(&self) -> bool {
        matches!(self.value(), Value::Bool(_))
    }

    fn is_list(&self) -> bool {
        matches!(self.value(), Value::List(_))
    }

    fn is_map(&self) -> bool {
        matches!(self.value(), Value::Map(_))
    }

    /// String equality. Non-string values never equal.
    fn equals(&self, expected: &str, case: CaseSensitivity) -> bool {
        let Some(actual) = self.value().as_str() else {
            return false;
        };
        match case {
            CaseSensitivity::Ordinal => actual == expected,
            CaseSensitivity::IgnoreCase => actual.to_lowercase() == expected.to_lowercase(),
        }
    }

    fn equals_ordinal(&self, expected: &str) -> bool {
        self.equals(expected, CaseSensitivity::Ordinal)
    }

    /// List element, substring, or map key, depending on the value's type.
    fn contains(&self, needle: &str) -> bool {
        match self.value() {
            Value::List(items) => items.iter().any(|v| v.as_str() == Some(needle)),
            Value::String(s) => s.contains(needle),
            Value::Map(m) => m.contains_key(needle),
            _ => false,
        }
    }

    fn not_contains(&self, needle: &str) -> bool {
        !self.contains(needle)
    }

    fn starts_with(&self, prefix: &str) -> bool {
        self.value().as_str().is_some_and(|s| s.starts_with(prefix))
    }

    fn ends_with(&self, suffix: &str) -> bool {
        self.value().as_str().is_some_and(|s| s.ends_with(suffix))
    }

    fn is_any(&self, candidates: &[&str]) -> bool {
        candidates.iter().any(|c| self.equals_ordinal(c))
    }

    fn is_data_block_reference(&self) -> bool {
        self.attribute_ref()
            .and_then(Attribute::reference)
            .is_some_and(|r| r.is_data())
    }

    fn is_resource_block_reference(&self, resource_type: &str) -> bool {
        self.attribute_ref()
            .and_then(Attribute::reference)
            .is_some_and(|r| {
                r.kind() == crate::kinds::RESOURCE
                    && r.labels().first().map(String::as_str) == Some(resource_type)
            })
    }
}

impl AttributeQuery for Attribute {
    fn attribute_ref(&self) -> Option<&Attribute> {
        Some(self)
    }
}

impl AttributeQuery for Option<&Attribute> {
    fn attribute_ref(&self) -> Option<&Attribute> {
        *self
    }
}
