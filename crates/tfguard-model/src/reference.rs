use crate::expr::{Expr, Step, Traversal};
use crate::kinds;
use crate::value::Value;
use std::fmt;
use std::str::FromStr;

/// A symbolic pointer `<kind>.<label>[.<label>...].<attribute>` parsed from a traversal.
///
/// Label arity is fixed by the root keyword:
///
/// | written as                     | kind       | labels |
/// |--------------------------------|------------|--------|
/// | `aws_kms_key.main.arn`         | `resource` | 2      |
/// | `data.aws_kms_key.main.key_id` | `data`     | 2      |
/// | `module.db.endpoint`           | `module`   | 1      |
/// | `var.region`                   | `variable` | 1      |
/// | `local.tags`                   | `local`    | 1      |
/// | `count.index`, `each.key`, ... | root word  | 0      |
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Reference {
    kind: String,
    labels: Vec<String>,
    attribute: Option<String>,
    path: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("`{0}` is not a reference")]
pub struct ParseReferenceError(String);

const LOCAL: &str = "local";

impl Reference {
    /// Parse a raw attribute expression; `None` unless it is a single traversal
    /// (optionally wrapped as `"${...}"`).
    pub fn parse(expr: &Expr) -> Option<Reference> {
        expr.as_traversal().and_then(Reference::from_traversal)
    }

    pub fn from_traversal(traversal: &Traversal) -> Option<Reference> {
        let (kind, arity, mut labels) = match traversal.root.as_str() {
            "data" => (kinds::DATA, 2, Vec::new()),
            "module" => (kinds::MODULE, 1, Vec::new()),
            "var" => (kinds::VARIABLE, 1, Vec::new()),
            LOCAL => (LOCAL, 1, Vec::new()),
            "count" | "each" | "path" | "self" | "terraform" => {
                (traversal.root.as_str(), 0, Vec::new())
            }
            resource_type => (kinds::RESOURCE, 1, vec![resource_type.to_string()]),
        };

        let mut steps = traversal.steps.iter();
        for _ in 0..arity {
            match steps.next() {
                Some(Step::Attr(name)) => labels.push(name.clone()),
                _ => return None,
            }
        }

        // Instance keys (`[0]`, `["a"]`, `[*]`) between the labels and the attribute are skipped.
        let mut names = steps.filter_map(|s| match s {
            Step::Attr(name) => Some(name.clone()),
            _ => None,
        });
        let attribute = names.next();
        let path = names.collect();

        Some(Reference {
            kind: kind.to_string(),
            labels,
            attribute,
            path,
        })
    }

    /// Block kind this reference targets (`resource`, `data`, `module`, `variable`), or the
    /// root keyword for references that never target a block.
    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// First attribute after the labels, e.g. `key_id` in `data.aws_kms_key.main.key_id`.
    pub fn attribute(&self) -> Option<&str> {
        self.attribute.as_deref()
    }

    /// Attribute names after [`Reference::attribute`].
    pub fn path(&self) -> &[String] {
        &self.path
    }

    pub fn is_block_reference(&self) -> bool {
        matches!(
            self.kind.as_str(),
            kinds::RESOURCE | kinds::DATA | kinds::MODULE | kinds::VARIABLE
        )
    }

    pub fn is_data(&self) -> bool {
        self.kind == kinds::DATA
    }

    /// Address of the target block without the attribute (`data.aws_kms_key.main`).
    pub fn block_address(&self) -> String {
        let mut parts: Vec<&str> = Vec::with_capacity(self.labels.len() + 1);
        if let Some(root) = self.root_keyword() {
            parts.push(root);
        }
        parts.extend(self.labels.iter().map(String::as_str));
        parts.join(".")
    }

    fn root_keyword(&self) -> Option<&str> {
        match self.kind.as_str() {
            kinds::RESOURCE => None,
            kinds::VARIABLE => Some("var"),
            other => Some(other),
        }
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.block_address())?;
        if let Some(attr) = &self.attribute {
            write!(f, ".{attr}")?;
        }
        for p in &self.path {
            write!(f, ".{p}")?;
        }
        Ok(())
    }
}

impl FromStr for Reference {
    type Err = ParseReferenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let traversal = parse_traversal(s).ok_or_else(|| ParseReferenceError(s.to_string()))?;
        Reference::from_traversal(&traversal).ok_or_else(|| ParseReferenceError(s.to_string()))
    }
}

/// Parse dotted traversal text such as `aws_instance.web[0].id`.
pub(crate) fn parse_traversal(s: &str) -> Option<Traversal> {
    let mut segments = s.trim().split('.');
    let (root, root_steps) = split_segment(segments.next()?)?;
    if !root_steps.is_empty() {
        return None;
    }
    let mut steps = Vec::new();
    for segment in segments {
        let (name, indices) = split_segment(segment)?;
        steps.push(Step::Attr(name));
        steps.extend(indices);
    }
    Some(Traversal { root, steps })
}

fn split_segment(segment: &str) -> Option<(String, Vec<Step>)> {
    let (name, mut rest) = match segment.find('[') {
        Some(i) => (&segment[..i], &segment[i..]),
        None => (segment, ""),
    };
    if !is_identifier(name) {
        return None;
    }
    let mut steps = Vec::new();
    while !rest.is_empty() {
        let close = rest.find(']')?;
        if !rest.starts_with('[') {
            return None;
        }
        let inner = rest[1..close].trim();
        steps.push(if inner == "*" {
            Step::Splat
        } else if let Ok(n) = inner.parse::<i64>() {
            Step::Index(Value::from(n))
        } else if inner.len() >= 2 && inner.starts_with('"') && inner.ends_with('"') {
            Step::Index(Value::from(&inner[1..inner.len() - 1]))
        } else {
            Step::Dynamic
        });
        rest = &rest[close + 1..];
    }
    Some((name.to_string(), steps))
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || c == '_' || c == '-')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resource_reference_takes_type_and_name() {
        let r: Reference = "aws_kms_key.docdb_encryption.arn".parse().expect("parse");
        assert_eq!(r.kind(), "resource");
        assert_eq!(r.labels(), ["aws_kms_key", "docdb_encryption"]);
        assert_eq!(r.attribute(), Some("arn"));
        assert!(r.is_block_reference());
        assert!(!r.is_data());
        assert_eq!(r.block_address(), "aws_kms_key.docdb_encryption");
    }

    #[test]
    fn data_reference_keeps_path_after_attribute() {
        let r: Reference = "data.google_dns_keys.foo_dns_keys.key_signing_keys[0].ds_record"
            .parse()
            .expect("parse");
        assert!(r.is_data());
        assert_eq!(r.labels(), ["google_dns_keys", "foo_dns_keys"]);
        assert_eq!(r.attribute(), Some("key_signing_keys"));
        assert_eq!(r.path(), ["ds_record"]);
        assert_eq!(
            r.to_string(),
            "data.google_dns_keys.foo_dns_keys.key_signing_keys.ds_record"
        );
    }

    #[test]
    fn instance_keys_between_labels_and_attribute_are_skipped() {
        let r: Reference = "aws_instance.web[0].id".parse().expect("parse");
        assert_eq!(r.labels(), ["aws_instance", "web"]);
        assert_eq!(r.attribute(), Some("id"));
    }

    #[test]
    fn variables_and_locals() {
        let v: Reference = "var.region".parse().expect("parse");
        assert_eq!(v.kind(), "variable");
        assert_eq!(v.labels(), ["region"]);
        assert!(v.is_block_reference());
        assert_eq!(v.to_string(), "var.region");

        let l: Reference = "local.tags".parse().expect("parse");
        assert_eq!(l.kind(), "local");
        assert!(!l.is_block_reference());

        let c: Reference = "count.index".parse().expect("parse");
        assert!(c.labels().is_empty());
        assert_eq!(c.attribute(), Some("index"));
        assert!(!c.is_block_reference());
    }

    #[test]
    fn incomplete_or_malformed_text_is_rejected() {
        assert!("data.aws_kms_key".parse::<Reference>().is_err());
        assert!("aws_kms_key".parse::<Reference>().is_err());
        assert!("".parse::<Reference>().is_err());
        assert!("1abc.def".parse::<Reference>().is_err());
        assert!("aws_instance.web[0".parse::<Reference>().is_err());
    }
}
