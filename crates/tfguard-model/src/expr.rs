//! Raw, unevaluated attribute expressions.
//!
//! The parser lowers HCL syntax into this small tree. Anything outside literals, traversals,
//! templates and containers is kept as [`Expr::Unsupported`] with its source text.

use crate::reference::Reference;
use crate::value::Value;
use std::fmt;

#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    Literal(Value),
    Traversal(Traversal),
    Template(Vec<TemplatePart>),
    List(Vec<Expr>),
    Map(Vec<(String, Expr)>),
    /// Function calls, operators, conditionals, `for` expressions, heredocs.
    Unsupported(String),
}

/// `root.step.step...`, e.g. `data.aws_kms_key.main.key_id` or `var.tags["env"]`.
#[derive(Clone, Debug, PartialEq)]
pub struct Traversal {
    pub root: String,
    pub steps: Vec<Step>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Step {
    Attr(String),
    /// Literal index (`[0]`, `["key"]`).
    Index(Value),
    /// Non-literal index such as `[count.index]`.
    Dynamic,
    Splat,
}

#[derive(Clone, Debug, PartialEq)]
pub enum TemplatePart {
    Literal(String),
    Interpolation(Expr),
    /// `%{ if }` / `%{ for }` directives; never evaluated.
    Directive,
}

impl Expr {
    pub fn null() -> Self {
        Expr::Literal(Value::Null)
    }

    /// The traversal this expression denotes, looking through a lone `"${...}"` wrapper.
    pub fn as_traversal(&self) -> Option<&Traversal> {
        match self {
            Expr::Traversal(t) => Some(t),
            Expr::Template(parts) => match parts.as_slice() {
                [TemplatePart::Interpolation(inner)] => inner.as_traversal(),
                _ => None,
            },
            _ => None,
        }
    }

    /// Parse this expression as a reference to a named object.
    pub fn reference(&self) -> Option<Reference> {
        self.as_traversal().and_then(Reference::from_traversal)
    }

    /// Every reference appearing anywhere in the expression, in source order.
    pub fn references(&self) -> Vec<Reference> {
        let mut out = Vec::new();
        self.collect_references(&mut out);
        out
    }

    fn collect_references(&self, out: &mut Vec<Reference>) {
        match self {
            Expr::Traversal(t) => out.extend(Reference::from_traversal(t)),
            Expr::Template(parts) => {
                for part in parts {
                    if let TemplatePart::Interpolation(inner) = part {
                        inner.collect_references(out);
                    }
                }
            }
            Expr::List(items) => items.iter().for_each(|e| e.collect_references(out)),
            Expr::Map(entries) => entries.iter().for_each(|(_, e)| e.collect_references(out)),
            Expr::Literal(_) | Expr::Unsupported(_) => {}
        }
    }

    pub fn is_literal(&self) -> bool {
        matches!(self, Expr::Literal(_))
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Literal(v) => write_value(f, v),
            Expr::Traversal(t) => write!(f, "{t}"),
            Expr::Template(parts) => {
                f.write_str("\"")?;
                for part in parts {
                    match part {
                        TemplatePart::Literal(s) => f.write_str(s)?,
                        TemplatePart::Interpolation(e) => write!(f, "${{{e}}}")?,
                        TemplatePart::Directive => f.write_str("%{...}")?,
                    }
                }
                f.write_str("\"")
            }
            Expr::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Expr::Map(entries) => {
                f.write_str("{")?;
                for (i, (k, v)) in entries.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{k} = {v}")?;
                }
                f.write_str("}")
            }
            Expr::Unsupported(src) => f.write_str(src.trim()),
        }
    }
}

fn write_value(f: &mut fmt::Formatter<'_>, v: &Value) -> fmt::Result {
    match v {
        Value::Null => f.write_str("null"),
        Value::String(s) => write!(f, "{s:?}"),
        Value::List(items) => {
            f.write_str("[")?;
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write_value(f, item)?;
            }
            f.write_str("]")
        }
        Value::Map(m) => {
            f.write_str("{")?;
            for (i, (k, item)) in m.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{k} = ")?;
                write_value(f, item)?;
            }
            f.write_str("}")
        }
        other => f.write_str(&other.to_template_string().unwrap_or_default()),
    }
}

impl fmt::Display for Traversal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.root)?;
        for step in &self.steps {
            match step {
                Step::Attr(name) => write!(f, ".{name}")?,
                Step::Index(Value::String(s)) => write!(f, "[{s:?}]")?,
                Step::Index(v) => write!(f, "[{}]", v.to_template_string().unwrap_or_default())?,
                Step::Dynamic => f.write_str("[?]")?,
                Step::Splat => f.write_str("[*]")?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn traversal(root: &str, attrs: &[&str]) -> Expr {
        Expr::Traversal(Traversal {
            root: root.to_string(),
            steps: attrs.iter().map(|a| Step::Attr(a.to_string())).collect(),
        })
    }

    #[test]
    fn lone_interpolation_is_a_traversal() {
        let inner = traversal("aws_kms_key", &["main", "arn"]);
        let wrapped = Expr::Template(vec![TemplatePart::Interpolation(inner.clone())]);
        assert_eq!(wrapped.as_traversal(), inner.as_traversal());

        let mixed = Expr::Template(vec![
            TemplatePart::Literal("arn:".to_string()),
            TemplatePart::Interpolation(inner),
        ]);
        assert!(mixed.as_traversal().is_none());
    }

    #[test]
    fn references_collects_nested_containers() {
        let expr = Expr::List(vec![
            traversal("aws_security_group", &["bar", "name"]),
            Expr::Literal(Value::from("sg-literal")),
            Expr::Map(vec![(
                "key".to_string(),
                traversal("data", &["aws_kms_key", "main", "arn"]),
            )]),
        ]);
        let refs: Vec<String> = expr.references().iter().map(|r| r.to_string()).collect();
        assert_eq!(
            refs,
            vec!["aws_security_group.bar.name", "data.aws_kms_key.main.arn"]
        );
    }

    #[test]
    fn display_renders_hcl_like_text() {
        let expr = Expr::List(vec![
            Expr::Literal(Value::from("22")),
            traversal("var", &["port"]),
        ]);
        assert_eq!(expr.to_string(), "[\"22\", var.port]");
        let indexed = Expr::Traversal(Traversal {
            root: "aws_instance".to_string(),
            steps: vec![
                Step::Attr("web".to_string()),
                Step::Index(Value::from(0i64)),
                Step::Attr("id".to_string()),
            ],
        });
        assert_eq!(indexed.to_string(), "aws_instance.web[0].id");
    }
}
