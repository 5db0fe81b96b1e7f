//! hcl-edit expressions → [`tfguard_model::Expr`].

use hcl_edit::expr::{Expression, ObjectKey, TraversalOperator};
use hcl_edit::template::Element;
use tfguard_model::{Expr, Step, TemplatePart, Traversal, Value};

pub(crate) fn lower(expr: &Expression) -> Expr {
    match expr {
        Expression::Null(_) => Expr::null(),
        Expression::Bool(b) => Expr::Literal(Value::Bool(*b.value())),
        Expression::Number(n) => match n.value().as_f64() {
            Some(f) => Expr::Literal(Value::Number(f)),
            None => unsupported(expr),
        },
        Expression::String(s) => Expr::Literal(Value::String(s.value().clone())),
        Expression::Array(items) => Expr::List(items.iter().map(lower).collect()),
        Expression::Object(object) => Expr::Map(
            object
                .iter()
                .filter_map(|(k, v)| object_key(k).map(|k| (k, lower(v.expr()))))
                .collect(),
        ),
        Expression::StringTemplate(template) => Expr::Template(
            template
                .iter()
                .map(|element| match element {
                    Element::Literal(s) => TemplatePart::Literal(s.value().clone()),
                    Element::Interpolation(i) => TemplatePart::Interpolation(lower(&i.expr)),
                    _ => TemplatePart::Directive,
                })
                .collect(),
        ),
        Expression::Parenthesis(p) => lower(p.inner()),
        Expression::Variable(v) => Expr::Traversal(Traversal {
            root: v.as_str().to_string(),
            steps: Vec::new(),
        }),
        Expression::Traversal(t) => {
            let Expr::Traversal(mut traversal) = lower(&t.expr) else {
                return unsupported(expr);
            };
            traversal
                .steps
                .extend(t.operators.iter().map(|op| step(op.value())));
            Expr::Traversal(traversal)
        }
        _ => unsupported(expr),
    }
}

fn step(op: &TraversalOperator) -> Step {
    match op {
        TraversalOperator::GetAttr(ident) => Step::Attr(ident.as_str().to_string()),
        TraversalOperator::Index(index) => match lower(index) {
            Expr::Literal(v @ (Value::Number(_) | Value::String(_))) => Step::Index(v),
            _ => Step::Dynamic,
        },
        TraversalOperator::LegacyIndex(i) => Step::Index(Value::Number(*i.value() as f64)),
        TraversalOperator::AttrSplat(_) | TraversalOperator::FullSplat(_) => Step::Splat,
    }
}

fn object_key(key: &ObjectKey) -> Option<String> {
    match key {
        ObjectKey::Ident(ident) => Some(ident.as_str().to_string()),
        ObjectKey::Expression(expr) => match lower(expr) {
            Expr::Literal(Value::String(s)) => Some(s),
            Expr::Traversal(t) if t.steps.is_empty() => Some(t.root),
            _ => None,
        },
    }
}

fn unsupported(expr: &Expression) -> Expr {
    Expr::Unsupported(expr.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use hcl_edit::structure::Structure;

    fn lower_value(src: &str) -> Expr {
        let body = hcl_edit::parser::parse_body(&format!("x = {src}\n")).expect("parse");
        let Some(Structure::Attribute(attr)) = body.iter().next() else {
            panic!("expected attribute");
        };
        lower(&attr.value)
    }

    #[test]
    fn literals() {
        assert_eq!(lower_value("true"), Expr::Literal(Value::Bool(true)));
        assert_eq!(lower_value("null"), Expr::null());
        assert_eq!(lower_value("22"), Expr::Literal(Value::Number(22.0)));
        assert_eq!(
            lower_value("\"public-ippool\""),
            Expr::Literal(Value::from("public-ippool"))
        );
    }

    #[test]
    fn traversals_keep_steps() {
        let Expr::Traversal(t) = lower_value("data.aws_kms_key.main[0].arn") else {
            panic!("expected traversal");
        };
        assert_eq!(t.root, "data");
        assert_eq!(
            t.steps,
            vec![
                Step::Attr("aws_kms_key".to_string()),
                Step::Attr("main".to_string()),
                Step::Index(Value::Number(0.0)),
                Step::Attr("arn".to_string()),
            ]
        );
        let Expr::Traversal(t) = lower_value("aws_instance.web[count.index].id") else {
            panic!("expected traversal");
        };
        assert_eq!(
            t.steps,
            vec![
                Step::Attr("web".to_string()),
                Step::Dynamic,
                Step::Attr("id".to_string()),
            ]
        );
    }

    #[test]
    fn templates_and_containers() {
        let Expr::Template(parts) = lower_value("\"${var.name}-sg\"") else {
            panic!("expected template");
        };
        assert_eq!(parts.len(), 2);
        assert!(matches!(&parts[0], TemplatePart::Interpolation(Expr::Traversal(_))));
        assert_eq!(parts[1], TemplatePart::Literal("-sg".to_string()));

        let Expr::List(items) = lower_value("[\"0.0.0.0/0\", \"::/0\"]") else {
            panic!("expected list");
        };
        assert_eq!(items.len(), 2);

        let Expr::Map(entries) = lower_value("{ env = \"prod\", \"team\" = var.team }") else {
            panic!("expected map");
        };
        let keys: Vec<&str> = entries.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["env", "team"]);
    }

    #[test]
    fn everything_else_is_unsupported() {
        assert!(matches!(
            lower_value("length(var.ids)"),
            Expr::Unsupported(_)
        ));
        assert!(matches!(lower_value("var.a ? 1 : 2"), Expr::Unsupported(_)));
        assert!(matches!(
            lower_value("[for s in var.list : upper(s)]"),
            Expr::Unsupported(_)
        ));
        assert_eq!(lower_value("(true)"), Expr::Literal(Value::Bool(true)));
    }
}
