//! Literal evaluator: literals, `var.*` and `local.*` bindings, string templates and containers.
//!
//! Everything else (references to other blocks, function calls, operators) evaluates to
//! [`Value::Null`].

use crate::expr::{Expr, Step, TemplatePart, Traversal};
use crate::value::Value;
use std::collections::BTreeMap;

/// Bindings visible to expressions in one module.
#[derive(Clone, Copy, Debug)]
pub struct Scope<'a> {
    pub variables: &'a BTreeMap<String, Value>,
    pub locals: &'a BTreeMap<String, Value>,
}

pub fn evaluate(expr: &Expr, scope: &Scope<'_>) -> Value {
    match expr {
        Expr::Literal(v) => v.clone(),
        Expr::Traversal(t) => evaluate_traversal(t, scope),
        Expr::Template(parts) => evaluate_template(parts, scope),
        Expr::List(items) => Value::List(items.iter().map(|e| evaluate(e, scope)).collect()),
        Expr::Map(entries) => Value::Map(
            entries
                .iter()
                .map(|(k, e)| (k.clone(), evaluate(e, scope)))
                .collect(),
        ),
        Expr::Unsupported(_) => Value::Null,
    }
}

fn evaluate_traversal(traversal: &Traversal, scope: &Scope<'_>) -> Value {
    let bindings = match traversal.root.as_str() {
        "var" => scope.variables,
        "local" => scope.locals,
        _ => return Value::Null,
    };
    let mut steps = traversal.steps.iter();
    let Some(Step::Attr(name)) = steps.next() else {
        return Value::Null;
    };
    let Some(mut current) = bindings.get(name) else {
        return Value::Null;
    };
    for step in steps {
        current = match step {
            Step::Attr(key) => current.get(&Value::String(key.clone())),
            Step::Index(key) => current.get(key),
            Step::Dynamic | Step::Splat => return Value::Null,
        };
    }
    current.clone()
}

fn evaluate_template(parts: &[TemplatePart], scope: &Scope<'_>) -> Value {
    if let [TemplatePart::Interpolation(inner)] = parts {
        return evaluate(inner, scope);
    }
    let mut out = String::new();
    for part in parts {
        match part {
            TemplatePart::Literal(s) => out.push_str(s),
            TemplatePart::Interpolation(inner) => {
                let Some(text) = evaluate(inner, scope).to_template_string() else {
                    return Value::Null;
                };
                out.push_str(&text);
            }
            TemplatePart::Directive => return Value::Null,
        }
    }
    Value::String(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::traversal;

    fn bindings(pairs: &[(&str, Value)]) -> BTreeMap<String, Value> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn variables_and_locals_are_inlined() {
        let mut tags = BTreeMap::new();
        tags.insert("env".to_string(), Value::from("prod"));
        let variables = bindings(&[("algorithm", Value::from("rsasha1"))]);
        let locals = bindings(&[("tags", Value::Map(tags))]);
        let scope = Scope {
            variables: &variables,
            locals: &locals,
        };

        assert_eq!(
            evaluate(&traversal("var", &["algorithm"]), &scope),
            Value::from("rsasha1")
        );
        assert_eq!(
            evaluate(&traversal("local", &["tags", "env"]), &scope),
            Value::from("prod")
        );
        assert!(evaluate(&traversal("var", &["missing"]), &scope).is_null());
        assert!(evaluate(&traversal("aws_kms_key", &["main", "arn"]), &scope).is_null());
    }

    #[test]
    fn templates_concatenate_scalars() {
        let variables = bindings(&[("name", Value::from("web")), ("port", Value::from(22i64))]);
        let locals = BTreeMap::new();
        let scope = Scope {
            variables: &variables,
            locals: &locals,
        };
        let template = Expr::Template(vec![
            TemplatePart::Literal("sg-".to_string()),
            TemplatePart::Interpolation(traversal("var", &["name"])),
            TemplatePart::Literal("-".to_string()),
            TemplatePart::Interpolation(traversal("var", &["port"])),
        ]);
        assert_eq!(evaluate(&template, &scope), Value::from("sg-web-22"));

        let lone = Expr::Template(vec![TemplatePart::Interpolation(traversal("var", &["port"]))]);
        assert_eq!(evaluate(&lone, &scope), Value::from(22i64));

        let unresolved = Expr::Template(vec![
            TemplatePart::Literal("arn:".to_string()),
            TemplatePart::Interpolation(traversal("aws_kms_key", &["main", "arn"])),
        ]);
        assert!(evaluate(&unresolved, &scope).is_null());
    }

    #[test]
    fn containers_evaluate_element_wise() {
        let variables = bindings(&[("cidr", Value::from("0.0.0.0/0"))]);
        let locals = BTreeMap::new();
        let scope = Scope {
            variables: &variables,
            locals: &locals,
        };
        let list = Expr::List(vec![
            traversal("var", &["cidr"]),
            Expr::Unsupported("cidrsubnet(var.cidr, 8, 1)".to_string()),
        ]);
        assert_eq!(
            evaluate(&list, &scope),
            Value::List(vec![Value::from("0.0.0.0/0"), Value::Null])
        );
    }
}
