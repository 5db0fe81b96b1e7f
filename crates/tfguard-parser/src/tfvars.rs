use crate::ParseError;
use crate::lower::lower;
use hcl_edit::structure::Structure;
use std::collections::BTreeMap;
use tfguard_model::Value;
use tfguard_model::eval::{Scope, evaluate};
use tfguard_types::SourcePath;

/// Parse a `.tfvars` file into variable values. Non-literal expressions become `Null`.
pub fn parse_tfvars(path: &SourcePath, text: &str) -> Result<BTreeMap<String, Value>, ParseError> {
    let body = hcl_edit::parser::parse_body(text).map_err(|e| ParseError::Syntax {
        path: path.clone(),
        message: e.to_string(),
    })?;

    let empty = BTreeMap::new();
    let scope = Scope {
        variables: &empty,
        locals: &empty,
    };
    let mut out = BTreeMap::new();
    for structure in body.iter() {
        match structure {
            Structure::Attribute(a) => {
                out.insert(a.key.as_str().to_string(), evaluate(&lower(&a.value), &scope));
            }
            Structure::Block(b) => {
                tracing::debug!(%path, block = b.ident.as_str(), "ignoring block in tfvars");
            }
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_literal_assignments() {
        let src = r#"
region   = "us-east-1"
replicas = 3
cidrs    = ["10.0.0.0/8"]
tags     = { env = "prod" }
computed = upper("x")
"#;
        let vars = parse_tfvars(&SourcePath::new("terraform.tfvars"), src).expect("parse");
        assert_eq!(vars["region"], Value::from("us-east-1"));
        assert_eq!(vars["replicas"], Value::from(3i64));
        assert_eq!(vars["cidrs"], Value::from(vec!["10.0.0.0/8"]));
        assert_eq!(vars["tags"].get(&Value::from("env")), &Value::from("prod"));
        assert!(vars["computed"].is_null());
    }

    #[test]
    fn invalid_text_is_an_error() {
        assert!(parse_tfvars(&SourcePath::new("bad.tfvars"), "region = ").is_err());
    }
}
