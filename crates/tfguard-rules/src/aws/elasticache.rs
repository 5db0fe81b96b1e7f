use crate::base::aws::ELASTICACHE_ADD_DESCRIPTION_FOR_SECURITY_GROUP;
use tfguard_engine::{Check, Results, Rule};
use tfguard_model::{AttributeQuery, Block, Module};

pub(crate) static ADD_DESCRIPTION_FOR_SECURITY_GROUP: Rule = Rule {
    base: &ELASTICACHE_ADD_DESCRIPTION_FOR_SECURITY_GROUP,
    legacy_id: None,
    required_types: &["resource"],
    required_labels: &["aws_elasticache_security_group"],
    check: Check::Programmatic(check),
    bad_example: &[r#"
resource "aws_security_group" "bar" {
  name = "security-group"
}

resource "aws_elasticache_security_group" "bad_example" {
  name                 = "elasticache-security-group"
  security_group_names = [aws_security_group.bar.name]
  description          = ""
}
"#],
    good_example: &[r#"
resource "aws_security_group" "bar" {
  name = "security-group"
}

resource "aws_elasticache_security_group" "good_example" {
  name                 = "elasticache-security-group"
  security_group_names = [aws_security_group.bar.name]
  description          = "something"
}
"#],
    links: &["https://registry.terraform.io/providers/hashicorp/aws/latest/docs/resources/elasticache_security_group#description"],
};

fn check(block: &Block, _module: &Module) -> Results {
    let mut results = Results::new();
    match block.attribute("description") {
        None => results.add("Resource uses default value for description", block),
        Some(description) if description.is_empty() => {
            results.add("Resource has an empty description", description)
        }
        _ => {}
    }
    results
}
