use crate::base::aws::IAM_REQUIRE_UPPERCASE_IN_PASSWORDS;
use tfguard_engine::{Check, Results, Rule};
use tfguard_model::{AttributeQuery, Block, Module};

pub(crate) static REQUIRE_UPPERCASE_IN_PASSWORDS: Rule = Rule {
    base: &IAM_REQUIRE_UPPERCASE_IN_PASSWORDS,
    legacy_id: Some("AWS043"),
    required_types: &["resource"],
    required_labels: &["aws_iam_account_password_policy"],
    check: Check::Programmatic(check),
    bad_example: &[r#"
resource "aws_iam_account_password_policy" "bad_example" {
  # ...
  # require_uppercase_characters not set
  # ...
}
"#],
    good_example: &[r#"
resource "aws_iam_account_password_policy" "good_example" {
  # ...
  require_uppercase_characters = true
  # ...
}
"#],
    links: &["https://registry.terraform.io/providers/hashicorp/aws/latest/docs/resources/iam_account_password_policy"],
};

fn check(block: &Block, _module: &Module) -> Results {
    let mut results = Results::new();
    match block.attribute("require_uppercase_characters") {
        None => results.add(
            "Resource does not require an uppercase character in the password.",
            block,
        ),
        Some(attr) if attr.is_false() => results.add(
            "Resource explicitly specifies not requiring at least one uppercase character in the password.",
            attr,
        ),
        _ => {}
    }
    results
}
