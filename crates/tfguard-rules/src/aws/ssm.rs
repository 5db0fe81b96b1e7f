use crate::base::aws::SSM_SECRET_USE_CUSTOMER_KEY;
use crate::cmk::check_customer_key;
use tfguard_engine::{Check, Results, Rule};
use tfguard_model::{AttributeQuery, Block, Module};

pub(crate) static SECRET_USE_CUSTOMER_KEY: Rule = Rule {
    base: &SSM_SECRET_USE_CUSTOMER_KEY,
    legacy_id: Some("AWS095"),
    required_types: &["resource"],
    required_labels: &["aws_secretsmanager_secret"],
    check: Check::Programmatic(check),
    bad_example: &[r#"
resource "aws_secretsmanager_secret" "bad_example" {
  name = "lambda_password"
}
"#],
    good_example: &[r#"
resource "aws_kms_key" "secrets" {
  enable_key_rotation = true
}

resource "aws_secretsmanager_secret" "good_example" {
  name       = "lambda_password"
  kms_key_id = aws_kms_key.secrets.arn
}
"#],
    links: &["https://registry.terraform.io/providers/hashicorp/aws/latest/docs/resources/secretsmanager_secret#kms_key_id"],
};

fn check(block: &Block, module: &Module) -> Results {
    check_customer_key(block, module, |key_id| {
        key_id.equals_ordinal("alias/aws/secretsmanager")
    })
}
