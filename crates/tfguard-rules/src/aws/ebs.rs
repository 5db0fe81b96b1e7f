use crate::base::aws::EBS_ENABLE_VOLUME_ENCRYPTION;
use tfguard_engine::{Check, Results, Rule};
use tfguard_model::{AttributeQuery, Block, Module};

pub(crate) static ENABLE_VOLUME_ENCRYPTION: Rule = Rule {
    base: &EBS_ENABLE_VOLUME_ENCRYPTION,
    legacy_id: None,
    required_types: &["resource"],
    required_labels: &["aws_ebs_volume"],
    check: Check::Programmatic(check),
    bad_example: &[r#"
resource "aws_ebs_volume" "bad_example" {
  availability_zone = "us-west-2a"
  size              = 40

  tags = {
    Name = "HelloWorld"
  }
  encrypted = false
}
"#],
    good_example: &[r#"
resource "aws_ebs_volume" "good_example" {
  availability_zone = "us-west-2a"
  size              = 40

  tags = {
    Name = "HelloWorld"
  }
  encrypted = true
}
"#],
    links: &["https://registry.terraform.io/providers/hashicorp/aws/latest/docs/resources/ebs_volume#encrypted"],
};

fn check(block: &Block, _module: &Module) -> Results {
    let mut results = Results::new();
    match block.attribute("encrypted") {
        // alert on use of default value
        None => results.add("Resource uses default value for encrypted", block),
        Some(encrypted) if encrypted.is_false() => {
            results.add("Resource does not have encrypted set to true", encrypted)
        }
        _ => {}
    }
    results
}
