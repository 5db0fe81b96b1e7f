use crate::base::aws::NEPTUNE_ENABLE_LOG_EXPORT;
use tfguard_engine::{Check, Results, Rule};
use tfguard_model::{AttributeQuery, Block, Module};

pub(crate) static ENABLE_LOG_EXPORT: Rule = Rule {
    base: &NEPTUNE_ENABLE_LOG_EXPORT,
    legacy_id: None,
    required_types: &["resource"],
    required_labels: &["aws_neptune_cluster"],
    check: Check::Programmatic(check),
    bad_example: &[r#"
resource "aws_neptune_cluster" "bad_example" {
  cluster_identifier                  = "neptune-cluster-demo"
  engine                              = "neptune"
  backup_retention_period             = 5
  preferred_backup_window             = "07:00-09:00"
  skip_final_snapshot                 = true
  iam_database_authentication_enabled = true
  apply_immediately                   = true
  enable_cloudwatch_logs_exports      = []
}
"#],
    good_example: &[r#"
resource "aws_neptune_cluster" "good_example" {
  cluster_identifier                  = "neptune-cluster-demo"
  engine                              = "neptune"
  backup_retention_period             = 5
  preferred_backup_window             = "07:00-09:00"
  skip_final_snapshot                 = true
  iam_database_authentication_enabled = true
  apply_immediately                   = true
  enable_cloudwatch_logs_exports      = ["audit"]
}
"#],
    links: &["https://registry.terraform.io/providers/hashicorp/aws/latest/docs/resources/neptune_cluster#enable_cloudwatch_logs_exports"],
};

fn check(block: &Block, _module: &Module) -> Results {
    let mut results = Results::new();
    match block.attribute("enable_cloudwatch_logs_exports") {
        None => results.add(
            "Resource uses default value for enable_cloudwatch_logs_exports",
            block,
        ),
        Some(exports) if exports.not_contains("audit") => results.add(
            "Resource should have audit in enable_cloudwatch_logs_exports",
            exports,
        ),
        _ => {}
    }
    results
}
