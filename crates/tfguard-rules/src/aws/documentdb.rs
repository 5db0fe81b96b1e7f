use crate::base::aws::DOCUMENTDB_ENCRYPTION_CUSTOMER_KEY;
use crate::cmk::check_customer_key;
use tfguard_engine::{Check, Results, Rule};
use tfguard_model::{AttributeQuery, Block, Module};

pub(crate) static ENCRYPTION_CUSTOMER_KEY: Rule = Rule {
    base: &DOCUMENTDB_ENCRYPTION_CUSTOMER_KEY,
    legacy_id: None,
    required_types: &["resource"],
    required_labels: &["aws_docdb_cluster", "aws_docdb_cluster_instance"],
    check: Check::Programmatic(check),
    bad_example: &[r#"
resource "aws_docdb_cluster" "docdb" {
  cluster_identifier      = "my-docdb-cluster"
  engine                  = "docdb"
  master_username         = "foo"
  master_password         = "mustbeeightchars"
  backup_retention_period = 5
  preferred_backup_window = "07:00-09:00"
  skip_final_snapshot     = true
}
"#],
    good_example: &[r#"
resource "aws_kms_key" "docdb_encryption" {
  enable_key_rotation = true
}

resource "aws_docdb_cluster" "docdb" {
  cluster_identifier      = "my-docdb-cluster"
  engine                  = "docdb"
  master_username         = "foo"
  master_password         = "mustbeeightchars"
  backup_retention_period = 5
  preferred_backup_window = "07:00-09:00"
  skip_final_snapshot     = true
  kms_key_id              = aws_kms_key.docdb_encryption.arn
}
"#],
    links: &["https://registry.terraform.io/providers/hashicorp/aws/latest/docs/resources/docdb_cluster#kms_key_id"],
};

fn check(block: &Block, module: &Module) -> Results {
    check_customer_key(block, module, |key_id| key_id.starts_with("alias/aws/"))
}
