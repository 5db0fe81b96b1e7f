use crate::base::aws::REDSHIFT_NON_DEFAULT_VPC_DEPLOYMENT;
use tfguard_engine::{Check, Results, Rule};
use tfguard_model::{Block, Module};

pub(crate) static NON_DEFAULT_VPC_DEPLOYMENT: Rule = Rule {
    base: &REDSHIFT_NON_DEFAULT_VPC_DEPLOYMENT,
    legacy_id: Some("AWS087"),
    required_types: &["resource"],
    required_labels: &["aws_redshift_cluster"],
    check: Check::Programmatic(check),
    bad_example: &[r#"
resource "aws_redshift_cluster" "bad_example" {
  cluster_identifier = "tf-redshift-cluster"
  database_name      = "mydb"
  master_username    = "foo"
  master_password    = "Mustbe8characters"
  node_type          = "dc1.large"
  cluster_type       = "single-node"
}
"#],
    good_example: &[r#"
resource "aws_redshift_cluster" "good_example" {
  cluster_identifier = "tf-redshift-cluster"
  database_name      = "mydb"
  master_username    = "foo"
  master_password    = "Mustbe8characters"
  node_type          = "dc1.large"
  cluster_type       = "single-node"

  cluster_subnet_group_name = "redshift_subnet"
}
"#],
    links: &["https://registry.terraform.io/providers/hashicorp/aws/latest/docs/resources/redshift_cluster#cluster_subnet_group_name"],
};

fn check(block: &Block, _module: &Module) -> Results {
    let mut results = Results::new();
    if block.missing_child("cluster_subnet_group_name") {
        results.add("Resource is being deployed outside of a VPC", block);
    }
    results
}
