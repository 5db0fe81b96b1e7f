use crate::results::Results;
use crate::rule::{BasePolicy, Check, Rule};
use crate::policy::ScanPolicy;
use std::sync::Arc;
use tfguard_model::{AttributeQuery, Block, Module};
use tfguard_types::Severity;
use time::macros::date;

pub const EBS_BASE: BasePolicy = BasePolicy {
    provider: "test",
    service: "ebs",
    short_code: "enable-volume-encryption",
    summary: "EBS volumes must be encrypted",
    impact: "Unencrypted sensitive data is vulnerable to compromise.",
    resolution: "Enable encryption of EBS volumes",
    explanation: "By enabling encryption on EBS volumes you protect the volume, the disk I/O and any derived snapshots from compromise if intercepted.",
    severity: Severity::High,
    links: &["https://docs.aws.amazon.com/AWSEC2/latest/UserGuide/EBSEncryption.html"],
    evaluation: None,
};

pub static EBS: BasePolicy = EBS_BASE;

pub static NO_EVAL_BASE: BasePolicy = BasePolicy {
    short_code: "no-evaluation",
    ..EBS_BASE
};

pub static PANIC_BASE: BasePolicy = BasePolicy {
    service: "engine",
    short_code: "always-panics",
    severity: Severity::Low,
    ..EBS_BASE
};

fn check_ebs(block: &Block, _module: &Module) -> Results {
    let mut results = Results::new();
    match block.attribute("encrypted") {
        None => results.add("Resource uses default value for encrypted", block),
        Some(a) if a.is_false() => results.add("Resource does not have encryption enabled", a),
        _ => {}
    }
    results
}

fn check_panics(_block: &Block, _module: &Module) -> Results {
    panic!("check exploded")
}

pub fn ebs_rule() -> Rule {
    Rule {
        base: &EBS,
        legacy_id: Some("TST001"),
        required_types: &["resource"],
        required_labels: &["aws_ebs_volume"],
        check: Check::Programmatic(check_ebs),
        bad_example: &[r#"
resource "aws_ebs_volume" "bad_example" {
  encrypted = false
}
"#],
        good_example: &[r#"
resource "aws_ebs_volume" "good_example" {
  encrypted = true
}
"#],
        links: &[],
    }
}

pub fn panic_rule() -> Rule {
    Rule {
        base: &PANIC_BASE,
        legacy_id: None,
        check: Check::Programmatic(check_panics),
        ..ebs_rule()
    }
}

pub fn policy() -> ScanPolicy {
    ScanPolicy {
        evaluation_date: date!(2024 - 01 - 01),
        ..ScanPolicy::default()
    }
}

pub fn modules(sources: &[(&str, &str)]) -> Vec<Arc<Module>> {
    tfguard_loader::load_from_sources(sources).modules
}
