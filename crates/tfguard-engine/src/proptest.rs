//! Property-based tests for the engine crate.
//!
//! These tests use proptest to verify invariants around:
//! - dispatch determinism across repeated parallel scans
//! - findings ordering and truncation

use crate::cancel::CancellationToken;
use crate::engine::scan;
use crate::registry::Registry;
use crate::test_support::{ebs_rule, modules, policy};
use proptest::prelude::*;

// ============================================================================
// Strategies for generating arbitrary values
// ============================================================================

/// One EBS volume block: no `encrypted`, `encrypted = false` or `encrypted = true`.
fn arb_volume() -> impl Strategy<Value = Option<bool>> {
    prop_oneof![Just(None), Just(Some(false)), Just(Some(true))]
}

fn render(volumes: &[Option<bool>]) -> String {
    let mut out = String::new();
    for (i, v) in volumes.iter().enumerate() {
        out.push_str(&format!("resource \"aws_ebs_volume\" \"v{i}\" {{\n"));
        if let Some(enc) = v {
            out.push_str(&format!("  encrypted = {enc}\n"));
        }
        out.push_str("}\n\n");
    }
    out
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn scan_is_deterministic(volumes in prop::collection::vec(arb_volume(), 0..12)) {
        let registry = Registry::from_rules([ebs_rule()]).expect("registry");
        let src = render(&volumes);
        let token = CancellationToken::new();

        let first = scan(&modules(&[("main.tf", src.as_str())]), &registry, &policy(), &token)
            .expect("scan");
        let second = scan(&modules(&[("main.tf", src.as_str())]), &registry, &policy(), &token)
            .expect("scan");
        prop_assert_eq!(&first, &second);

        let expected = volumes.iter().filter(|v| **v != Some(true)).count();
        prop_assert_eq!(first.findings.len(), expected);
    }

    #[test]
    fn truncation_never_exceeds_max(
        volumes in prop::collection::vec(Just(None::<bool>), 0..10),
        max in 0usize..6,
    ) {
        let registry = Registry::from_rules([ebs_rule()]).expect("registry");
        let src = render(&volumes);
        let mut p = policy();
        p.max_findings = max;

        let outcome = scan(&modules(&[("main.tf", src.as_str())]), &registry, &p, &CancellationToken::new())
            .expect("scan");
        prop_assert!(outcome.findings.len() <= max);
        prop_assert_eq!(outcome.summary.findings_total as usize, volumes.len());
        prop_assert_eq!(outcome.summary.truncated_reason.is_some(), volumes.len() > max);

        let lines: Vec<u32> = outcome.findings.iter().map(|f| f.range.start_line).collect();
        let mut sorted = lines.clone();
        sorted.sort();
        prop_assert_eq!(lines, sorted);
    }
}
