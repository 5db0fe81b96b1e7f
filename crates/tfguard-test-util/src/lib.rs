//! Shared test utilities for the tfguard workspace.
//!
//! Rule crates scan example snippets through [`scan_hcl`] and check the outcome with
//! [`assert_check_code`]. `xtask` needs `normalize_nondeterministic` at runtime (not behind
//! `#[cfg(test)]`), so these helpers live in their own crate.

use serde_json::Value;
use tfguard_engine::{CancellationToken, Registry, ScanOutcome, ScanPolicy, scan};
use tfguard_types::ids;
use time::macros::date;

/// Policy used by test scans: every rule, every severity, a fixed evaluation date.
pub fn test_policy() -> ScanPolicy {
    ScanPolicy {
        max_findings: usize::MAX,
        evaluation_date: date!(2024 - 01 - 01),
        ..ScanPolicy::default()
    }
}

/// Scan one in-memory `main.tf`.
///
/// Panics when the snippet does not parse, so a broken example never passes as "no findings".
pub fn scan_hcl(source: &str, registry: &Registry) -> ScanOutcome {
    scan_files(&[("main.tf", source)], registry)
}

/// Scan several in-memory files forming a single root module.
pub fn scan_files(files: &[(&str, &str)], registry: &Registry) -> ScanOutcome {
    let loaded = tfguard_loader::load_from_sources(files);
    let parse_errors: Vec<_> = loaded
        .diagnostics
        .iter()
        .filter(|d| d.code == ids::CODE_PARSE_ERROR)
        .collect();
    assert!(parse_errors.is_empty(), "test source failed to parse: {parse_errors:?}");

    scan(
        &loaded.modules,
        registry,
        &test_policy(),
        &CancellationToken::new(),
    )
    .unwrap_or_else(|e| panic!("test scan failed: {e}"))
}

/// Assert that `include` (when non-empty) produced at least one finding and that `exclude`
/// (when non-empty) produced none.
pub fn assert_check_code(outcome: &ScanOutcome, include: &str, exclude: &str) {
    let found: Vec<&str> = outcome.findings.iter().map(|f| f.rule_id.as_str()).collect();
    if !include.is_empty() {
        assert!(
            found.contains(&include),
            "expected a finding for `{include}`, found: {found:?}"
        );
    }
    if !exclude.is_empty() {
        assert!(
            !found.contains(&exclude),
            "expected no finding for `{exclude}`, found: {found:?}"
        );
    }
}

/// Normalize non-deterministic JSON fields for golden-file comparison.
///
/// Two concerns are handled separately:
///
/// 1. **Root-only** - `tool.version` is replaced with `"__VERSION__"` only
///    when the *root* object looks like a report envelope (has the keys
///    `schema`, `tool`, `findings` and `summary`). Nested objects that happen
///    to share that shape are left alone.
///
/// 2. **Recursive** - `started_at` and `finished_at` are normalized at any
///    depth because their placeholder values cannot collide with real data.
pub fn normalize_nondeterministic(mut value: Value) -> Value {
    if let Some(obj) = value.as_object_mut() {
        let is_envelope = obj.contains_key("schema")
            && obj.contains_key("tool")
            && obj.contains_key("findings")
            && obj.contains_key("summary");
        if is_envelope
            && let Some(tool) = obj.get_mut("tool")
            && let Some(tool_obj) = tool.as_object_mut()
            && tool_obj.contains_key("name")
            && tool_obj.contains_key("version")
        {
            tool_obj.insert(
                "version".to_string(),
                Value::String("__VERSION__".to_string()),
            );
        }
    }
    normalize_timestamps_recursive(&mut value);
    value
}

fn normalize_timestamps_recursive(value: &mut Value) {
    match value {
        Value::Object(map) => {
            for key in ["started_at", "finished_at"] {
                if map.contains_key(key) {
                    map.insert(key.to_string(), Value::String("__TIMESTAMP__".to_string()));
                }
            }
            for val in map.values_mut() {
                normalize_timestamps_recursive(val);
            }
        }
        Value::Array(arr) => {
            for val in arr.iter_mut() {
                normalize_timestamps_recursive(val);
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tfguard_types::{Finding, LocatorKind, Severity, SourceRange};

    #[test]
    fn normalize_only_touches_envelope_tool_version() {
        let input = json!({
            "schema": "tfguard.report.v1",
            "tool": { "name": "tfguard", "version": "0.1.0" },
            "started_at": "2025-01-01T00:00:00Z",
            "finished_at": "2025-01-01T00:00:01Z",
            "summary": { "profile": "strict" },
            "findings": [
                { "resource": "aws_ebs_volume.a", "tool": { "name": "x", "version": "1.2" } }
            ]
        });

        let result = normalize_nondeterministic(input);

        assert_eq!(result["tool"]["version"], "__VERSION__");
        assert_eq!(result["tool"]["name"], "tfguard");
        assert_eq!(result["started_at"], "__TIMESTAMP__");
        assert_eq!(result["finished_at"], "__TIMESTAMP__");
        assert_eq!(result["findings"][0]["tool"]["version"], "1.2");
    }

    #[test]
    fn root_without_envelope_keys_not_normalized() {
        let input = json!({
            "tool": { "name": "other", "version": "2.0.0" },
            "nested": { "started_at": "2025-01-01T00:00:00Z" }
        });

        let result = normalize_nondeterministic(input);

        assert_eq!(result["tool"]["version"], "2.0.0");
        assert_eq!(result["nested"]["started_at"], "__TIMESTAMP__");
    }

    fn outcome_with(rule_id: &str) -> ScanOutcome {
        ScanOutcome {
            findings: vec![Finding {
                rule_id: rule_id.to_string(),
                legacy_id: None,
                severity: Severity::Low,
                message: "m".to_string(),
                range: SourceRange::default(),
                locator: LocatorKind::Block,
                resource: "a.b".to_string(),
                block_range: SourceRange::default(),
                description: None,
                impact: None,
                resolution: None,
                links: Vec::new(),
                fingerprint: None,
                ignored: false,
            }],
            ..ScanOutcome::default()
        }
    }

    #[test]
    fn assert_check_code_accepts_expected_codes() {
        assert_check_code(&outcome_with("aws-ebs-x"), "aws-ebs-x", "aws-ebs-y");
        assert_check_code(&ScanOutcome::default(), "", "aws-ebs-x");
    }

    #[test]
    #[should_panic(expected = "expected no finding")]
    fn assert_check_code_rejects_excluded_code() {
        assert_check_code(&outcome_with("aws-ebs-x"), "", "aws-ebs-x");
    }
}
