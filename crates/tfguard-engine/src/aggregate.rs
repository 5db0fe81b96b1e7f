use crate::dispatch::Hit;
use crate::fingerprint::fingerprint_for_finding;
use crate::policy::ScanPolicy;
use std::cmp::Ordering;
use tfguard_types::{Finding, SourceRange};

#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct Aggregated {
    pub findings: Vec<Finding>,
    /// Findings kept after filtering, before truncation.
    pub total: usize,
    /// Findings matched by an active inline ignore, whether kept or dropped.
    pub ignored: usize,
    pub truncated_reason: Option<String>,
}

/// Turn raw check results into the normalised, ordered finding list.
pub(crate) fn aggregate(hits: Vec<Hit<'_>>, policy: &ScanPolicy) -> Aggregated {
    let mut ignored = 0;
    let mut findings: Vec<Finding> = Vec::new();

    for hit in hits {
        let finding = to_finding(&hit, policy);
        if finding.severity < policy.minimum_severity {
            continue;
        }
        if finding.ignored {
            ignored += 1;
            if !policy.include_ignored {
                continue;
            }
        }
        findings.push(finding);
    }

    findings.sort_by(compare_findings);
    findings.dedup();

    let total = findings.len();
    let mut truncated_reason = None;
    if findings.len() > policy.max_findings {
        findings.truncate(policy.max_findings);
        truncated_reason = Some(format!(
            "findings truncated to max_findings={}",
            policy.max_findings
        ));
    }

    Aggregated {
        findings,
        total,
        ignored,
        truncated_reason,
    }
}

fn to_finding(hit: &Hit<'_>, policy: &ScanPolicy) -> Finding {
    let rule_id = hit.rule.id();
    let base = hit.rule.base;
    let range: SourceRange = hit.result.locator.range().clone();
    let ignored = hit.module.ignores().iter().any(|d| {
        d.is_active(policy.evaluation_date)
            && d.matches_rule(&rule_id, hit.rule.legacy_id)
            && d.covers(&range, hit.block.range())
    });

    Finding {
        severity: policy.severity_for(&rule_id, base.severity),
        legacy_id: hit.rule.legacy_id.map(str::to_string),
        message: hit.result.message.clone(),
        fingerprint: Some(fingerprint_for_finding(&rule_id, &range, &hit.result.message)),
        range,
        locator: hit.result.locator.kind(),
        resource: hit.block.full_name(),
        block_range: hit.block.range().clone(),
        description: non_empty(base.summary),
        impact: non_empty(base.impact),
        resolution: non_empty(base.resolution),
        links: hit.rule.all_links(),
        ignored,
        rule_id,
    }
}

fn non_empty(s: &str) -> Option<String> {
    (!s.is_empty()).then(|| s.to_string())
}

pub(crate) fn compare_findings(a: &Finding, b: &Finding) -> Ordering {
    // Ordering priority:
    // 1) severity (critical -> low)
    // 2) path
    // 3) start line, end line
    // 4) rule id
    // 5) message
    // The remaining keys only separate findings that are otherwise identical, so equal findings
    // always end up adjacent for `dedup`. Everything else on a finding follows from the rule id.
    b.severity
        .cmp(&a.severity)
        .then_with(|| a.range.path.cmp(&b.range.path))
        .then(a.range.start_line.cmp(&b.range.start_line))
        .then(a.range.end_line.cmp(&b.range.end_line))
        .then_with(|| a.rule_id.cmp(&b.rule_id))
        .then_with(|| a.message.cmp(&b.message))
        .then_with(|| a.resource.cmp(&b.resource))
        .then(a.locator.cmp(&b.locator))
        .then_with(|| a.block_range.cmp(&b.block_range))
        .then(a.ignored.cmp(&b.ignored))
}
