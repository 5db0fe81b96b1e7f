use crate::rule::Rule;
use std::collections::{BTreeMap, BTreeSet};
use tfguard_types::Severity;
use time::{Date, OffsetDateTime};

pub const DEFAULT_MAX_FINDINGS: usize = 500;

/// Effective scan configuration, resolved from settings before the scan starts.
#[derive(Clone, Debug)]
pub struct ScanPolicy {
    pub profile: String,
    pub minimum_severity: Severity,
    pub max_findings: usize,
    /// Keep findings matched by inline ignores (marked `ignored`) instead of dropping them.
    pub include_ignored: bool,
    /// Rule ids (or legacy ids) that are never dispatched.
    pub disabled_rules: BTreeSet<String>,
    pub severity_overrides: BTreeMap<String, Severity>,
    /// Day against which ignore expiry dates are compared.
    pub evaluation_date: Date,
}

impl Default for ScanPolicy {
    fn default() -> Self {
        Self {
            profile: "strict".to_string(),
            minimum_severity: Severity::Low,
            max_findings: DEFAULT_MAX_FINDINGS,
            include_ignored: false,
            disabled_rules: BTreeSet::new(),
            severity_overrides: BTreeMap::new(),
            evaluation_date: OffsetDateTime::now_utc().date(),
        }
    }
}

impl ScanPolicy {
    pub fn is_enabled(&self, rule: &Rule) -> bool {
        !self.disabled_rules.contains(&rule.id())
            && rule
                .legacy_id
                .is_none_or(|legacy| !self.disabled_rules.contains(legacy))
    }

    pub fn severity_for(&self, rule_id: &str, base: Severity) -> Severity {
        self.severity_overrides.get(rule_id).copied().unwrap_or(base)
    }
}
