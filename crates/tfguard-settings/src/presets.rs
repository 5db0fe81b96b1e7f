use tfguard_engine::{DEFAULT_MAX_FINDINGS, ScanPolicy};
use tfguard_types::Severity;

pub const PROFILES: &[&str] = &["strict", "relaxed", "essential"];

/// Preset profiles are opinionated defaults.
///
/// Keep these small and readable. Anything complex should go into repo config.
pub(crate) fn preset(profile: &str) -> anyhow::Result<ScanPolicy> {
    let minimum_severity = match profile {
        "strict" => Severity::Low,
        "relaxed" => Severity::Medium,
        "essential" => Severity::High,
        other => anyhow::bail!(
            "unknown profile: {other} (expected {})",
            PROFILES.join("|")
        ),
    };
    Ok(ScanPolicy {
        profile: profile.to_string(),
        minimum_severity,
        max_findings: DEFAULT_MAX_FINDINGS,
        ..ScanPolicy::default()
    })
}
