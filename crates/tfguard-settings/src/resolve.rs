use crate::{model::TfguardConfigV1, presets};
use anyhow::Context;
use globset::{Glob, GlobSetBuilder};
use tfguard_engine::{Rule, ScanPolicy};
use tfguard_types::Severity;
use time::Date;

const DEFAULT_MAX_MODULE_DEPTH: usize = 8;

#[derive(Clone, Debug, Default)]
pub struct Overrides {
    pub profile: Option<String>,
    pub minimum_severity: Option<String>,
    pub max_findings: Option<u32>,
    pub include_ignored: Option<bool>,
    /// Day used to decide whether inline ignores have expired (defaults to today, UTC).
    pub evaluation_date: Option<Date>,
}

/// What the loader needs to know: which paths to skip and which variable files to apply.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoadSettings {
    pub exclude_paths: Vec<String>,
    pub tfvars_files: Vec<String>,
    pub max_module_depth: usize,
}

impl Default for LoadSettings {
    fn default() -> Self {
        Self {
            exclude_paths: Vec::new(),
            tfvars_files: Vec::new(),
            max_module_depth: DEFAULT_MAX_MODULE_DEPTH,
        }
    }
}

#[derive(Clone, Debug)]
pub struct ResolvedConfig {
    pub policy: ScanPolicy,
    pub load: LoadSettings,
    /// Config entries (rule tables or `exclude` globs) that match no compiled-in rule.
    pub unknown_rules: Vec<String>,
}

pub fn resolve_config(
    cfg: TfguardConfigV1,
    overrides: Overrides,
) -> anyhow::Result<ResolvedConfig> {
    let profile = overrides
        .profile
        .clone()
        .or(cfg.profile.clone())
        .unwrap_or_else(|| "strict".to_string());

    let mut policy = presets::preset(&profile)?;
    let mut unknown_rules = Vec::new();
    let rules = tfguard_rules::all_rules();

    if let Some(sev) = overrides
        .minimum_severity
        .as_deref()
        .or(cfg.minimum_severity.as_deref())
    {
        policy.minimum_severity = parse_severity(sev).context("invalid minimum_severity")?;
    }

    if let Some(mf) = overrides.max_findings.or(cfg.max_findings) {
        policy.max_findings = mf as usize;
    }

    if let Some(include) = overrides.include_ignored.or(cfg.include_ignored) {
        policy.include_ignored = include;
    }

    if let Some(date) = overrides.evaluation_date {
        policy.evaluation_date = date;
    }

    // rule-id globs
    for pattern in &cfg.exclude {
        let glob = Glob::new(pattern)
            .with_context(|| format!("invalid exclude glob: {pattern}"))?
            .compile_matcher();
        let mut matched = false;
        for rule in &rules {
            let id = rule.id();
            if glob.is_match(&id) || rule.legacy_id.is_some_and(|l| glob.is_match(l)) {
                policy.disabled_rules.insert(id);
                matched = true;
            }
        }
        if !matched {
            unknown_rules.push(pattern.clone());
        }
    }

    // per-rule overrides
    for (key, rc) in &cfg.rules {
        let severity = rc
            .severity
            .as_deref()
            .map(parse_severity)
            .transpose()
            .with_context(|| format!("invalid severity for {key}"))?;

        let Some(id) = canonical_id(&rules, key) else {
            unknown_rules.push(key.clone());
            continue;
        };
        match rc.enabled {
            Some(false) => {
                policy.disabled_rules.insert(id.clone());
            }
            Some(true) => {
                policy.disabled_rules.remove(&id);
            }
            None => {}
        }
        if let Some(severity) = severity {
            policy.severity_overrides.insert(id, severity);
        }
    }

    validate_path_globs(&cfg.exclude_paths)?;
    let load = LoadSettings {
        exclude_paths: cfg.exclude_paths,
        tfvars_files: cfg.tfvars_files,
        max_module_depth: cfg
            .max_module_depth
            .map_or(DEFAULT_MAX_MODULE_DEPTH, |d| d as usize),
    };

    Ok(ResolvedConfig {
        policy,
        load,
        unknown_rules,
    })
}

/// Map a rule id or legacy id to the rule id.
fn canonical_id(rules: &[Rule], key: &str) -> Option<String> {
    rules
        .iter()
        .find(|r| r.id() == key || r.legacy_id == Some(key))
        .map(Rule::id)
}

fn validate_path_globs(patterns: &[String]) -> anyhow::Result<()> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        builder.add(
            Glob::new(pattern).with_context(|| format!("invalid exclude_paths glob: {pattern}"))?,
        );
    }
    builder.build()?;
    Ok(())
}

fn parse_severity(v: &str) -> anyhow::Result<Severity> {
    v.parse::<Severity>().map_err(anyhow::Error::msg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_config_toml;
    use time::macros::date;

    fn resolve(toml: &str) -> anyhow::Result<ResolvedConfig> {
        resolve_config(parse_config_toml(toml)?, Overrides::default())
    }

    #[test]
    fn empty_config_uses_strict_profile() {
        let resolved = resolve("").expect("resolve");
        assert_eq!(resolved.policy.profile, "strict");
        assert_eq!(resolved.policy.minimum_severity, Severity::Low);
        assert_eq!(resolved.policy.max_findings, 500);
        assert!(!resolved.policy.include_ignored);
        assert!(resolved.policy.disabled_rules.is_empty());
        assert_eq!(resolved.load, LoadSettings::default());
        assert!(resolved.unknown_rules.is_empty());
    }

    #[test]
    fn profiles_set_minimum_severity() {
        let relaxed = resolve("profile = \"relaxed\"").expect("resolve");
        assert_eq!(relaxed.policy.minimum_severity, Severity::Medium);
        let essential = resolve("profile = \"essential\"").expect("resolve");
        assert_eq!(essential.policy.minimum_severity, Severity::High);
        assert_eq!(essential.policy.profile, "essential");
    }

    #[test]
    fn unknown_profile_is_an_error() {
        let err = resolve("profile = \"paranoid\"").expect_err("must fail");
        assert!(err.to_string().contains("unknown profile"));
    }

    #[test]
    fn overrides_win_over_config() {
        let cfg = parse_config_toml(
            r#"
profile = "relaxed"
minimum_severity = "high"
max_findings = 10
"#,
        )
        .expect("parse");
        let resolved = resolve_config(
            cfg,
            Overrides {
                profile: Some("strict".to_string()),
                minimum_severity: Some("critical".to_string()),
                max_findings: Some(3),
                include_ignored: Some(true),
                evaluation_date: Some(date!(2030 - 06 - 01)),
            },
        )
        .expect("resolve");
        assert_eq!(resolved.policy.profile, "strict");
        assert_eq!(resolved.policy.minimum_severity, Severity::Critical);
        assert_eq!(resolved.policy.max_findings, 3);
        assert!(resolved.policy.include_ignored);
        assert_eq!(resolved.policy.evaluation_date, date!(2030 - 06 - 01));
    }

    #[cfg(feature = "aws")]
    #[test]
    fn exclude_globs_disable_matching_rules() {
        let resolved = resolve(
            r#"
exclude = ["aws-ebs-*", "AWS087", "gcp-*"]
"#,
        )
        .expect("resolve");
        assert!(
            resolved
                .policy
                .disabled_rules
                .contains("aws-ebs-enable-volume-encryption")
        );
        assert!(
            resolved
                .policy
                .disabled_rules
                .contains("aws-redshift-non-default-vpc-deployment")
        );
        assert_eq!(resolved.unknown_rules, vec!["gcp-*".to_string()]);
    }

    #[cfg(feature = "aws")]
    #[test]
    fn rule_tables_override_severity_and_enablement() {
        let resolved = resolve(
            r#"
exclude = ["aws-*"]

[rules."aws-elasticache-add-description-for-security-group"]
enabled = true
severity = "high"

[rules.AWS043]
enabled = false

[rules."aws-made-up"]
enabled = false
"#,
        )
        .expect("resolve");
        let policy = &resolved.policy;
        assert!(
            !policy
                .disabled_rules
                .contains("aws-elasticache-add-description-for-security-group")
        );
        assert!(
            policy
                .disabled_rules
                .contains("aws-iam-require-uppercase-in-passwords")
        );
        assert_eq!(
            policy.severity_for(
                "aws-elasticache-add-description-for-security-group",
                Severity::Low
            ),
            Severity::High
        );
        assert_eq!(resolved.unknown_rules, vec!["aws-made-up".to_string()]);
    }

    #[test]
    fn invalid_values_are_errors() {
        assert!(resolve("minimum_severity = \"urgent\"").is_err());
        assert!(resolve("exclude = [\"[\"]").is_err());
        assert!(resolve("exclude_paths = [\"a/[\"]").is_err());
        assert!(
            resolve(
                r#"
[rules."aws-ebs-enable-volume-encryption"]
severity = "loud"
"#
            )
            .is_err()
        );
    }

    #[test]
    fn load_settings_come_from_config() {
        let resolved = resolve(
            r#"
exclude_paths = ["**/vendor/**"]
tfvars_files = ["env/prod.tfvars"]
max_module_depth = 3
"#,
        )
        .expect("resolve");
        assert_eq!(resolved.load.exclude_paths, vec!["**/vendor/**".to_string()]);
        assert_eq!(resolved.load.tfvars_files, vec!["env/prod.tfvars".to_string()]);
        assert_eq!(resolved.load.max_module_depth, 3);
    }
}
