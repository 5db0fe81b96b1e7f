//! The `scan` use case: resolve config, load modules, evaluate rules and produce a report.

use anyhow::Context;
use camino::Utf8Path;
use tfguard_engine::CancellationToken;
use tfguard_loader::LoadOptions;
use tfguard_settings::{Overrides, ResolvedConfig};
use tfguard_types::{Diagnostic, ScanReport, ids};
use time::OffsetDateTime;

/// Input for the scan use case.
#[derive(Clone, Debug)]
pub struct ScanInput<'a> {
    /// Directory to scan.
    pub root: &'a Utf8Path,
    /// Config file contents (empty string if not found).
    pub config_text: &'a str,
    /// Front-end overrides.
    pub overrides: Overrides,
    /// Set from another thread to abandon the scan.
    pub cancel: CancellationToken,
}

/// Output from the scan use case.
#[derive(Clone, Debug)]
pub struct ScanOutput {
    /// The generated report.
    pub report: ScanReport,
    /// The resolved configuration used.
    pub resolved_config: ResolvedConfig,
    pub files_parsed: usize,
}

/// Run the scan use case: parse config, load modules, evaluate rules, produce a report.
pub fn run_scan(input: ScanInput<'_>) -> anyhow::Result<ScanOutput> {
    let started_at = OffsetDateTime::now_utc();

    // Parse config (empty is allowed, defaults apply).
    let cfg = if input.config_text.trim().is_empty() {
        tfguard_settings::TfguardConfigV1::default()
    } else {
        tfguard_settings::parse_config_toml(input.config_text).context("parse config")?
    };

    let resolved =
        tfguard_settings::resolve_config(cfg, input.overrides.clone()).context("resolve config")?;

    let mut diagnostics: Vec<Diagnostic> = Vec::new();
    for unknown in &resolved.unknown_rules {
        tracing::warn!(rule = %unknown, "config names a rule that is not registered");
        diagnostics.push(
            Diagnostic::new(
                ids::CODE_UNKNOWN_RULE,
                format!("config entry `{unknown}` matches no registered rule"),
            )
            .for_rule(unknown.clone()),
        );
    }

    let options = LoadOptions {
        exclude_paths: resolved.load.exclude_paths.clone(),
        tfvars_files: resolved.load.tfvars_files.clone(),
        max_module_depth: resolved.load.max_module_depth,
    };
    let loaded = tfguard_loader::load_modules(input.root, &options)
        .with_context(|| format!("load modules under {}", input.root))?;
    diagnostics.extend(loaded.diagnostics);

    let registry = tfguard_rules::default_registry().context("build rule registry")?;

    let outcome = tfguard_engine::scan(&loaded.modules, &registry, &resolved.policy, &input.cancel)
        .context("scan")?;

    let finished_at = OffsetDateTime::now_utc();
    let mut report = outcome.into_report(started_at, finished_at);
    diagnostics.append(&mut report.diagnostics);
    diagnostics.sort();
    diagnostics.dedup();
    report.diagnostics = diagnostics;

    tracing::info!(
        modules = report.summary.modules_scanned,
        findings = report.summary.findings_emitted,
        diagnostics = report.diagnostics.len(),
        "scan complete"
    );

    Ok(ScanOutput {
        report,
        resolved_config: resolved,
        files_parsed: loaded.files_parsed,
    })
}
