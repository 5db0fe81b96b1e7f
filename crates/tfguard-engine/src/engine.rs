use crate::aggregate::aggregate;
use crate::cancel::CancellationToken;
use crate::dispatch::{ModuleRun, dispatch_module};
use crate::policy::ScanPolicy;
use crate::registry::Registry;
use crate::report::ScanOutcome;
use rayon::prelude::*;
use std::sync::Arc;
use tfguard_model::Module;
use tfguard_types::{Diagnostic, ScanSummary, SeverityCounts, ids};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ScanError {
    #[error("scan cancelled")]
    Cancelled,
}

/// Evaluate every registered rule against every module.
///
/// Modules are dispatched in parallel. The token is polled before and after each module; once
/// it is set the whole scan fails with [`ScanError::Cancelled`] and partial results are
/// dropped.
pub fn scan(
    modules: &[Arc<Module>],
    registry: &Registry,
    policy: &ScanPolicy,
    cancel: &CancellationToken,
) -> Result<ScanOutcome, ScanError> {
    if cancel.is_cancelled() {
        tracing::info!("scan cancelled before start");
        return Err(ScanError::Cancelled);
    }

    let runs: Vec<Option<ModuleRun<'_>>> = modules
        .par_iter()
        .map(|module| {
            if cancel.is_cancelled() {
                return None;
            }
            let run = dispatch_module(module, registry, policy);
            if cancel.is_cancelled() {
                return None;
            }
            Some(run)
        })
        .collect();

    let Some(runs) = runs.into_iter().collect::<Option<Vec<_>>>() else {
        tracing::info!(modules = modules.len(), "scan cancelled, discarding partial results");
        return Err(ScanError::Cancelled);
    };

    let mut hits = Vec::new();
    let mut diagnostics: Vec<Diagnostic> = Vec::new();
    let mut blocks = 0usize;
    let mut pairs = 0usize;
    for run in runs {
        blocks += run.blocks;
        pairs += run.pairs;
        hits.extend(run.hits);
        diagnostics.extend(run.diagnostics);
    }
    for module in modules {
        diagnostics.extend(unknown_ignore_rules(module, registry));
    }
    diagnostics.sort();
    diagnostics.dedup();

    let aggregated = aggregate(hits, policy);
    let summary = ScanSummary {
        profile: policy.profile.clone(),
        modules_scanned: saturating_u32(modules.len()),
        blocks_scanned: saturating_u32(blocks),
        rules_evaluated: saturating_u32(pairs),
        findings_total: saturating_u32(aggregated.total),
        findings_emitted: saturating_u32(aggregated.findings.len()),
        findings_ignored: saturating_u32(aggregated.ignored),
        counts: SeverityCounts::from_findings(&aggregated.findings),
        truncated_reason: aggregated.truncated_reason,
    };
    tracing::debug!(
        modules = summary.modules_scanned,
        findings = summary.findings_emitted,
        diagnostics = diagnostics.len(),
        "scan finished"
    );

    Ok(ScanOutcome {
        findings: aggregated.findings,
        diagnostics,
        summary,
    })
}

fn saturating_u32(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}

fn unknown_ignore_rules(module: &Module, registry: &Registry) -> Vec<Diagnostic> {
    let mut out = Vec::new();
    for directive in module.ignores() {
        for id in &directive.rules {
            if id == ids::IGNORE_ALL || registry.contains(id) {
                continue;
            }
            out.push(
                Diagnostic::new(
                    ids::CODE_IGNORE_UNKNOWN_RULE,
                    format!("inline ignore names unknown rule `{id}`"),
                )
                .at(directive.path.clone(), Some(directive.line))
                .for_rule(id.clone()),
            );
        }
    }
    out
}
