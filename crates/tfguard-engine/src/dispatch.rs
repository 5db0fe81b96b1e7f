use crate::policy::ScanPolicy;
use crate::registry::Registry;
use crate::results::CheckResult;
use crate::rule::Rule;
use rayon::prelude::*;
use std::panic::{AssertUnwindSafe, catch_unwind};
use tfguard_model::{Block, Module};
use tfguard_types::{Diagnostic, ids};

/// A failed check together with what it was dispatched against.
#[derive(Clone, Debug)]
pub(crate) struct Hit<'a> {
    pub rule: &'a Rule,
    pub module: &'a Module,
    pub block: &'a Block,
    pub result: CheckResult,
}

#[derive(Debug, Default)]
pub(crate) struct ModuleRun<'a> {
    pub hits: Vec<Hit<'a>>,
    pub diagnostics: Vec<Diagnostic>,
    pub blocks: usize,
    pub pairs: usize,
}

/// Evaluate every enabled, applicable rule against every top-level block of one module.
pub(crate) fn dispatch_module<'a>(
    module: &'a Module,
    registry: &'a Registry,
    policy: &ScanPolicy,
) -> ModuleRun<'a> {
    let pairs: Vec<(&Block, &Rule)> = module
        .blocks()
        .iter()
        .flat_map(|block| {
            registry
                .applicable_rules(block)
                .into_iter()
                .filter(|rule| policy.is_enabled(rule))
                .map(move |rule| (block, rule))
        })
        .collect();
    tracing::debug!(
        module = module.name(),
        dir = %module.dir(),
        blocks = module.blocks().len(),
        pairs = pairs.len(),
        "dispatching module"
    );

    let outcomes: Vec<Result<Vec<Hit<'a>>, Diagnostic>> = pairs
        .par_iter()
        .map(|&(block, rule)| evaluate_pair(module, block, rule))
        .collect();

    let mut run = ModuleRun {
        blocks: module.blocks().len(),
        pairs: pairs.len(),
        ..ModuleRun::default()
    };
    for outcome in outcomes {
        match outcome {
            Ok(hits) => run.hits.extend(hits),
            Err(diagnostic) => run.diagnostics.push(diagnostic),
        }
    }
    run
}

fn evaluate_pair<'a>(
    module: &'a Module,
    block: &'a Block,
    rule: &'a Rule,
) -> Result<Vec<Hit<'a>>, Diagnostic> {
    let evaluated = catch_unwind(AssertUnwindSafe(|| rule.check.evaluate(block, module)));
    match evaluated {
        Ok(results) => Ok(results
            .into_iter()
            .map(|result| Hit {
                rule,
                module,
                block,
                result,
            })
            .collect()),
        Err(payload) => {
            let reason = panic_message(payload.as_ref());
            let id = rule.id();
            tracing::warn!(rule = %id, block = %block.full_name(), %reason, "check panicked");
            Err(Diagnostic::new(
                ids::CODE_CHECK_PANIC,
                format!("rule `{id}` panicked on `{}`: {reason}", block.full_name()),
            )
            .at(block.range().path.clone(), Some(block.range().start_line))
            .for_rule(id))
        }
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
