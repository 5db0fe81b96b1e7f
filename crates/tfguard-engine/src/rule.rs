use crate::results::Results;
use tfguard_model::{Block, Module};
use tfguard_types::Severity;

/// A programmatic check: inspect one block (with its module for reference resolution) and
/// report failures.
pub type CheckFn = fn(&Block, &Module) -> Results;

/// Descriptor published by the external policy-description provider.
///
/// The rule id is derived from it: `<provider>-<service>-<short_code>`.
#[derive(Debug)]
pub struct BasePolicy {
    pub provider: &'static str,
    pub service: &'static str,
    pub short_code: &'static str,
    pub summary: &'static str,
    pub impact: &'static str,
    pub resolution: &'static str,
    pub explanation: &'static str,
    pub severity: Severity,
    pub links: &'static [&'static str],
    /// Embedded evaluation used by rules that delegate to the base.
    pub evaluation: Option<CheckFn>,
}

impl BasePolicy {
    pub fn id(&self) -> String {
        format!("{}-{}-{}", self.provider, self.service, self.short_code)
    }
}

/// How a rule decides.
#[derive(Clone, Copy, Debug)]
pub enum Check {
    Programmatic(CheckFn),
    Delegated(&'static BasePolicy),
}

impl Check {
    pub fn evaluate(&self, block: &Block, module: &Module) -> Results {
        match self {
            Check::Programmatic(f) => f(block, module),
            Check::Delegated(base) => match base.evaluation {
                Some(f) => f(block, module),
                None => Results::new(),
            },
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct Rule {
    pub base: &'static BasePolicy,
    pub legacy_id: Option<&'static str>,
    /// Block kinds the rule applies to (`resource`, `data`, ...).
    pub required_types: &'static [&'static str],
    /// First labels the rule applies to; empty means any.
    pub required_labels: &'static [&'static str],
    pub check: Check,
    pub bad_example: &'static [&'static str],
    pub good_example: &'static [&'static str],
    pub links: &'static [&'static str],
}

impl Rule {
    pub fn id(&self) -> String {
        self.base.id()
    }

    pub fn severity(&self) -> Severity {
        self.base.severity
    }

    pub fn applies_to(&self, block: &Block) -> bool {
        self.required_types.iter().any(|k| *k == block.kind())
            && (self.required_labels.is_empty()
                || block
                    .type_label()
                    .is_some_and(|t| self.required_labels.iter().any(|l| *l == t)))
    }

    /// Rule links first, then the base's, without duplicates.
    pub fn all_links(&self) -> Vec<String> {
        let mut out: Vec<String> = Vec::new();
        for l in self.links.iter().chain(self.base.links) {
            if !out.iter().any(|x| x.as_str() == *l) {
                out.push(l.to_string());
            }
        }
        out
    }
}
