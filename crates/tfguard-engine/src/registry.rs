use crate::rule::{Check, Rule};
use std::collections::HashMap;
use tfguard_model::Block;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("rule `{0}` is registered twice")]
    DuplicateId(String),

    #[error("legacy id `{legacy_id}` of rule `{id}` is already used by `{existing}`")]
    DuplicateLegacyId {
        id: String,
        legacy_id: String,
        existing: String,
    },

    #[error("rule `{id}` has invalid applicability: {reason}")]
    InvalidApplicability { id: String, reason: String },

    #[error("no rule with id `{0}`")]
    NotFound(String),
}

/// Immutable set of rules, built once before any scan and shared by reference.
#[derive(Debug, Default)]
pub struct Registry {
    rules: Vec<Rule>,
    by_id: HashMap<String, usize>,
    by_legacy_id: HashMap<String, usize>,
    by_kind: HashMap<String, Vec<usize>>,
}

#[derive(Debug, Default)]
pub struct RegistryBuilder {
    rules: Vec<Rule>,
    ids: HashMap<String, usize>,
    legacy_ids: HashMap<String, String>,
}

impl RegistryBuilder {
    pub fn register(&mut self, rule: Rule) -> Result<(), RegistryError> {
        let id = rule.id();
        validate_applicability(&id, &rule)?;
        if self.ids.contains_key(&id) {
            return Err(RegistryError::DuplicateId(id));
        }
        if let Some(legacy) = rule.legacy_id {
            if let Some(existing) = self.legacy_ids.get(legacy) {
                return Err(RegistryError::DuplicateLegacyId {
                    id,
                    legacy_id: legacy.to_string(),
                    existing: existing.clone(),
                });
            }
            self.legacy_ids.insert(legacy.to_string(), id.clone());
        }
        self.ids.insert(id, self.rules.len());
        self.rules.push(rule);
        Ok(())
    }

    pub fn build(self) -> Registry {
        let mut keyed: Vec<(String, Rule)> = self.rules.into_iter().map(|r| (r.id(), r)).collect();
        keyed.sort_by(|a, b| a.0.cmp(&b.0));

        let mut registry = Registry::default();
        for (i, (id, rule)) in keyed.into_iter().enumerate() {
            registry.by_id.insert(id, i);
            if let Some(legacy) = rule.legacy_id {
                registry.by_legacy_id.insert(legacy.to_string(), i);
            }
            for kind in rule.required_types {
                registry.by_kind.entry(kind.to_string()).or_default().push(i);
            }
            registry.rules.push(rule);
        }
        tracing::info!(rules = registry.rules.len(), "built rule registry");
        registry
    }
}

fn validate_applicability(id: &str, rule: &Rule) -> Result<(), RegistryError> {
    let invalid = |reason: &str| RegistryError::InvalidApplicability {
        id: id.to_string(),
        reason: reason.to_string(),
    };
    if rule.required_types.is_empty() {
        return Err(invalid("no required block types"));
    }
    if rule.required_types.iter().any(|t| t.trim().is_empty()) {
        return Err(invalid("blank required block type"));
    }
    if rule.required_labels.iter().any(|l| l.trim().is_empty()) {
        return Err(invalid("blank required label"));
    }
    if let Check::Delegated(base) = rule.check {
        if base.evaluation.is_none() {
            return Err(invalid("delegated check but the base policy has no evaluation"));
        }
    }
    Ok(())
}

impl Registry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    /// Register every rule, failing on the first invalid one.
    pub fn from_rules(rules: impl IntoIterator<Item = Rule>) -> Result<Registry, RegistryError> {
        let mut builder = Registry::builder();
        for rule in rules {
            builder.register(rule)?;
        }
        Ok(builder.build())
    }

    /// All rules, sorted by id.
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn get_rule_by_id(&self, id: &str) -> Result<&Rule, RegistryError> {
        self.by_id
            .get(id)
            .map(|&i| &self.rules[i])
            .ok_or_else(|| RegistryError::NotFound(id.to_string()))
    }

    pub fn get_rule_by_legacy_id(&self, legacy_id: &str) -> Result<&Rule, RegistryError> {
        self.by_legacy_id
            .get(legacy_id)
            .map(|&i| &self.rules[i])
            .ok_or_else(|| RegistryError::NotFound(legacy_id.to_string()))
    }

    /// Matches an id or a legacy id.
    pub fn contains(&self, id: &str) -> bool {
        self.by_id.contains_key(id) || self.by_legacy_id.contains_key(id)
    }

    /// Rules whose required kinds and labels match the block, in id order.
    pub fn applicable_rules(&self, block: &Block) -> Vec<&Rule> {
        let Some(candidates) = self.by_kind.get(block.kind()) else {
            return Vec::new();
        };
        candidates
            .iter()
            .map(|&i| &self.rules[i])
            .filter(|r| r.applies_to(block))
            .collect()
    }
}
