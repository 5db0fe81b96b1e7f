//! Catalog of tfguard policy rules.
//!
//! Each provider is gated behind a cargo feature of the same name (all on by default). Rules
//! are plain statics; [`default_registry`] collects the compiled-in set into an immutable
//! [`Registry`] once, before any scan.

#![forbid(unsafe_code)]

pub mod base;

#[cfg(feature = "aws")]
mod aws;
#[cfg(feature = "azure")]
mod azure;
#[cfg(feature = "aws")]
mod cmk;
#[cfg(feature = "digitalocean")]
mod digitalocean;
#[cfg(feature = "google")]
mod google;
#[cfg(feature = "oracle")]
mod oracle;

use tfguard_engine::{Registry, RegistryError, Rule};

/// Every rule compiled into this build, in provider order.
pub fn all_rules() -> Vec<Rule> {
    #[allow(unused_mut)]
    let mut rules = Vec::new();
    #[cfg(feature = "aws")]
    rules.extend(aws::rules());
    #[cfg(feature = "azure")]
    rules.extend(azure::rules());
    #[cfg(feature = "digitalocean")]
    rules.extend(digitalocean::rules());
    #[cfg(feature = "google")]
    rules.extend(google::rules());
    #[cfg(feature = "oracle")]
    rules.extend(oracle::rules());
    rules
}

/// Registry holding [`all_rules`]. Fails on the first duplicate or malformed rule.
pub fn default_registry() -> Result<Registry, RegistryError> {
    Registry::from_rules(all_rules())
}
