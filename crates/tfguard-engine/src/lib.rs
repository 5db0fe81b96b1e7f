//! Rule registry, dispatcher and result aggregator (no IO).
//!
//! Input: immutable [`tfguard_model::Module`]s built by the loader and a [`Registry`] of rules.
//! Output: ordered findings, diagnostics and summary data in a [`ScanOutcome`].

#![forbid(unsafe_code)]

pub mod cancel;
pub mod fingerprint;
pub mod policy;
pub mod registry;
pub mod report;
pub mod results;
pub mod rule;

mod aggregate;
mod dispatch;
mod engine;

#[cfg(test)]
mod test_support;
#[cfg(test)]
mod proptest;

pub use cancel::CancellationToken;
pub use engine::{ScanError, scan};
pub use fingerprint::fingerprint_for_finding;
pub use policy::{DEFAULT_MAX_FINDINGS, ScanPolicy};
pub use registry::{Registry, RegistryBuilder, RegistryError};
pub use report::ScanOutcome;
pub use results::{CheckResult, Locator, Results};
pub use rule::{BasePolicy, Check, CheckFn, Rule};
