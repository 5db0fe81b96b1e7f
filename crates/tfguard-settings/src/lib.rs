//! Config parsing and profile resolution.
//!
//! This crate is intentionally IO-free: it parses and resolves configuration provided as strings.

#![forbid(unsafe_code)]

mod model;
mod presets;
mod resolve;

pub use model::{RuleConfig, TfguardConfigV1};
pub use presets::PROFILES;
pub use resolve::{LoadSettings, Overrides, ResolvedConfig};

/// Parse `tfguard.toml` (or equivalent) into a typed model.
pub fn parse_config_toml(input: &str) -> anyhow::Result<TfguardConfigV1> {
    let cfg: TfguardConfigV1 = toml::from_str(input)?;
    Ok(cfg)
}

/// Resolve the effective scan policy and load settings (profile + config + overrides).
pub fn resolve_config(cfg: TfguardConfigV1, overrides: Overrides) -> anyhow::Result<ResolvedConfig> {
    resolve::resolve_config(cfg, overrides)
}
