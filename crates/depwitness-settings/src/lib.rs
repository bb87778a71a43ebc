//! Config parsing and policy resolution.
//!
//! This crate is intentionally IO-free: it parses and resolves configuration provided as strings.

#![forbid(unsafe_code)]

mod model;
mod resolve;

pub use model::{ExcludeList, WitnessConfigV1, SCHEMA_CONFIG_V1};
pub use resolve::{Overrides, ResolvedConfig};

/// Parse `depwitness.toml` (or equivalent) into a typed model.
pub fn parse_config_toml(input: &str) -> anyhow::Result<WitnessConfigV1> {
    let cfg: WitnessConfigV1 = toml::from_str(input)?;
    Ok(cfg)
}

/// Resolve the effective policy and assertion list (config + CLI overrides).
pub fn resolve_config(cfg: WitnessConfigV1, overrides: Overrides) -> anyhow::Result<ResolvedConfig> {
    resolve::resolve_config(cfg, overrides)
}
