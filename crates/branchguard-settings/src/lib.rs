//! Config parsing and resolution.
//!
//! This crate is intentionally IO-free: it parses and resolves configuration provided as strings.

#![forbid(unsafe_code)]

mod model;
mod resolve;

pub use model::AuditConfigV1;
pub use resolve::{
    EffectiveConfig, OutputFormat, Overrides, ResolvedConfig, CONFIG_SCHEMA_V1, DEFAULT_API_VERSION,
    DEFAULT_BASE_URL, DEFAULT_OUTPUT_STEM,
};

/// Parse `branchguard.toml` (or equivalent) into a typed model.
pub fn parse_config_toml(input: &str) -> anyhow::Result<AuditConfigV1> {
    let cfg: AuditConfigV1 = toml::from_str(input)?;
    Ok(cfg)
}

/// Resolve the effective config used for a run (defaults + file + CLI overrides).
pub fn resolve_config(cfg: AuditConfigV1, overrides: Overrides) -> anyhow::Result<ResolvedConfig> {
    resolve::resolve_config(cfg, overrides)
}
