use crate::model::AuditConfigV1;
use anyhow::Context;
use branchguard_domain::ErrorPolicy;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://dev.azure.com";
pub const DEFAULT_API_VERSION: &str = "7.1-preview.1";
pub const DEFAULT_OUTPUT_STEM: &str = "azure_devops_branch_policy_report";
pub const CONFIG_SCHEMA_V1: &str = "branchguard.config.v1";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Pdf,
    Markdown,
    Json,
}

impl OutputFormat {
    pub fn parse(v: &str) -> anyhow::Result<Self> {
        match v {
            "pdf" => Ok(OutputFormat::Pdf),
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            "json" => Ok(OutputFormat::Json),
            other => anyhow::bail!("unknown format: {other} (expected pdf|markdown|json)"),
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Pdf => "pdf",
            OutputFormat::Markdown => "md",
            OutputFormat::Json => "json",
        }
    }
}

/// Values supplied on the command line; `Some` wins over the config file.
#[derive(Clone, Debug, Default)]
pub struct Overrides {
    pub organization: Option<String>,
    pub base_url: Option<String>,
    pub api_version: Option<String>,
    pub timeout_secs: Option<u64>,
    pub on_error: Option<String>,
    pub format: Option<String>,
    pub output: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EffectiveConfig {
    pub organization: String,
    /// Without a trailing slash.
    pub base_url: String,
    pub api_version: String,
    pub timeout: Option<Duration>,
    pub on_error: ErrorPolicy,
    pub format: OutputFormat,
    pub output: String,
}

#[derive(Clone, Debug)]
pub struct ResolvedConfig {
    pub effective: EffectiveConfig,
}

pub fn resolve_config(cfg: AuditConfigV1, overrides: Overrides) -> anyhow::Result<ResolvedConfig> {
    if let Some(schema) = cfg.schema.as_deref()
        && schema != CONFIG_SCHEMA_V1
    {
        anyhow::bail!("unsupported config schema: {schema} (expected {CONFIG_SCHEMA_V1})");
    }

    let organization = overrides
        .organization
        .or(cfg.organization)
        .map(|o| o.trim().to_string())
        .unwrap_or_default();
    validate_organization(&organization)?;

    let base_url = overrides
        .base_url
        .or(cfg.base_url)
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
    let base_url = parse_base_url(&base_url)?;

    let api_version = overrides
        .api_version
        .or(cfg.api_version)
        .map(|v| v.trim().to_string())
        .unwrap_or_else(|| DEFAULT_API_VERSION.to_string());
    if api_version.is_empty() {
        anyhow::bail!("api_version must not be empty");
    }

    let timeout = match overrides.timeout_secs.or(cfg.timeout_secs) {
        Some(0) => anyhow::bail!("timeout_secs must be greater than zero"),
        Some(secs) => Some(Duration::from_secs(secs)),
        None => None,
    };

    let on_error = match overrides.on_error.or(cfg.on_error) {
        Some(v) => parse_on_error(&v)?,
        None => ErrorPolicy::default(),
    };

    let format = match overrides.format.or(cfg.format) {
        Some(v) => OutputFormat::parse(&v).context("invalid format")?,
        None => OutputFormat::default(),
    };

    let output = overrides
        .output
        .or(cfg.output)
        .unwrap_or_else(|| format!("{DEFAULT_OUTPUT_STEM}.{}", format.extension()));

    Ok(ResolvedConfig {
        effective: EffectiveConfig {
            organization,
            base_url,
            api_version,
            timeout,
            on_error,
            format,
            output,
        },
    })
}

fn validate_organization(org: &str) -> anyhow::Result<()> {
    if org.is_empty() {
        anyhow::bail!("organization is required (pass --org or set `organization` in config)");
    }
    if org.contains('/') || org.chars().any(char::is_whitespace) {
        anyhow::bail!("invalid organization name: {org:?}");
    }
    Ok(())
}

fn parse_base_url(v: &str) -> anyhow::Result<String> {
    let trimmed = v.trim().trim_end_matches('/');
    if !(trimmed.starts_with("https://") || trimmed.starts_with("http://")) {
        anyhow::bail!("unsupported base_url: {v} (expected an http or https URL)");
    }
    Ok(trimmed.to_string())
}

fn parse_on_error(v: &str) -> anyhow::Result<ErrorPolicy> {
    match v {
        "continue" => Ok(ErrorPolicy::Continue),
        "abort" => Ok(ErrorPolicy::Abort),
        other => anyhow::bail!("unknown on_error: {other} (expected continue|abort)"),
    }
}
