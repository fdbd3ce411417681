//! The `audit` use case: walk the organization and produce a report.

use branchguard_devops::{ClientConfig, DevOpsClient};
use branchguard_domain::{ErrorPolicy, PolicySource};
use branchguard_settings::EffectiveConfig;
use branchguard_types::{AuditReport, ToolMeta, SCHEMA_AUDIT_V1};
use time::OffsetDateTime;
use tracing::info;

/// Input for the audit use case.
#[derive(Clone, Copy, Debug)]
pub struct AuditInput<'a> {
    /// Organization name, recorded in the report.
    pub organization: &'a str,
    pub on_error: ErrorPolicy,
}

/// Build the HTTP client for the resolved configuration.
pub fn connect(cfg: &EffectiveConfig, pat: &str) -> anyhow::Result<DevOpsClient> {
    if pat.trim().is_empty() {
        anyhow::bail!("a personal access token is required (pass --pat or set AZURE_DEVOPS_EXT_PAT)");
    }
    let client = DevOpsClient::new(
        ClientConfig {
            base_url: cfg.base_url.clone(),
            organization: cfg.organization.clone(),
            api_version: cfg.api_version.clone(),
            timeout: cfg.timeout,
        },
        pat,
    )?;
    Ok(client)
}

/// Run the audit against `source`.
///
/// With [`ErrorPolicy::Abort`] the first request failure is returned and nothing is reported.
pub fn run_audit<S: PolicySource + ?Sized>(
    source: &S,
    input: AuditInput<'_>,
) -> anyhow::Result<AuditReport> {
    let started_at = OffsetDateTime::now_utc();
    info!(organization = input.organization, on_error = input.on_error.as_str(), "starting audit");

    let domain = branchguard_domain::audit(source, input.on_error)?;

    let finished_at = OffsetDateTime::now_utc();
    let report = AuditReport {
        schema: SCHEMA_AUDIT_V1.to_string(),
        tool: ToolMeta {
            name: "branchguard".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        organization: input.organization.to_string(),
        started_at,
        finished_at,
        projects: domain.projects,
        errors: domain.errors,
    };

    info!(
        projects = report.projects.len(),
        errors = report.all_errors().len(),
        "audit finished"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use branchguard_domain::fake::FakeSource;

    fn input(on_error: ErrorPolicy) -> AuditInput<'static> {
        AuditInput {
            organization: "acme",
            on_error,
        }
    }

    #[test]
    fn report_envelope_is_filled_in() {
        let source = FakeSource::new().project("core");
        let report = run_audit(&source, input(ErrorPolicy::Continue)).expect("audit");
        assert_eq!(report.schema, "branchguard.audit.v1");
        assert_eq!(report.tool.name, "branchguard");
        assert_eq!(report.organization, "acme");
        assert!(report.finished_at >= report.started_at);
        assert_eq!(report.projects[0].name, "core");
    }

    #[test]
    fn abort_surfaces_the_api_error() {
        let source = FakeSource::new().fail_projects(401);
        let err = run_audit(&source, input(ErrorPolicy::Abort)).unwrap_err();
        let api = err
            .downcast_ref::<branchguard_types::ApiError>()
            .expect("ApiError");
        assert_eq!(api.code(), "api_status");
    }

    #[test]
    fn connect_requires_a_token() {
        let cfg = branchguard_settings::resolve_config(
            Default::default(),
            branchguard_settings::Overrides {
                organization: Some("acme".to_string()),
                ..Default::default()
            },
        )
        .expect("resolve")
        .effective;
        assert!(connect(&cfg, "  ").is_err());
        assert!(connect(&cfg, "token").is_ok());
    }
}
