use crate::ApiError;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Stable schema identifier for the audit report.
pub const SCHEMA_AUDIT_V1: &str = "branchguard.audit.v1";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ToolMeta {
    pub name: String,
    pub version: String,
}

/// A request failure captured during a best-effort audit.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct AuditError {
    /// What was being fetched: `projects`, `repositories`, `branches`, or a branch name.
    pub scope: String,
    pub code: String,
    pub message: String,
}

impl AuditError {
    pub fn from_api(scope: impl Into<String>, err: &ApiError) -> Self {
        Self {
            scope: scope.into(),
            code: err.code().to_string(),
            message: err.to_string(),
        }
    }
}

/// Policy display names for one branch, in the order the service returned them.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct BranchPolicies {
    pub branch: String,
    pub policies: Vec<String>,
}

/// Classification buckets for one repository.
///
/// The buckets are independent: a locked branch also lands in `no_policy_branches` or
/// `policy_summary`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct RepositoryAudit {
    pub name: String,
    pub id: String,
    #[serde(default)]
    pub locked_branches: Vec<String>,
    #[serde(default)]
    pub no_policy_branches: Vec<String>,
    #[serde(default)]
    pub policy_summary: Vec<BranchPolicies>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<AuditError>,
}

impl RepositoryAudit {
    pub fn new(name: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            id: id.into(),
            ..Self::default()
        }
    }

    /// Policies recorded for `branch`, if it had any.
    pub fn policies_for(&self, branch: &str) -> Option<&[String]> {
        self.policy_summary
            .iter()
            .find(|entry| entry.branch == branch)
            .map(|entry| entry.policies.as_slice())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ProjectAudit {
    pub name: String,
    #[serde(default)]
    pub repositories: Vec<RepositoryAudit>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<AuditError>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct AuditReport {
    pub schema: String,
    pub tool: ToolMeta,
    pub organization: String,
    #[schemars(with = "String")]
    #[serde(with = "time::serde::rfc3339")]
    pub started_at: OffsetDateTime,
    #[schemars(with = "String")]
    #[serde(with = "time::serde::rfc3339")]
    pub finished_at: OffsetDateTime,
    #[serde(default)]
    pub projects: Vec<ProjectAudit>,
    /// Errors that prevented listing projects at all.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<AuditError>,
}

impl AuditReport {
    /// Every captured error, outermost scope first.
    pub fn all_errors(&self) -> Vec<&AuditError> {
        let mut out: Vec<&AuditError> = self.errors.iter().collect();
        for project in &self.projects {
            out.extend(project.errors.iter());
            for repo in &project.repositories {
                out.extend(repo.errors.iter());
            }
        }
        out
    }

    pub fn has_errors(&self) -> bool {
        !self.all_errors().is_empty()
    }
}
