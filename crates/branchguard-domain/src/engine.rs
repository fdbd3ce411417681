use crate::classify::classify_branch;
use crate::policy::ErrorPolicy;
use crate::source::PolicySource;
use branchguard_types::{ids, ApiError, AuditError, ProjectAudit, RepositoryAudit};
use tracing::{debug, info, warn};

/// Result of walking an organization: projects in listing order plus report-level errors.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DomainAudit {
    pub projects: Vec<ProjectAudit>,
    /// Errors that prevented listing projects.
    pub errors: Vec<AuditError>,
}

/// Walk every project, repository and branch and classify each branch.
///
/// Under [`ErrorPolicy::Abort`] the first failed request is returned as-is. Under
/// [`ErrorPolicy::Continue`] failures are recorded against the closest enclosing scope.
pub fn audit<S: PolicySource + ?Sized>(
    source: &S,
    on_error: ErrorPolicy,
) -> Result<DomainAudit, ApiError> {
    let mut out = DomainAudit::default();

    let Some(projects) = capture(
        source.list_projects(),
        on_error,
        ids::SCOPE_PROJECTS,
        &mut out.errors,
    )?
    else {
        return Ok(out);
    };

    for project in projects {
        info!(project = %project.name, "auditing project");
        out.projects.push(audit_project(source, &project.name, on_error)?);
    }

    Ok(out)
}

fn audit_project<S: PolicySource + ?Sized>(
    source: &S,
    project: &str,
    on_error: ErrorPolicy,
) -> Result<ProjectAudit, ApiError> {
    let mut audit = ProjectAudit {
        name: project.to_string(),
        repositories: Vec::new(),
        errors: Vec::new(),
    };

    let Some(repositories) = capture(
        source.list_repositories(project),
        on_error,
        ids::SCOPE_REPOSITORIES,
        &mut audit.errors,
    )?
    else {
        return Ok(audit);
    };

    for repo in repositories {
        info!(project, repository = %repo.name, "auditing repository");
        let mut repo_audit = RepositoryAudit::new(&repo.name, &repo.id);

        let branches = capture(
            source.list_branches(project, &repo.id),
            on_error,
            ids::SCOPE_BRANCHES,
            &mut repo_audit.errors,
        )?
        .unwrap_or_default();

        for branch in &branches {
            let policies = capture(
                source.list_policies(project, &repo.id, &branch.name),
                on_error,
                &branch.name,
                &mut repo_audit.errors,
            )?;
            debug!(
                branch = %branch.name,
                locked = branch.is_locked,
                policies = policies.as_ref().map(Vec::len),
                "classified branch"
            );
            classify_branch(&mut repo_audit, branch, policies.as_deref());
        }

        audit.repositories.push(repo_audit);
    }

    Ok(audit)
}

/// Apply the error policy to one request result.
///
/// `Ok(None)` means the failure was recorded in `errors` and the caller should carry on
/// without the data.
fn capture<T>(
    result: Result<Vec<T>, ApiError>,
    on_error: ErrorPolicy,
    scope: &str,
    errors: &mut Vec<AuditError>,
) -> Result<Option<Vec<T>>, ApiError> {
    match result {
        Ok(items) => Ok(Some(items)),
        Err(err) => match on_error {
            ErrorPolicy::Abort => Err(err),
            ErrorPolicy::Continue => {
                warn!(scope, code = err.code(), error = %err, "request failed; continuing");
                errors.push(AuditError::from_api(scope, &err));
                Ok(None)
            }
        },
    }
}
