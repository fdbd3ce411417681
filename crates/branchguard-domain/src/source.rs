use branchguard_types::{ApiError, Branch, PolicyConfiguration, Project, Repository};

/// Read-only view of an Azure DevOps organization.
///
/// Each call is a single request; implementations do not retry or paginate.
pub trait PolicySource {
    fn list_projects(&self) -> Result<Vec<Project>, ApiError>;

    fn list_repositories(&self, project: &str) -> Result<Vec<Repository>, ApiError>;

    fn list_branches(&self, project: &str, repository_id: &str) -> Result<Vec<Branch>, ApiError>;

    fn list_policies(
        &self,
        project: &str,
        repository_id: &str,
        branch_name: &str,
    ) -> Result<Vec<PolicyConfiguration>, ApiError>;
}

impl<S: PolicySource + ?Sized> PolicySource for &S {
    fn list_projects(&self) -> Result<Vec<Project>, ApiError> {
        (**self).list_projects()
    }

    fn list_repositories(&self, project: &str) -> Result<Vec<Repository>, ApiError> {
        (**self).list_repositories(project)
    }

    fn list_branches(&self, project: &str, repository_id: &str) -> Result<Vec<Branch>, ApiError> {
        (**self).list_branches(project, repository_id)
    }

    fn list_policies(
        &self,
        project: &str,
        repository_id: &str,
        branch_name: &str,
    ) -> Result<Vec<PolicyConfiguration>, ApiError> {
        (**self).list_policies(project, repository_id, branch_name)
    }
}
