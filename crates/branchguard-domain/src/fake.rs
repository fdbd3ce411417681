//! In-memory [`PolicySource`] for tests.
//!
//! Unknown projects, repositories and branches answer with an empty collection, the same
//! way the service answers for a resource with nothing under it.

use crate::source::PolicySource;
use branchguard_types::{
    ApiError, Branch, PolicyConfiguration, PolicyType, Project, Repository,
};
use std::cell::RefCell;
use std::collections::BTreeMap;

#[derive(Debug, Default)]
pub struct FakeSource {
    projects: Vec<Project>,
    repositories: BTreeMap<String, Vec<Repository>>,
    branches: BTreeMap<String, Vec<Branch>>,
    policies: BTreeMap<String, Vec<PolicyConfiguration>>,
    failures: BTreeMap<String, u16>,
    calls: RefCell<Vec<String>>,
}

impl FakeSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn project(mut self, name: &str) -> Self {
        self.projects.push(Project {
            name: name.to_string(),
        });
        self
    }

    pub fn repository(mut self, project: &str, name: &str, id: &str) -> Self {
        self.repositories
            .entry(project.to_string())
            .or_default()
            .push(Repository {
                name: name.to_string(),
                id: id.to_string(),
            });
        self
    }

    pub fn branch(mut self, project: &str, repository_id: &str, name: &str, locked: bool) -> Self {
        self.branches
            .entry(branches_key(project, repository_id))
            .or_default()
            .push(Branch {
                name: name.to_string(),
                is_locked: locked,
            });
        self
    }

    pub fn policy(mut self, project: &str, repository_id: &str, branch: &str, name: &str) -> Self {
        self.policies
            .entry(policies_key(project, repository_id, branch))
            .or_default()
            .push(PolicyConfiguration {
                policy_type: PolicyType {
                    display_name: name.to_string(),
                },
            });
        self
    }

    pub fn fail_projects(mut self, status: u16) -> Self {
        self.failures.insert(projects_key(), status);
        self
    }

    pub fn fail_repositories(mut self, project: &str, status: u16) -> Self {
        self.failures.insert(repositories_key(project), status);
        self
    }

    pub fn fail_branches(mut self, project: &str, repository_id: &str, status: u16) -> Self {
        self.failures
            .insert(branches_key(project, repository_id), status);
        self
    }

    pub fn fail_policies(
        mut self,
        project: &str,
        repository_id: &str,
        branch: &str,
        status: u16,
    ) -> Self {
        self.failures
            .insert(policies_key(project, repository_id, branch), status);
        self
    }

    /// Requests made so far, in order (e.g. `policies core/r1/main`).
    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    fn answer<T: Clone>(&self, key: String, table: Option<&Vec<T>>) -> Result<Vec<T>, ApiError> {
        self.calls.borrow_mut().push(key.clone());
        if let Some(status) = self.failures.get(&key) {
            return Err(ApiError::Status {
                url: format!("fake://{key}"),
                status: *status,
                body: "injected failure".to_string(),
            });
        }
        Ok(table.cloned().unwrap_or_default())
    }
}

fn projects_key() -> String {
    "projects".to_string()
}

fn repositories_key(project: &str) -> String {
    format!("repositories {project}")
}

fn branches_key(project: &str, repository_id: &str) -> String {
    format!("branches {project}/{repository_id}")
}

fn policies_key(project: &str, repository_id: &str, branch: &str) -> String {
    format!("policies {project}/{repository_id}/{branch}")
}

impl PolicySource for FakeSource {
    fn list_projects(&self) -> Result<Vec<Project>, ApiError> {
        self.answer(projects_key(), Some(&self.projects))
    }

    fn list_repositories(&self, project: &str) -> Result<Vec<Repository>, ApiError> {
        self.answer(repositories_key(project), self.repositories.get(project))
    }

    fn list_branches(&self, project: &str, repository_id: &str) -> Result<Vec<Branch>, ApiError> {
        let key = branches_key(project, repository_id);
        let table = self.branches.get(&key);
        self.answer(key, table)
    }

    fn list_policies(
        &self,
        project: &str,
        repository_id: &str,
        branch_name: &str,
    ) -> Result<Vec<PolicyConfiguration>, ApiError> {
        let key = policies_key(project, repository_id, branch_name);
        let table = self.policies.get(&key);
        self.answer(key, table)
    }
}
