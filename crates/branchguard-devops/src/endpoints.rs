use branchguard_types::ApiError;
use reqwest::Url;

/// Only branches are audited; tags and other refs are filtered out server-side.
const BRANCH_REF_FILTER: &str = "refs/heads/";

/// URL builder for the organization-scoped REST endpoints.
///
/// Path segments and query values are percent-encoded, so project names with spaces and
/// branch names with slashes are safe to pass through.
#[derive(Clone, Debug)]
pub struct Endpoints {
    base_url: String,
    organization: String,
    api_version: String,
}

impl Endpoints {
    pub fn new(
        base_url: impl Into<String>,
        organization: impl Into<String>,
        api_version: impl Into<String>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            organization: organization.into(),
            api_version: api_version.into(),
        }
    }

    /// `{base}/{org}/_apis/projects`
    pub fn projects(&self) -> Result<Url, ApiError> {
        self.build(&["_apis", "projects"], &[], None)
    }

    /// `{base}/{org}/{project}/_apis/git/repositories`
    pub fn repositories(&self, project: &str) -> Result<Url, ApiError> {
        self.build(&["_apis", "git", "repositories"], &[], Some(project))
    }

    /// `{base}/{org}/{project}/_apis/git/repositories/{id}/refs?filter=refs/heads/`
    pub fn branches(&self, project: &str, repository_id: &str) -> Result<Url, ApiError> {
        self.build(
            &["_apis", "git", "repositories", repository_id, "refs"],
            &[("filter", BRANCH_REF_FILTER)],
            Some(project),
        )
    }

    /// `{base}/{org}/{project}/_apis/policy/configurations?repositoryId={id}&refName={branch}`
    pub fn policies(
        &self,
        project: &str,
        repository_id: &str,
        branch_name: &str,
    ) -> Result<Url, ApiError> {
        self.build(
            &["_apis", "policy", "configurations"],
            &[("repositoryId", repository_id), ("refName", branch_name)],
            Some(project),
        )
    }

    fn build(
        &self,
        segments: &[&str],
        query: &[(&str, &str)],
        project: Option<&str>,
    ) -> Result<Url, ApiError> {
        let invalid = |message: String| ApiError::InvalidUrl {
            url: self.base_url.clone(),
            message,
        };

        let mut url = Url::parse(&self.base_url).map_err(|e| invalid(e.to_string()))?;
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|_| invalid("base URL cannot carry a path".to_string()))?;
            path.pop_if_empty().push(&self.organization);
            if let Some(project) = project {
                path.push(project);
            }
            path.extend(segments);
        }
        {
            let mut pairs = url.query_pairs_mut();
            for (k, v) in query {
                pairs.append_pair(k, v);
            }
            pairs.append_pair("api-version", &self.api_version);
        }
        Ok(url)
    }
}
