use crate::decode::decode_collection;
use crate::endpoints::Endpoints;
use branchguard_domain::PolicySource;
use branchguard_types::{ApiError, Branch, PolicyConfiguration, Project, Repository};
use reqwest::header::CONTENT_TYPE;
use reqwest::Url;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

/// Error bodies are truncated to this many characters in [`ApiError::Status`].
const MAX_ERROR_BODY_CHARS: usize = 512;

#[derive(Clone, Debug)]
pub struct ClientConfig {
    pub base_url: String,
    pub organization: String,
    pub api_version: String,
    /// `None` means no timeout at all.
    pub timeout: Option<Duration>,
}

/// Blocking client for one organization, authenticated with a personal access token.
pub struct DevOpsClient {
    http: reqwest::blocking::Client,
    endpoints: Endpoints,
    pat: String,
}

impl std::fmt::Debug for DevOpsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DevOpsClient")
            .field("endpoints", &self.endpoints)
            .field("pat", &"<redacted>")
            .finish()
    }
}

impl DevOpsClient {
    pub fn new(config: ClientConfig, pat: &str) -> Result<Self, ApiError> {
        let http = reqwest::blocking::Client::builder()
            .user_agent(concat!("branchguard/", env!("CARGO_PKG_VERSION")))
            .timeout(config.timeout)
            .build()
            .map_err(|err| ApiError::Transport {
                url: config.base_url.clone(),
                message: error_chain(&err),
            })?;

        Ok(Self {
            http,
            endpoints: Endpoints::new(config.base_url, config.organization, config.api_version),
            pat: pat.trim().to_string(),
        })
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// One GET, no retry. Any non-2xx status is an error.
    fn get_collection<T: DeserializeOwned>(&self, url: Url) -> Result<Vec<T>, ApiError> {
        let url_str = url.to_string();
        debug!(url = %url_str, "GET");

        let transport = |err: reqwest::Error| ApiError::Transport {
            url: url_str.clone(),
            message: error_chain(&err),
        };

        // Basic auth with an empty user name is how Azure DevOps accepts a PAT.
        let response = self
            .http
            .get(url)
            .header(CONTENT_TYPE, "application/json")
            .basic_auth("", Some(&self.pat))
            .send()
            .map_err(transport)?;

        let status = response.status();
        let body = response.text().map_err(transport)?;

        if !status.is_success() {
            return Err(ApiError::Status {
                url: url_str,
                status: status.as_u16(),
                body: truncate(&body, MAX_ERROR_BODY_CHARS),
            });
        }

        decode_collection(&url_str, &body)
    }
}

impl PolicySource for DevOpsClient {
    fn list_projects(&self) -> Result<Vec<Project>, ApiError> {
        self.get_collection(self.endpoints.projects()?)
    }

    fn list_repositories(&self, project: &str) -> Result<Vec<Repository>, ApiError> {
        self.get_collection(self.endpoints.repositories(project)?)
    }

    fn list_branches(&self, project: &str, repository_id: &str) -> Result<Vec<Branch>, ApiError> {
        self.get_collection(self.endpoints.branches(project, repository_id)?)
    }

    fn list_policies(
        &self,
        project: &str,
        repository_id: &str,
        branch_name: &str,
    ) -> Result<Vec<PolicyConfiguration>, ApiError> {
        self.get_collection(
            self.endpoints
                .policies(project, repository_id, branch_name)?,
        )
    }
}

/// Collapse the body to one line and cap its length.
fn truncate(text: &str, max_chars: usize) -> String {
    let text = text.split_whitespace().collect::<Vec<_>>().join(" ");
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text,
    }
}

/// reqwest's `Display` hides the underlying cause (DNS, TLS, refused connection).
fn error_chain(err: &dyn std::error::Error) -> String {
    let mut out = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        out.push_str(": ");
        out.push_str(&cause.to_string());
        source = cause.source();
    }
    out
}
