//! Stable identifiers for error codes and error scopes.
//!
//! `code` is a short snake_case discriminator. `scope` names what was being fetched.

// Codes
pub const CODE_API_STATUS: &str = "api_status";
pub const CODE_API_DECODE: &str = "api_decode";
pub const CODE_API_TRANSPORT: &str = "api_transport";
pub const CODE_INVALID_URL: &str = "invalid_url";

// Scopes that are not a branch name
pub const SCOPE_PROJECTS: &str = "projects";
pub const SCOPE_REPOSITORIES: &str = "repositories";
pub const SCOPE_BRANCHES: &str = "branches";

pub fn all_codes() -> &'static [&'static str] {
    &[
        CODE_API_STATUS,
        CODE_API_DECODE,
        CODE_API_TRANSPORT,
        CODE_INVALID_URL,
    ]
}
