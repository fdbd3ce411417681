use crate::ids;
use thiserror::Error;

/// Failure of a single Azure DevOps request.
///
/// Every variant carries the request URL (without credentials) so errors can be reported
/// against the resource that failed.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("GET {url} returned HTTP {status}: {body}")]
    Status {
        url: String,
        status: u16,
        body: String,
    },

    #[error("GET {url} returned a malformed payload: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("GET {url} failed: {message}")]
    Transport { url: String, message: String },

    #[error("cannot build request URL {url}: {message}")]
    InvalidUrl { url: String, message: String },
}

impl ApiError {
    /// Stable code used in reports and error logs.
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::Status { .. } => ids::CODE_API_STATUS,
            ApiError::Decode { .. } => ids::CODE_API_DECODE,
            ApiError::Transport { .. } => ids::CODE_API_TRANSPORT,
            ApiError::InvalidUrl { .. } => ids::CODE_INVALID_URL,
        }
    }

    pub fn url(&self) -> &str {
        match self {
            ApiError::Status { url, .. }
            | ApiError::Decode { url, .. }
            | ApiError::Transport { url, .. }
            | ApiError::InvalidUrl { url, .. } => url,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_message_includes_url_and_code() {
        let err = ApiError::Status {
            url: "https://dev.azure.com/acme/_apis/projects".to_string(),
            status: 401,
            body: "unauthorized".to_string(),
        };
        assert_eq!(err.code(), "api_status");
        assert_eq!(err.url(), "https://dev.azure.com/acme/_apis/projects");
        assert_eq!(
            err.to_string(),
            "GET https://dev.azure.com/acme/_apis/projects returned HTTP 401: unauthorized"
        );
    }

    #[test]
    fn decode_error_keeps_source() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = ApiError::Decode {
            url: "u".to_string(),
            source,
        };
        assert_eq!(err.code(), "api_decode");
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn every_variant_has_a_known_code() {
        let errors = [
            ApiError::Status {
                url: String::new(),
                status: 500,
                body: String::new(),
            },
            ApiError::Decode {
                url: String::new(),
                source: serde_json::from_str::<serde_json::Value>("").unwrap_err(),
            },
            ApiError::Transport {
                url: String::new(),
                message: String::new(),
            },
            ApiError::InvalidUrl {
                url: String::new(),
                message: String::new(),
            },
        ];
        for err in &errors {
            assert!(ids::all_codes().contains(&err.code()));
        }
    }
}
