//! Error types for the registry client.
//!
//! One tagged enum covers the whole taxonomy: configuration problems, login
//! protocol breakage, upstream authorization rejections, other upstream HTTP
//! failures, transport faults, and the catch-all. The enum derives `Clone`
//! because a failed login is observed through a shared future: every caller
//! that joined the in-flight attempt receives the same error value.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Result type alias for client operations.
pub type Result<T> = std::result::Result<T, Error>;

/// The login-flow step at which an [`Error::AuthProtocol`] occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthStage {
    /// Session priming succeeded but the anti-forgery cookie was absent.
    XsrfExtraction,
    /// The login response carried no usable `access_token`.
    TokenExtraction,
}

impl fmt::Display for AuthStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AuthStage::XsrfExtraction => "xsrf-extraction",
            AuthStage::TokenExtraction => "token-extraction",
        };
        f.write_str(s)
    }
}

/// Errors that can occur during registry client operations.
#[derive(Error, Debug, Clone)]
pub enum Error {
    /// Registry credentials are missing. Fatal, never retried.
    #[error("Registry credentials are not configured: {0}")]
    Configuration(String),

    /// The upstream login flow did not behave as expected.
    #[error("Login flow failed during {stage}: {message}")]
    AuthProtocol { stage: AuthStage, message: String },

    /// The upstream rejected our bearer token (HTTP 401/403).
    ///
    /// `retry` carries the failure of the single forced re-authentication
    /// attempt, when one was made and also failed.
    #[error("Upstream authorization failure ({status}) at {url}: {message}")]
    UpstreamAuth {
        status: u16,
        url: String,
        message: String,
        retry: Option<Box<Error>>,
    },

    /// Any other non-success HTTP response from the upstream.
    #[error("Upstream error ({status}) at {url}: {message}")]
    Upstream {
        status: u16,
        url: String,
        message: String,
    },

    /// The request exceeded its bounded timeout.
    #[error("Request timed out: {0}")]
    Timeout(String),

    /// Connection-level failure before an HTTP status was received.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The search query was empty after trimming.
    #[error("Search query must not be empty")]
    MissingQuery,

    /// Anything that does not fit the categories above.
    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Error::Timeout(err.to_string())
        } else if err.is_decode() {
            Error::Unexpected(format!("response body did not decode: {err}"))
        } else {
            Error::Transport(err.to_string())
        }
    }
}

impl Error {
    /// Stable HTTP status this error maps to at the API boundary.
    pub fn status_code(&self) -> u16 {
        match self {
            Error::Configuration(_) => 500,
            Error::AuthProtocol { .. } => 502,
            Error::UpstreamAuth { status, .. } => *status,
            Error::Upstream { status, .. } => *status,
            Error::Timeout(_) => 504,
            Error::Transport(_) => 502,
            Error::MissingQuery => 400,
            Error::Unexpected(_) => 500,
        }
    }

    /// Machine-readable code for the boundary envelope.
    pub fn code(&self) -> &'static str {
        match self {
            Error::UpstreamAuth { status: 401, .. } => "UNAUTHORIZED",
            Error::UpstreamAuth { status: 403, .. } => "FORBIDDEN",
            Error::MissingQuery => "MISSING_QUERY",
            _ => "INTERNAL_ERROR",
        }
    }

    /// Check if this error is worth retrying at a higher layer.
    ///
    /// Timeouts and transport faults count, as do the transient upstream
    /// statuses. Authorization failures do not: those are handled by the
    /// executor's single forced re-authentication, never by blind retry.
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::Timeout(_) | Error::Transport(_) => true,
            Error::Upstream { status, .. } => matches!(status, 429 | 502 | 503 | 504),
            _ => false,
        }
    }

    /// Structured detail payload for the boundary envelope.
    fn details(&self) -> Option<serde_json::Value> {
        match self {
            Error::AuthProtocol { stage, .. } => {
                Some(serde_json::json!({ "stage": stage.to_string() }))
            }
            Error::UpstreamAuth {
                status,
                url,
                retry,
                ..
            } => Some(serde_json::json!({
                "status": status,
                "url": url,
                "retry": retry.as_ref().map(|e| e.to_string()),
            })),
            Error::Upstream { status, url, .. } => {
                Some(serde_json::json!({ "status": status, "url": url }))
            }
            _ => None,
        }
    }

    /// Translate this error into the JSON envelope served at the boundary.
    pub fn to_envelope(&self) -> ErrorEnvelope {
        ErrorEnvelope {
            error: self.to_string(),
            code: self.code(),
            details: self.details(),
            timestamp: Utc::now(),
        }
    }
}

/// JSON error envelope returned to API callers.
///
/// Serialized alongside the HTTP status from [`Error::status_code`], so a
/// caller always sees `{error, code, details, timestamp}` with a status
/// mirroring the failure kind.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorEnvelope {
    pub error: String,
    pub code: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
    pub timestamp: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_stage_display_is_stable() {
        assert_eq!(AuthStage::XsrfExtraction.to_string(), "xsrf-extraction");
        assert_eq!(AuthStage::TokenExtraction.to_string(), "token-extraction");
    }

    #[test]
    fn status_codes_mirror_failure_kind() {
        assert_eq!(Error::Configuration("x".into()).status_code(), 500);
        assert_eq!(Error::MissingQuery.status_code(), 400);
        assert_eq!(
            Error::UpstreamAuth {
                status: 401,
                url: "u".into(),
                message: "m".into(),
                retry: None,
            }
            .status_code(),
            401
        );
        assert_eq!(
            Error::Upstream {
                status: 404,
                url: "u".into(),
                message: "m".into(),
            }
            .status_code(),
            404
        );
        assert_eq!(Error::Timeout("t".into()).status_code(), 504);
    }

    #[test]
    fn envelope_codes() {
        let unauthorized = Error::UpstreamAuth {
            status: 401,
            url: "u".into(),
            message: "m".into(),
            retry: None,
        };
        assert_eq!(unauthorized.code(), "UNAUTHORIZED");

        let forbidden = Error::UpstreamAuth {
            status: 403,
            url: "u".into(),
            message: "m".into(),
            retry: None,
        };
        assert_eq!(forbidden.code(), "FORBIDDEN");

        assert_eq!(Error::MissingQuery.code(), "MISSING_QUERY");
        assert_eq!(Error::Unexpected("boom".into()).code(), "INTERNAL_ERROR");
    }

    #[test]
    fn envelope_carries_auth_stage() {
        let err = Error::AuthProtocol {
            stage: AuthStage::XsrfExtraction,
            message: "no cookie".into(),
        };
        let envelope = err.to_envelope();
        assert_eq!(envelope.code, "INTERNAL_ERROR");
        assert_eq!(
            envelope.details.unwrap()["stage"],
            serde_json::json!("xsrf-extraction")
        );
    }

    #[test]
    fn envelope_references_both_attempts() {
        let retry = Error::UpstreamAuth {
            status: 401,
            url: "https://registry.example/api/marks/search".into(),
            message: "still rejected".into(),
            retry: None,
        };
        let err = Error::UpstreamAuth {
            status: 401,
            url: "https://registry.example/api/marks/search".into(),
            message: "rejected".into(),
            retry: Some(Box::new(retry)),
        };
        let details = err.to_envelope().details.unwrap();
        assert!(
            details["retry"]
                .as_str()
                .unwrap()
                .contains("still rejected")
        );
    }

    #[test]
    fn retryable_statuses_follow_transient_set() {
        let transient = Error::Upstream {
            status: 503,
            url: "u".into(),
            message: "m".into(),
        };
        assert!(transient.is_retryable());

        let not_found = Error::Upstream {
            status: 404,
            url: "u".into(),
            message: "m".into(),
        };
        assert!(!not_found.is_retryable());

        assert!(Error::Timeout("t".into()).is_retryable());
        assert!(!Error::Configuration("c".into()).is_retryable());
    }

    #[test]
    fn envelope_serializes_without_null_details() {
        let json = serde_json::to_value(Error::MissingQuery.to_envelope()).unwrap();
        assert_eq!(json["code"], "MISSING_QUERY");
        assert!(json.get("details").is_none());
        assert!(json.get("timestamp").is_some());
    }
}
