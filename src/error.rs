//! Error types for talking to the analysis service and driving a query.

use std::path::PathBuf;
use thiserror::Error;

/// Shown when a failed response carries no `detail` of its own.
pub const FALLBACK_ERROR_MESSAGE: &str = "An error occurred while processing your query";

/// Failure of a single request to the analysis service.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ServiceError {
    /// The service answered with a non-success status.
    #[error("service returned HTTP {status}{}", detail_suffix(.detail))]
    Status {
        status: u16,
        /// `detail` field of the error body, if it had one.
        detail: Option<String>,
    },

    /// The request never produced a response (DNS, connect, TLS, reset...).
    #[error("transport error: {0}")]
    Transport(String),

    /// A response arrived but its body was not what we expected.
    #[error("invalid response body: {0}")]
    Decode(String),
}

impl ServiceError {
    /// Message to display for this failure.
    ///
    /// The service's own `detail` is used verbatim; every other failure
    /// collapses to [`FALLBACK_ERROR_MESSAGE`].
    pub fn user_message(&self) -> String {
        match self {
            ServiceError::Status { detail: Some(detail), .. } => detail.clone(),
            _ => FALLBACK_ERROR_MESSAGE.to_string(),
        }
    }
}

fn detail_suffix(detail: &Option<String>) -> String {
    detail.as_deref().map(|d| format!(": {}", d)).unwrap_or_default()
}

/// Why a submission was refused before anything was sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SubmitRejected {
    #[error("question must not be empty")]
    EmptyQuestion,

    #[error("a query is already in flight")]
    InFlight,
}

/// Problems loading the optional configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to read scenario file {path}: {source}")]
    Scenario {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detail_is_used_verbatim() {
        let err = ServiceError::Status { status: 500, detail: Some("timeout".to_string()) };
        assert_eq!(err.user_message(), "timeout");
    }

    #[test]
    fn test_missing_detail_falls_back() {
        let err = ServiceError::Status { status: 502, detail: None };
        assert_eq!(err.user_message(), FALLBACK_ERROR_MESSAGE);
        assert_eq!(ServiceError::Transport("connection refused".into()).user_message(), FALLBACK_ERROR_MESSAGE);
        assert_eq!(ServiceError::Decode("missing field".into()).user_message(), FALLBACK_ERROR_MESSAGE);
    }

    #[test]
    fn test_status_display_includes_detail() {
        let err = ServiceError::Status { status: 404, detail: Some("not found".to_string()) };
        assert_eq!(err.to_string(), "service returned HTTP 404: not found");
        let err = ServiceError::Status { status: 500, detail: None };
        assert_eq!(err.to_string(), "service returned HTTP 500");
    }
}
