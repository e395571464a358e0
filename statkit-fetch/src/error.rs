//! Fetch error types.

use std::time::Duration;

use thiserror::Error;

// ============================================================================
// Main Fetch Error
// ============================================================================

/// Error type for transport and batch operations.
///
/// Variants fall into two classes: transport failures (the request did not
/// produce a usable response) and API failures (the remote answered with
/// its own error envelope). See [`FetchError::is_transport`] and
/// [`FetchError::is_api`].
#[derive(Debug, Error)]
pub enum FetchError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Request timed out.
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    /// Non-success status without a recognizable error envelope.
    #[error("Unexpected status code {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, truncated.
        body: String,
    },

    /// The response did not have the expected shape.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// JSON parsing error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The remote API returned an error envelope.
    #[error("API error: {message}")]
    Api {
        /// Message supplied by the remote API.
        message: String,
    },

    /// A batch response did not contain one result per queued call.
    #[error("Batch returned {actual} results for {expected} calls")]
    BatchMismatch {
        /// Number of queued calls.
        expected: usize,
        /// Number of results received.
        actual: usize,
    },

    /// Client configuration is unusable.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Core error.
    #[error("Core error: {0}")]
    Core(#[from] statkit_core::CoreError),
}

impl FetchError {
    /// Maps a `reqwest` failure, turning timeouts into [`FetchError::Timeout`].
    pub(crate) fn from_reqwest(error: reqwest::Error, timeout: Duration) -> Self {
        if error.is_timeout() {
            Self::Timeout(timeout)
        } else {
            Self::Http(error)
        }
    }

    /// Creates an API error from a remote message.
    pub fn api(message: impl Into<String>) -> Self {
        Self::Api {
            message: message.into(),
        }
    }

    /// Returns true if the remote API reported a logical failure.
    pub fn is_api(&self) -> bool {
        matches!(self, Self::Api { .. })
    }

    /// Returns true for network, HTTP and decoding failures.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::Http(_)
                | Self::Timeout(_)
                | Self::Status { .. }
                | Self::InvalidResponse(_)
                | Self::Json(_)
                | Self::BatchMismatch { .. }
        )
    }

    /// The remote message, for API errors.
    pub fn api_message(&self) -> Option<&str> {
        match self {
            Self::Api { message } => Some(message),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification() {
        let api = FetchError::api("Invalid idSite");
        assert!(api.is_api());
        assert!(!api.is_transport());
        assert_eq!(api.api_message(), Some("Invalid idSite"));

        let timeout = FetchError::Timeout(Duration::from_secs(1));
        assert!(timeout.is_transport());
        assert!(!timeout.is_api());

        let config = FetchError::InvalidConfig("no endpoint".into());
        assert!(!config.is_transport());
        assert!(!config.is_api());
    }

    #[test]
    fn test_display() {
        let err = FetchError::BatchMismatch {
            expected: 3,
            actual: 2,
        };
        assert_eq!(err.to_string(), "Batch returned 2 results for 3 calls");
        assert_eq!(FetchError::api("X").to_string(), "API error: X");
    }
}
