//! Store error types.

use thiserror::Error;

/// Errors that can occur while loading settings or resolving a profile.
#[derive(Debug, Error)]
pub enum StoreError {
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Named profile does not exist.
    #[error("Profile not found: {0}")]
    ProfileNotFound(String),

    /// No endpoint configured for the profile and none in the environment.
    #[error("No endpoint configured for profile '{0}' (set one with `statkit config set-url`)")]
    MissingEndpoint(String),

    /// Keychain operation failed.
    #[error("Keychain error: {0}")]
    Keychain(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Client configuration rejected the resolved settings.
    #[error(transparent)]
    Fetch(#[from] statkit_fetch::FetchError),
}

impl StoreError {
    /// Returns true if the error means "nothing configured yet" rather than
    /// a broken setup.
    pub fn is_unconfigured(&self) -> bool {
        matches!(self, Self::ProfileNotFound(_) | Self::MissingEndpoint(_))
    }
}
