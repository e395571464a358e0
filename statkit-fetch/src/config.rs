//! Client configuration.
//!
//! A [`ClientConfig`] is immutable once built and shared by every clone of
//! a [`crate::Client`], every batch it creates and every module attached to
//! either.

use std::fmt;
use std::time::Duration;

use statkit_core::ResponseFormat;
use tracing::warn;
use url::Url;

use crate::error::FetchError;

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// User agent string for `statkit`.
const USER_AGENT: &str = concat!("statkit/", env!("CARGO_PKG_VERSION"));

/// Script appended to endpoints given as a bare directory.
const ENTRY_SCRIPT: &str = "index.php";

// ============================================================================
// Client Config
// ============================================================================

/// Connection settings for the reporting API.
#[derive(Clone)]
pub struct ClientConfig {
    /// Full endpoint URL (e.g. `https://stats.example.com/index.php`).
    pub endpoint: Url,
    /// Credential sent as `token_auth`.
    pub token_auth: Option<String>,
    /// Site injected as `idSite` when a call does not name one.
    pub default_site: Option<u32>,
    /// Response format requested by default.
    pub format: ResponseFormat,
    /// Language injected when a call does not name one.
    pub language: Option<String>,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Send parameters in a POST body instead of the query string, keeping
    /// the credential out of access logs.
    pub secure: bool,
    /// User agent header.
    pub user_agent: String,
}

impl ClientConfig {
    /// Creates a configuration with defaults for everything but the endpoint.
    pub fn new(endpoint: impl AsRef<str>) -> Result<Self, FetchError> {
        Self::builder(endpoint).build()
    }

    /// Creates a builder for the given endpoint.
    pub fn builder(endpoint: impl AsRef<str>) -> ClientConfigBuilder {
        ClientConfigBuilder::new(endpoint)
    }

    /// Returns true if a credential is configured.
    pub fn has_token(&self) -> bool {
        self.token_auth.is_some()
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("endpoint", &self.endpoint.as_str())
            .field("token_auth", &self.token_auth.as_ref().map(|_| "<redacted>"))
            .field("default_site", &self.default_site)
            .field("format", &self.format)
            .field("language", &self.language)
            .field("timeout", &self.timeout)
            .field("secure", &self.secure)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

// ============================================================================
// Builder
// ============================================================================

/// Builder for [`ClientConfig`].
#[derive(Debug, Clone)]
pub struct ClientConfigBuilder {
    endpoint: String,
    token_auth: Option<String>,
    default_site: Option<u32>,
    format: ResponseFormat,
    language: Option<String>,
    timeout: Duration,
    secure: bool,
    user_agent: String,
}

impl ClientConfigBuilder {
    /// Creates a builder with default settings.
    pub fn new(endpoint: impl AsRef<str>) -> Self {
        Self {
            endpoint: endpoint.as_ref().trim().to_string(),
            token_auth: None,
            default_site: None,
            format: ResponseFormat::Json,
            language: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            secure: true,
            user_agent: USER_AGENT.to_string(),
        }
    }

    /// Sets the credential. Empty strings are treated as no credential.
    #[must_use]
    pub fn token_auth(mut self, token: impl Into<String>) -> Self {
        let token = token.into();
        self.token_auth = (!token.trim().is_empty()).then_some(token);
        self
    }

    /// Sets the default site.
    #[must_use]
    pub fn default_site(mut self, id: u32) -> Self {
        self.default_site = Some(id);
        self
    }

    /// Sets the response format.
    #[must_use]
    pub fn format(mut self, format: ResponseFormat) -> Self {
        self.format = format;
        self
    }

    /// Sets the default language.
    #[must_use]
    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    /// Sets the request timeout.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Enables or disables body-carrying dispatch.
    #[must_use]
    pub fn secure(mut self, secure: bool) -> Self {
        self.secure = secure;
        self
    }

    /// Overrides the user agent.
    #[must_use]
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Validates the endpoint and builds the configuration.
    pub fn build(self) -> Result<ClientConfig, FetchError> {
        let endpoint = normalize_endpoint(&self.endpoint)?;

        if !self.secure && self.token_auth.is_some() {
            warn!("Query-string dispatch enabled, the credential will appear in request URLs");
        }

        Ok(ClientConfig {
            endpoint,
            token_auth: self.token_auth,
            default_site: self.default_site,
            format: self.format,
            language: self.language,
            timeout: self.timeout,
            secure: self.secure,
            user_agent: self.user_agent,
        })
    }
}

/// Parses the endpoint, appending the entry script to directory URLs.
fn normalize_endpoint(raw: &str) -> Result<Url, FetchError> {
    if raw.is_empty() {
        return Err(FetchError::InvalidConfig("endpoint URL is empty".to_string()));
    }

    let url = Url::parse(raw)
        .map_err(|e| FetchError::InvalidConfig(format!("invalid endpoint URL '{raw}': {e}")))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(FetchError::InvalidConfig(format!(
            "unsupported endpoint scheme: {}",
            url.scheme()
        )));
    }

    if url.path().ends_with('/') {
        return url
            .join(ENTRY_SCRIPT)
            .map_err(|e| FetchError::InvalidConfig(e.to_string()));
    }

    Ok(url)
}

// ============================================================================
// Tests
// ============================================================================
