//! HTTP client with tracing.
//!
//! Thin wrapper over `reqwest` that logs every request and maps timeouts to
//! [`FetchError::Timeout`].

use std::time::Duration;

use reqwest::{Client, Response};
use tracing::{debug, instrument};
use url::Url;

use crate::error::FetchError;

// ============================================================================
// HTTP Client
// ============================================================================

/// HTTP client wrapper with request tracing.
#[derive(Debug, Clone)]
pub struct HttpClient {
    inner: Client,
    timeout: Duration,
}

impl HttpClient {
    /// Creates a client with the given timeout and user agent.
    pub fn with_config(timeout: Duration, user_agent: &str) -> Result<Self, FetchError> {
        let inner = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()?;

        Ok(Self { inner, timeout })
    }

    /// Performs a POST request with a form-encoded body.
    #[instrument(skip(self, form), fields(url = %url, fields = form.len()))]
    pub async fn post_form(
        &self,
        url: &Url,
        form: &[(String, String)],
    ) -> Result<Response, FetchError> {
        debug!("POST request with form data");

        let response = self
            .inner
            .post(url.clone())
            .form(form)
            .send()
            .await
            .map_err(|e| self.map_error(e))?;
        debug!(status = %response.status(), "Response received");
        Ok(response)
    }

    /// Performs a GET request with the pairs appended to the query string.
    ///
    /// The logged URL excludes the query, which may carry the credential.
    #[instrument(skip(self, query), fields(url = %url, fields = query.len()))]
    pub async fn get_query(
        &self,
        url: &Url,
        query: &[(String, String)],
    ) -> Result<Response, FetchError> {
        debug!("GET request with query string");

        let response = self
            .inner
            .get(url.clone())
            .query(query)
            .send()
            .await
            .map_err(|e| self.map_error(e))?;
        debug!(status = %response.status(), "Response received");
        Ok(response)
    }

    /// Returns the configured timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn map_error(&self, error: reqwest::Error) -> FetchError {
        FetchError::from_reqwest(error, self.timeout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = HttpClient::with_config(Duration::from_secs(5), "statkit-test").unwrap();
        assert_eq!(client.timeout(), Duration::from_secs(5));
    }
}
