//! Reporting API client.

use std::sync::Arc;

use serde_json::Value;
use statkit_core::{Params, PendingCall};
use tracing::{debug, instrument};

use crate::batch::Batch;
use crate::config::ClientConfig;
use crate::error::FetchError;
use crate::http::HttpClient;
use crate::response::{self, Payload};
use crate::sink::ImmediateSink;
use crate::wire;

// ============================================================================
// Client
// ============================================================================

/// Client for the reporting API.
///
/// Cloning is cheap: clones share the configuration and the underlying
/// connection pool.
#[derive(Debug, Clone)]
pub struct Client {
    config: Arc<ClientConfig>,
    http: HttpClient,
}

impl Client {
    /// Creates a client from a configuration.
    pub fn new(config: ClientConfig) -> Result<Self, FetchError> {
        let http = HttpClient::with_config(config.timeout, &config.user_agent)?;
        debug!(endpoint = %config.endpoint, secure = config.secure, "Created API client");

        Ok(Self {
            config: Arc::new(config),
            http,
        })
    }

    /// Creates a client for an endpoint with default settings.
    pub fn from_endpoint(endpoint: &str) -> Result<Self, FetchError> {
        Self::new(ClientConfig::new(endpoint)?)
    }

    /// Returns the configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Starts a new batch session.
    pub fn batch(&self) -> Batch {
        Batch::new(self.clone())
    }

    /// Returns a sink that dispatches every call right away.
    pub fn immediate(&self) -> ImmediateSink {
        ImmediateSink::new(self.clone())
    }

    /// Performs one remote call.
    ///
    /// The configured defaults and credential are merged into `params`
    /// before encoding.
    #[instrument(skip(self, params), fields(method = %method))]
    pub async fn call(&self, method: &str, params: Params) -> Result<Payload, FetchError> {
        let merged = wire::merge_params(&self.config, method, &params);
        self.dispatch(&merged).await
    }

    /// Executes queued calls as one bulk request.
    ///
    /// Returns the decoded result array as received. Checking that it holds
    /// one entry per call is left to [`Batch::flush`].
    #[instrument(skip(self, calls), fields(calls = calls.len()))]
    pub async fn execute_batch(&self, calls: &[PendingCall]) -> Result<Vec<Value>, FetchError> {
        let params = wire::bulk_params(&self.config, calls);

        match self.dispatch(&params).await?.into_json()? {
            Value::Array(results) => {
                debug!(results = results.len(), "Bulk response decoded");
                Ok(results)
            }
            other => Err(FetchError::InvalidResponse(format!(
                "bulk response is not an array: {}",
                json_kind(&other)
            ))),
        }
    }

    async fn dispatch(&self, params: &Params) -> Result<Payload, FetchError> {
        let format = wire::effective_format(params, self.config.format);
        let pairs = wire::flatten(params);
        debug!(format = %format, params = pairs.len(), "Dispatching call");

        let response = if self.config.secure {
            self.http.post_form(&self.config.endpoint, &pairs).await?
        } else {
            self.http.get_query(&self.config.endpoint, &pairs).await?
        };

        response::decode(response, format, self.http.timeout()).await
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
