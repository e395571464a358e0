//! Request sinks.
//!
//! Domain modules are generic over [`RequestSink`], so the same module code
//! either dispatches right away ([`ImmediateSink`]) or queues into a batch
//! ([`QueueingSink`]). Both receive the identical method name and
//! parameters.

use async_trait::async_trait;
use statkit_core::{Params, PendingCall};

use crate::batch::{Batch, CallHandle};
use crate::client::Client;
use crate::error::FetchError;
use crate::response::Payload;

/// Destination for remote calls.
#[async_trait]
pub trait RequestSink: Send + Sync {
    /// What a call yields: a decoded payload, or a handle into a batch.
    type Output: Send;

    /// Sends or queues one call.
    async fn send(&self, method: &str, params: Params) -> Self::Output;
}

// ============================================================================
// Immediate Sink
// ============================================================================

/// Sink that performs each call as its own request.
#[derive(Debug, Clone)]
pub struct ImmediateSink {
    client: Client,
}

impl ImmediateSink {
    /// Wraps a client.
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// The wrapped client.
    pub fn client(&self) -> &Client {
        &self.client
    }
}

impl From<Client> for ImmediateSink {
    fn from(client: Client) -> Self {
        Self::new(client)
    }
}

#[async_trait]
impl RequestSink for ImmediateSink {
    type Output = Result<Payload, FetchError>;

    async fn send(&self, method: &str, params: Params) -> Self::Output {
        self.client.call(method, params).await
    }
}

// ============================================================================
// Queueing Sink
// ============================================================================

/// Sink that appends each call to a batch.
#[derive(Debug, Clone, Copy)]
pub struct QueueingSink<'a> {
    batch: &'a Batch,
}

impl<'a> QueueingSink<'a> {
    /// Wraps a batch.
    pub fn new(batch: &'a Batch) -> Self {
        Self { batch }
    }
}

#[async_trait]
impl RequestSink for QueueingSink<'_> {
    type Output = CallHandle;

    async fn send(&self, method: &str, params: Params) -> Self::Output {
        self.batch.push(PendingCall::new(method, params))
    }
}
