//! Batch aggregation.
//!
//! A [`Batch`] collects calls without sending them. [`Batch::flush`] sends
//! every queued call as a single bulk request and returns a
//! [`BatchResults`] whose entries line up with the order of enqueueing.
//!
//! Flushing consumes the batch, so a session cannot be re-flushed or
//! extended afterward. Start a new one with [`crate::Client::batch`].

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use serde::de::DeserializeOwned;
use serde_json::Value;
use statkit_core::{Params, PendingCall};
use tracing::{debug, info, trace, warn};

use crate::client::Client;
use crate::error::FetchError;
use crate::response::error_envelope;
use crate::sink::QueueingSink;

/// Source of batch ids. Zero is never handed out.
static NEXT_BATCH_ID: AtomicU64 = AtomicU64::new(1);

// ============================================================================
// Call Handle
// ============================================================================

/// Position of a queued call in its batch.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CallHandle {
    batch_id: u64,
    index: usize,
    method: String,
}

impl CallHandle {
    /// Zero-based position in the batch.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Method name of the queued call.
    pub fn method(&self) -> &str {
        &self.method
    }
}

// ============================================================================
// Batch
// ============================================================================

/// An open batch session.
///
/// Enqueueing takes `&self`, so any number of [`QueueingSink`]s and modules
/// can share one batch while it is being built.
#[derive(Debug)]
pub struct Batch {
    id: u64,
    client: Client,
    queue: Mutex<Vec<PendingCall>>,
}

impl Batch {
    pub(crate) fn new(client: Client) -> Self {
        Self {
            id: NEXT_BATCH_ID.fetch_add(1, Ordering::Relaxed),
            client,
            queue: Mutex::new(Vec::new()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Vec<PendingCall>> {
        self.queue.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Queues a call. Returns the batch for chaining.
    pub fn add_request(&self, method: impl Into<String>, params: Params) -> &Self {
        self.push(PendingCall::new(method, params));
        self
    }

    /// Queues a call without parameters.
    pub fn add_method(&self, method: impl Into<String>) -> &Self {
        self.add_request(method, Params::new())
    }

    /// Queues a call and returns its handle.
    pub fn push(&self, call: PendingCall) -> CallHandle {
        let mut queue = self.lock();
        let handle = CallHandle {
            batch_id: self.id,
            index: queue.len(),
            method: call.method().to_string(),
        };
        trace!(index = handle.index, method = %handle.method, "Queued call");
        queue.push(call);
        handle
    }

    /// Number of queued calls.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Returns true if nothing has been queued.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Snapshot of the queued calls, in order.
    pub fn pending(&self) -> Vec<PendingCall> {
        self.lock().clone()
    }

    /// Returns a sink that queues calls into this batch.
    pub fn sink(&self) -> QueueingSink<'_> {
        QueueingSink::new(self)
    }

    /// Sends every queued call as one request.
    ///
    /// An empty batch returns empty results without touching the network.
    /// A response that does not hold exactly one result per call fails with
    /// [`FetchError::BatchMismatch`].
    pub async fn flush(self) -> Result<BatchResults, FetchError> {
        let calls = self
            .queue
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner);

        if calls.is_empty() {
            debug!("Empty batch, nothing to send");
            return Ok(BatchResults {
                batch_id: self.id,
                ..BatchResults::default()
            });
        }

        info!(calls = calls.len(), "Flushing batch");
        let values = self.client.execute_batch(&calls).await?;

        if values.len() != calls.len() {
            warn!(
                expected = calls.len(),
                actual = values.len(),
                "Bulk response length does not match queued calls"
            );
            return Err(FetchError::BatchMismatch {
                expected: calls.len(),
                actual: values.len(),
            });
        }

        Ok(BatchResults {
            batch_id: self.id,
            calls,
            values,
        })
    }

    /// Alias for [`Batch::flush`].
    pub async fn send(self) -> Result<BatchResults, FetchError> {
        self.flush().await
    }
}

// ============================================================================
// Batch Results
// ============================================================================

/// Results of a flushed batch, in call order.
///
/// Individual entries may themselves be error envelopes; use
/// [`BatchResults::checked`] to surface those as errors.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchResults {
    batch_id: u64,
    calls: Vec<PendingCall>,
    values: Vec<Value>,
}

impl BatchResults {
    /// Number of results.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if the batch was empty.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The calls that were sent.
    pub fn calls(&self) -> &[PendingCall] {
        &self.calls
    }

    /// Result at `index`.
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }

    /// Result for a handle. Returns `None` if the handle came from a
    /// different batch.
    pub fn get_handle(&self, handle: &CallHandle) -> Option<&Value> {
        if handle.batch_id != self.batch_id {
            return None;
        }
        let call = self.calls.get(handle.index)?;
        if call.method() != handle.method {
            return None;
        }
        self.values.get(handle.index)
    }

    /// Result for a handle, with a per-entry error envelope turned into
    /// [`FetchError::Api`].
    pub fn checked(&self, handle: &CallHandle) -> Result<&Value, FetchError> {
        let value = self.get_handle(handle).ok_or_else(|| {
            FetchError::InvalidResponse(format!(
                "no result for call #{} ({})",
                handle.index, handle.method
            ))
        })?;

        match error_envelope(value) {
            Some(message) => Err(FetchError::Api { message }),
            None => Ok(value),
        }
    }

    /// Deserializes the result for a handle.
    pub fn decode<T: DeserializeOwned>(&self, handle: &CallHandle) -> Result<T, FetchError> {
        Ok(T::deserialize(self.checked(handle)?)?)
    }

    /// Iterates over calls paired with their results.
    pub fn iter(&self) -> impl Iterator<Item = (&PendingCall, &Value)> {
        self.calls.iter().zip(&self.values)
    }

    /// Consumes the results, returning the values in call order.
    pub fn into_values(self) -> Vec<Value> {
        self.values
    }
}

// ============================================================================
// Tests
// ============================================================================
