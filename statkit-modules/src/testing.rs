//! Test sink that hands every call straight back.

use async_trait::async_trait;
use statkit_core::{Params, PendingCall};
use statkit_fetch::RequestSink;

/// Sink whose output is the call it received.
#[derive(Debug, Clone, Copy, Default)]
pub struct EchoSink;

#[async_trait]
impl RequestSink for EchoSink {
    type Output = PendingCall;

    async fn send(&self, method: &str, params: Params) -> PendingCall {
        PendingCall::new(method, params)
    }
}

/// Renders the parameters of a call as `(key, wire value)` pairs, dropping
/// nulls and compound values.
pub fn scalars(call: &PendingCall) -> Vec<(String, String)> {
    call.params()
        .iter()
        .filter_map(|(k, v)| v.render_scalar().map(|s| (k.to_string(), s)))
        .collect()
}
