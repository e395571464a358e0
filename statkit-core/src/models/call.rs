//! Queued remote calls.

use serde::{Deserialize, Serialize};

use super::params::Params;

/// A named remote operation and its parameter bag, waiting in a batch.
///
/// Fields are private: once built, a call does not change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PendingCall {
    method: String,
    #[serde(default)]
    params: Params,
}

impl PendingCall {
    /// Creates a new pending call.
    pub fn new(method: impl Into<String>, params: Params) -> Self {
        Self {
            method: method.into(),
            params,
        }
    }

    /// Creates a call without parameters.
    pub fn bare(method: impl Into<String>) -> Self {
        Self::new(method, Params::new())
    }

    /// Fully qualified method name (e.g. `Actions.get`).
    pub fn method(&self) -> &str {
        &self.method
    }

    /// The call's parameters.
    pub fn params(&self) -> &Params {
        &self.params
    }

    /// The namespace part of the method name (`Actions` for `Actions.get`).
    pub fn namespace(&self) -> Option<&str> {
        self.method.split_once('.').map(|(ns, _)| ns)
    }

    /// Splits the call into its method name and parameters.
    pub fn into_parts(self) -> (String, Params) {
        (self.method, self.params)
    }
}
