//! Trait definitions for `statkit`.

use crate::models::Params;

/// Conversion of a typed option struct into the flat parameter bag sent
/// over the wire.
///
/// Implementations emit only the fields that are set, in a stable order, so
/// the same value always produces the same bag whether it is dispatched
/// immediately or queued in a batch.
pub trait ToParams {
    /// Builds the parameter bag for this value.
    fn to_params(&self) -> Params;
}

impl ToParams for Params {
    fn to_params(&self) -> Params {
        self.clone()
    }
}
