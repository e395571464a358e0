//! Domain models for `statkit`.
//!
//! ## Submodules
//!
//! - [`params`] - Parameter bags ([`Params`], [`ParamValue`])
//! - [`call`] - Queued calls ([`PendingCall`])
//! - [`format`] - Response formats ([`ResponseFormat`])
//! - [`report`] - Reporting queries ([`ReportQuery`], [`Period`], [`DateSpec`])

pub mod call;
pub mod format;
pub mod params;
pub mod report;

pub use call::PendingCall;
pub use format::ResponseFormat;
pub use params::{ParamValue, Params};
pub use report::{DateSpec, Period, ReportQuery, SiteSelector, SortOrder};
#[cfg(test)]
mod serde_tests;
