// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # `statkit` Core
//!
//! Core types shared by every `statkit` crate. Nothing in here performs I/O.
//!
//! - Parameter bags ([`Params`], [`ParamValue`]) in the shape the reporting
//!   API expects before wire encoding
//! - Queued calls ([`PendingCall`]) used by the batch aggregator
//! - Response formats ([`ResponseFormat`])
//! - Reporting query types ([`ReportQuery`], [`Period`], [`DateSpec`],
//!   [`SiteSelector`])
//! - The [`ToParams`] trait implemented by typed option structs
//!
//! ## Example
//!
//! ```
//! use statkit_core::{DateSpec, Period, ReportQuery, ToParams};
//!
//! let query = ReportQuery::new(Period::Day, DateSpec::Today).site(1);
//! let params = query.to_params();
//!
//! assert_eq!(params.len(), 3);
//! assert_eq!(params.get("period").and_then(|v| v.render_scalar()).as_deref(), Some("day"));
//! ```

pub mod error;
pub mod models;
pub mod traits;

pub use error::CoreError;

pub use models::{
    // Parameter bags
    ParamValue,
    Params,
    // Calls
    PendingCall,
    // Formats
    ResponseFormat,
    // Report queries
    DateSpec,
    Period,
    ReportQuery,
    SiteSelector,
    SortOrder,
};

pub use traits::ToParams;
