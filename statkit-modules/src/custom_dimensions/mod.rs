//! `CustomDimensions` namespace.
//!
//! Custom dimensions are configured per site with a fixed scope (`visit`
//! or `action`). Action-scoped dimensions can be filled automatically by
//! extraction rules that match against the page URL, a URL parameter or the
//! page title.

mod api;
mod types;

pub use api::{CustomDimensions, DESCRIPTOR};
pub use types::{CustomDimension, DimensionConfig, DimensionScope, Extraction, ExtractionSource};
