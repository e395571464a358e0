//! Core error types for `statkit`.

use thiserror::Error;

/// Errors raised while parsing or building core values.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// Unknown reporting period.
    #[error("Invalid period: {0}")]
    InvalidPeriod(String),

    /// Date text that is neither a keyword, a `YYYY-MM-DD` date, nor a range.
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    /// Unknown response format.
    #[error("Invalid response format: {0}")]
    InvalidFormat(String),

    /// Site selector text that is not `all` or a list of ids.
    #[error("Invalid site selector: {0}")]
    InvalidSiteSelector(String),

    /// A parameter bag could not be built from the given input.
    #[error("Invalid parameters: {0}")]
    InvalidParams(String),
}
