//! CLI command implementations.

pub mod batch;
pub mod call;
pub mod config;
pub mod namespaces;
pub mod summary;
