// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # `statkit` Fetch
//!
//! Transport and batch aggregation for the reporting API.
//!
//! ## Transport
//!
//! - [`client::Client`] - Performs calls and bulk requests
//! - [`config::ClientConfig`] - Endpoint, credential and defaults
//! - [`wire`] - Parameter merging and wire encoding
//! - [`response`] - Response decoding and the error envelope
//!
//! ## Batching
//!
//! - [`batch::Batch`] - Queues calls and flushes them as one request
//! - [`sink::RequestSink`] - Seam that lets modules dispatch immediately or
//!   queue into a batch
//!
//! ## Example
//!
//! ```ignore
//! use statkit_core::{Params, PendingCall};
//! use statkit_fetch::{Client, ClientConfig};
//!
//! let config = ClientConfig::builder("https://stats.example.com/")
//!     .token_auth("anonymous")
//!     .build()?;
//! let client = Client::new(config)?;
//!
//! let batch = client.batch();
//! let version = batch.push(PendingCall::bare("API.getMatomoVersion"));
//! batch.add_request("VisitsSummary.get", Params::new().with("idSite", 1));
//!
//! let results = batch.flush().await?;
//! println!("{}", results.checked(&version)?);
//! ```

pub mod batch;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod response;
pub mod sink;
pub mod wire;

// Errors
pub use error::FetchError;

// Transport
pub use client::Client;
pub use config::{ClientConfig, ClientConfigBuilder, DEFAULT_TIMEOUT_SECS};
pub use http::HttpClient;
pub use response::{Payload, RawResponse};
pub use wire::BULK_METHOD;

// Batching
pub use batch::{Batch, BatchResults, CallHandle};
pub use sink::{ImmediateSink, QueueingSink, RequestSink};
