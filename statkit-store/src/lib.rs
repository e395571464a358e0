// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # `statkit` Store
//!
//! Persisted settings for the `statkit` command line.
//!
//! This crate provides:
//!
//! - **Config**: named profiles (endpoint, default site, format, ...) stored
//!   as JSON in the platform config directory
//! - **Keychain**: API tokens in the system keychain, one per profile
//! - **Resolution**: merging flags, environment and stored settings into a
//!   [`statkit_fetch::ClientConfig`]
//!
//! ## Usage
//!
//! ```no_run
//! # async fn run() -> Result<(), statkit_store::StoreError> {
//! use statkit_fetch::Client;
//! use statkit_store::{Config, Overrides, resolve};
//!
//! let config = Config::load().await?;
//! let resolved = resolve(&config, None, &Overrides::default())?;
//! let client = Client::new(resolved.client)?;
//! # let _ = client;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod keychain;
pub mod persistence;
pub mod resolve;

pub use config::{Config, DEFAULT_PROFILE, ProfileConfig};
pub use error::StoreError;
pub use persistence::{default_config_dir, default_config_path, load_json, load_json_or_default, save_json};
pub use resolve::{ENV_TOKEN, ENV_URL, Overrides, ResolvedProfile, TokenSource, resolve, resolve_with};
