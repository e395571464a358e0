// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # `statkit` Modules
//!
//! Typed adapters for the remote API namespaces.
//!
//! Every adapter is generic over a [`statkit_fetch::RequestSink`], so the
//! same method either sends the call right away or queues it in a batch:
//!
//! | Sink | `Output` of every method |
//! |------|--------------------------|
//! | [`ImmediateSink`](statkit_fetch::ImmediateSink) | `Result<Payload, FetchError>` |
//! | [`QueueingSink`](statkit_fetch::QueueingSink) | `CallHandle` into the batch results |
//!
//! ## Namespaces (12 total)
//!
//! | Namespace | CLI name | Kind |
//! |-----------|----------|------|
//! | `VisitsSummary` | `visits` | Reports |
//! | `Actions` | `actions` | Reports |
//! | `Referrers` | `referrers` | Reports |
//! | `Events` | `events` | Reports |
//! | `Goals` | `goals` | Reports and configuration |
//! | `Live` | `live` | Visit log |
//! | `SitesManager` | `sites` | Configuration |
//! | `UsersManager` | `users` | Configuration |
//! | `CustomDimensions` | `dimensions` | Configuration |
//! | `Annotations` | `annotations` | Configuration |
//! | `TagManager` | `tags` | Configuration |
//! | `API` | `api` | Metadata |
//!
//! ## Usage
//!
//! ```no_run
//! # async fn run() -> Result<(), statkit_fetch::FetchError> {
//! use statkit_core::{DateSpec, Period, ReportQuery};
//! use statkit_fetch::Client;
//! use statkit_modules::ApiNamespaces;
//!
//! let client = Client::from_endpoint("https://stats.example.com/")?;
//! let query = ReportQuery::new(Period::Month, DateSpec::Today).site(1);
//!
//! let referrers = client.immediate().referrers().get_websites(&query).await?;
//! # let _ = referrers;
//! # Ok(())
//! # }
//! ```

#[macro_use]
mod macros;

pub mod descriptor;
pub mod ext;
pub mod registry;

// Namespace modules (alphabetical)
pub mod actions;
pub mod annotations;
pub mod api;
pub mod custom_dimensions;
pub mod events;
pub mod goals;
pub mod live;
pub mod referrers;
pub mod sites_manager;
pub mod tag_manager;
pub mod users_manager;
pub mod visits_summary;

#[cfg(test)]
mod testing;

pub use descriptor::NamespaceDescriptor;
pub use ext::ApiNamespaces;
pub use registry::NamespaceRegistry;

// Re-export adapters
pub use actions::Actions;
pub use annotations::Annotations;
pub use api::Api;
pub use custom_dimensions::CustomDimensions;
pub use events::Events;
pub use goals::Goals;
pub use live::Live;
pub use referrers::Referrers;
pub use sites_manager::SitesManager;
pub use tag_manager::TagManager;
pub use users_manager::UsersManager;
pub use visits_summary::VisitsSummary;
