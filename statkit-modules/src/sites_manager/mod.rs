//! `SitesManager` namespace: website registration and settings.

mod api;
mod types;

pub use api::{DESCRIPTOR, SitesManager};
pub use types::{Site, SiteDefinition, UrlFragments};
