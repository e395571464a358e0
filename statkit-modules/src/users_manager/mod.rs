//! `UsersManager` namespace: users, site access and superuser rights.

mod api;
mod types;

pub use api::{DESCRIPTOR, UsersManager};
pub use types::{AccessLevel, User, UserFilter, UserUpdate};
