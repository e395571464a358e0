//! `TagManager` namespace: containers, tags, triggers, variables and
//! container versions.
//!
//! Most calls address a specific container version, so they take a
//! [`ContainerVersion`] instead of three loose ids.

mod api;
mod types;

pub use api::{DESCRIPTOR, TagManager};
pub use types::{
    Container, ContainerContext, ContainerVersion, FireLimit, TagDefinition, TriggerCondition,
    TriggerDefinition, VariableDefinition,
};
