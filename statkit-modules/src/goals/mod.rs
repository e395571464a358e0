//! `Goals` namespace: goal management and conversion reports.

mod api;
mod types;

pub use api::{DESCRIPTOR, Goals};
pub use types::{Goal, GoalDefinition, GoalTrigger, MatchAttribute, PatternType};
