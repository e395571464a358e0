//! Output formatting for CLI.

mod json;
mod text;

pub use json::{JsonFormatter, SummaryOutput};
pub use text::TextFormatter;
