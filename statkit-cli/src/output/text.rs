//! Text output formatting.

use serde_json::Value;
use statkit_fetch::{BatchResults, Payload};
use statkit_modules::NamespaceDescriptor;

use super::json::SummaryOutput;

// ============================================================================
// ANSI Colors
// ============================================================================

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const CYAN: &str = "\x1b[36m";

/// Columns shown first in a report row.
const LEAD_COLUMNS: &[&str] = &["label", "nb_visits", "nb_hits"];

/// Text formatter with optional colors.
pub struct TextFormatter {
    use_colors: bool,
}

impl TextFormatter {
    /// Creates a new text formatter.
    pub fn new(use_colors: bool) -> Self {
        Self { use_colors }
    }

    // ========================================================================
    // Values
    // ========================================================================

    /// Formats a call result.
    pub fn format_payload(&self, payload: &Payload) -> String {
        match payload {
            Payload::Json(value) => self.format_value(value),
            Payload::Text(text) => text.clone(),
            Payload::Original(raw) => raw.text(),
        }
    }

    /// Formats a decoded JSON value.
    ///
    /// Report tables (arrays of objects) print one row per line, other
    /// objects print one `key: value` line per field.
    pub fn format_value(&self, value: &Value) -> String {
        let mut lines = Vec::new();
        self.push_value(&mut lines, value, 0);
        lines.join("\n")
    }

    fn push_value(&self, lines: &mut Vec<String>, value: &Value, depth: usize) {
        let indent = "  ".repeat(depth);
        match value {
            Value::Array(items) if items.is_empty() => lines.push(format!("{indent}(no rows)")),
            Value::Array(items) => {
                for item in items {
                    match item {
                        Value::Object(_) => lines.push(format!("{indent}{}", self.row(item))),
                        other => lines.push(format!("{indent}{}", scalar(other))),
                    }
                }
            }
            Value::Object(map) => {
                let width = map.keys().map(String::len).max().unwrap_or(0);
                for (key, field) in map {
                    if field.is_object() || field.is_array() {
                        lines.push(format!("{indent}{}", self.bold(key)));
                        self.push_value(lines, field, depth + 1);
                    } else {
                        lines.push(format!("{indent}{key:<width$}  {}", scalar(field)));
                    }
                }
            }
            other => lines.push(format!("{indent}{}", scalar(other))),
        }
    }

    /// One report row: lead columns first, then remaining scalar columns.
    fn row(&self, row: &Value) -> String {
        let Value::Object(map) = row else {
            return scalar(row);
        };

        let mut parts = Vec::new();
        for key in LEAD_COLUMNS {
            if let Some(field) = map.get(*key) {
                if *key == "label" {
                    parts.push(self.bold(&scalar(field)));
                } else {
                    parts.push(format!("{key}={}", scalar(field)));
                }
            }
        }
        for (key, field) in map {
            if LEAD_COLUMNS.contains(&key.as_str()) || field.is_object() || field.is_array() {
                continue;
            }
            parts.push(self.dim(&format!("{key}={}", scalar(field))));
        }
        parts.join("  ")
    }

    /// Formats batch results, one section per call.
    pub fn format_batch(&self, results: &BatchResults) -> String {
        let mut sections = Vec::new();
        for (index, (call, value)) in results.iter().enumerate() {
            sections.push(format!(
                "{} {}\n{}",
                self.cyan(&format!("[{index}]")),
                self.bold(call.method()),
                self.format_value(value)
            ));
        }
        sections.join("\n\n")
    }

    // ========================================================================
    // Namespaces
    // ========================================================================

    /// Header for the namespace list.
    pub fn format_namespaces_header(&self) -> String {
        self.bold(&format!(
            "{:<12} {:<18} {:>7}  {}",
            "CLI", "NAMESPACE", "METHODS", "DESCRIPTION"
        ))
    }

    /// One line of the namespace list.
    pub fn format_namespace_line(&self, desc: &NamespaceDescriptor) -> String {
        format!(
            "{:<12} {:<18} {:>7}  {}",
            desc.cli_name,
            desc.name,
            desc.methods.len(),
            desc.summary
        )
    }

    /// Full listing of one namespace.
    pub fn format_namespace_detail(&self, desc: &NamespaceDescriptor) -> String {
        let mut lines = vec![format!("{} ({})", self.bold(desc.name), desc.cli_name)];
        if !desc.aliases.is_empty() {
            lines.push(self.dim(&format!("aliases: {}", desc.aliases.join(", "))));
        }
        lines.push(desc.summary.to_string());
        lines.push(String::new());
        for method in desc.qualified_methods() {
            lines.push(format!("  {method}"));
        }
        lines.join("\n")
    }

    // ========================================================================
    // Summary
    // ========================================================================

    /// Formats a site overview.
    pub fn format_summary(&self, summary: &SummaryOutput) -> String {
        let title = format!(
            "Site {} · {} · {}",
            summary.site, summary.period, summary.date
        );
        let mut lines = vec![self.bold(&title), "─".repeat(40)];

        let visits = [
            ("Visits", metric(&summary.visits, "nb_visits")),
            ("Unique visitors", metric(&summary.visits, "nb_uniq_visitors")),
            ("Actions", metric(&summary.visits, "nb_actions")),
            ("Bounce rate", metric(&summary.visits, "bounce_rate")),
            (
                "Avg. time on site",
                summary
                    .visits
                    .get("avg_time_on_site")
                    .and_then(Value::as_u64)
                    .map_or_else(|| "-".to_string(), format_duration),
            ),
            ("Pageviews", metric(&summary.actions, "nb_pageviews")),
            ("Downloads", metric(&summary.actions, "nb_downloads")),
            ("Outlinks", metric(&summary.actions, "nb_outlinks")),
        ];
        for (label, value) in visits {
            lines.push(format!("{label:<18} {value:>12}"));
        }

        lines.push(String::new());
        lines.push(self.bold("Referrers"));
        match summary.referrers.as_array() {
            Some(rows) if !rows.is_empty() => {
                for row in rows {
                    lines.push(format!(
                        "  {:<16} {:>12}",
                        metric(row, "label"),
                        metric(row, "nb_visits")
                    ));
                }
            }
            _ => lines.push(self.dim("  (no referrer data)")),
        }

        lines.join("\n")
    }

    // ========================================================================
    // Color Helpers
    // ========================================================================

    fn bold(&self, text: &str) -> String {
        self.paint(BOLD, text)
    }

    fn dim(&self, text: &str) -> String {
        self.paint(DIM, text)
    }

    fn cyan(&self, text: &str) -> String {
        self.paint(CYAN, text)
    }

    fn paint(&self, code: &str, text: &str) -> String {
        if self.use_colors {
            format!("{code}{text}{RESET}")
        } else {
            text.to_string()
        }
    }
}

// ============================================================================
// Helpers
// ============================================================================

/// Renders a scalar without JSON quoting.
pub fn scalar(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "-".to_string(),
        other => other.to_string(),
    }
}

/// A field of a report object, or `-` when missing.
pub fn metric(value: &Value, key: &str) -> String {
    value.get(key).map_or_else(|| "-".to_string(), scalar)
}

/// Formats seconds as `1h 2m 3s`.
pub fn format_duration(secs: u64) -> String {
    let hours = secs / 3600;
    let minutes = (secs % 3600) / 60;
    let seconds = secs % 60;

    if hours > 0 {
        format!("{hours}h {minutes}m {seconds}s")
    } else if minutes > 0 {
        format!("{minutes}m {seconds}s")
    } else {
        format!("{seconds}s")
    }
}
