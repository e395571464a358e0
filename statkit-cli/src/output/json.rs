//! JSON output formatting.

use anyhow::Result;
use serde::Serialize;
use serde_json::Value;
use statkit_core::PendingCall;
use statkit_fetch::{BatchResults, Payload};
use statkit_modules::NamespaceDescriptor;

// ============================================================================
// Output Types
// ============================================================================

/// One call and its result in a batch.
#[derive(Debug, Serialize)]
pub struct BatchEntryOutput<'a> {
    pub method: &'a str,
    pub result: &'a Value,
}

/// Namespace listing entry.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NamespaceOutput {
    pub name: &'static str,
    pub cli_name: &'static str,
    pub aliases: &'static [&'static str],
    pub summary: &'static str,
    pub methods: Vec<String>,
}

impl From<&NamespaceDescriptor> for NamespaceOutput {
    fn from(desc: &NamespaceDescriptor) -> Self {
        Self {
            name: desc.name,
            cli_name: desc.cli_name,
            aliases: desc.aliases,
            summary: desc.summary,
            methods: desc.qualified_methods().collect(),
        }
    }
}

/// Site overview built from three reports.
#[derive(Debug, Serialize)]
pub struct SummaryOutput {
    pub site: u32,
    pub period: String,
    pub date: String,
    pub visits: Value,
    pub actions: Value,
    pub referrers: Value,
}

// ============================================================================
// JSON Formatter
// ============================================================================

/// JSON formatter.
pub struct JsonFormatter {
    pretty: bool,
}

impl JsonFormatter {
    /// Creates a new JSON formatter.
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    /// Formats any serializable data.
    pub fn format<T: Serialize>(&self, data: &T) -> Result<String> {
        let output = if self.pretty {
            serde_json::to_string_pretty(data)?
        } else {
            serde_json::to_string(data)?
        };
        Ok(output)
    }

    /// Formats a single call result. Non-JSON payloads are printed as-is.
    pub fn format_payload(&self, payload: &Payload) -> Result<String> {
        match payload {
            Payload::Json(value) => self.format(value),
            Payload::Text(text) => Ok(text.clone()),
            Payload::Original(raw) => Ok(raw.text()),
        }
    }

    /// Formats batch results as an array of `{method, result}`.
    pub fn format_batch(&self, results: &BatchResults) -> Result<String> {
        let entries: Vec<BatchEntryOutput<'_>> = results
            .iter()
            .map(|(call, value): (&PendingCall, &Value)| BatchEntryOutput {
                method: call.method(),
                result: value,
            })
            .collect();
        self.format(&entries)
    }

    /// Formats namespace descriptors.
    pub fn format_namespaces(&self, descriptors: &[NamespaceDescriptor]) -> Result<String> {
        let output: Vec<NamespaceOutput> = descriptors.iter().map(NamespaceOutput::from).collect();
        self.format(&output)
    }
}
