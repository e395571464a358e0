//! Custom dimension types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use statkit_core::{CoreError, ParamValue, Params};

// ============================================================================
// Scope
// ============================================================================

/// What a custom dimension is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DimensionScope {
    /// One value per visit.
    Visit,
    /// One value per action.
    Action,
}

impl DimensionScope {
    /// Returns the wire value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Visit => "visit",
            Self::Action => "action",
        }
    }
}

impl fmt::Display for DimensionScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DimensionScope {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "visit" => Ok(Self::Visit),
            "action" => Ok(Self::Action),
            _ => Err(CoreError::InvalidParams(format!("unknown dimension scope: {s}"))),
        }
    }
}

impl From<DimensionScope> for ParamValue {
    fn from(scope: DimensionScope) -> Self {
        Self::Str(scope.as_str().to_string())
    }
}

// ============================================================================
// Extraction
// ============================================================================

/// Where an extraction rule reads from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ExtractionSource {
    /// The page URL.
    Url,
    /// A query parameter of the page URL.
    UrlParam,
    /// The page title.
    PageTitle,
}

impl ExtractionSource {
    /// Returns the wire value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Url => "url",
            Self::UrlParam => "urlparam",
            Self::PageTitle => "action_name",
        }
    }
}

/// An extraction rule: a source and a pattern whose first capture group
/// becomes the dimension value (or, for `UrlParam`, the parameter name).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    /// Source.
    pub source: ExtractionSource,
    /// Pattern.
    pub pattern: String,
}

impl Extraction {
    /// Creates an extraction rule.
    pub fn new(source: ExtractionSource, pattern: impl Into<String>) -> Self {
        Self {
            source,
            pattern: pattern.into(),
        }
    }

    fn to_params(&self) -> Params {
        Params::new()
            .with("dimension", self.source.as_str())
            .with("pattern", self.pattern.as_str())
    }
}

// ============================================================================
// Dimension Config
// ============================================================================

/// Settings shared by creating and updating a custom dimension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DimensionConfig {
    /// Display name.
    pub name: String,
    /// Whether tracking requests may set it.
    pub active: bool,
    /// Extraction rules (action scope only).
    pub extractions: Vec<Extraction>,
    /// Whether extraction patterns are case sensitive.
    pub case_sensitive: bool,
}

impl DimensionConfig {
    /// An active dimension without extractions.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            active: true,
            extractions: Vec::new(),
            case_sensitive: true,
        }
    }

    /// Sets the active flag.
    #[must_use]
    pub fn active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    /// Adds an extraction rule.
    #[must_use]
    pub fn extraction(mut self, extraction: Extraction) -> Self {
        self.extractions.push(extraction);
        self
    }

    /// Sets case sensitivity of extraction patterns.
    #[must_use]
    pub fn case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive = case_sensitive;
        self
    }

    /// Extraction rules keyed by position, so they encode as
    /// `extractions[0][dimension]=...`.
    pub(crate) fn extraction_params(&self) -> Option<Params> {
        if self.extractions.is_empty() {
            return None;
        }

        Some(
            self.extractions
                .iter()
                .enumerate()
                .map(|(i, e)| (i.to_string(), e.to_params()))
                .collect(),
        )
    }
}

// ============================================================================
// Response
// ============================================================================

/// A configured custom dimension as returned by the API.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CustomDimension {
    /// Dimension id.
    #[serde(rename = "idcustomdimension")]
    pub id: serde_json::Value,
    /// Site id.
    #[serde(rename = "idsite", default)]
    pub site: serde_json::Value,
    /// Display name.
    pub name: String,
    /// Scope.
    pub scope: DimensionScope,
    /// Tracking slot index.
    #[serde(default)]
    pub index: serde_json::Value,
    /// Active flag.
    #[serde(default)]
    pub active: bool,
}
