//! Goal types.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use statkit_core::{CoreError, Params};

// ============================================================================
// Match Attribute
// ============================================================================

/// What a goal's pattern is matched against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchAttribute {
    /// Page URL.
    Url,
    /// Page title.
    Title,
    /// Download URL.
    File,
    /// Outlink URL.
    ExternalWebsite,
    /// Event category.
    EventCategory,
    /// Event action.
    EventAction,
    /// Event name.
    EventName,
    /// Visit duration in minutes.
    VisitDuration,
}

impl MatchAttribute {
    /// Returns the wire value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Url => "url",
            Self::Title => "title",
            Self::File => "file",
            Self::ExternalWebsite => "external_website",
            Self::EventCategory => "event_category",
            Self::EventAction => "event_action",
            Self::EventName => "event_name",
            Self::VisitDuration => "visit_duration",
        }
    }

    /// Returns all attributes.
    pub fn all() -> &'static [MatchAttribute] {
        &[
            Self::Url,
            Self::Title,
            Self::File,
            Self::ExternalWebsite,
            Self::EventCategory,
            Self::EventAction,
            Self::EventName,
            Self::VisitDuration,
        ]
    }
}

impl fmt::Display for MatchAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MatchAttribute {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|a| a.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| CoreError::InvalidParams(format!("unknown match attribute: {s}")))
    }
}

// ============================================================================
// Pattern Type
// ============================================================================

/// How a goal pattern is compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PatternType {
    /// Substring match.
    #[default]
    Contains,
    /// Exact match.
    Exact,
    /// Regular expression.
    Regex,
    /// Numeric greater-than (visit duration goals).
    GreaterThan,
}

impl PatternType {
    /// Returns the wire value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Contains => "contains",
            Self::Exact => "exact",
            Self::Regex => "regex",
            Self::GreaterThan => "greater_than",
        }
    }
}

impl FromStr for PatternType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "contains" => Ok(Self::Contains),
            "exact" => Ok(Self::Exact),
            "regex" => Ok(Self::Regex),
            "greater_than" => Ok(Self::GreaterThan),
            _ => Err(CoreError::InvalidParams(format!("unknown pattern type: {s}"))),
        }
    }
}

// ============================================================================
// Goal Trigger
// ============================================================================

/// When a goal converts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GoalTrigger {
    /// Only when tracked explicitly.
    Manually,
    /// When an attribute of an action matches a pattern.
    Matching {
        /// Attribute to test.
        attribute: MatchAttribute,
        /// Pattern.
        pattern: String,
        /// Comparison.
        pattern_type: PatternType,
    },
}

impl GoalTrigger {
    /// Trigger matching page URLs.
    pub fn url(pattern: impl Into<String>, pattern_type: PatternType) -> Self {
        Self::Matching {
            attribute: MatchAttribute::Url,
            pattern: pattern.into(),
            pattern_type,
        }
    }

    /// Trigger matching event categories.
    pub fn event_category(pattern: impl Into<String>, pattern_type: PatternType) -> Self {
        Self::Matching {
            attribute: MatchAttribute::EventCategory,
            pattern: pattern.into(),
            pattern_type,
        }
    }

    /// Trigger for visits longer than `minutes`.
    pub fn visit_longer_than(minutes: u32) -> Self {
        Self::Matching {
            attribute: MatchAttribute::VisitDuration,
            pattern: minutes.to_string(),
            pattern_type: PatternType::GreaterThan,
        }
    }

    fn parts(&self) -> (&str, &str, &str) {
        match self {
            Self::Manually => ("manually", "", PatternType::Contains.as_str()),
            Self::Matching {
                attribute,
                pattern,
                pattern_type,
            } => (attribute.as_str(), pattern.as_str(), pattern_type.as_str()),
        }
    }
}

// ============================================================================
// Goal Definition
// ============================================================================

/// Settings for creating or updating a goal.
#[derive(Debug, Clone, PartialEq)]
pub struct GoalDefinition {
    /// Goal name.
    pub name: String,
    /// Conversion trigger.
    pub trigger: GoalTrigger,
    /// Case-sensitive pattern matching.
    pub case_sensitive: bool,
    /// Default revenue per conversion.
    pub revenue: Option<f64>,
    /// Count more than one conversion per visit.
    pub allow_multiple_conversions: bool,
    /// Description.
    pub description: Option<String>,
    /// Use the event value as revenue (event triggers only).
    pub use_event_value_as_revenue: bool,
}

impl GoalDefinition {
    /// Creates a definition with defaults for the optional settings.
    pub fn new(name: impl Into<String>, trigger: GoalTrigger) -> Self {
        Self {
            name: name.into(),
            trigger,
            case_sensitive: false,
            revenue: None,
            allow_multiple_conversions: false,
            description: None,
            use_event_value_as_revenue: false,
        }
    }

    /// Sets case sensitivity.
    #[must_use]
    pub fn case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive = case_sensitive;
        self
    }

    /// Sets the default revenue.
    #[must_use]
    pub fn revenue(mut self, revenue: f64) -> Self {
        self.revenue = Some(revenue);
        self
    }

    /// Allows multiple conversions per visit.
    #[must_use]
    pub fn allow_multiple_conversions(mut self, allow: bool) -> Self {
        self.allow_multiple_conversions = allow;
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Uses the event value as revenue.
    #[must_use]
    pub fn use_event_value_as_revenue(mut self, enabled: bool) -> Self {
        self.use_event_value_as_revenue = enabled;
        self
    }

    pub(crate) fn to_params(&self) -> Params {
        let (attribute, pattern, pattern_type) = self.trigger.parts();

        Params::new()
            .with("name", self.name.as_str())
            .with("matchAttribute", attribute)
            .with("pattern", pattern)
            .with("patternType", pattern_type)
            .with("caseSensitive", self.case_sensitive)
            .with_opt("revenue", self.revenue)
            .with("allowMultipleConversionsPerVisit", self.allow_multiple_conversions)
            .with_opt("description", self.description.as_deref())
            .with("useEventValueAsRevenue", self.use_event_value_as_revenue)
    }
}

// ============================================================================
// Response
// ============================================================================

/// A goal as returned by `Goals.getGoal` / `Goals.getGoals`.
///
/// Numeric fields arrive as strings or numbers depending on the server
/// version, so they are kept as raw JSON.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Goal {
    /// Goal id.
    pub idgoal: serde_json::Value,
    /// Site id.
    #[serde(default)]
    pub idsite: serde_json::Value,
    /// Goal name.
    pub name: String,
    /// Match attribute (wire value).
    #[serde(default)]
    pub match_attribute: String,
    /// Pattern.
    #[serde(default)]
    pub pattern: String,
    /// Pattern type (wire value).
    #[serde(default)]
    pub pattern_type: String,
    /// Default revenue.
    #[serde(default)]
    pub revenue: serde_json::Value,
}

impl Goal {
    /// Parses the match attribute, `None` for manual goals.
    pub fn attribute(&self) -> Option<MatchAttribute> {
        self.match_attribute.parse().ok()
    }
}
