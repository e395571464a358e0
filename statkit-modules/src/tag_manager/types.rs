//! Tag manager types.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::Deserialize;
use statkit_core::{CoreError, ParamValue, Params};

// ============================================================================
// Enums
// ============================================================================

/// Platform a container runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContainerContext {
    /// Web pages.
    #[default]
    Web,
    /// Android apps.
    Android,
    /// iOS apps.
    Ios,
}

impl ContainerContext {
    /// Returns the wire value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Web => "web",
            Self::Android => "android",
            Self::Ios => "ios",
        }
    }
}

impl fmt::Display for ContainerContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContainerContext {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "web" => Ok(Self::Web),
            "android" => Ok(Self::Android),
            "ios" => Ok(Self::Ios),
            _ => Err(CoreError::InvalidParams(format!("unknown container context: {s}"))),
        }
    }
}

impl From<ContainerContext> for ParamValue {
    fn from(context: ContainerContext) -> Self {
        Self::Str(context.as_str().to_string())
    }
}

/// How often a tag may fire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FireLimit {
    /// Every time a fire trigger matches.
    #[default]
    Unlimited,
    /// Once per page view.
    OncePage,
    /// Once per 24 hours.
    Once24Hours,
    /// Once per visitor, ever.
    OnceLifetime,
}

impl FireLimit {
    /// Returns the wire value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unlimited => "unlimited",
            Self::OncePage => "once_page",
            Self::Once24Hours => "once_24hours",
            Self::OnceLifetime => "once_lifetime",
        }
    }
}

impl From<FireLimit> for ParamValue {
    fn from(limit: FireLimit) -> Self {
        Self::Str(limit.as_str().to_string())
    }
}

// ============================================================================
// Container Version
// ============================================================================

/// A container version, the unit tags, triggers and variables belong to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContainerVersion {
    /// Site id.
    pub site: u32,
    /// Container id (e.g. `aBcD1234`).
    pub container: String,
    /// Version id. The draft version is usually the lowest id.
    pub version: u32,
}

impl ContainerVersion {
    /// Creates a reference.
    pub fn new(site: u32, container: impl Into<String>, version: u32) -> Self {
        Self {
            site,
            container: container.into(),
            version,
        }
    }

    pub(crate) fn to_params(&self) -> Params {
        Params::new()
            .with("idSite", self.site)
            .with("idContainer", self.container.as_str())
            .with("idContainerVersion", self.version)
    }
}

// ============================================================================
// Definitions
// ============================================================================

/// A tag to add to a container version.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TagDefinition {
    /// Tag type id (e.g. `Matomo`, `CustomHtml`).
    pub tag_type: String,
    /// Tag name.
    pub name: String,
    /// Type-specific parameters.
    pub parameters: Params,
    /// Triggers that fire the tag.
    pub fire_trigger_ids: Vec<u32>,
    /// Triggers that block the tag.
    pub block_trigger_ids: Vec<u32>,
    /// Fire limit.
    pub fire_limit: Option<FireLimit>,
    /// Delay before firing, in milliseconds.
    pub fire_delay: Option<u32>,
    /// Priority; lower fires first.
    pub priority: Option<u32>,
    /// Not active before this time.
    pub start_date: Option<NaiveDateTime>,
    /// Not active after this time.
    pub end_date: Option<NaiveDateTime>,
    /// Description.
    pub description: Option<String>,
}

impl TagDefinition {
    /// Creates a tag of the given type.
    pub fn new(tag_type: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            tag_type: tag_type.into(),
            name: name.into(),
            ..Self::default()
        }
    }

    /// Sets a type-specific parameter.
    #[must_use]
    pub fn parameter(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.parameters.insert(key, value);
        self
    }

    /// Adds a fire trigger.
    #[must_use]
    pub fn fire_on(mut self, trigger: u32) -> Self {
        self.fire_trigger_ids.push(trigger);
        self
    }

    /// Adds a block trigger.
    #[must_use]
    pub fn block_on(mut self, trigger: u32) -> Self {
        self.block_trigger_ids.push(trigger);
        self
    }

    /// Sets the fire limit.
    #[must_use]
    pub fn fire_limit(mut self, limit: FireLimit) -> Self {
        self.fire_limit = Some(limit);
        self
    }

    pub(crate) fn to_params(&self) -> Params {
        Params::new()
            .with("type", self.tag_type.as_str())
            .with("name", self.name.as_str())
            .with_opt(
                "parameters",
                (!self.parameters.is_empty()).then(|| self.parameters.clone()),
            )
            .with("fireTriggerIds", self.fire_trigger_ids.clone())
            .with_opt(
                "blockTriggerIds",
                (!self.block_trigger_ids.is_empty()).then(|| self.block_trigger_ids.clone()),
            )
            .with_opt("fireLimit", self.fire_limit)
            .with_opt("fireDelay", self.fire_delay)
            .with_opt("priority", self.priority)
            .with_opt("startDate", self.start_date.map(format_datetime))
            .with_opt("endDate", self.end_date.map(format_datetime))
            .with_opt("description", self.description.as_deref())
    }
}

/// One condition of a trigger: `actual <comparison> expected`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggerCondition {
    /// Variable to test (e.g. `PageUrl`).
    pub actual: String,
    /// Comparison id (e.g. `contains`, `equals`, `match_regex`).
    pub comparison: String,
    /// Expected value.
    pub expected: String,
}

impl TriggerCondition {
    /// Creates a condition.
    pub fn new(
        actual: impl Into<String>,
        comparison: impl Into<String>,
        expected: impl Into<String>,
    ) -> Self {
        Self {
            actual: actual.into(),
            comparison: comparison.into(),
            expected: expected.into(),
        }
    }
}

/// A trigger to add to a container version.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TriggerDefinition {
    /// Trigger type id (e.g. `PageView`, `AllElementsClick`).
    pub trigger_type: String,
    /// Trigger name.
    pub name: String,
    /// Type-specific parameters.
    pub parameters: Params,
    /// Conditions that must all hold.
    pub conditions: Vec<TriggerCondition>,
    /// Description.
    pub description: Option<String>,
}

impl TriggerDefinition {
    /// Creates a trigger of the given type.
    pub fn new(trigger_type: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            trigger_type: trigger_type.into(),
            name: name.into(),
            ..Self::default()
        }
    }

    /// Adds a condition.
    #[must_use]
    pub fn condition(mut self, condition: TriggerCondition) -> Self {
        self.conditions.push(condition);
        self
    }

    pub(crate) fn to_params(&self) -> Params {
        let conditions: Params = self
            .conditions
            .iter()
            .enumerate()
            .map(|(i, c)| {
                (
                    i.to_string(),
                    Params::new()
                        .with("actual", c.actual.as_str())
                        .with("comparison", c.comparison.as_str())
                        .with("expected", c.expected.as_str()),
                )
            })
            .collect();

        Params::new()
            .with("type", self.trigger_type.as_str())
            .with("name", self.name.as_str())
            .with_opt(
                "parameters",
                (!self.parameters.is_empty()).then(|| self.parameters.clone()),
            )
            .with_opt("conditions", (!conditions.is_empty()).then_some(conditions))
            .with_opt("description", self.description.as_deref())
    }
}

/// A variable to add to a container version.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VariableDefinition {
    /// Variable type id (e.g. `DataLayer`, `Constant`).
    pub variable_type: String,
    /// Variable name.
    pub name: String,
    /// Type-specific parameters.
    pub parameters: Params,
    /// Value used when the variable resolves to nothing.
    pub default_value: Option<String>,
    /// Description.
    pub description: Option<String>,
}

impl VariableDefinition {
    /// Creates a variable of the given type.
    pub fn new(variable_type: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            variable_type: variable_type.into(),
            name: name.into(),
            ..Self::default()
        }
    }

    /// Sets a type-specific parameter.
    #[must_use]
    pub fn parameter(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.parameters.insert(key, value);
        self
    }

    pub(crate) fn to_params(&self) -> Params {
        Params::new()
            .with("type", self.variable_type.as_str())
            .with("name", self.name.as_str())
            .with_opt(
                "parameters",
                (!self.parameters.is_empty()).then(|| self.parameters.clone()),
            )
            .with_opt("defaultValue", self.default_value.as_deref())
            .with_opt("description", self.description.as_deref())
    }
}

fn format_datetime(value: NaiveDateTime) -> String {
    value.format("%Y-%m-%d %H:%M:%S").to_string()
}

// ============================================================================
// Response
// ============================================================================

/// A container as returned by the API.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Container {
    /// Container id.
    pub idcontainer: String,
    /// Site id.
    #[serde(default)]
    pub idsite: serde_json::Value,
    /// Platform.
    pub context: ContainerContext,
    /// Name.
    pub name: String,
    /// Description.
    #[serde(default)]
    pub description: String,
    /// Draft version.
    #[serde(default)]
    pub draft: Option<serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    #[test]
    fn test_tag_params() {
        let start = NaiveDate::from_ymd_opt(2024, 5, 1)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap();
        let mut tag = TagDefinition::new("Matomo", "Tracker")
            .parameter("matomoConfig", "{{MatomoConfiguration}}")
            .fire_on(3)
            .fire_limit(FireLimit::OncePage);
        tag.start_date = Some(start);

        let params = tag.to_params();
        assert_eq!(params.get("type"), Some(&ParamValue::Str("Matomo".into())));
        assert_eq!(
            params.get("fireTriggerIds"),
            Some(&ParamValue::List(vec![ParamValue::Int(3)]))
        );
        assert!(!params.contains_key("blockTriggerIds"));
        assert_eq!(params.get("fireLimit"), Some(&ParamValue::Str("once_page".into())));
        assert_eq!(
            params.get("startDate"),
            Some(&ParamValue::Str("2024-05-01 08:00:00".into()))
        );
    }

    #[test]
    fn test_trigger_conditions_indexed() {
        let trigger = TriggerDefinition::new("PageView", "Pricing")
            .condition(TriggerCondition::new("PageUrl", "contains", "/pricing"));
        let params = trigger.to_params();

        let Some(ParamValue::Map(conditions)) = params.get("conditions") else {
            panic!("expected conditions map");
        };
        let Some(ParamValue::Map(first)) = conditions.get("0") else {
            panic!("expected first condition");
        };
        assert_eq!(first.get("comparison"), Some(&ParamValue::Str("contains".into())));
    }

    #[test]
    fn test_context_parse() {
        assert_eq!("iOS".parse::<ContainerContext>().unwrap(), ContainerContext::Ios);
        assert!("desktop".parse::<ContainerContext>().is_err());
    }

    #[test]
    fn test_container_response() {
        let container: Container = serde_json::from_value(serde_json::json!({
            "idcontainer": "aBcD1234",
            "idsite": 1,
            "context": "web",
            "name": "Default",
            "description": ""
        }))
        .unwrap();
        assert_eq!(container.context, ContainerContext::Web);
    }
}
