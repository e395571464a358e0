//! `Events` namespace: event category, action and name reports.

use std::fmt;
use std::str::FromStr;

use statkit_core::{CoreError, Params, ParamValue, ReportQuery, ToParams};
use statkit_fetch::RequestSink;

use crate::descriptor::NamespaceDescriptor;

/// Descriptor for the `Events` namespace.
pub const DESCRIPTOR: NamespaceDescriptor = NamespaceDescriptor {
    name: "Events",
    cli_name: "events",
    aliases: &[],
    summary: "Event category, action and name reports",
    methods: &[
        "getCategory",
        "getAction",
        "getName",
        "getActionFromCategoryId",
        "getNameFromCategoryId",
        "getCategoryFromActionId",
        "getNameFromActionId",
        "getActionFromNameId",
        "getCategoryFromNameId",
        "getActionToLoadSubtables",
        "getDefaultSecondaryDimension",
    ],
};

/// An event dimension, used as the secondary breakdown of an event report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventDimension {
    /// `eventCategory`
    Category,
    /// `eventAction`
    Action,
    /// `eventName`
    Name,
}

impl EventDimension {
    /// Returns the wire value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Category => "eventCategory",
            Self::Action => "eventAction",
            Self::Name => "eventName",
        }
    }
}

impl fmt::Display for EventDimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventDimension {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "eventCategory" | "category" => Ok(Self::Category),
            "eventAction" | "action" => Ok(Self::Action),
            "eventName" | "name" => Ok(Self::Name),
            _ => Err(CoreError::InvalidParams(format!("unknown event dimension: {s}"))),
        }
    }
}

impl From<EventDimension> for ParamValue {
    fn from(dimension: EventDimension) -> Self {
        Self::Str(dimension.as_str().to_string())
    }
}

/// Adapter for the `Events` namespace.
#[derive(Debug, Clone)]
pub struct Events<S> {
    sink: S,
}

impl<S: RequestSink> Events<S> {
    /// Wraps a sink.
    pub fn new(sink: S) -> Self {
        Self { sink }
    }

    /// Events by category.
    pub async fn get_category(
        &self,
        query: &ReportQuery,
        secondary: Option<EventDimension>,
    ) -> S::Output {
        self.primary("Events.getCategory", query, secondary).await
    }

    /// Events by action.
    pub async fn get_action(
        &self,
        query: &ReportQuery,
        secondary: Option<EventDimension>,
    ) -> S::Output {
        self.primary("Events.getAction", query, secondary).await
    }

    /// Events by name.
    pub async fn get_name(
        &self,
        query: &ReportQuery,
        secondary: Option<EventDimension>,
    ) -> S::Output {
        self.primary("Events.getName", query, secondary).await
    }

    subtable_methods! {
        /// Actions within one category row.
        get_action_from_category_id => "Events.getActionFromCategoryId";
        /// Names within one category row.
        get_name_from_category_id => "Events.getNameFromCategoryId";
        /// Categories within one action row.
        get_category_from_action_id => "Events.getCategoryFromActionId";
        /// Names within one action row.
        get_name_from_action_id => "Events.getNameFromActionId";
        /// Actions within one name row.
        get_action_from_name_id => "Events.getActionFromNameId";
        /// Categories within one name row.
        get_category_from_name_id => "Events.getCategoryFromNameId";
    }

    /// The report method that loads subtables for a primary dimension.
    pub async fn get_action_to_load_subtables(
        &self,
        api_method: &str,
        secondary: Option<EventDimension>,
    ) -> S::Output {
        let params = Params::new()
            .with("apiMethod", api_method)
            .with_opt("secondaryDimension", secondary);
        self.sink.send("Events.getActionToLoadSubtables", params).await
    }

    /// The default secondary dimension for a report method.
    pub async fn get_default_secondary_dimension(&self, api_method: &str) -> S::Output {
        self.sink
            .send(
                "Events.getDefaultSecondaryDimension",
                Params::new().with("apiMethod", api_method),
            )
            .await
    }

    async fn primary(
        &self,
        method: &str,
        query: &ReportQuery,
        secondary: Option<EventDimension>,
    ) -> S::Output {
        let params = query.to_params().with_opt("secondaryDimension", secondary);
        self.sink.send(method, params).await
    }
}
