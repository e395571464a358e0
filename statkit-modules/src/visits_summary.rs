//! `VisitsSummary` namespace.

use statkit_core::{ReportQuery, ToParams};
use statkit_fetch::RequestSink;

use crate::descriptor::NamespaceDescriptor;

/// Descriptor for the `VisitsSummary` namespace.
pub const DESCRIPTOR: NamespaceDescriptor = NamespaceDescriptor {
    name: "VisitsSummary",
    cli_name: "visits",
    aliases: &["visits-summary", "summary"],
    summary: "Core visit metrics",
    methods: &[
        "get",
        "getVisits",
        "getUniqueVisitors",
        "getUsers",
        "getActions",
        "getMaxActions",
        "getBounceCount",
        "getVisitsConverted",
        "getSumVisitsLength",
        "getSumVisitsLengthPretty",
    ],
};

/// Adapter for the `VisitsSummary` namespace.
#[derive(Debug, Clone)]
pub struct VisitsSummary<S> {
    sink: S,
}

impl<S: RequestSink> VisitsSummary<S> {
    /// Wraps a sink.
    pub fn new(sink: S) -> Self {
        Self { sink }
    }

    /// All visit metrics, or only `columns` when given.
    pub async fn get(&self, query: &ReportQuery, columns: &[&str]) -> S::Output {
        let params = query
            .to_params()
            .with_opt("columns", (!columns.is_empty()).then(|| columns.join(",")));
        self.sink.send("VisitsSummary.get", params).await
    }

    report_methods! {
        /// Visits.
        get_visits => "VisitsSummary.getVisits";
        /// Unique visitors.
        get_unique_visitors => "VisitsSummary.getUniqueVisitors";
        /// Logged-in users.
        get_users => "VisitsSummary.getUsers";
        /// Actions.
        get_actions => "VisitsSummary.getActions";
        /// Most actions in one visit.
        get_max_actions => "VisitsSummary.getMaxActions";
        /// Bounces.
        get_bounce_count => "VisitsSummary.getBounceCount";
        /// Visits with a conversion.
        get_visits_converted => "VisitsSummary.getVisitsConverted";
        /// Total time on site, in seconds.
        get_sum_visits_length => "VisitsSummary.getSumVisitsLength";
        /// Total time on site, formatted.
        get_sum_visits_length_pretty => "VisitsSummary.getSumVisitsLengthPretty";
    }
}

#[cfg(test)]
mod tests {
    use statkit_core::ParamValue;

    use super::*;
    use crate::testing::EchoSink;

    #[tokio::test]
    async fn test_get_with_columns() {
        let call = VisitsSummary::new(EchoSink)
            .get(&ReportQuery::today().site(1), &["nb_visits", "bounce_rate"])
            .await;

        assert_eq!(
            call.params().get("columns"),
            Some(&ParamValue::Str("nb_visits,bounce_rate".into()))
        );
    }

    #[tokio::test]
    async fn test_get_without_columns() {
        let call = VisitsSummary::new(EchoSink)
            .get(&ReportQuery::today(), &[])
            .await;
        assert!(!call.params().contains_key("columns"));
    }

    #[tokio::test]
    async fn test_metric_method() {
        let call = VisitsSummary::new(EchoSink)
            .get_unique_visitors(&ReportQuery::today())
            .await;
        assert_eq!(call.method(), "VisitsSummary.getUniqueVisitors");
    }
}
