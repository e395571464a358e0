//! `Live` namespace: raw visit logs and real-time counters.

use statkit_core::{DateSpec, Params, Period, SiteSelector};
use statkit_fetch::RequestSink;

use crate::descriptor::NamespaceDescriptor;

/// Descriptor for the `Live` namespace.
pub const DESCRIPTOR: NamespaceDescriptor = NamespaceDescriptor {
    name: "Live",
    cli_name: "live",
    aliases: &["realtime"],
    summary: "Visit log, visitor profiles and real-time counters",
    methods: &[
        "getLastVisitsDetails",
        "getVisitorProfile",
        "getMostRecentVisitorId",
        "getCounters",
        "getMostRecentVisitsDateTime",
    ],
};

/// Options for [`Live::get_last_visits_details`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VisitLogQuery {
    /// Sites to include. `None` uses the client's default site.
    pub site: Option<SiteSelector>,
    /// Period to restrict to; requires `date`.
    pub period: Option<Period>,
    /// Date to restrict to.
    pub date: Option<DateSpec>,
    /// Segment definition.
    pub segment: Option<String>,
    /// Maximum visits.
    pub limit: Option<u32>,
    /// Visits to skip.
    pub offset: Option<u32>,
    /// Only visits after this Unix timestamp.
    pub min_timestamp: Option<i64>,
    /// Skip the per-visit action list.
    pub without_actions: bool,
}

impl VisitLogQuery {
    /// The latest visits of one site.
    pub fn site(site: impl Into<SiteSelector>) -> Self {
        Self {
            site: Some(site.into()),
            ..Self::default()
        }
    }

    /// Restricts to a period and date.
    #[must_use]
    pub fn window(mut self, period: Period, date: DateSpec) -> Self {
        self.period = Some(period);
        self.date = Some(date);
        self
    }

    /// Sets the segment.
    #[must_use]
    pub fn segment(mut self, segment: impl Into<String>) -> Self {
        self.segment = Some(segment.into());
        self
    }

    /// Sets the maximum number of visits.
    #[must_use]
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Sets the number of visits to skip.
    #[must_use]
    pub fn offset(mut self, offset: u32) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Only visits after the given Unix timestamp.
    #[must_use]
    pub fn since(mut self, timestamp: i64) -> Self {
        self.min_timestamp = Some(timestamp);
        self
    }

    /// Leaves out action details.
    #[must_use]
    pub fn without_actions(mut self) -> Self {
        self.without_actions = true;
        self
    }

    fn to_params(&self) -> Params {
        Params::new()
            .with_opt("idSite", self.site.clone())
            .with_opt("period", self.period)
            .with_opt("date", self.date)
            .with_opt("segment", self.segment.as_deref())
            .with_opt("filter_limit", self.limit)
            .with_opt("filter_offset", self.offset)
            .with_opt("minTimestamp", self.min_timestamp)
            .with_opt("doNotFetchActions", self.without_actions.then_some(true))
    }
}

/// Adapter for the `Live` namespace.
#[derive(Debug, Clone)]
pub struct Live<S> {
    sink: S,
}

impl<S: RequestSink> Live<S> {
    /// Wraps a sink.
    pub fn new(sink: S) -> Self {
        Self { sink }
    }

    /// Visit log.
    pub async fn get_last_visits_details(&self, query: &VisitLogQuery) -> S::Output {
        self.sink
            .send("Live.getLastVisitsDetails", query.to_params())
            .await
    }

    /// Profile of one visitor, or of the most recent visitor when
    /// `visitor_id` is `None`.
    pub async fn get_visitor_profile(
        &self,
        site: u32,
        visitor_id: Option<&str>,
        segment: Option<&str>,
        limit_visits: Option<u32>,
    ) -> S::Output {
        let params = Params::new()
            .with("idSite", site)
            .with_opt("visitorId", visitor_id)
            .with_opt("segment", segment)
            .with_opt("limitVisits", limit_visits);
        self.sink.send("Live.getVisitorProfile", params).await
    }

    /// Id of the most recent visitor.
    pub async fn get_most_recent_visitor_id(&self, site: u32, segment: Option<&str>) -> S::Output {
        let params = Params::new()
            .with("idSite", site)
            .with_opt("segment", segment);
        self.sink.send("Live.getMostRecentVisitorId", params).await
    }

    /// Visits, actions and visitors over the last `last_minutes` minutes.
    pub async fn get_counters(
        &self,
        site: u32,
        last_minutes: u32,
        segment: Option<&str>,
    ) -> S::Output {
        let params = Params::new()
            .with("idSite", site)
            .with("lastMinutes", last_minutes)
            .with_opt("segment", segment);
        self.sink.send("Live.getCounters", params).await
    }

    /// Time of the most recent visit.
    pub async fn get_most_recent_visits_date_time(
        &self,
        site: u32,
        segment: Option<&str>,
    ) -> S::Output {
        let params = Params::new()
            .with("idSite", site)
            .with_opt("segment", segment);
        self.sink.send("Live.getMostRecentVisitsDateTime", params).await
    }
}

#[cfg(test)]
mod tests {
    use statkit_core::ParamValue;

    use super::*;
    use crate::testing::{EchoSink, scalars};

    #[tokio::test]
    async fn test_visit_log_query() {
        let query = VisitLogQuery::site(1)
            .window(Period::Day, DateSpec::Today)
            .limit(10)
            .without_actions();
        let call = Live::new(EchoSink).get_last_visits_details(&query).await;

        assert_eq!(call.method(), "Live.getLastVisitsDetails");
        assert_eq!(
            scalars(&call),
            vec![
                ("idSite".to_string(), "1".to_string()),
                ("period".to_string(), "day".to_string()),
                ("date".to_string(), "today".to_string()),
                ("filter_limit".to_string(), "10".to_string()),
                ("doNotFetchActions".to_string(), "1".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_default_query_is_empty() {
        let call = Live::new(EchoSink)
            .get_last_visits_details(&VisitLogQuery::default())
            .await;
        assert!(call.params().is_empty());
    }

    #[tokio::test]
    async fn test_counters() {
        let call = Live::new(EchoSink).get_counters(3, 30, None).await;

        assert_eq!(call.params().get("lastMinutes"), Some(&ParamValue::Int(30)));
        assert!(!call.params().contains_key("segment"));
    }
}
