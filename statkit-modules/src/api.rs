//! `API` namespace: server metadata and report metadata.

use statkit_core::{Params, ReportQuery, SiteSelector, ToParams};
use statkit_fetch::RequestSink;

use crate::descriptor::NamespaceDescriptor;

/// Descriptor for the `API` namespace.
pub const DESCRIPTOR: NamespaceDescriptor = NamespaceDescriptor {
    name: "API",
    cli_name: "api",
    aliases: &["meta"],
    summary: "Server version, settings and report metadata",
    methods: &[
        "getMatomoVersion",
        "getPhpVersion",
        "getIpFromHeader",
        "getSettings",
        "getDefaultMetricTranslations",
        "getReportMetadata",
        "getProcessedReport",
        "getSegmentsMetadata",
        "getRowEvolution",
        "getSuggestedValuesForSegment",
    ],
};

/// Adapter for the `API` namespace.
#[derive(Debug, Clone)]
pub struct Api<S> {
    sink: S,
}

impl<S: RequestSink> Api<S> {
    /// Wraps a sink.
    pub fn new(sink: S) -> Self {
        Self { sink }
    }

    bare_methods! {
        /// Server version.
        get_matomo_version => "API.getMatomoVersion";
        /// PHP version of the server.
        get_php_version => "API.getPhpVersion";
        /// Caller IP as seen by the server.
        get_ip_from_header => "API.getIpFromHeader";
        /// Instance-wide settings.
        get_settings => "API.getSettings";
        /// Translated metric names.
        get_default_metric_translations => "API.getDefaultMetricTranslations";
    }

    /// Metadata for every report available on a site.
    pub async fn get_report_metadata(&self, site: u32) -> S::Output {
        self.sink
            .send("API.getReportMetadata", Params::new().with("idSite", site))
            .await
    }

    /// Any report, addressed by module and action, with metadata attached.
    pub async fn get_processed_report(
        &self,
        query: &ReportQuery,
        api_module: &str,
        api_action: &str,
    ) -> S::Output {
        let mut params = query.to_params();
        params.insert("apiModule", api_module);
        params.insert("apiAction", api_action);
        self.sink.send("API.getProcessedReport", params).await
    }

    /// Segment dimensions available on the given sites.
    pub async fn get_segments_metadata(&self, sites: &SiteSelector) -> S::Output {
        self.sink
            .send(
                "API.getSegmentsMetadata",
                Params::new().with("idSites", sites.clone()),
            )
            .await
    }

    /// Evolution of one report row (or the whole report) over time.
    pub async fn get_row_evolution(
        &self,
        query: &ReportQuery,
        api_module: &str,
        api_action: &str,
        label: Option<&str>,
    ) -> S::Output {
        let params = query
            .to_params()
            .with("apiModule", api_module)
            .with("apiAction", api_action)
            .with_opt("label", label);
        self.sink.send("API.getRowEvolution", params).await
    }

    /// Values seen recently for a segment dimension.
    pub async fn get_suggested_values_for_segment(
        &self,
        segment_name: &str,
        site: u32,
    ) -> S::Output {
        let params = Params::new()
            .with("segmentName", segment_name)
            .with("idSite", site);
        self.sink.send("API.getSuggestedValuesForSegment", params).await
    }
}

#[cfg(test)]
mod tests {
    use statkit_core::{DateSpec, ParamValue, Period};

    use super::*;
    use crate::testing::{EchoSink, scalars};

    #[tokio::test]
    async fn test_bare_method() {
        let call = Api::new(EchoSink).get_matomo_version().await;
        assert_eq!(call.method(), "API.getMatomoVersion");
        assert!(call.params().is_empty());
    }

    #[tokio::test]
    async fn test_processed_report_appends_target() {
        let query = ReportQuery::new(Period::Month, DateSpec::Yesterday).site(2);
        let call = Api::new(EchoSink)
            .get_processed_report(&query, "UserCountry", "getCountry")
            .await;

        assert_eq!(call.method(), "API.getProcessedReport");
        assert_eq!(
            scalars(&call),
            vec![
                ("idSite".to_string(), "2".to_string()),
                ("period".to_string(), "month".to_string()),
                ("date".to_string(), "yesterday".to_string()),
                ("apiModule".to_string(), "UserCountry".to_string()),
                ("apiAction".to_string(), "getCountry".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_segments_metadata_takes_site_list() {
        let call = Api::new(EchoSink)
            .get_segments_metadata(&SiteSelector::Many(vec![1, 4]))
            .await;

        assert_eq!(
            call.params().get("idSites"),
            Some(&ParamValue::List(vec![ParamValue::Int(1), ParamValue::Int(4)]))
        );
    }

    #[tokio::test]
    async fn test_row_evolution_label_optional() {
        let query = ReportQuery::today().site(1);
        let call = Api::new(EchoSink)
            .get_row_evolution(&query, "Referrers", "getWebsites", None)
            .await;
        assert!(!call.params().contains_key("label"));
    }
}
