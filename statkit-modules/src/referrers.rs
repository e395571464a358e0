//! `Referrers` namespace.

use statkit_fetch::RequestSink;

use crate::descriptor::NamespaceDescriptor;

/// Descriptor for the `Referrers` namespace.
pub const DESCRIPTOR: NamespaceDescriptor = NamespaceDescriptor {
    name: "Referrers",
    cli_name: "referrers",
    aliases: &["refs"],
    summary: "Search engines, keywords, websites, socials and campaigns",
    methods: &[
        "get",
        "getReferrerType",
        "getAll",
        "getKeywords",
        "getSearchEngines",
        "getWebsites",
        "getSocials",
        "getCampaigns",
        "getNumberOfDistinctSearchEngines",
        "getNumberOfDistinctSocialNetworks",
        "getNumberOfDistinctKeywords",
        "getNumberOfDistinctCampaigns",
        "getNumberOfDistinctWebsites",
        "getNumberOfDistinctWebsitesUrls",
        "getKeywordsFromSearchEngineId",
        "getSearchEnginesFromKeywordId",
        "getUrlsFromWebsiteId",
        "getUrlsForSocial",
        "getKeywordsFromCampaignId",
    ],
};

/// Adapter for the `Referrers` namespace.
#[derive(Debug, Clone)]
pub struct Referrers<S> {
    sink: S,
}

impl<S: RequestSink> Referrers<S> {
    /// Wraps a sink.
    pub fn new(sink: S) -> Self {
        Self { sink }
    }

    report_methods! {
        /// Overview of referrer metrics.
        get => "Referrers.get";
        /// Visits by channel type.
        get_referrer_type => "Referrers.getReferrerType";
        /// Every referrer in one flat report.
        get_all => "Referrers.getAll";
        /// Search keywords.
        get_keywords => "Referrers.getKeywords";
        /// Search engines.
        get_search_engines => "Referrers.getSearchEngines";
        /// Referring websites.
        get_websites => "Referrers.getWebsites";
        /// Social networks.
        get_socials => "Referrers.getSocials";
        /// Campaigns.
        get_campaigns => "Referrers.getCampaigns";
        /// Count of distinct search engines.
        get_number_of_distinct_search_engines => "Referrers.getNumberOfDistinctSearchEngines";
        /// Count of distinct social networks.
        get_number_of_distinct_social_networks => "Referrers.getNumberOfDistinctSocialNetworks";
        /// Count of distinct keywords.
        get_number_of_distinct_keywords => "Referrers.getNumberOfDistinctKeywords";
        /// Count of distinct campaigns.
        get_number_of_distinct_campaigns => "Referrers.getNumberOfDistinctCampaigns";
        /// Count of distinct websites.
        get_number_of_distinct_websites => "Referrers.getNumberOfDistinctWebsites";
        /// Count of distinct website URLs.
        get_number_of_distinct_websites_urls => "Referrers.getNumberOfDistinctWebsitesUrls";
    }

    subtable_methods! {
        /// Keywords for one search engine row.
        get_keywords_from_search_engine_id => "Referrers.getKeywordsFromSearchEngineId";
        /// Search engines for one keyword row.
        get_search_engines_from_keyword_id => "Referrers.getSearchEnginesFromKeywordId";
        /// URLs for one website row.
        get_urls_from_website_id => "Referrers.getUrlsFromWebsiteId";
        /// URLs for one social network row.
        get_urls_for_social => "Referrers.getUrlsForSocial";
        /// Keywords for one campaign row.
        get_keywords_from_campaign_id => "Referrers.getKeywordsFromCampaignId";
    }
}

#[cfg(test)]
mod tests {
    use statkit_core::{DateSpec, ParamValue, Period, ReportQuery};

    use super::*;
    use crate::testing::EchoSink;

    #[tokio::test]
    async fn test_report_method() {
        let query = ReportQuery::new(Period::Week, DateSpec::Last(4)).site(1);
        let call = Referrers::new(EchoSink).get_websites(&query).await;

        assert_eq!(call.method(), "Referrers.getWebsites");
        assert_eq!(call.params().get("date"), Some(&ParamValue::Str("last4".into())));
        assert_eq!(call.params().get("period"), Some(&ParamValue::Str("week".into())));
    }

    #[tokio::test]
    async fn test_subtable_method_overrides_query_subtable() {
        let query = ReportQuery::today().subtable(1);
        let call = Referrers::new(EchoSink)
            .get_urls_from_website_id(&query, 9)
            .await;

        assert_eq!(call.params().get("idSubtable"), Some(&ParamValue::Int(9)));
    }
}
