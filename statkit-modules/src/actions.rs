//! `Actions` namespace: pages, downloads, outlinks and site search.

use statkit_core::{ReportQuery, ToParams};
use statkit_fetch::RequestSink;

use crate::descriptor::NamespaceDescriptor;

/// Descriptor for the `Actions` namespace.
pub const DESCRIPTOR: NamespaceDescriptor = NamespaceDescriptor {
    name: "Actions",
    cli_name: "actions",
    aliases: &["pages"],
    summary: "Page views, downloads, outlinks and site search",
    methods: &[
        "get",
        "getPageUrls",
        "getPageUrlsFollowingSiteSearch",
        "getPageTitlesFollowingSiteSearch",
        "getEntryPageUrls",
        "getExitPageUrls",
        "getEntryPageTitles",
        "getExitPageTitles",
        "getPageTitles",
        "getDownloads",
        "getOutlinks",
        "getSiteSearchKeywords",
        "getSiteSearchNoResultKeywords",
        "getSiteSearchCategories",
        "getPageUrl",
        "getPageTitle",
        "getDownload",
        "getOutlink",
    ],
};

/// Adapter for the `Actions` namespace.
#[derive(Debug, Clone)]
pub struct Actions<S> {
    sink: S,
}

impl<S: RequestSink> Actions<S> {
    /// Wraps a sink.
    pub fn new(sink: S) -> Self {
        Self { sink }
    }

    report_methods! {
        /// Overview metrics (page views, downloads, outlinks, searches).
        get => "Actions.get";
        /// Page URL report.
        get_page_urls => "Actions.getPageUrls";
        /// Pages viewed right after a site search.
        get_page_urls_following_site_search => "Actions.getPageUrlsFollowingSiteSearch";
        /// Page titles viewed right after a site search.
        get_page_titles_following_site_search => "Actions.getPageTitlesFollowingSiteSearch";
        /// Entry page URLs.
        get_entry_page_urls => "Actions.getEntryPageUrls";
        /// Exit page URLs.
        get_exit_page_urls => "Actions.getExitPageUrls";
        /// Entry page titles.
        get_entry_page_titles => "Actions.getEntryPageTitles";
        /// Exit page titles.
        get_exit_page_titles => "Actions.getExitPageTitles";
        /// Page title report.
        get_page_titles => "Actions.getPageTitles";
        /// Download report.
        get_downloads => "Actions.getDownloads";
        /// Outlink report.
        get_outlinks => "Actions.getOutlinks";
        /// Site search keywords.
        get_site_search_keywords => "Actions.getSiteSearchKeywords";
        /// Site search keywords without results.
        get_site_search_no_result_keywords => "Actions.getSiteSearchNoResultKeywords";
        /// Site search categories.
        get_site_search_categories => "Actions.getSiteSearchCategories";
    }

    /// Metrics for one page URL.
    pub async fn get_page_url(&self, query: &ReportQuery, page_url: &str) -> S::Output {
        self.single("Actions.getPageUrl", "pageUrl", query, page_url)
            .await
    }

    /// Metrics for one page title.
    pub async fn get_page_title(&self, query: &ReportQuery, page_name: &str) -> S::Output {
        self.single("Actions.getPageTitle", "pageName", query, page_name)
            .await
    }

    /// Metrics for one download URL.
    pub async fn get_download(&self, query: &ReportQuery, download_url: &str) -> S::Output {
        self.single("Actions.getDownload", "downloadUrl", query, download_url)
            .await
    }

    /// Metrics for one outlink URL.
    pub async fn get_outlink(&self, query: &ReportQuery, outlink_url: &str) -> S::Output {
        self.single("Actions.getOutlink", "outlinkUrl", query, outlink_url)
            .await
    }

    async fn single(
        &self,
        method: &str,
        key: &str,
        query: &ReportQuery,
        value: &str,
    ) -> S::Output {
        let mut params = query.to_params();
        params.insert(key, value);
        self.sink.send(method, params).await
    }
}

#[cfg(test)]
mod tests {
    use statkit_core::{Params, PendingCall, SortOrder};

    use super::*;
    use crate::testing::EchoSink;

    #[tokio::test]
    async fn test_get_builds_exact_call() {
        let call = Actions::new(EchoSink).get(&ReportQuery::today().site(1)).await;

        assert_eq!(
            call,
            PendingCall::new(
                "Actions.get",
                Params::new()
                    .with("idSite", 1)
                    .with("period", "day")
                    .with("date", "today"),
            )
        );
    }

    #[tokio::test]
    async fn test_report_options_pass_through() {
        let query = ReportQuery::today()
            .site(1)
            .flat(true)
            .limit(-1)
            .sort_by("nb_hits", SortOrder::Desc);
        let call = Actions::new(EchoSink).get_page_urls(&query).await;

        assert_eq!(call.method(), "Actions.getPageUrls");
        assert_eq!(call.params().get("flat"), Some(&true.into()));
        assert_eq!(call.params().get("filter_limit"), Some(&(-1).into()));
        assert_eq!(call.params().get("filter_sort_order"), Some(&"desc".into()));
    }

    #[tokio::test]
    async fn test_single_row_lookup() {
        let call = Actions::new(EchoSink)
            .get_page_url(&ReportQuery::today(), "https://example.com/pricing")
            .await;

        assert_eq!(call.method(), "Actions.getPageUrl");
        assert_eq!(
            call.params().get("pageUrl"),
            Some(&"https://example.com/pricing".into())
        );
    }
}
