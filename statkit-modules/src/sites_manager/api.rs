//! Sites manager adapter.

use statkit_core::Params;
use statkit_fetch::RequestSink;

use super::types::SiteDefinition;
use crate::descriptor::NamespaceDescriptor;

/// Descriptor for the `SitesManager` namespace.
pub const DESCRIPTOR: NamespaceDescriptor = NamespaceDescriptor {
    name: "SitesManager",
    cli_name: "sites",
    aliases: &["sites-manager"],
    summary: "Register, update and look up tracked sites",
    methods: &[
        "getSiteFromId",
        "getAllSites",
        "getAllSitesId",
        "getSitesWithAdminAccess",
        "getSitesWithViewAccess",
        "getSitesWithAtLeastViewAccess",
        "getSitesIdWithAtLeastViewAccess",
        "getSiteUrlsFromId",
        "getSitesIdFromSiteUrl",
        "getPatternMatchSites",
        "addSite",
        "updateSite",
        "deleteSite",
        "addSiteAliasUrls",
        "setSiteAliasUrls",
        "getJavascriptTag",
        "getTimezonesList",
        "getCurrencyList",
        "getDefaultTimezone",
        "getDefaultCurrency",
    ],
};

/// Adapter for the `SitesManager` namespace.
#[derive(Debug, Clone)]
pub struct SitesManager<S> {
    sink: S,
}

impl<S: RequestSink> SitesManager<S> {
    /// Wraps a sink.
    pub fn new(sink: S) -> Self {
        Self { sink }
    }

    /// One site.
    pub async fn get_site_from_id(&self, site: u32) -> S::Output {
        self.by_site("SitesManager.getSiteFromId", site).await
    }

    bare_methods! {
        /// Every site (superuser only).
        get_all_sites => "SitesManager.getAllSites";
        /// Every site id (superuser only).
        get_all_sites_id => "SitesManager.getAllSitesId";
        /// Sites the caller administers.
        get_sites_with_admin_access => "SitesManager.getSitesWithAdminAccess";
        /// Sites the caller may view.
        get_sites_with_view_access => "SitesManager.getSitesWithViewAccess";
        /// Sites the caller has any access to.
        get_sites_with_at_least_view_access => "SitesManager.getSitesWithAtLeastViewAccess";
        /// Ids of sites the caller has any access to.
        get_sites_id_with_at_least_view_access => "SitesManager.getSitesIdWithAtLeastViewAccess";
        /// Supported timezones.
        get_timezones_list => "SitesManager.getTimezonesList";
        /// Supported currencies.
        get_currency_list => "SitesManager.getCurrencyList";
        /// Timezone new sites get.
        get_default_timezone => "SitesManager.getDefaultTimezone";
        /// Currency new sites get.
        get_default_currency => "SitesManager.getDefaultCurrency";
    }

    /// Main and alias URLs of a site.
    pub async fn get_site_urls_from_id(&self, site: u32) -> S::Output {
        self.by_site("SitesManager.getSiteUrlsFromId", site).await
    }

    /// Ids of sites registered for a URL.
    pub async fn get_sites_id_from_site_url(&self, url: &str) -> S::Output {
        self.sink
            .send(
                "SitesManager.getSitesIdFromSiteUrl",
                Params::new().with("url", url),
            )
            .await
    }

    /// Sites whose name or URL matches a pattern.
    pub async fn get_pattern_match_sites(&self, pattern: &str, limit: Option<u32>) -> S::Output {
        let params = Params::new()
            .with("pattern", pattern)
            .with_opt("limit", limit);
        self.sink.send("SitesManager.getPatternMatchSites", params).await
    }

    /// Registers a site.
    pub async fn add_site(&self, definition: &SiteDefinition) -> S::Output {
        self.sink
            .send("SitesManager.addSite", definition.to_params())
            .await
    }

    /// Updates a site. Settings left unset keep their current values.
    pub async fn update_site(&self, site: u32, definition: &SiteDefinition) -> S::Output {
        let mut params = Params::new().with("idSite", site);
        params.extend(definition.to_params());
        self.sink.send("SitesManager.updateSite", params).await
    }

    /// Deletes a site and all its data.
    pub async fn delete_site(&self, site: u32) -> S::Output {
        self.by_site("SitesManager.deleteSite", site).await
    }

    /// Adds alias URLs.
    pub async fn add_site_alias_urls(&self, site: u32, urls: &[&str]) -> S::Output {
        self.alias_urls("SitesManager.addSiteAliasUrls", site, urls)
            .await
    }

    /// Replaces alias URLs.
    pub async fn set_site_alias_urls(&self, site: u32, urls: &[&str]) -> S::Output {
        self.alias_urls("SitesManager.setSiteAliasUrls", site, urls)
            .await
    }

    /// Tracking snippet for a site.
    pub async fn get_javascript_tag(&self, site: u32, tracker_url: Option<&str>) -> S::Output {
        let params = Params::new()
            .with("idSite", site)
            .with_opt("piwikUrl", tracker_url);
        self.sink.send("SitesManager.getJavascriptTag", params).await
    }

    async fn by_site(&self, method: &str, site: u32) -> S::Output {
        self.sink
            .send(method, Params::new().with("idSite", site))
            .await
    }

    async fn alias_urls(&self, method: &str, site: u32, urls: &[&str]) -> S::Output {
        let params = Params::new().with("idSite", site).with("urls", urls);
        self.sink.send(method, params).await
    }
}
