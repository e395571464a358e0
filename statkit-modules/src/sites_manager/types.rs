//! Site types.

use chrono::NaiveDate;
use serde::Deserialize;
use statkit_core::{ParamValue, Params};

/// How URL fragments (`#...`) are treated when tracking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum UrlFragments {
    /// Use the instance-wide setting.
    #[default]
    Default,
    /// Keep fragments.
    Keep,
    /// Strip fragments.
    Remove,
}

impl From<UrlFragments> for ParamValue {
    fn from(fragments: UrlFragments) -> Self {
        Self::Int(match fragments {
            UrlFragments::Default => 0,
            UrlFragments::Keep => 1,
            UrlFragments::Remove => 2,
        })
    }
}

/// Settings for creating or updating a site.
///
/// Only `name` is required; unset settings are not sent, so an update keeps
/// their current values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SiteDefinition {
    /// Site name.
    pub name: String,
    /// Site URLs; the first one is the main URL.
    pub urls: Vec<String>,
    /// Ecommerce tracking.
    pub ecommerce: Option<bool>,
    /// Site search tracking.
    pub site_search: Option<bool>,
    /// Query parameters holding site search keywords.
    pub search_keyword_parameters: Vec<String>,
    /// Query parameters holding site search categories.
    pub search_category_parameters: Vec<String>,
    /// IPs (or ranges) excluded from tracking.
    pub excluded_ips: Vec<String>,
    /// Query parameters stripped from tracked URLs.
    pub excluded_parameters: Vec<String>,
    /// User agents excluded from tracking.
    pub excluded_user_agents: Vec<String>,
    /// Timezone identifier.
    pub timezone: Option<String>,
    /// Currency code.
    pub currency: Option<String>,
    /// Site group.
    pub group: Option<String>,
    /// Date reports start at.
    pub start_date: Option<NaiveDate>,
    /// Fragment handling.
    pub keep_url_fragments: Option<UrlFragments>,
    /// Site type (e.g. `website`, `intranet`).
    pub site_type: Option<String>,
}

impl SiteDefinition {
    /// Creates a definition with a name and main URL.
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            urls: vec![url.into()],
            ..Self::default()
        }
    }

    /// Adds an alias URL.
    #[must_use]
    pub fn alias(mut self, url: impl Into<String>) -> Self {
        self.urls.push(url.into());
        self
    }

    /// Enables or disables ecommerce.
    #[must_use]
    pub fn ecommerce(mut self, enabled: bool) -> Self {
        self.ecommerce = Some(enabled);
        self
    }

    /// Enables or disables site search.
    #[must_use]
    pub fn site_search(mut self, enabled: bool) -> Self {
        self.site_search = Some(enabled);
        self
    }

    /// Sets the timezone.
    #[must_use]
    pub fn timezone(mut self, timezone: impl Into<String>) -> Self {
        self.timezone = Some(timezone.into());
        self
    }

    /// Sets the currency.
    #[must_use]
    pub fn currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = Some(currency.into());
        self
    }

    /// Adds an excluded IP or range.
    #[must_use]
    pub fn exclude_ip(mut self, ip: impl Into<String>) -> Self {
        self.excluded_ips.push(ip.into());
        self
    }

    /// Sets the report start date.
    #[must_use]
    pub fn start_date(mut self, date: NaiveDate) -> Self {
        self.start_date = Some(date);
        self
    }

    pub(crate) fn to_params(&self) -> Params {
        fn list(values: &[String]) -> Option<Vec<String>> {
            (!values.is_empty()).then(|| values.to_vec())
        }

        Params::new()
            .with("siteName", self.name.as_str())
            .with_opt("urls", list(&self.urls))
            .with_opt("ecommerce", self.ecommerce)
            .with_opt("siteSearch", self.site_search)
            .with_opt("searchKeywordParameters", list(&self.search_keyword_parameters))
            .with_opt("searchCategoryParameters", list(&self.search_category_parameters))
            .with_opt("excludedIps", list(&self.excluded_ips))
            .with_opt("excludedQueryParameters", list(&self.excluded_parameters))
            .with_opt("timezone", self.timezone.as_deref())
            .with_opt("currency", self.currency.as_deref())
            .with_opt("group", self.group.as_deref())
            .with_opt("startDate", self.start_date)
            .with_opt("excludedUserAgents", list(&self.excluded_user_agents))
            .with_opt("keepURLFragments", self.keep_url_fragments)
            .with_opt("type", self.site_type.as_deref())
    }
}

/// A site as returned by the API.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Site {
    /// Site id (string or number depending on server version).
    pub idsite: serde_json::Value,
    /// Site name.
    pub name: String,
    /// Main URL.
    pub main_url: String,
    /// Timezone.
    #[serde(default)]
    pub timezone: Option<String>,
    /// Currency.
    #[serde(default)]
    pub currency: Option<String>,
    /// Creation timestamp.
    #[serde(default)]
    pub ts_created: Option<String>,
    /// Site type.
    #[serde(default, rename = "type")]
    pub site_type: Option<String>,
}

impl Site {
    /// Numeric site id, when it parses.
    pub fn id(&self) -> Option<u32> {
        match &self.idsite {
            serde_json::Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
            serde_json::Value::String(s) => s.parse().ok(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_definition() {
        let params = SiteDefinition::new("Blog", "https://blog.example.com").to_params();

        assert_eq!(params.keys().collect::<Vec<_>>(), vec!["siteName", "urls"]);
    }

    #[test]
    fn test_full_definition_params() {
        let params = SiteDefinition::new("Shop", "https://shop.example.com")
            .alias("https://www.shop.example.com")
            .ecommerce(true)
            .timezone("Europe/Berlin")
            .currency("EUR")
            .exclude_ip("10.0.0.0/8")
            .to_params();

        assert_eq!(
            params.get("urls"),
            Some(&ParamValue::List(vec![
                "https://shop.example.com".into(),
                "https://www.shop.example.com".into(),
            ]))
        );
        assert_eq!(params.get("ecommerce"), Some(&ParamValue::Bool(true)));
        assert_eq!(params.get("timezone"), Some(&ParamValue::Str("Europe/Berlin".into())));
        assert!(params.contains_key("excludedIps"));
        assert!(!params.contains_key("siteSearch"));
    }

    #[test]
    fn test_url_fragments_wire_value() {
        assert_eq!(ParamValue::from(UrlFragments::Remove), ParamValue::Int(2));
    }

    #[test]
    fn test_site_id_parsing() {
        let site: Site = serde_json::from_value(serde_json::json!({
            "idsite": "12",
            "name": "Blog",
            "main_url": "https://blog.example.com",
            "type": "website"
        }))
        .unwrap();

        assert_eq!(site.id(), Some(12));
        assert_eq!(site.site_type.as_deref(), Some("website"));
    }
}
