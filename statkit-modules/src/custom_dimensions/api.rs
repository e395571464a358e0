//! Custom dimensions adapter.

use statkit_core::{Params, ReportQuery, ToParams};
use statkit_fetch::RequestSink;

use super::types::{DimensionConfig, DimensionScope};
use crate::descriptor::NamespaceDescriptor;

/// Descriptor for the `CustomDimensions` namespace.
pub const DESCRIPTOR: NamespaceDescriptor = NamespaceDescriptor {
    name: "CustomDimensions",
    cli_name: "dimensions",
    aliases: &["custom-dimensions"],
    summary: "Configure custom dimensions and read their reports",
    methods: &[
        "getCustomDimension",
        "configureNewCustomDimension",
        "configureExistingCustomDimension",
        "getConfiguredCustomDimensions",
        "getConfiguredCustomDimensionsHavingScope",
        "getAvailableScopes",
        "getAvailableExtractionDimensions",
    ],
};

/// Adapter for the `CustomDimensions` namespace.
#[derive(Debug, Clone)]
pub struct CustomDimensions<S> {
    sink: S,
}

impl<S: RequestSink> CustomDimensions<S> {
    /// Wraps a sink.
    pub fn new(sink: S) -> Self {
        Self { sink }
    }

    /// Report for one dimension.
    pub async fn get_custom_dimension(&self, query: &ReportQuery, id_dimension: u32) -> S::Output {
        let params = query.to_params().with("idDimension", id_dimension);
        self.sink.send("CustomDimensions.getCustomDimension", params).await
    }

    /// Creates a dimension.
    pub async fn configure_new_custom_dimension(
        &self,
        site: u32,
        scope: DimensionScope,
        config: &DimensionConfig,
    ) -> S::Output {
        let params = Params::new()
            .with("idSite", site)
            .with("name", config.name.as_str())
            .with("scope", scope)
            .with("active", config.active)
            .with_opt("extractions", config.extraction_params())
            .with("caseSensitive", config.case_sensitive);
        self.sink
            .send("CustomDimensions.configureNewCustomDimension", params)
            .await
    }

    /// Updates a dimension. The scope cannot change.
    pub async fn configure_existing_custom_dimension(
        &self,
        id_dimension: u32,
        site: u32,
        config: &DimensionConfig,
    ) -> S::Output {
        let params = Params::new()
            .with("idDimension", id_dimension)
            .with("idSite", site)
            .with("name", config.name.as_str())
            .with("active", config.active)
            .with_opt("extractions", config.extraction_params())
            .with("caseSensitive", config.case_sensitive);
        self.sink
            .send("CustomDimensions.configureExistingCustomDimension", params)
            .await
    }

    /// Every dimension configured on a site.
    pub async fn get_configured_custom_dimensions(&self, site: u32) -> S::Output {
        self.sink
            .send(
                "CustomDimensions.getConfiguredCustomDimensions",
                Params::new().with("idSite", site),
            )
            .await
    }

    /// Dimensions of one scope configured on a site.
    pub async fn get_configured_custom_dimensions_having_scope(
        &self,
        site: u32,
        scope: DimensionScope,
    ) -> S::Output {
        let params = Params::new().with("idSite", site).with("scope", scope);
        self.sink
            .send(
                "CustomDimensions.getConfiguredCustomDimensionsHavingScope",
                params,
            )
            .await
    }

    /// Scopes with free slots on a site.
    pub async fn get_available_scopes(&self, site: u32) -> S::Output {
        self.sink
            .send(
                "CustomDimensions.getAvailableScopes",
                Params::new().with("idSite", site),
            )
            .await
    }

    bare_methods! {
        /// Sources extraction rules may read from.
        get_available_extraction_dimensions => "CustomDimensions.getAvailableExtractionDimensions";
    }
}
