//! Tag manager adapter.

use statkit_core::Params;
use statkit_fetch::RequestSink;

use super::types::{
    ContainerContext, ContainerVersion, TagDefinition, TriggerDefinition, VariableDefinition,
};
use crate::descriptor::NamespaceDescriptor;

/// Descriptor for the `TagManager` namespace.
pub const DESCRIPTOR: NamespaceDescriptor = NamespaceDescriptor {
    name: "TagManager",
    cli_name: "tags",
    aliases: &["tag-manager"],
    summary: "Containers, tags, triggers, variables and published versions",
    methods: &[
        "getAvailableContexts",
        "getAvailableEnvironments",
        "getAvailableTagTypesInContext",
        "getAvailableTriggerTypesInContext",
        "getAvailableVariableTypesInContext",
        "getContainers",
        "getContainer",
        "addContainer",
        "updateContainer",
        "deleteContainer",
        "getContainerVersions",
        "createContainerVersion",
        "publishContainerVersion",
        "getContainerTags",
        "getContainerTag",
        "addContainerTag",
        "deleteContainerTag",
        "pauseContainerTag",
        "resumeContainerTag",
        "getContainerTriggers",
        "addContainerTrigger",
        "deleteContainerTrigger",
        "getContainerVariables",
        "addContainerVariable",
        "deleteContainerVariable",
        "getContainerEmbedCode",
    ],
};

/// Adapter for the `TagManager` namespace.
#[derive(Debug, Clone)]
pub struct TagManager<S> {
    sink: S,
}

impl<S: RequestSink> TagManager<S> {
    /// Wraps a sink.
    pub fn new(sink: S) -> Self {
        Self { sink }
    }

    // ========================================================================
    // Catalog
    // ========================================================================

    bare_methods! {
        /// Platforms containers can target.
        get_available_contexts => "TagManager.getAvailableContexts";
        /// Environments a version can be published to.
        get_available_environments => "TagManager.getAvailableEnvironments";
    }

    /// Tag types usable in a context.
    pub async fn get_available_tag_types_in_context(&self, context: ContainerContext) -> S::Output {
        self.in_context("TagManager.getAvailableTagTypesInContext", context)
            .await
    }

    /// Trigger types usable in a context.
    pub async fn get_available_trigger_types_in_context(
        &self,
        context: ContainerContext,
    ) -> S::Output {
        self.in_context("TagManager.getAvailableTriggerTypesInContext", context)
            .await
    }

    /// Variable types usable in a context.
    pub async fn get_available_variable_types_in_context(
        &self,
        context: ContainerContext,
    ) -> S::Output {
        self.in_context("TagManager.getAvailableVariableTypesInContext", context)
            .await
    }

    // ========================================================================
    // Containers
    // ========================================================================

    /// Containers of a site.
    pub async fn get_containers(&self, site: u32) -> S::Output {
        self.sink
            .send("TagManager.getContainers", Params::new().with("idSite", site))
            .await
    }

    /// One container.
    pub async fn get_container(&self, site: u32, container: &str) -> S::Output {
        self.sink
            .send("TagManager.getContainer", container_params(site, container))
            .await
    }

    /// Creates a container.
    pub async fn add_container(
        &self,
        site: u32,
        context: ContainerContext,
        name: &str,
        description: Option<&str>,
    ) -> S::Output {
        let params = Params::new()
            .with("idSite", site)
            .with("context", context)
            .with("name", name)
            .with_opt("description", description);
        self.sink.send("TagManager.addContainer", params).await
    }

    /// Renames a container or changes its description.
    pub async fn update_container(
        &self,
        site: u32,
        container: &str,
        name: &str,
        description: Option<&str>,
    ) -> S::Output {
        let params = container_params(site, container)
            .with("name", name)
            .with_opt("description", description);
        self.sink.send("TagManager.updateContainer", params).await
    }

    /// Deletes a container.
    pub async fn delete_container(&self, site: u32, container: &str) -> S::Output {
        self.sink
            .send("TagManager.deleteContainer", container_params(site, container))
            .await
    }

    /// Embed snippet for a container.
    pub async fn get_container_embed_code(
        &self,
        site: u32,
        container: &str,
        environment: &str,
    ) -> S::Output {
        let params = container_params(site, container).with("environment", environment);
        self.sink.send("TagManager.getContainerEmbedCode", params).await
    }

    // ========================================================================
    // Versions
    // ========================================================================

    /// Versions of a container.
    pub async fn get_container_versions(&self, site: u32, container: &str) -> S::Output {
        self.sink
            .send(
                "TagManager.getContainerVersions",
                container_params(site, container),
            )
            .await
    }

    /// Snapshots the draft of a container as a new named version.
    pub async fn create_container_version(
        &self,
        site: u32,
        container: &str,
        name: &str,
        description: Option<&str>,
    ) -> S::Output {
        let params = container_params(site, container)
            .with("name", name)
            .with_opt("description", description);
        self.sink
            .send("TagManager.createContainerVersion", params)
            .await
    }

    /// Publishes a version to an environment.
    pub async fn publish_container_version(
        &self,
        version: &ContainerVersion,
        environment: &str,
    ) -> S::Output {
        let params = version.to_params().with("environment", environment);
        self.sink
            .send("TagManager.publishContainerVersion", params)
            .await
    }

    // ========================================================================
    // Tags
    // ========================================================================

    /// Tags of a version.
    pub async fn get_container_tags(&self, version: &ContainerVersion) -> S::Output {
        self.sink
            .send("TagManager.getContainerTags", version.to_params())
            .await
    }

    /// One tag.
    pub async fn get_container_tag(&self, version: &ContainerVersion, tag: u32) -> S::Output {
        self.tag("TagManager.getContainerTag", version, tag).await
    }

    /// Adds a tag.
    pub async fn add_container_tag(
        &self,
        version: &ContainerVersion,
        definition: &TagDefinition,
    ) -> S::Output {
        let mut params = version.to_params();
        params.extend(definition.to_params());
        self.sink.send("TagManager.addContainerTag", params).await
    }

    /// Deletes a tag.
    pub async fn delete_container_tag(&self, version: &ContainerVersion, tag: u32) -> S::Output {
        self.tag("TagManager.deleteContainerTag", version, tag).await
    }

    /// Stops a tag from firing without deleting it.
    pub async fn pause_container_tag(&self, version: &ContainerVersion, tag: u32) -> S::Output {
        self.tag("TagManager.pauseContainerTag", version, tag).await
    }

    /// Re-enables a paused tag.
    pub async fn resume_container_tag(&self, version: &ContainerVersion, tag: u32) -> S::Output {
        self.tag("TagManager.resumeContainerTag", version, tag).await
    }

    // ========================================================================
    // Triggers
    // ========================================================================

    /// Triggers of a version.
    pub async fn get_container_triggers(&self, version: &ContainerVersion) -> S::Output {
        self.sink
            .send("TagManager.getContainerTriggers", version.to_params())
            .await
    }

    /// Adds a trigger.
    pub async fn add_container_trigger(
        &self,
        version: &ContainerVersion,
        definition: &TriggerDefinition,
    ) -> S::Output {
        let mut params = version.to_params();
        params.extend(definition.to_params());
        self.sink.send("TagManager.addContainerTrigger", params).await
    }

    /// Deletes a trigger.
    pub async fn delete_container_trigger(
        &self,
        version: &ContainerVersion,
        trigger: u32,
    ) -> S::Output {
        let params = version.to_params().with("idTrigger", trigger);
        self.sink
            .send("TagManager.deleteContainerTrigger", params)
            .await
    }

    // ========================================================================
    // Variables
    // ========================================================================

    /// Variables of a version.
    pub async fn get_container_variables(&self, version: &ContainerVersion) -> S::Output {
        self.sink
            .send("TagManager.getContainerVariables", version.to_params())
            .await
    }

    /// Adds a variable.
    pub async fn add_container_variable(
        &self,
        version: &ContainerVersion,
        definition: &VariableDefinition,
    ) -> S::Output {
        let mut params = version.to_params();
        params.extend(definition.to_params());
        self.sink.send("TagManager.addContainerVariable", params).await
    }

    /// Deletes a variable.
    pub async fn delete_container_variable(
        &self,
        version: &ContainerVersion,
        variable: u32,
    ) -> S::Output {
        let params = version.to_params().with("idVariable", variable);
        self.sink
            .send("TagManager.deleteContainerVariable", params)
            .await
    }

    async fn in_context(&self, method: &str, context: ContainerContext) -> S::Output {
        self.sink
            .send(method, Params::new().with("context", context))
            .await
    }

    async fn tag(&self, method: &str, version: &ContainerVersion, tag: u32) -> S::Output {
        let params = version.to_params().with("idTag", tag);
        self.sink.send(method, params).await
    }
}

fn container_params(site: u32, container: &str) -> Params {
    Params::new()
        .with("idSite", site)
        .with("idContainer", container)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tag_manager::{FireLimit, TriggerCondition};
    use crate::testing::{EchoSink, scalars};

    fn draft() -> ContainerVersion {
        ContainerVersion::new(1, "aBcD1234", 2)
    }

    #[tokio::test]
    async fn test_add_container() {
        let call = TagManager::new(EchoSink)
            .add_container(1, ContainerContext::Web, "Default", None)
            .await;

        assert_eq!(call.method(), "TagManager.addContainer");
        assert_eq!(
            scalars(&call),
            vec![
                ("idSite".to_string(), "1".to_string()),
                ("context".to_string(), "web".to_string()),
                ("name".to_string(), "Default".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_tag_calls_carry_version() {
        let call = TagManager::new(EchoSink)
            .pause_container_tag(&draft(), 7)
            .await;

        assert_eq!(
            scalars(&call),
            vec![
                ("idSite".to_string(), "1".to_string()),
                ("idContainer".to_string(), "aBcD1234".to_string()),
                ("idContainerVersion".to_string(), "2".to_string()),
                ("idTag".to_string(), "7".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_add_tag_appends_definition() {
        let tag = TagDefinition::new("CustomHtml", "Banner")
            .fire_on(1)
            .block_on(2)
            .fire_limit(FireLimit::Once24Hours);
        let call = TagManager::new(EchoSink)
            .add_container_tag(&draft(), &tag)
            .await;

        assert_eq!(
            call.params().keys().collect::<Vec<_>>(),
            vec![
                "idSite",
                "idContainer",
                "idContainerVersion",
                "type",
                "name",
                "fireTriggerIds",
                "blockTriggerIds",
                "fireLimit",
            ]
        );
    }

    #[tokio::test]
    async fn test_add_trigger() {
        let trigger = TriggerDefinition::new("PageView", "Checkout")
            .condition(TriggerCondition::new("PageUrl", "contains", "/checkout"));
        let call = TagManager::new(EchoSink)
            .add_container_trigger(&draft(), &trigger)
            .await;

        assert_eq!(call.method(), "TagManager.addContainerTrigger");
        assert!(call.params().contains_key("conditions"));
    }

    #[tokio::test]
    async fn test_context_catalog() {
        let call = TagManager::new(EchoSink)
            .get_available_tag_types_in_context(ContainerContext::Android)
            .await;
        assert_eq!(
            scalars(&call),
            vec![("context".to_string(), "android".to_string())]
        );
    }
}
