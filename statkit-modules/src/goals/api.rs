//! Goals adapter.

use statkit_core::{Params, ReportQuery, ToParams};
use statkit_fetch::RequestSink;

use super::types::GoalDefinition;
use crate::descriptor::NamespaceDescriptor;

/// Descriptor for the `Goals` namespace.
pub const DESCRIPTOR: NamespaceDescriptor = NamespaceDescriptor {
    name: "Goals",
    cli_name: "goals",
    aliases: &["conversions"],
    summary: "Goal management, conversions and ecommerce items",
    methods: &[
        "getGoals",
        "getGoal",
        "addGoal",
        "updateGoal",
        "deleteGoal",
        "get",
        "getMetrics",
        "getItemsSku",
        "getItemsName",
        "getItemsCategory",
        "getDaysToConversion",
        "getVisitsUntilConversion",
    ],
};

/// Adapter for the `Goals` namespace.
#[derive(Debug, Clone)]
pub struct Goals<S> {
    sink: S,
}

impl<S: RequestSink> Goals<S> {
    /// Wraps a sink.
    pub fn new(sink: S) -> Self {
        Self { sink }
    }

    // ------------------------------------------------------------------------
    // Management
    // ------------------------------------------------------------------------

    /// Every goal of a site.
    pub async fn get_goals(&self, site: u32) -> S::Output {
        self.sink
            .send("Goals.getGoals", Params::new().with("idSite", site))
            .await
    }

    /// One goal.
    pub async fn get_goal(&self, site: u32, id_goal: u32) -> S::Output {
        let params = Params::new().with("idSite", site).with("idGoal", id_goal);
        self.sink.send("Goals.getGoal", params).await
    }

    /// Creates a goal.
    pub async fn add_goal(&self, site: u32, goal: &GoalDefinition) -> S::Output {
        let mut params = Params::new().with("idSite", site);
        params.extend(goal.to_params());
        self.sink.send("Goals.addGoal", params).await
    }

    /// Replaces a goal's settings.
    pub async fn update_goal(&self, site: u32, id_goal: u32, goal: &GoalDefinition) -> S::Output {
        let mut params = Params::new().with("idSite", site).with("idGoal", id_goal);
        params.extend(goal.to_params());
        self.sink.send("Goals.updateGoal", params).await
    }

    /// Deletes a goal.
    pub async fn delete_goal(&self, site: u32, id_goal: u32) -> S::Output {
        let params = Params::new().with("idSite", site).with("idGoal", id_goal);
        self.sink.send("Goals.deleteGoal", params).await
    }

    // ------------------------------------------------------------------------
    // Reports
    // ------------------------------------------------------------------------

    /// Conversion overview, for one goal or all of them.
    pub async fn get(&self, query: &ReportQuery, id_goal: Option<u32>) -> S::Output {
        let params = query.to_params().with_opt("idGoal", id_goal);
        self.sink.send("Goals.get", params).await
    }

    /// Goal metrics, for one goal or all of them.
    pub async fn get_metrics(&self, query: &ReportQuery, id_goal: Option<u32>) -> S::Output {
        let params = query.to_params().with_opt("idGoal", id_goal);
        self.sink.send("Goals.getMetrics", params).await
    }

    /// Ecommerce items by SKU.
    pub async fn get_items_sku(&self, query: &ReportQuery, abandoned_carts: bool) -> S::Output {
        self.items("Goals.getItemsSku", query, abandoned_carts).await
    }

    /// Ecommerce items by name.
    pub async fn get_items_name(&self, query: &ReportQuery, abandoned_carts: bool) -> S::Output {
        self.items("Goals.getItemsName", query, abandoned_carts).await
    }

    /// Ecommerce items by category.
    pub async fn get_items_category(
        &self,
        query: &ReportQuery,
        abandoned_carts: bool,
    ) -> S::Output {
        self.items("Goals.getItemsCategory", query, abandoned_carts)
            .await
    }

    /// Days from first visit to conversion.
    pub async fn get_days_to_conversion(
        &self,
        query: &ReportQuery,
        id_goal: Option<u32>,
    ) -> S::Output {
        let params = query.to_params().with_opt("idGoal", id_goal);
        self.sink.send("Goals.getDaysToConversion", params).await
    }

    /// Visits before conversion.
    pub async fn get_visits_until_conversion(
        &self,
        query: &ReportQuery,
        id_goal: Option<u32>,
    ) -> S::Output {
        let params = query.to_params().with_opt("idGoal", id_goal);
        self.sink.send("Goals.getVisitsUntilConversion", params).await
    }

    async fn items(&self, method: &str, query: &ReportQuery, abandoned_carts: bool) -> S::Output {
        let params = query.to_params().with("abandonedCarts", abandoned_carts);
        self.sink.send(method, params).await
    }
}
