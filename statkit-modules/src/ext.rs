//! Namespace accessors for any request sink.

use statkit_fetch::RequestSink;

use crate::actions::Actions;
use crate::annotations::Annotations;
use crate::api::Api;
use crate::custom_dimensions::CustomDimensions;
use crate::events::Events;
use crate::goals::Goals;
use crate::live::Live;
use crate::referrers::Referrers;
use crate::sites_manager::SitesManager;
use crate::tag_manager::TagManager;
use crate::users_manager::UsersManager;
use crate::visits_summary::VisitsSummary;

/// Adds one accessor per namespace to every cloneable sink.
///
/// ```no_run
/// # async fn run() -> Result<(), statkit_fetch::FetchError> {
/// use statkit_core::{DateSpec, Period, ReportQuery};
/// use statkit_fetch::Client;
/// use statkit_modules::ApiNamespaces;
///
/// let client = Client::from_endpoint("https://stats.example.com/")?;
/// let query = ReportQuery::new(Period::Day, DateSpec::Today).site(1);
///
/// // Immediate
/// let visits = client.immediate().visits_summary().get(&query, &[]).await?;
///
/// // Batched
/// let batch = client.batch();
/// let sink = batch.sink();
/// let goals = sink.goals().get_goals(1).await;
/// let pages = sink.actions().get_page_urls(&query).await;
/// let results = batch.flush().await?;
/// # let _ = (visits, goals, pages, results);
/// # Ok(())
/// # }
/// ```
pub trait ApiNamespaces: RequestSink + Clone + Sized {
    /// `API` namespace.
    fn api(&self) -> Api<Self> {
        Api::new(self.clone())
    }

    /// `Actions` namespace.
    fn actions(&self) -> Actions<Self> {
        Actions::new(self.clone())
    }

    /// `Annotations` namespace.
    fn annotations(&self) -> Annotations<Self> {
        Annotations::new(self.clone())
    }

    /// `CustomDimensions` namespace.
    fn custom_dimensions(&self) -> CustomDimensions<Self> {
        CustomDimensions::new(self.clone())
    }

    /// `Events` namespace.
    fn events(&self) -> Events<Self> {
        Events::new(self.clone())
    }

    /// `Goals` namespace.
    fn goals(&self) -> Goals<Self> {
        Goals::new(self.clone())
    }

    /// `Live` namespace.
    fn live(&self) -> Live<Self> {
        Live::new(self.clone())
    }

    /// `Referrers` namespace.
    fn referrers(&self) -> Referrers<Self> {
        Referrers::new(self.clone())
    }

    /// `SitesManager` namespace.
    fn sites_manager(&self) -> SitesManager<Self> {
        SitesManager::new(self.clone())
    }

    /// `TagManager` namespace.
    fn tag_manager(&self) -> TagManager<Self> {
        TagManager::new(self.clone())
    }

    /// `UsersManager` namespace.
    fn users_manager(&self) -> UsersManager<Self> {
        UsersManager::new(self.clone())
    }

    /// `VisitsSummary` namespace.
    fn visits_summary(&self) -> VisitsSummary<Self> {
        VisitsSummary::new(self.clone())
    }
}

impl<S: RequestSink + Clone> ApiNamespaces for S {}

#[cfg(test)]
mod tests {
    use statkit_core::{DateSpec, Period, ReportQuery};

    use super::*;
    use crate::testing::EchoSink;

    #[tokio::test]
    async fn test_accessors_share_sink() {
        let query = ReportQuery::new(Period::Week, DateSpec::Yesterday).site(2);

        let goals = EchoSink.goals().get_goals(2).await;
        let summary = EchoSink.visits_summary().get(&query, &[]).await;

        assert_eq!(goals.method(), "Goals.getGoals");
        assert_eq!(summary.method(), "VisitsSummary.get");
    }
}
