//! Namespace calls produce the same remote call whichever sink runs them.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::NaiveDate;
use serde_json::json;
use statkit_core::{DateSpec, Params, PendingCall, Period, ReportQuery, SiteSelector};
use statkit_fetch::{Client, ClientConfig, Payload, RequestSink};
use statkit_modules::ApiNamespaces;
use statkit_modules::NamespaceRegistry;
use statkit_modules::goals::{GoalDefinition, GoalTrigger, PatternType};
use statkit_modules::live::VisitLogQuery;
use statkit_modules::users_manager::AccessLevel;
use wiremock::matchers::method;
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

// ============================================================================
// Helpers
// ============================================================================

/// Sink that records every call and returns nothing.
#[derive(Debug, Clone, Default)]
struct RecordingSink {
    calls: Arc<Mutex<Vec<PendingCall>>>,
}

impl RecordingSink {
    fn calls(&self) -> Vec<PendingCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl RequestSink for RecordingSink {
    type Output = ();

    async fn send(&self, method: &str, params: Params) -> Self::Output {
        self.calls
            .lock()
            .unwrap()
            .push(PendingCall::new(method, params));
    }
}

fn query() -> ReportQuery {
    ReportQuery::new(Period::Day, DateSpec::Today).site(1)
}

/// Runs the same sequence of namespace calls through any sink.
async fn exercise<S: ApiNamespaces>(sink: &S) {
    let query = query();
    let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();

    sink.actions().get(&query).await;
    sink.visits_summary().get(&query, &["nb_visits", "bounce_rate"]).await;
    sink.referrers().get_websites(&query).await;
    sink.events().get_name_from_category_id(&query, 4).await;
    sink.goals()
        .add_goal(
            1,
            &GoalDefinition::new("Pricing", GoalTrigger::url("/pricing", PatternType::Contains)),
        )
        .await;
    sink.live()
        .get_last_visits_details(&VisitLogQuery::site(1).limit(5))
        .await;
    sink.annotations().add(1, date, "Launch", true).await;
    sink.users_manager()
        .set_user_access("alice", AccessLevel::View, &SiteSelector::Many(vec![1, 2]), None)
        .await;
    sink.sites_manager().get_site_from_id(1).await;
    sink.api().get_matomo_version().await;
}

fn form(request: &Request) -> Vec<(String, String)> {
    url::form_urlencoded::parse(&request.body)
        .into_owned()
        .collect()
}

// ============================================================================
// Sink Equivalence
// ============================================================================

#[tokio::test]
async fn test_queueing_sink_matches_direct_dispatch() {
    let recorder = RecordingSink::default();
    exercise(&recorder).await;

    let client = Client::from_endpoint("http://127.0.0.1:1/").unwrap();
    let batch = client.batch();
    exercise(&batch.sink()).await;

    assert_eq!(batch.pending(), recorder.calls());
    assert_eq!(batch.len(), 10);
}

#[tokio::test]
async fn test_report_call_shape() {
    let recorder = RecordingSink::default();
    recorder.actions().get(&query()).await;

    assert_eq!(
        recorder.calls(),
        vec![PendingCall::new(
            "Actions.get",
            Params::new()
                .with("idSite", 1)
                .with("period", "day")
                .with("date", "today"),
        )]
    );
}

#[tokio::test]
async fn test_every_dispatched_method_is_registered() {
    let recorder = RecordingSink::default();
    exercise(&recorder).await;

    for call in recorder.calls() {
        assert!(
            NamespaceRegistry::knows_method(call.method()),
            "{} missing from its descriptor",
            call.method()
        );
    }
}

#[tokio::test]
async fn test_handles_follow_queue_order() {
    let client = Client::from_endpoint("http://127.0.0.1:1/").unwrap();
    let batch = client.batch();
    let sink = batch.sink();

    let first = sink.api().get_matomo_version().await;
    let second = sink.goals().get_goals(3).await;

    assert_eq!(first.index(), 0);
    assert_eq!(second.index(), 1);
    assert_eq!(second.method(), "Goals.getGoals");
}

// ============================================================================
// End To End
// ============================================================================

#[tokio::test]
async fn test_immediate_and_batched_send_same_fields() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"value": "5.1.0"}])))
        .mount(&server)
        .await;

    let config = ClientConfig::builder(format!("{}/", server.uri()))
        .token_auth("secret")
        .build()
        .unwrap();
    let client = Client::new(config).unwrap();

    let immediate = client.immediate().goals().get_goals(3).await.unwrap();
    assert_eq!(immediate, Payload::Json(json!([{"value": "5.1.0"}])));

    let batch = client.batch();
    let handle = batch.sink().goals().get_goals(3).await;
    let results = batch.flush().await.unwrap();
    assert_eq!(results.checked(&handle).unwrap(), &json!({"value": "5.1.0"}));

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 2);

    let direct = form(&requests[0]);
    let direct_fields: Vec<_> = direct
        .iter()
        .filter(|(k, _)| k == "method" || k == "idSite")
        .cloned()
        .collect();

    let bulk = form(&requests[1]);
    let (_, sub_request) = bulk
        .iter()
        .find(|(k, _)| k == "urls[0]")
        .expect("bulk request carries urls[0]");
    let queued_fields: Vec<(String, String)> = url::form_urlencoded::parse(sub_request.as_bytes())
        .into_owned()
        .collect();

    assert_eq!(
        direct_fields,
        vec![
            ("method".to_string(), "Goals.getGoals".to_string()),
            ("idSite".to_string(), "3".to_string()),
        ]
    );
    assert_eq!(queued_fields, direct_fields);
}
