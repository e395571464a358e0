//! Batch aggregation tests against a mock HTTP server.

use serde_json::json;
use statkit_core::{Params, PendingCall};
use statkit_fetch::{BULK_METHOD, Client, ClientConfig, FetchError, RequestSink};
use wiremock::matchers::method;
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> Client {
    let config = ClientConfig::builder(format!("{}/", server.uri()))
        .token_auth("secret")
        .build()
        .unwrap();
    Client::new(config).unwrap()
}

async fn form_of_first_request(server: &MockServer) -> Vec<(String, String)> {
    let requests = server.received_requests().await.unwrap();
    url::form_urlencoded::parse(&requests[0].body)
        .into_owned()
        .collect()
}

fn field<'a>(pairs: &'a [(String, String)], key: &str) -> Option<&'a str> {
    pairs
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
}

#[tokio::test]
async fn test_empty_flush_sends_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&server)
        .await;

    let results = client_for(&server).batch().flush().await.unwrap();
    assert!(results.is_empty());
}

#[tokio::test]
async fn test_results_follow_enqueue_order() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([{"value": "5.1.0"}, [{"idgoal": 1}]])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let batch = client.batch();
    let version = batch.push(PendingCall::bare("API.getMatomoVersion"));
    let goals = batch.push(PendingCall::new(
        "Goals.getGoals",
        Params::new().with("idSite", 3),
    ));

    let results = batch.flush().await.unwrap();
    assert_eq!(results.checked(&version).unwrap(), &json!({"value": "5.1.0"}));
    assert_eq!(results.checked(&goals).unwrap(), &json!([{"idgoal": 1}]));

    let pairs = form_of_first_request(&server).await;
    assert_eq!(field(&pairs, "method"), Some(BULK_METHOD));
    assert_eq!(field(&pairs, "format"), Some("json"));
    assert_eq!(field(&pairs, "token_auth"), Some("secret"));
    assert_eq!(field(&pairs, "urls[0]"), Some("method=API.getMatomoVersion"));
    assert_eq!(field(&pairs, "urls[1]"), Some("method=Goals.getGoals&idSite=3"));
}

#[tokio::test]
async fn test_results_ignore_handles_from_other_batches() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"site": "A"}])))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let first = client.batch();
    let second = client.batch();
    let own = first.push(PendingCall::bare("SitesManager.getSiteFromId"));
    let other = second.push(PendingCall::bare("SitesManager.getSiteFromId"));

    let results = first.flush().await.unwrap();
    assert_eq!(results.get_handle(&own), Some(&json!({"site": "A"})));
    assert!(results.get_handle(&other).is_none());
    assert!(results.checked(&other).is_err());
}

#[tokio::test]
async fn test_sub_requests_keep_array_structure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([[]])))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let batch = client.batch();
    batch.add_request("MultiSites.getAll", Params::new().with("idSites", vec![1, 2]));
    batch.flush().await.unwrap();

    let pairs = form_of_first_request(&server).await;
    assert_eq!(
        field(&pairs, "urls[0]"),
        Some("method=MultiSites.getAll&idSites%5B0%5D=1&idSites%5B1%5D=2")
    );
}

#[tokio::test]
async fn test_add_method_enqueues_empty_params() {
    let server = MockServer::start().await;
    let client = client_for(&server);
    let batch = client.batch();

    batch.add_method("API.getMatomoVersion");

    assert_eq!(batch.pending(), vec![PendingCall::bare("API.getMatomoVersion")]);
}

#[tokio::test]
async fn test_length_mismatch_fails() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"value": 1}])))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let batch = client.batch();
    batch.add_method("A.one").add_method("B.two");

    let err = batch.flush().await.unwrap_err();
    assert!(matches!(
        err,
        FetchError::BatchMismatch {
            expected: 2,
            actual: 1
        }
    ));
}

#[tokio::test]
async fn test_non_array_bulk_response_is_invalid() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"value": 1})))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let batch = client.batch();
    batch.add_method("A.one");

    let err = batch.send().await.unwrap_err();
    assert!(matches!(err, FetchError::InvalidResponse(_)));
}

#[tokio::test]
async fn test_whole_batch_fails_on_outer_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"result": "error", "message": "token invalid"})),
        )
        .mount(&server)
        .await;

    let client = client_for(&server);
    let batch = client.batch();
    batch.add_method("A.one").add_method("B.two");

    let err = batch.flush().await.unwrap_err();
    assert_eq!(err.api_message(), Some("token invalid"));
}

#[tokio::test]
async fn test_sinks_produce_identical_calls() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"nb_visits": 2}])))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let params = Params::new()
        .with("idSite", 1)
        .with("period", "day")
        .with("date", "today");

    let batch = client.batch();
    let handle = batch.sink().send("Actions.get", params.clone()).await;
    assert_eq!(batch.pending(), vec![PendingCall::new("Actions.get", params)]);

    let results = batch.flush().await.unwrap();
    assert_eq!(results.get_handle(&handle), Some(&json!({"nb_visits": 2})));
}
