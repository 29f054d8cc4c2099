mod common;

use common::{fast_config, filled_page};
use pse_checkout::application::controller::{CheckoutController, CheckoutPorts, SubmitOutcome};
use pse_checkout::infrastructure::http_notifier::HttpNotifier;
use std::sync::Arc;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn run_checkout(base_url: &str, query: &str) -> (SubmitOutcome, Option<String>) {
    let config = fast_config().with_notify_base_url(base_url).unwrap();
    let notifier = HttpNotifier::from_config(&config).unwrap();
    let page = Arc::new(filled_page().with_consent(true));
    let controller = CheckoutController::initialize(
        CheckoutPorts::new(page.clone(), Box::new(notifier)),
        config,
        query,
    )
    .unwrap();

    let outcome = controller.submit().await;
    (outcome, page.snapshot().transaction_id)
}

#[tokio::test]
async fn test_bot_receives_confirmation() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/payment-confirmation"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    let (outcome, shown_id) = run_checkout(&mock_server.uri(), "phone=573009998877").await;

    assert!(matches!(outcome, SubmitOutcome::Completed { notified: true, .. }));

    let requests = mock_server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(body["phoneNumber"], "573009998877");
    assert_eq!(body["amount"], 15000);
    assert_eq!(body["paymentStatus"], "success");
    assert_eq!(body["transactionId"].as_str(), shown_id.as_deref());
    assert_eq!(body["userData"]["email"], "ana@example.co");
    assert!(body["timestamp"].as_str().is_some());
}

#[tokio::test]
async fn test_bot_error_is_swallowed() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&mock_server)
        .await;

    let (outcome, shown_id) = run_checkout(&mock_server.uri(), "").await;

    assert!(matches!(outcome, SubmitOutcome::Completed { notified: false, .. }));
    assert!(shown_id.is_some());
}

#[tokio::test]
async fn test_unreachable_bot_is_swallowed() {
    // Nothing listens on the discard port
    let (outcome, shown_id) = run_checkout("http://127.0.0.1:9/", "").await;

    assert!(matches!(outcome, SubmitOutcome::Completed { notified: false, .. }));
    assert!(shown_id.unwrap().starts_with("DEMO-"));
}
