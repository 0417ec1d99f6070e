//! Payment adapter against a fake booking backend and fake checkout providers.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use danceflow_common::{
    BackendClient, BoxFuture, CheckoutRedirect, Currency, ErrorKind, PaymentService,
};
use danceflow_config::{BackendConfig, StripeConfig};
use danceflow_stripe::{
    CheckoutProvider, CheckoutSession, PaymentClient, PaymentError, ProviderLoader,
};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const INTENT_PATH: &str = "/api/create-payment-intent";

/// Records every session it is handed; optionally refuses them.
#[derive(Default)]
struct RecordingProvider {
    sessions: Mutex<Vec<String>>,
    refuse_with: Option<String>,
}

impl RecordingProvider {
    fn refusing(message: &str) -> Self {
        Self {
            sessions: Mutex::new(Vec::new()),
            refuse_with: Some(message.to_string()),
        }
    }

    fn sessions(&self) -> Vec<String> {
        self.sessions.lock().unwrap().clone()
    }
}

impl CheckoutProvider for RecordingProvider {
    fn redirect_to_checkout<'a>(
        &'a self,
        session: &'a CheckoutSession,
    ) -> BoxFuture<'a, CheckoutRedirect, PaymentError> {
        Box::pin(async move {
            self.sessions.lock().unwrap().push(session.id.clone());
            if let Some(message) = &self.refuse_with {
                return Err(PaymentError::RedirectError(message.clone()));
            }
            Ok(CheckoutRedirect {
                session_id: session.id.clone(),
                url: format!("https://checkout.test/{}", session.id),
            })
        })
    }
}

/// Counts loads and fails the first `failures` of them.
struct CountingLoader {
    loads: AtomicUsize,
    failures: AtomicUsize,
    provider: Arc<RecordingProvider>,
}

impl CountingLoader {
    fn new(provider: Arc<RecordingProvider>) -> Self {
        Self::failing(provider, 0)
    }

    fn failing(provider: Arc<RecordingProvider>, failures: usize) -> Self {
        Self {
            loads: AtomicUsize::new(0),
            failures: AtomicUsize::new(failures),
            provider,
        }
    }

    fn loads(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }
}

impl ProviderLoader for CountingLoader {
    fn load(&self) -> BoxFuture<'_, Arc<dyn CheckoutProvider>, PaymentError> {
        Box::pin(async move {
            self.loads.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(20)).await;

            let remaining = self.failures.load(Ordering::SeqCst);
            if remaining > 0 {
                self.failures.store(remaining - 1, Ordering::SeqCst);
                return Err(PaymentError::ProviderUnavailable("script failed to load".to_string()));
            }

            let provider: Arc<dyn CheckoutProvider> = self.provider.clone();
            Ok(provider)
        })
    }
}

fn client_with(server: &MockServer, loader: Arc<CountingLoader>) -> PaymentClient {
    let backend = BackendClient::new(&BackendConfig::new(server.uri())).unwrap();
    PaymentClient::with_loader(backend, INTENT_PATH, loader)
}

async fn mount_session(server: &MockServer, body: serde_json::Value) {
    Mock::given(method("POST"))
        .and(path(INTENT_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

#[tokio::test]
async fn eur_payment_redirects_with_backend_session() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(INTENT_PATH))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({ "amount": 1000, "currency": "EUR" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "sess_abc" })))
        .expect(1)
        .mount(&server)
        .await;

    let provider = Arc::new(RecordingProvider::default());
    let client = client_with(&server, Arc::new(CountingLoader::new(provider.clone())));

    let result = client.process_payment(1000, Some(Currency::Eur)).await;

    assert!(result.success);
    assert!(result.error.is_none());
    assert_eq!(provider.sessions(), vec!["sess_abc".to_string()]);
    assert_eq!(result.redirect.unwrap().session_id, "sess_abc");
}

#[tokio::test]
async fn currency_defaults_to_usd() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(INTENT_PATH))
        .and(body_json(json!({ "amount": 2500, "currency": "USD" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "sess_usd" })))
        .expect(1)
        .mount(&server)
        .await;

    let provider = Arc::new(RecordingProvider::default());
    let client = client_with(&server, Arc::new(CountingLoader::new(provider)));

    let result = client.process_payment(2500, None).await;

    assert!(result.success);
}

#[tokio::test]
async fn provider_init_failure_is_returned_not_raised() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "sess_abc" })))
        .expect(0)
        .mount(&server)
        .await;

    let provider = Arc::new(RecordingProvider::default());
    let client = client_with(&server, Arc::new(CountingLoader::failing(provider, 1)));

    let result = client.process_payment(1000, Some(Currency::Gbp)).await;

    assert!(!result.success);
    let failure = result.error.unwrap();
    assert_eq!(failure.kind, ErrorKind::ProviderUnavailable);
    assert!(failure.message.contains("script failed to load"));
}

#[tokio::test]
async fn redirect_error_is_returned_with_original_message() {
    let server = MockServer::start().await;
    mount_session(&server, json!({ "id": "sess_gone" })).await;

    let provider = Arc::new(RecordingProvider::refusing("No such checkout.session: sess_gone"));
    let client = client_with(&server, Arc::new(CountingLoader::new(provider)));

    let result = client.process_payment(1000, Some(Currency::Try)).await;

    assert!(!result.success);
    let failure = result.error.unwrap();
    assert_eq!(failure.kind, ErrorKind::Redirect);
    assert!(failure.message.contains("No such checkout.session: sess_gone"));
    assert!(result.redirect.is_none());
}

#[tokio::test]
async fn backend_error_status_becomes_failure_value() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(INTENT_PATH))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(json!({ "error": { "message": "Stripe is down" } })),
        )
        .mount(&server)
        .await;

    let provider = Arc::new(RecordingProvider::default());
    let client = client_with(&server, Arc::new(CountingLoader::new(provider.clone())));

    let result = client.process_payment(1000, None).await;

    assert!(!result.success);
    let failure = result.error.unwrap();
    assert_eq!(failure.kind, ErrorKind::HttpStatus);
    assert!(failure.message.contains("Stripe is down"));
    assert!(provider.sessions().is_empty());
}

#[tokio::test]
async fn body_without_session_id_is_a_decode_failure() {
    let server = MockServer::start().await;
    mount_session(&server, json!({ "clientSecret": "pi_123_secret" })).await;

    let provider = Arc::new(RecordingProvider::default());
    let client = client_with(&server, Arc::new(CountingLoader::new(provider)));

    let err = client.try_process_payment(1000, None).await.unwrap_err();

    assert_eq!(danceflow_common::HasErrorKind::kind(&err), ErrorKind::Decode);
}

#[tokio::test]
async fn unreachable_backend_becomes_network_failure() {
    let backend = BackendClient::new(&BackendConfig::new("http://127.0.0.1:9")).unwrap();
    let provider = Arc::new(RecordingProvider::default());
    let client = PaymentClient::with_loader(backend, INTENT_PATH, Arc::new(CountingLoader::new(provider)));

    let result = client.process_payment(1000, None).await;

    assert!(!result.success);
    assert_eq!(result.error.unwrap().kind, ErrorKind::Network);
}

#[tokio::test]
async fn non_positive_amount_is_rejected_before_any_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST")).respond_with(ResponseTemplate::new(200)).expect(0).mount(&server).await;

    let provider = Arc::new(RecordingProvider::default());
    let loader = Arc::new(CountingLoader::new(provider));
    let client = client_with(&server, loader.clone());

    let result = client.process_payment(0, None).await;

    assert!(!result.success);
    assert_eq!(result.error.unwrap().kind, ErrorKind::Validation);
    assert_eq!(loader.loads(), 0);
}

#[tokio::test]
async fn failed_provider_load_is_retried_on_next_call() {
    let server = MockServer::start().await;
    mount_session(&server, json!({ "id": "sess_retry" })).await;

    let provider = Arc::new(RecordingProvider::default());
    let loader = Arc::new(CountingLoader::failing(provider, 1));
    let client = client_with(&server, loader.clone());

    assert!(!client.process_payment(1000, None).await.success);
    assert!(client.process_payment(1000, None).await.success);
    assert!(client.process_payment(1000, None).await.success);

    assert_eq!(loader.loads(), 2);
}

#[tokio::test]
async fn concurrent_first_calls_load_provider_once() {
    let server = MockServer::start().await;
    mount_session(&server, json!({ "id": "sess_many" })).await;

    let provider = Arc::new(RecordingProvider::default());
    let loader = Arc::new(CountingLoader::new(provider.clone()));
    let client = client_with(&server, loader.clone());

    let (a, b, c) = tokio::join!(
        client.process_payment(1000, None),
        client.process_payment(2000, Some(Currency::Eur)),
        client.process_payment(3000, Some(Currency::Gbp)),
    );

    assert!(a.success && b.success && c.success);
    assert_eq!(loader.loads(), 1);
    assert_eq!(provider.sessions().len(), 3);
}

#[tokio::test]
async fn stripe_loader_builds_hosted_checkout_url() {
    let server = MockServer::start().await;
    mount_session(&server, json!({ "sessionId": "cs_test_a1" })).await;

    let backend_config = BackendConfig::new(server.uri());
    let backend = BackendClient::new(&backend_config).unwrap();
    let client = PaymentClient::new(backend, &backend_config, &StripeConfig::new("pk_test_123"));

    let result = client.process_payment(4200, Some(Currency::Eur)).await;

    assert!(result.success);
    assert_eq!(
        result.redirect.unwrap().url,
        "https://checkout.stripe.com/c/pay/cs_test_a1"
    );
}

#[tokio::test]
async fn forwarded_stripe_session_with_session_id_field_succeeds() {
    let server = MockServer::start().await;
    mount_session(
        &server,
        json!({
            "object": "checkout.session",
            "id": "cs_test_1",
            "sessionId": "cs_test_1",
            "url": "https://checkout.stripe.com/c/pay/cs_test_1"
        }),
    )
    .await;

    let provider = Arc::new(RecordingProvider::default());
    let client = client_with(&server, Arc::new(CountingLoader::new(provider.clone())));

    let result = client.process_payment(1000, Some(Currency::Eur)).await;

    assert!(result.success, "{:?}", result.error);
    assert_eq!(provider.sessions(), vec!["cs_test_1".to_string()]);
}

#[tokio::test]
async fn stripe_loader_rejects_secret_key() {
    let server = MockServer::start().await;
    let backend_config = BackendConfig::new(server.uri());
    let backend = BackendClient::new(&backend_config).unwrap();
    let client = PaymentClient::new(backend, &backend_config, &StripeConfig::new("sk_live_oops"));

    let result = client.process_payment(4200, None).await;

    assert!(!result.success);
    assert_eq!(result.error.unwrap().kind, ErrorKind::ProviderUnavailable);
}

#[tokio::test]
async fn usable_through_the_service_trait() {
    let server = MockServer::start().await;
    mount_session(&server, json!({ "id": "sess_trait" })).await;

    let provider = Arc::new(RecordingProvider::default());
    let service: Arc<dyn PaymentService> =
        Arc::new(client_with(&server, Arc::new(CountingLoader::new(provider))));

    let result = service.process_payment(1000, Some(Currency::Usd)).await;

    assert!(result.success);
}
