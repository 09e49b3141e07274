
use chrono::Utc;
use reqwest::Url;
use serde_json::{json, Value};
use std::sync::{Arc, RwLock};
use wiremock::{
    matchers::{any, header, method, path, path_regex},
    Mock, MockServer, ResponseTemplate,
};

/// Payments created on the mock server, stored as the JSON the providers would return.
#[derive(Default)]
struct MockServerStorageInner {
    transactions: Vec<Value>,
    sessions: Vec<Value>,
}

type MockServerStorage = Arc<RwLock<MockServerStorageInner>>;

/// Mock server emulating the Paystack transactions API and the Stripe Checkout Sessions API,
/// used in local integration tests.
pub struct ProvidersMockServer {
    server: MockServer,
    url: Url,
    storage: MockServerStorage,
}

impl ProvidersMockServer {
    pub async fn start(paystack_key: &str, stripe_key: &str) -> Self {
        let server = MockServer::start().await;
        let storage = MockServerStorage::default();

        let paystack_auth = format!("Bearer {}", paystack_key);
        let stripe_auth = format!("Bearer {}", stripe_key);

        // Paystack
        Mock::given(method("POST"))
            .and(path("/transaction/initialize"))
            .and(header("Authorization", paystack_auth.as_str()))
            .respond_with(routes::InitializeTransaction(storage.clone()))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path_regex(r"^/transaction/verify/[^/]+$"))
            .and(header("Authorization", paystack_auth.as_str()))
            .respond_with(routes::VerifyTransaction(storage.clone()))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/transaction"))
            .and(header("Authorization", paystack_auth.as_str()))
            .respond_with(routes::ListTransactions(storage.clone()))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path_regex(r"^/transaction/[^/]+$"))
            .and(header("Authorization", paystack_auth.as_str()))
            .respond_with(routes::FetchTransaction(storage.clone()))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/refund"))
            .and(header("Authorization", paystack_auth.as_str()))
            .respond_with(routes::CreateRefund(storage.clone()))
            .mount(&server)
            .await;

        // Stripe
        Mock::given(method("POST"))
            .and(path("/v1/checkout/sessions"))
            .and(header("Authorization", stripe_auth.as_str()))
            .respond_with(routes::CreateSession(storage.clone()))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/v1/checkout/sessions"))
            .and(header("Authorization", stripe_auth.as_str()))
            .respond_with(routes::ListSessions(storage.clone()))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path_regex(r"^/v1/checkout/sessions/[^/]+$"))
            .and(header("Authorization", stripe_auth.as_str()))
            .respond_with(routes::RetrieveSession(storage.clone()))
            .mount(&server)
            .await;

        // Anything not matched above carries a wrong key: mocks are matched in mounting order
        Mock::given(path_regex(r"^/v1/"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "error": {
                    "type": "invalid_request_error",
                    "message": "Invalid API Key provided: sk_test_****"
                }
            })))
            .mount(&server)
            .await;
        Mock::given(any())
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "status": false,
                "message": "Invalid key"
            })))
            .mount(&server)
            .await;

        Self {
            url: Url::parse(&server.uri()).unwrap(),
            server,
            storage,
        }
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Marks a payment as paid, as if the customer had completed the checkout.
    ///
    /// Accepts either a Paystack reference or a Stripe Checkout Session id.
    pub fn complete_payment(&self, id: &str) -> Result<(), anyhow::Error> {
        let mut storage = self.storage.write().unwrap();

        if let Some(transaction) = storage
            .transactions
            .iter_mut()
            .find(|t| t["reference"] == id)
        {
            transaction["status"] = json!("success");
            transaction["paid_at"] = json!(Utc::now().to_rfc3339());
            return Ok(());
        }

        if let Some(session) = storage.sessions.iter_mut().find(|s| s["id"] == id) {
            session["payment_status"] = json!("paid");
            session["status"] = json!("complete");
            return Ok(());
        }

        Err(anyhow::anyhow!("Payment {} not found", id))
    }

    /// Number of requests the server has received so far.
    pub async fn received_requests(&self) -> usize {
        self.server
            .received_requests()
            .await
            .map_or(0, |requests| requests.len())
    }
}
