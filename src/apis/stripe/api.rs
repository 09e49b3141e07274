use crate::{
    apis::{
        params,
        read_json_body,
        stripe::{CheckoutSession, PaymentStatus},
        PaymentProvider, Provider, ProviderClientInner,
    },
    common::IDEMPOTENCY_KEY_HEADER,
    error::Operation,
    Error,
};
use async_trait::async_trait;
use reqwest::Url;
use reqwest_middleware::RequestBuilder;
use serde_json::Value;
use std::sync::Arc;
use urlencoding::encode;
use uuid::Uuid;

/// Stripe Checkout Sessions API client.
#[derive(Clone, Debug)]
pub struct StripeApi {
    inner: Arc<ProviderClientInner>,
}

impl StripeApi {
    pub(crate) fn new(inner: Arc<ProviderClientInner>) -> Self {
        Self { inner }
    }

    /// Creates a new Checkout Session.
    ///
    /// The payload is sent form-encoded, nested fields in bracket notation.
    /// See <https://docs.stripe.com/api/checkout/sessions/create> for the accepted fields.
    #[tracing::instrument(
        name = "Create Stripe Checkout Session",
        skip_all,
        fields(mode = payload.get("mode").and_then(serde_json::Value::as_str))
    )]
    pub async fn create(&self, payload: &Value) -> Result<Value, Error> {
        if !payload.is_object() {
            return Err(Error::InvalidPayload(
                "a checkout session must be described by a JSON object".into(),
            ));
        }
        let form = params::flatten(payload)?;

        // Generate a new random idempotency-key for this request
        let idempotency_key = Uuid::new_v4();

        self.send(
            self.inner
                .client
                .post(self.endpoint("/v1/checkout/sessions")?)
                .header(IDEMPOTENCY_KEY_HEADER, idempotency_key.to_string())
                .form(&form),
        )
        .await
    }

    /// Returns `true` if the Checkout Session has been paid.
    #[tracing::instrument(name = "Verify Stripe Checkout Session", skip(self))]
    pub async fn verify(&self, session_id: &str) -> Result<bool, Error> {
        let session = self.get_session(session_id).await?;

        Ok(session.payment_status == PaymentStatus::Paid)
    }

    /// Lists Checkout Sessions (`limit`, `starting_after`, `status`, `created[gte]`, ...).
    #[tracing::instrument(name = "List Stripe Checkout Sessions", skip_all)]
    pub async fn list(&self, params: &Value) -> Result<Value, Error> {
        let query = params::flatten(params)?;

        self.send(
            self.inner
                .client
                .get(self.endpoint("/v1/checkout/sessions")?)
                .query(&query),
        )
        .await
    }

    /// Retrieves a Checkout Session as returned by Stripe.
    #[tracing::instrument(name = "Get Stripe Checkout Session", skip(self))]
    pub async fn get_by_id(&self, session_id: &str) -> Result<Value, Error> {
        self.send(self.inner.client.get(
            self.endpoint(&format!("/v1/checkout/sessions/{}", encode(session_id)))?,
        ))
        .await
    }

    /// Retrieves a Checkout Session and maps it onto [`CheckoutSession`].
    pub async fn get_session(&self, session_id: &str) -> Result<CheckoutSession, Error> {
        let session = self.get_by_id(session_id).await?;

        Ok(serde_json::from_value(session)?)
    }

    fn endpoint(&self, path: &str) -> Result<Url, Error> {
        self.inner
            .environment
            .stripe_url()
            .join(path)
            .map_err(|e| Error::Other(e.into()))
    }

    async fn send(&self, request: RequestBuilder) -> Result<Value, Error> {
        let response = request.send().await?;
        let body = read_json_body(response).await?;
        tracing::debug!(
            object = body.get("object").and_then(serde_json::Value::as_str),
            "Response from Stripe"
        );

        Ok(body)
    }
}

#[async_trait]
impl PaymentProvider for StripeApi {
    fn provider(&self) -> Provider {
        Provider::Stripe
    }

    async fn create_payment(&self, payload: &Value) -> Result<Value, Error> {
        self.create(payload)
            .await
            .map_err(|e| e.during(Provider::Stripe, Operation::CreatePayment))
    }

    async fn verify_payment(&self, payment_id: &str) -> Result<bool, Error> {
        self.verify(payment_id)
            .await
            .map_err(|e| e.during(Provider::Stripe, Operation::VerifyPayment))
    }

    async fn list_payments(&self, params: &Value) -> Result<Value, Error> {
        self.list(params)
            .await
            .map_err(|e| e.during(Provider::Stripe, Operation::ListPayments))
    }

    async fn retrieve_single_payment(&self, payment_id: &str) -> Result<Value, Error> {
        self.get_by_id(payment_id)
            .await
            .map_err(|e| e.during(Provider::Stripe, Operation::RetrieveSinglePayment))
    }
}
