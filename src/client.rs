//! Module containing the payment gateway, the entry point of the crate.

use crate::{
    apis::{
        auth::ApiKey, paystack::PaystackApi, stripe::StripeApi, PaymentProvider, Provider,
        ProviderClientInner,
    },
    common::{DEFAULT_PAYSTACK_URL, DEFAULT_STRIPE_URL},
    middlewares::{
        authentication::AuthenticationMiddleware,
        error_handling::ErrorHandlingMiddleware,
        inject_user_agent::InjectUserAgentMiddleware,
        retry_idempotent::{DynRetryPolicy, RetryIdempotentMiddleware},
    },
    Error,
};
use async_trait::async_trait;
use reqwest::Url;
use reqwest_middleware::ClientWithMiddleware;
use reqwest_tracing::TracingMiddleware;
use retry_policies::RetryPolicy;
use serde_json::Value;
use std::sync::Arc;

/// Gateway to a single payment provider.
///
/// Every operation is forwarded to the selected provider, which issues exactly one HTTP
/// request unless a retry policy has been configured on the
/// [`PaymentGatewayBuilder`](crate::client::PaymentGatewayBuilder).
#[derive(Debug, Clone)]
pub struct PaymentGateway {
    backend: Backend,
    test_mode: bool,
}

#[derive(Debug, Clone)]
enum Backend {
    Paystack(PaystackApi),
    Stripe(StripeApi),
}

impl PaymentGateway {
    /// Builds a new [`PaymentGateway`](crate::client::PaymentGateway) with the default configuration.
    pub fn new(provider: Provider, api_key: impl Into<ApiKey>) -> PaymentGateway {
        PaymentGatewayBuilder::new(provider, api_key.into()).build()
    }

    /// Builds a new [`PaymentGateway`](crate::client::PaymentGateway) for a provider given by name
    /// (`"paystack"` or `"stripe"`).
    ///
    /// Fails with [`Error::InvalidProvider`](crate::Error::InvalidProvider) for any other name.
    pub fn from_name(provider: &str, api_key: impl Into<ApiKey>) -> Result<PaymentGateway, Error> {
        Ok(Self::new(provider.parse()?, api_key))
    }

    /// Returns a new builder to configure a new [`PaymentGateway`](crate::client::PaymentGateway).
    pub fn builder(provider: Provider, api_key: impl Into<ApiKey>) -> PaymentGatewayBuilder {
        PaymentGatewayBuilder::new(provider, api_key.into())
    }

    /// The Paystack client, if this gateway is backed by Paystack.
    pub fn paystack(&self) -> Option<&PaystackApi> {
        match &self.backend {
            Backend::Paystack(api) => Some(api),
            Backend::Stripe(_) => None,
        }
    }

    /// The Stripe client, if this gateway is backed by Stripe.
    pub fn stripe(&self) -> Option<&StripeApi> {
        match &self.backend {
            Backend::Stripe(api) => Some(api),
            Backend::Paystack(_) => None,
        }
    }

    /// Whether the gateway was built with a test-mode key (`sk_test_...`).
    pub fn is_test_mode(&self) -> bool {
        self.test_mode
    }

    fn delegate(&self) -> &dyn PaymentProvider {
        match &self.backend {
            Backend::Paystack(api) => api as &dyn PaymentProvider,
            Backend::Stripe(api) => api as &dyn PaymentProvider,
        }
    }
}

#[async_trait]
impl PaymentProvider for PaymentGateway {
    fn provider(&self) -> Provider {
        self.delegate().provider()
    }

    async fn create_payment(&self, payload: &Value) -> Result<Value, Error> {
        self.delegate().create_payment(payload).await
    }

    async fn verify_payment(&self, payment_id: &str) -> Result<bool, Error> {
        self.delegate().verify_payment(payment_id).await
    }

    async fn list_payments(&self, params: &Value) -> Result<Value, Error> {
        self.delegate().list_payments(params).await
    }

    async fn retrieve_single_payment(&self, payment_id: &str) -> Result<Value, Error> {
        self.delegate().retrieve_single_payment(payment_id).await
    }
}

/// Builder for a [`PaymentGateway`](crate::client::PaymentGateway).
#[derive(Debug)]
pub struct PaymentGatewayBuilder {
    provider: Provider,
    api_key: ApiKey,
    client: reqwest::Client,
    retry_policy: Option<DynRetryPolicy>,
    environment: Environment,
}

impl PaymentGatewayBuilder {
    /// Creates a new builder to configure a [`PaymentGateway`](crate::client::PaymentGateway).
    pub fn new(provider: Provider, api_key: ApiKey) -> Self {
        Self {
            provider,
            api_key,
            client: reqwest::Client::new(),
            retry_policy: None,
            environment: Environment::Live,
        }
    }

    /// Consumes the builder and builds a new [`PaymentGateway`](crate::client::PaymentGateway).
    pub fn build(self) -> PaymentGateway {
        let test_mode = self.api_key.is_test_key();
        tracing::debug!(provider = %self.provider, test_mode, "Building payment gateway");

        let inner = Arc::new(ProviderClientInner {
            client: build_client_with_middleware(
                self.client,
                self.retry_policy,
                AuthenticationMiddleware {
                    api_key: self.api_key,
                },
            ),
            environment: self.environment,
        });

        let backend = match self.provider {
            Provider::Paystack => Backend::Paystack(PaystackApi::new(inner)),
            Provider::Stripe => Backend::Stripe(StripeApi::new(inner)),
        };

        PaymentGateway { backend, test_mode }
    }

    /// Sets a specific reqwest [`Client`](reqwest::Client) to use.
    pub fn with_http_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    /// Sets a [`RetryPolicy`](retry_policies::RetryPolicy) to use when retrying transient failures.
    ///
    /// Retries are disabled by default. Requests that are not safe to replay are never retried.
    pub fn with_retry_policy(
        mut self,
        retry_policy: impl Into<Option<Arc<dyn RetryPolicy + Send + Sync + 'static>>>,
    ) -> Self {
        self.retry_policy = retry_policy.into().map(DynRetryPolicy);
        self
    }

    /// Sets the environment to which this client should connect.
    ///
    /// Defaults to [`Environment::Live`](crate::client::Environment::Live).
    pub fn with_environment(mut self, environment: Environment) -> Self {
        self.environment = environment;
        self
    }
}

/// Base URLs of the provider APIs.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Environment {
    /// The public provider endpoints. Test mode is selected by the API key, not by the URL.
    Live,
    /// Custom environment, e.g. a proxy or a local mock server.
    Custom { paystack_url: Url, stripe_url: Url },
}

impl Environment {
    /// Builds a custom environment where every provider API is served from the same base URL.
    pub fn from_single_url(url: &Url) -> Environment {
        Environment::Custom {
            paystack_url: url.clone(),
            stripe_url: url.clone(),
        }
    }

    /// Base URL for Paystack requests.
    pub fn paystack_url(&self) -> Url {
        match self {
            Environment::Live => Url::parse(DEFAULT_PAYSTACK_URL).unwrap(),
            Environment::Custom { paystack_url, .. } => paystack_url.clone(),
        }
    }

    /// Base URL for Stripe requests.
    pub fn stripe_url(&self) -> Url {
        match self {
            Environment::Live => Url::parse(DEFAULT_STRIPE_URL).unwrap(),
            Environment::Custom { stripe_url, .. } => stripe_url.clone(),
        }
    }
}

fn build_client_with_middleware(
    client: reqwest::Client,
    retry_policy: Option<DynRetryPolicy>,
    auth_middleware: AuthenticationMiddleware,
) -> ClientWithMiddleware {
    let mut builder = reqwest_middleware::ClientBuilder::new(client)
        .with(TracingMiddleware::default())
        .with(InjectUserAgentMiddleware::new())
        .with(ErrorHandlingMiddleware);

    if let Some(retry_policy) = retry_policy {
        builder = builder.with(RetryIdempotentMiddleware::new(retry_policy));
    }

    builder.with(auth_middleware).build()
}
