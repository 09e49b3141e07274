//! Clients for the supported payment providers.

use crate::{client::Environment, error::Error};
use async_trait::async_trait;
use reqwest_middleware::ClientWithMiddleware;
use serde_json::Value;
use std::{
    fmt::{self, Debug, Formatter},
    str::FromStr,
};

pub mod auth;
pub(crate) mod params;
pub mod paystack;
pub mod stripe;

/// Common interface implemented by every payment provider.
///
/// Payloads and parameters are passed through to the provider as they are, so any field
/// documented by the provider API can be used. Errors are always
/// [`Error::Operation`](crate::Error::Operation)s naming the provider and the failed operation.
#[async_trait]
pub trait PaymentProvider: Debug + Send + Sync {
    /// Which provider this is.
    fn provider(&self) -> Provider;

    /// Creates a payment with the given payload and returns the provider's response.
    async fn create_payment(&self, payload: &Value) -> Result<Value, Error>;

    /// Returns `true` if the payment with the given id has been paid.
    async fn verify_payment(&self, payment_id: &str) -> Result<bool, Error>;

    /// Lists payments matching the given filters. `Value::Null` applies no filter.
    async fn list_payments(&self, params: &Value) -> Result<Value, Error>;

    /// Retrieves the details of a single payment.
    async fn retrieve_single_payment(&self, payment_id: &str) -> Result<Value, Error>;
}

/// Supported payment providers.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum Provider {
    Paystack,
    Stripe,
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Provider::Paystack => "Paystack",
            Provider::Stripe => "Stripe",
        })
    }
}

impl FromStr for Provider {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "paystack" => Ok(Provider::Paystack),
            "stripe" => Ok(Provider::Stripe),
            _ => Err(Error::InvalidProvider(s.to_string())),
        }
    }
}

pub(crate) struct ProviderClientInner {
    pub(crate) client: ClientWithMiddleware,
    pub(crate) environment: Environment,
}

impl Debug for ProviderClientInner {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderClientInner")
            .field("environment", &self.environment)
            .finish_non_exhaustive()
    }
}

/// Collects the response body chunk by chunk and parses it as JSON.
///
/// A stream interrupted midway surfaces as [`Error::HttpError`], a complete body
/// that is not JSON as [`Error::ParseError`].
pub(crate) async fn read_json_body(mut response: reqwest::Response) -> Result<Value, Error> {
    let mut body = Vec::new();
    while let Some(chunk) = response.chunk().await? {
        body.extend_from_slice(&chunk);
    }

    Ok(serde_json::from_slice(&body)?)
}
