//! Standard errors used by all functions in the crate.

use crate::apis::Provider;
use std::fmt;

/// Error collecting all possible failures of the payment gateway.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Transport-level failure: connection, TLS, timeouts or a broken response stream.
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),
    /// The provider answered with a body that is not valid JSON.
    #[error("Failed to parse response data: {0}")]
    ParseError(#[from] serde_json::Error),
    /// Non-success HTTP status returned by a provider endpoint.
    #[error("{0}")]
    ApiError(#[from] ApiError),
    /// The provider answered successfully, but the body lacks the fields the operation relies on.
    #[error("Invalid response from {0} API")]
    InvalidResponse(Provider),
    /// The payload or parameters could not be encoded for the provider.
    #[error("Invalid payload: {0}")]
    InvalidPayload(String),
    /// Unknown provider name passed to the gateway.
    #[error("Invalid provider type: {0}")]
    InvalidProvider(String),
    /// Failure of a gateway operation, carrying the underlying cause.
    #[error("{provider} {operation} failed: {source}")]
    Operation {
        provider: Provider,
        operation: Operation,
        #[source]
        source: Box<Error>,
    },
    /// Catch-all variant for unexpected errors.
    #[error(transparent)]
    Other(anyhow::Error),
}

impl Error {
    pub(crate) fn during(self, provider: Provider, operation: Operation) -> Self {
        Error::Operation {
            provider,
            operation,
            source: Box::new(self),
        }
    }

    /// Returns the innermost error, skipping any [`Error::Operation`] wrappers.
    pub fn root_cause(&self) -> &Error {
        match self {
            Error::Operation { source, .. } => source.root_cause(),
            e => e,
        }
    }
}

impl From<reqwest_middleware::Error> for Error {
    fn from(e: reqwest_middleware::Error) -> Self {
        match e {
            reqwest_middleware::Error::Reqwest(e) => Error::HttpError(e),
            reqwest_middleware::Error::Middleware(e) => {
                e.downcast::<Error>().unwrap_or_else(Error::Other)
            }
        }
    }
}

impl From<Error> for reqwest_middleware::Error {
    fn from(e: Error) -> Self {
        reqwest_middleware::Error::Middleware(e.into())
    }
}

/// The gateway operations shared by all providers.
///
/// Both providers report failures with the same labels, including
/// `"single payment retrieval"` for lookups of a single payment.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Operation {
    CreatePayment,
    VerifyPayment,
    ListPayments,
    RetrieveSinglePayment,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Operation::CreatePayment => "payment creation",
            Operation::VerifyPayment => "payment verification",
            Operation::ListPayments => "list payments",
            Operation::RetrieveSinglePayment => "single payment retrieval",
        })
    }
}

/// Payment provider HTTP APIs error.
#[derive(thiserror::Error, Debug)]
pub struct ApiError {
    /// HTTP status returned by the server.
    pub status: u16,
    /// Human readable message returned by the provider.
    pub message: String,
    /// Provider error category, e.g. Stripe's `invalid_request_error`.
    pub r#type: Option<String>,
    /// Machine readable error code, when the provider sends one.
    pub code: Option<String>,
    /// Name of the request parameter the error relates to.
    pub param: Option<String>,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HTTP error {}: {}", self.status, self.message)?;

        if let Some(ref r#type) = self.r#type {
            write!(f, " ({})", r#type)?;
        }

        if let Some(ref code) = self.code {
            write!(f, "\nCode: {}", code)?;
        }

        if let Some(ref param) = self.param {
            write!(f, "\nParameter: {}", param)?;
        }

        Ok(())
    }
}
