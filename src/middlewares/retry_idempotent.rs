use crate::common::{IDEMPOTENCY_KEY_HEADER, STRIPE_SHOULD_RETRY_HEADER};
use async_trait::async_trait;
use chrono::Utc;
use reqwest::{Method, Request, Response};
use reqwest_middleware::{Middleware, Next};
use reqwest_retry::Retryable;
use retry_policies::{RetryDecision, RetryPolicy};
use std::{
    fmt::{Debug, Formatter},
    sync::Arc,
};
use task_local_extensions::Extensions;

/// Middleware that retries transient failures, but only for requests that are safe to replay.
///
/// Paystack's `POST /transaction/initialize` carries no idempotency key, so replaying it could
/// initialize a second transaction: such requests go through exactly once.
/// Stripe session creation sends an `Idempotency-Key` and is therefore retried.
///
/// A `Stripe-Should-Retry` response header, when present, overrides the status-based decision.
pub struct RetryIdempotentMiddleware {
    retry_policy: DynRetryPolicy,
}

impl RetryIdempotentMiddleware {
    pub fn new(retry_policy: DynRetryPolicy) -> Self {
        Self { retry_policy }
    }
}

/// Whether `req` can be sent again without side effects (RFC 7231, section 4.2.2),
/// or carries a non-empty `Idempotency-Key` header.
fn is_replayable(req: &Request) -> bool {
    match *req.method() {
        Method::GET
        | Method::HEAD
        | Method::OPTIONS
        | Method::TRACE
        | Method::PUT
        | Method::DELETE => true,
        Method::POST | Method::PATCH => req
            .headers()
            .get(IDEMPOTENCY_KEY_HEADER)
            .map_or(false, |v| !v.is_empty()),
        _ => false,
    }
}

/// Whether the outcome of an attempt is worth another one.
fn is_transient(result: &reqwest_middleware::Result<Response>) -> bool {
    let stripe_says = result.as_ref().ok().and_then(|response| {
        match response.headers().get(STRIPE_SHOULD_RETRY_HEADER)?.to_str().ok()? {
            "true" => Some(true),
            "false" => Some(false),
            _ => None,
        }
    });

    stripe_says.unwrap_or_else(|| {
        matches!(
            Retryable::from_reqwest_response(result),
            Some(Retryable::Transient)
        )
    })
}

#[async_trait]
impl Middleware for RetryIdempotentMiddleware {
    async fn handle(
        &self,
        req: Request,
        extensions: &mut Extensions,
        next: Next<'_>,
    ) -> reqwest_middleware::Result<Response> {
        if !is_replayable(&req) {
            tracing::trace!(method = %req.method(), url = %req.url(), "Request is not replayable, skipping retries");
            return next.run(req, extensions).await;
        }

        let mut req = req;
        let mut n_past_retries = 0;
        loop {
            // Streaming bodies cannot be cloned, those get a single attempt
            let duplicate = match req.try_clone() {
                Some(duplicate) => duplicate,
                None => return next.run(req, extensions).await,
            };

            let result = next.clone().run(req, extensions).await;
            if !is_transient(&result) {
                return result;
            }

            match self.retry_policy.should_retry(n_past_retries) {
                RetryDecision::Retry { execute_after } => {
                    let wait = (execute_after - Utc::now()).to_std().unwrap_or_default();
                    tracing::warn!(
                        attempt = n_past_retries + 1,
                        ?wait,
                        "Transient failure, retrying"
                    );
                    tokio::time::sleep(wait).await;

                    n_past_retries += 1;
                    req = duplicate;
                }
                RetryDecision::DoNotRetry => return result,
            }
        }
    }
}

/// Wrapper type around a retry policy because `dyn RetryPolicy` does not implement `RetryPolicy`.
#[derive(Clone)]
pub struct DynRetryPolicy(pub Arc<dyn RetryPolicy + Send + Sync + 'static>);

impl RetryPolicy for DynRetryPolicy {
    fn should_retry(&self, n_past_retries: u32) -> RetryDecision {
        self.0.should_retry(n_past_retries)
    }
}

impl Debug for DynRetryPolicy {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DynRetryPolicy").finish_non_exhaustive()
    }
}
