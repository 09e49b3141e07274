use crate::{
    apis::{
        params,
        paystack::{PaystackResponse, RefundRequest, TransactionState, TransactionStatus},
        read_json_body, PaymentProvider, Provider, ProviderClientInner,
    },
    error::Operation,
    Error,
};
use async_trait::async_trait;
use reqwest::Url;
use reqwest_middleware::RequestBuilder;
use serde_json::Value;
use std::sync::Arc;
use urlencoding::encode;

/// Paystack transactions API client.
#[derive(Clone, Debug)]
pub struct PaystackApi {
    inner: Arc<ProviderClientInner>,
}

impl PaystackApi {
    pub(crate) fn new(inner: Arc<ProviderClientInner>) -> Self {
        Self { inner }
    }

    /// Initializes a new transaction and returns its `data` object
    /// (`authorization_url`, `access_code` and `reference`).
    ///
    /// See <https://paystack.com/docs/api/transaction/#initialize> for the accepted payload.
    #[tracing::instrument(name = "Initialize Paystack Transaction", skip_all)]
    pub async fn create(&self, payload: &Value) -> Result<Value, Error> {
        let body = self
            .send(
                self.inner
                    .client
                    .post(self.endpoint("/transaction/initialize")?)
                    .json(payload),
            )
            .await?;

        let response: PaystackResponse<Value> = serde_json::from_value(body)
            .map_err(|_| Error::InvalidResponse(Provider::Paystack))?;

        match response {
            PaystackResponse {
                status: true,
                data: Some(data),
                ..
            } if has_reference(&data) => Ok(data),
            _ => Err(Error::InvalidResponse(Provider::Paystack)),
        }
    }

    /// Verifies the transaction with the given reference.
    ///
    /// Returns `true` only if Paystack reports the transaction as `success`.
    #[tracing::instrument(name = "Verify Paystack Transaction", skip(self))]
    pub async fn verify(&self, reference: &str) -> Result<bool, Error> {
        let body = self
            .send(self.inner.client.get(
                self.endpoint(&format!("/transaction/verify/{}", encode(reference)))?,
            ))
            .await?;

        let verified = match serde_json::from_value::<PaystackResponse<TransactionState>>(body) {
            Ok(PaystackResponse {
                status: true,
                data: Some(transaction),
                ..
            }) => transaction.status == TransactionStatus::Success,
            Ok(_) => false,
            Err(e) => {
                tracing::debug!(error = %e, "Unexpected verification body from Paystack");
                false
            }
        };

        Ok(verified)
    }

    /// Lists transactions, filtered by the given query parameters
    /// (`perPage`, `page`, `status`, `from`, `to`, ...).
    #[tracing::instrument(name = "List Paystack Transactions", skip_all)]
    pub async fn list(&self, params: &Value) -> Result<Value, Error> {
        let query = params::flatten(params)?;

        self.send(
            self.inner
                .client
                .get(self.endpoint("/transaction")?)
                .query(&query),
        )
        .await
    }

    /// Fetches a single transaction by its numeric id.
    #[tracing::instrument(name = "Fetch Paystack Transaction", skip(self))]
    pub async fn get_by_id(&self, id: &str) -> Result<Value, Error> {
        self.send(
            self.inner
                .client
                .get(self.endpoint(&format!("/transaction/{}", encode(id)))?),
        )
        .await
    }

    /// Refunds a transaction, fully or partially.
    #[tracing::instrument(
        name = "Create Paystack Refund",
        skip(self, refund_request),
        fields(transaction = %refund_request.transaction, amount = ?refund_request.amount)
    )]
    pub async fn refund(&self, refund_request: &RefundRequest) -> Result<Value, Error> {
        self.send(
            self.inner
                .client
                .post(self.endpoint("/refund")?)
                .json(refund_request),
        )
        .await
    }

    fn endpoint(&self, path: &str) -> Result<Url, Error> {
        self.inner
            .environment
            .paystack_url()
            .join(path)
            .map_err(|e| Error::Other(e.into()))
    }

    async fn send(&self, request: RequestBuilder) -> Result<Value, Error> {
        let response = request.send().await?;
        let body = read_json_body(response).await?;
        tracing::debug!(response = %body, "Response from Paystack");

        Ok(body)
    }
}

fn has_reference(data: &Value) -> bool {
    data.get("reference")
        .and_then(Value::as_str)
        .map_or(false, |reference| !reference.is_empty())
}

#[async_trait]
impl PaymentProvider for PaystackApi {
    fn provider(&self) -> Provider {
        Provider::Paystack
    }

    async fn create_payment(&self, payload: &Value) -> Result<Value, Error> {
        self.create(payload)
            .await
            .map_err(|e| e.during(Provider::Paystack, Operation::CreatePayment))
    }

    async fn verify_payment(&self, payment_id: &str) -> Result<bool, Error> {
        self.verify(payment_id)
            .await
            .map_err(|e| e.during(Provider::Paystack, Operation::VerifyPayment))
    }

    async fn list_payments(&self, params: &Value) -> Result<Value, Error> {
        self.list(params)
            .await
            .map_err(|e| e.during(Provider::Paystack, Operation::ListPayments))
    }

    async fn retrieve_single_payment(&self, payment_id: &str) -> Result<Value, Error> {
        self.get_by_id(payment_id)
            .await
            .map_err(|e| e.during(Provider::Paystack, Operation::RetrieveSinglePayment))
    }
}
