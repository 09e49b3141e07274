use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Envelope wrapping every Paystack response.
#[derive(Deserialize, Debug, Clone)]
pub struct PaystackResponse<T> {
    pub status: bool,
    #[serde(default)]
    pub message: Option<String>,
    pub data: Option<T>,
}

/// The part of a transaction that tells whether it has been paid.
///
/// Every other field is left out, so amounts or dates in an unexpected shape
/// never get in the way of a verification.
#[derive(Deserialize, Debug, Clone, Copy, Eq, PartialEq)]
pub struct TransactionState {
    pub status: TransactionStatus,
}

#[derive(Deserialize, Debug, Clone, Copy, Eq, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum TransactionStatus {
    Success,
    Failed,
    Abandoned,
    Ongoing,
    Pending,
    Processing,
    Queued,
    Reversed,
    #[serde(other)]
    Unknown,
}

/// Request body of `POST /refund`.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct RefundRequest {
    /// Reference or id of the transaction to refund.
    pub transaction: String,
    /// Amount to refund in the subunit of the currency. Defaults to the full transaction amount.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<u64>,
    /// Any further field accepted by the endpoint, e.g. `merchant_note`.
    #[serde(flatten)]
    pub context: Map<String, Value>,
}

impl RefundRequest {
    pub fn new(transaction: impl Into<String>) -> Self {
        Self {
            transaction: transaction.into(),
            amount: None,
            context: Map::new(),
        }
    }
}
