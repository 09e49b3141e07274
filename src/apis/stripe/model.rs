use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Typed view over a Checkout Session.
///
/// Only the commonly used fields are mapped; use
/// [`StripeApi::get_by_id`](crate::apis::stripe::StripeApi::get_by_id) for the full object.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct CheckoutSession {
    pub id: String,
    pub payment_status: PaymentStatus,
    pub status: Option<SessionStatus>,
    pub url: Option<String>,
    pub amount_total: Option<i64>,
    pub currency: Option<String>,
    pub customer_email: Option<String>,
    #[serde(default, with = "chrono::serde::ts_seconds_option")]
    pub created: Option<DateTime<Utc>>,
    #[serde(default, with = "chrono::serde::ts_seconds_option")]
    pub expires_at: Option<DateTime<Utc>>,
}

#[derive(Deserialize, Debug, Clone, Copy, Eq, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    /// The payment funds are available in your account.
    Paid,
    /// The payment funds are not yet available in your account.
    Unpaid,
    /// The session is in `setup` mode, or the total is zero.
    NoPaymentRequired,
    /// A status this client does not know about. Never counts as paid.
    #[serde(other)]
    Unknown,
}

#[derive(Deserialize, Debug, Clone, Copy, Eq, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    Open,
    Complete,
    Expired,
    #[serde(other)]
    Unknown,
}
