//! A unified client for online payment providers.
//!
//! `paygate` exposes one interface, [`PaymentProvider`](crate::apis::PaymentProvider), to create,
//! verify, list and retrieve payments, backed by:
//!
//! - [Paystack](https://paystack.com/docs/api/transaction/) transactions,
//! - [Stripe](https://docs.stripe.com/api/checkout/sessions) Checkout Sessions.
//!
//! Payloads are plain JSON and are forwarded to the provider untouched, so every field documented
//! by the provider can be used.
//!
//! # Usage
//!
//! ## Initialize a new `PaymentGateway`
//!
//! Pick a provider and pass your secret key:
//!
//! ```rust,no_run
//! # use paygate::{PaymentGateway, Provider};
//! let gateway = PaymentGateway::new(Provider::Paystack, "sk_test_xxx");
//!
//! // Or by name, e.g. when the provider comes from configuration
//! let gateway = PaymentGateway::from_name("stripe", "sk_test_xxx").unwrap();
//! ```
//!
//! Use [`PaymentGateway::builder`](crate::client::PaymentGateway::builder) to set a custom HTTP
//! client, opt into retries or point the client to another environment.
//!
//! ## Create and verify a payment
//!
//! ```rust,no_run
//! # use paygate::{PaymentGateway, PaymentProvider, Provider, Error};
//! # use serde_json::json;
//! #
//! # #[tokio::main]
//! # async fn main() -> Result<(), Error> {
//! let gateway = PaymentGateway::new(Provider::Paystack, "sk_test_xxx");
//!
//! let transaction = gateway
//!     .create_payment(&json!({
//!         "email": "customer@email.com",
//!         "amount": "20000",
//!         "callback_url": "https://example.com/callback"
//!     }))
//!     .await?;
//!
//! println!("Pay here: {}", transaction["authorization_url"]);
//!
//! // Later, once the customer is back
//! let paid = gateway
//!     .verify_payment(transaction["reference"].as_str().unwrap_or_default())
//!     .await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Errors
//!
//! Failures of the four gateway operations are reported as
//! [`Error::Operation`](crate::Error::Operation), whose message names the provider and the
//! operation (`"Stripe payment verification failed: ..."`). The wrapped cause tells transport
//! failures, unparseable bodies and provider-side errors apart.

#![deny(missing_debug_implementations)]
#![forbid(unsafe_code)]

pub mod apis;
pub mod client;
mod common;
pub mod error;
mod middlewares;

pub use apis::{PaymentProvider, Provider};
pub use client::PaymentGateway;
pub use error::Error;
