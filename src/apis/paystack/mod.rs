//! Paystack transactions API, spoken over plain HTTPS.

mod api;
mod model;

pub use api::PaystackApi;
pub use model::*;
