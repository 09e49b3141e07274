//! Stripe Checkout Sessions API.

mod api;
mod model;

pub use api::StripeApi;
pub use model::*;
