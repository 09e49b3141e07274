// Default URLs
pub static DEFAULT_PAYSTACK_URL: &str = "https://api.paystack.co";
pub static DEFAULT_STRIPE_URL: &str = "https://api.stripe.com";

// Header names
pub static IDEMPOTENCY_KEY_HEADER: &str = "Idempotency-Key";
pub static STRIPE_SHOULD_RETRY_HEADER: &str = "Stripe-Should-Retry";
