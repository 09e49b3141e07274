//! Creates a Stripe Checkout Session through the gateway, then looks it up again.
//!
//! Reads `STRIPE_SECRET_KEY` from the environment or from an optional `config` file.

use anyhow::Context;
use paygate::{apis::auth::ApiKey, PaymentGateway, PaymentProvider, Provider};
use serde_json::json;

#[derive(serde::Deserialize, Debug)]
struct Config {
    stripe_secret_key: String,
}

impl Config {
    fn read() -> anyhow::Result<Self> {
        config::Config::builder()
            .add_source(config::File::with_name("config").required(false))
            .add_source(config::Environment::default())
            .build()?
            .try_deserialize()
            .context("STRIPE_SECRET_KEY is not set in the environment variables")
    }
}

async fn run() -> anyhow::Result<()> {
    let config = Config::read()?;

    let api_key = ApiKey::new(config.stripe_secret_key);
    if !api_key.is_test_key() {
        tracing::warn!("Using a live Stripe key: the session below will be real");
    }
    let gateway = PaymentGateway::new(Provider::Stripe, api_key);

    // https://docs.stripe.com/api/checkout/sessions/create
    let session = gateway
        .create_payment(&json!({
            "success_url": "https://example.com/success",
            "cancel_url": "https://example.com/cancel",
            "payment_method_types": ["card"],
            "line_items": [{
                "price_data": {
                    "currency": "usd",
                    "product_data": { "name": "Sample Product" },
                    "unit_amount": 2000
                },
                "quantity": 2
            }],
            "mode": "payment"
        }))
        .await?;
    let session_id = session["id"]
        .as_str()
        .context("Stripe returned a session without id")?;
    tracing::info!("Checkout session {} created: {}", session_id, session["url"]);

    // https://docs.stripe.com/api/checkout/sessions/retrieve
    let paid = gateway.verify_payment(session_id).await?;
    tracing::info!("Checkout session {} paid: {}", session_id, paid);

    let retrieved = gateway.retrieve_single_payment(session_id).await?;
    tracing::info!("Checkout session: {:#}", retrieved);

    // https://docs.stripe.com/api/checkout/sessions/list
    let sessions = gateway.list_payments(&json!({ "limit": 3 })).await?;
    tracing::info!("Latest checkout sessions: {:#}", sessions["data"]);

    Ok(())
}

#[tokio::main]
async fn main() {
    let subscriber = tracing_subscriber::FmtSubscriber::builder()
        .with_max_level(tracing::Level::INFO)
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Setting default subscriber failed");

    if let Err(e) = run().await {
        tracing::error!("Fatal error: {:?}", e);
        std::process::exit(1);
    }
}
