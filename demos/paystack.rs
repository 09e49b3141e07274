//! Walks through the four gateway operations against Paystack.
//!
//! Reads `PAYSTACK_SECRET_KEY` from the environment or from an optional `config` file.
//! Set `PAYSTACK_REFERENCE` to verify an existing transaction instead of the one just created.

use anyhow::Context;
use paygate::{PaymentGateway, PaymentProvider, Provider};
use serde_json::json;

#[derive(serde::Deserialize, Debug)]
struct Config {
    paystack_secret_key: String,
    paystack_reference: Option<String>,
}

impl Config {
    fn read() -> anyhow::Result<Self> {
        config::Config::builder()
            .add_source(config::File::with_name("config").required(false))
            .add_source(config::Environment::default())
            .build()?
            .try_deserialize()
            .context("PAYSTACK_SECRET_KEY is not set in the environment variables")
    }
}

async fn run() -> anyhow::Result<()> {
    let config = Config::read()?;

    let gateway = PaymentGateway::new(Provider::Paystack, config.paystack_secret_key);
    tracing::info!(test_mode = gateway.is_test_mode(), "Paystack gateway ready");

    // https://paystack.com/docs/api/transaction/#initialize
    let transaction = gateway
        .create_payment(&json!({
            "email": "customer@email.com",
            "amount": "20000",
            "callback_url": "https://example.com/callback"
        }))
        .await?;
    tracing::info!("Payment reference: {}", transaction["reference"]);
    tracing::info!("Authorization URL: {}", transaction["authorization_url"]);

    // https://paystack.com/docs/api/transaction/#verify
    let reference = config
        .paystack_reference
        .or_else(|| transaction["reference"].as_str().map(str::to_string))
        .context("Paystack returned no reference")?;
    let verified = gateway.verify_payment(&reference).await?;
    tracing::info!("Payment {} verified: {}", reference, verified);

    // https://paystack.com/docs/api/transaction/#list
    let payments = gateway
        .list_payments(&json!({
            "perPage": 10,
            "page": 1,
            "status": "success",
            "from": "2024-01-01T00:00:00.000Z",
            "to": "2024-01-31T23:59:59.000Z"
        }))
        .await?;
    tracing::info!("Payment list: {:#}", payments);

    // https://paystack.com/docs/api/transaction/#fetch
    if let Some(id) = payments["data"][0]["id"].as_u64() {
        let payment = gateway.retrieve_single_payment(&id.to_string()).await?;
        tracing::info!("Payment {}: {:#}", id, payment["data"]);
    }

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
