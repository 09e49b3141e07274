use crate::common::test_context::TestContext;
use paygate::{apis::stripe::{PaymentStatus, SessionStatus}, Error, PaymentProvider};
use serde_json::{json, Value};

fn checkout_payload(unit_amount: i64, quantity: i64) -> Value {
    json!({
        "mode": "payment",
        "success_url": "https://example.com/success",
        "customer_email": "customer@email.com",
        "payment_method_types": ["card"],
        "line_items": [{
            "price_data": {
                "currency": "usd",
                "product_data": { "name": "T-shirt" },
                "unit_amount": unit_amount
            },
            "quantity": quantity
        }],
        "metadata": null
    })
}

#[tokio::test]
async fn create_verify_and_retrieve_session() {
    let ctx = TestContext::start().await;

    let session = ctx
        .stripe
        .create_payment(&checkout_payload(2000, 2))
        .await
        .unwrap();

    let id = session["id"].as_str().unwrap();
    assert!(id.starts_with("cs_test_"));
    assert_eq!(session["amount_total"], json!(4000));
    assert_eq!(session["currency"], json!("usd"));
    assert_eq!(session["customer_email"], json!("customer@email.com"));

    assert!(!ctx.stripe.verify_payment(id).await.unwrap());

    ctx.complete_payment(id);
    assert!(ctx.stripe.verify_payment(id).await.unwrap());

    let retrieved = ctx.stripe.retrieve_single_payment(id).await.unwrap();
    assert_eq!(retrieved["id"], json!(id));
    assert_eq!(retrieved["payment_status"], json!("paid"));

    // Typed view of the same session
    let typed = ctx.stripe.stripe().unwrap().get_session(id).await.unwrap();
    assert_eq!(typed.payment_status, PaymentStatus::Paid);
    assert_eq!(typed.status, Some(SessionStatus::Complete));
    assert_eq!(typed.amount_total, Some(4000));
    assert!(typed.expires_at > typed.created);
}

#[tokio::test]
async fn list_sessions_honours_limit() {
    let ctx = TestContext::start().await;

    for quantity in 1..=3 {
        ctx.stripe
            .create_payment(&checkout_payload(500, quantity))
            .await
            .unwrap();
    }

    let list = ctx
        .stripe
        .list_payments(&json!({ "limit": 2 }))
        .await
        .unwrap();

    assert_eq!(list["object"], json!("list"));
    assert_eq!(list["has_more"], json!(true));
    let data = list["data"].as_array().unwrap();
    assert_eq!(data.len(), 2);
    // Most recent first
    assert_eq!(data[0]["amount_total"], json!(1500));
}

#[tokio::test]
async fn create_without_mode_reports_stripe_error() {
    let ctx = TestContext::start().await;

    let err = ctx
        .stripe
        .create_payment(&json!({ "success_url": "https://example.com/success" }))
        .await
        .unwrap_err();

    assert_eq!(
        err.to_string(),
        "Stripe payment creation failed: HTTP error 400: Missing required param: mode. \
         (invalid_request_error)\nCode: parameter_missing\nParameter: mode"
    );
}

#[tokio::test]
async fn create_with_non_object_payload_is_rejected_locally() {
    let ctx = TestContext::start().await;

    let err = ctx
        .stripe
        .create_payment(&json!(["mode", "payment"]))
        .await
        .unwrap_err();

    assert!(matches!(err.root_cause(), Error::InvalidPayload(_)));
    assert_eq!(ctx.received_requests().await, 0);
}

#[tokio::test]
async fn verify_unknown_session_fails() {
    let ctx = TestContext::start().await;

    let err = ctx.stripe.verify_payment("cs_test_missing").await.unwrap_err();

    match err.root_cause() {
        Error::ApiError(e) => {
            assert_eq!(e.status, 404);
            assert_eq!(e.code.as_deref(), Some("resource_missing"));
        }
        e => panic!("Unexpected error {:?}", e),
    }
}
