use contracts::domain::a003_checkout::{CheckoutItem, CreatePaymentIntentRequest, PaymentIntent};
use gloo_net::http::Request;

use crate::shared::api_utils::{api_url, error_message, with_auth};

const PAYMENT_INTENT_ENDPOINT: &str = "/api/checkout/create-payment-intent";

/// Open a payment for the cart lines; the API prices them itself
pub async fn create_payment_intent(items: Vec<CheckoutItem>) -> Result<PaymentIntent, String> {
    let response = with_auth(Request::post(&api_url(PAYMENT_INTENT_ENDPOINT)))
        .json(&CreatePaymentIntentRequest { items })
        .map_err(|e| format!("Failed to serialize request: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Failed to create payment intent: {}", e))?;

    if !response.ok() {
        return Err(error_message(response).await);
    }

    response
        .json::<PaymentIntent>()
        .await
        .map_err(|e| format!("Failed to parse response: {}", e))
}
