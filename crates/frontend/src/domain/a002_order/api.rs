use contracts::domain::a002_order::{CreateOrderRequest, Order, UpdateOrderStatusRequest};
use contracts::enums::order_status::OrderStatus;
use gloo_net::http::Request;

use super::ORDERS_ENDPOINT;
use crate::shared::api_utils::{api_url, error_message, with_auth};

/// Place an order for the signed-in user
pub async fn create_order(request: &CreateOrderRequest) -> Result<Order, String> {
    let response = with_auth(Request::post(&api_url(ORDERS_ENDPOINT)))
        .json(request)
        .map_err(|e| format!("Failed to serialize request: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Failed to create order: {}", e))?;

    if !response.ok() {
        return Err(error_message(response).await);
    }

    response
        .json::<Order>()
        .await
        .map_err(|e| format!("Failed to parse response: {}", e))
}

/// Change the status of an order (admin)
pub async fn update_order_status(id: i64, status: OrderStatus) -> Result<Order, String> {
    let url = api_url(&format!("{}/{}/status", ORDERS_ENDPOINT, id));
    let response = with_auth(Request::patch(&url))
        .json(&UpdateOrderStatusRequest { status })
        .map_err(|e| format!("Failed to serialize request: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;

    if !response.ok() {
        return Err(error_message(response).await);
    }

    response
        .json::<Order>()
        .await
        .map_err(|e| format!("Failed to parse response: {}", e))
}
