use crate::enums::order_status::OrderStatus;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingAddress {
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: String,
}

/// Краткие данные товара внутри строки заказа
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItemProduct {
    pub id: i64,
    pub name: String,
    pub price: f64,
    #[serde(default)]
    pub image: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub product_id: i64,
    pub quantity: u32,
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product: Option<OrderItemProduct>,
}

/// Заказ покупателя
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: i64,
    pub user_id: i64,
    pub items: Vec<OrderItem>,
    pub total: f64,
    #[serde(default)]
    pub payment_intent_id: String,
    pub status: OrderStatus,
    pub shipping_address: Option<ShippingAddress>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateOrderStatusRequest {
    pub status: OrderStatus,
}

/// Тело `POST /api/orders`, отправляется после подтверждения оплаты
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    pub items: Vec<OrderItem>,
    pub total_amount: f64,
    pub payment_intent_id: String,
    /// Payment state reported to the API (`completed`), not an [`OrderStatus`]
    pub status: String,
    pub shipping_address: ShippingAddress,
}
