//! Checkout: the shipping address form, the hand-off to the payment provider
//! and the order request built from the cart once payment is confirmed.

use contracts::domain::a002_order::{CreateOrderRequest, OrderItem, ShippingAddress};
use contracts::domain::a003_checkout::CheckoutItem;
use serde::{Deserialize, Serialize};

use super::state::Cart;

/// `redirect_status` of a confirmed payment
pub const PAYMENT_SUCCEEDED: &str = "succeeded";

/// Payment state sent with a new order
pub const ORDER_PAID_STATUS: &str = "completed";

/// Поля адреса доставки (сырые строки до сохранения)
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ShippingForm {
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: String,
}

impl ShippingForm {
    pub fn from_address(address: &ShippingAddress) -> Self {
        Self {
            street: address.street.clone(),
            city: address.city.clone(),
            state: address.state.clone(),
            zip_code: address.zip_code.clone(),
            country: address.country.clone(),
        }
    }

    /// Every field is required; values are trimmed.
    pub fn to_address(&self) -> Result<ShippingAddress, String> {
        let required = |label: &str, value: &str| {
            let value = value.trim();
            if value.is_empty() {
                Err(format!("{} is required", label))
            } else {
                Ok(value.to_string())
            }
        };
        Ok(ShippingAddress {
            street: required("Street address", &self.street)?,
            city: required("City", &self.city)?,
            state: required("State", &self.state)?,
            zip_code: required("ZIP code", &self.zip_code)?,
            country: required("Country", &self.country)?,
        })
    }
}

pub fn payment_items(cart: &Cart) -> Vec<CheckoutItem> {
    cart.items
        .iter()
        .map(|i| CheckoutItem {
            product_id: i.product_id,
            quantity: i.quantity,
        })
        .collect()
}

/// Id of the payment intent a client secret belongs to
/// (`pi_123_secret_abc` -> `pi_123`).
pub fn payment_intent_id(client_secret: &str) -> Option<&str> {
    client_secret
        .split_once("_secret_")
        .map(|(id, _)| id)
        .filter(|id| !id.is_empty())
}

/// Query the payment provider appends to the return URL
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PaymentReturn {
    pub payment_intent: Option<String>,
    pub redirect_status: Option<String>,
}

impl PaymentReturn {
    /// Unreadable query yields an empty return, which is then rejected.
    pub fn from_query(search: &str) -> Self {
        serde_qs::from_str(search.trim_start_matches('?')).unwrap_or_default()
    }

    pub fn succeeded(payment_intent_id: &str) -> Self {
        Self {
            payment_intent: Some(payment_intent_id.to_string()),
            redirect_status: Some(PAYMENT_SUCCEEDED.to_string()),
        }
    }

    pub fn to_query(&self) -> Result<String, String> {
        serde_qs::to_string(self).map_err(|e| format!("Failed to build query: {}", e))
    }

    /// Intent id of a payment that went through
    pub fn confirmed_intent(&self) -> Result<&str, String> {
        match (self.payment_intent.as_deref(), self.redirect_status.as_deref()) {
            (Some(id), Some(PAYMENT_SUCCEEDED)) if !id.is_empty() => Ok(id),
            _ => Err("Payment verification failed".to_string()),
        }
    }
}

pub fn order_request(
    cart: &Cart,
    shipping_address: ShippingAddress,
    payment_intent_id: &str,
) -> Result<CreateOrderRequest, String> {
    if cart.is_empty() {
        return Err("Your cart is empty".to_string());
    }
    Ok(CreateOrderRequest {
        items: cart
            .items
            .iter()
            .map(|i| OrderItem {
                product_id: i.product_id,
                quantity: i.quantity,
                price: i.price,
                product: None,
            })
            .collect(),
        total_amount: cart.total_price(),
        payment_intent_id: payment_intent_id.to_string(),
        status: ORDER_PAID_STATUS.to_string(),
        shipping_address,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a003_cart::state::CartItem;

    fn form() -> ShippingForm {
        ShippingForm {
            street: " 1 Main St ".to_string(),
            city: "Springfield".to_string(),
            state: "IL".to_string(),
            zip_code: "62701".to_string(),
            country: "US".to_string(),
        }
    }

    fn cart() -> Cart {
        Cart {
            items: vec![
                CartItem {
                    product_id: 1,
                    name: "Phone".to_string(),
                    price: 500.0,
                    img: String::new(),
                    quantity: 2,
                },
                CartItem {
                    product_id: 9,
                    name: "Case".to_string(),
                    price: 20.0,
                    img: String::new(),
                    quantity: 1,
                },
            ],
        }
    }

    #[test]
    fn test_shipping_form_trims_and_round_trips() {
        let address = form().to_address().unwrap();
        assert_eq!(address.street, "1 Main St");
        assert_eq!(ShippingForm::from_address(&address).to_address().unwrap(), address);
    }

    #[test]
    fn test_shipping_form_requires_every_field() {
        let mut f = form();
        f.zip_code = "   ".to_string();
        assert_eq!(f.to_address().unwrap_err(), "ZIP code is required");
        assert!(ShippingForm::default().to_address().is_err());
    }

    #[test]
    fn test_payment_items_follow_cart() {
        let items = payment_items(&cart());
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].product_id, 1);
        assert_eq!(items[0].quantity, 2);
    }

    #[test]
    fn test_payment_intent_id_from_secret() {
        assert_eq!(payment_intent_id("pi_3Abc_secret_xyz"), Some("pi_3Abc"));
        assert_eq!(payment_intent_id("no-secret-here"), None);
        assert_eq!(payment_intent_id("_secret_xyz"), None);
    }

    #[test]
    fn test_payment_return_query() {
        let query = PaymentReturn::succeeded("pi_1").to_query().unwrap();
        let parsed = PaymentReturn::from_query(&format!("?{}", query));
        assert_eq!(parsed.confirmed_intent(), Ok("pi_1"));

        let failed = PaymentReturn::from_query("payment_intent=pi_1&redirect_status=failed");
        assert!(failed.confirmed_intent().is_err());
        assert!(PaymentReturn::from_query("").confirmed_intent().is_err());
    }

    #[test]
    fn test_order_request_from_cart() {
        let address = form().to_address().unwrap();
        let request = order_request(&cart(), address.clone(), "pi_1").unwrap();
        assert_eq!(request.items.len(), 2);
        assert_eq!(request.items[1].price, 20.0);
        assert_eq!(request.total_amount, 1020.0);
        assert_eq!(request.status, ORDER_PAID_STATUS);
        assert_eq!(request.shipping_address, address);

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["paymentIntentId"], "pi_1");
        assert_eq!(json["shippingAddress"]["zipCode"], "62701");
        assert!(json["items"][0].get("product").is_none());

        assert!(order_request(&Cart::default(), address, "pi_1").is_err());
    }
}
