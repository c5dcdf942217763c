use super::state::Cart;
use contracts::domain::a002_order::ShippingAddress;
use web_sys::window;

const CART_KEY: &str = "cart";
const SHIPPING_KEY: &str = "shippingAddress";

fn get_local_storage() -> Option<web_sys::Storage> {
    window()?.local_storage().ok()?
}

/// Cart saved by a previous visit; a corrupt entry yields an empty cart
pub fn load_cart() -> Cart {
    let Some(json) = get_local_storage().and_then(|s| s.get_item(CART_KEY).ok().flatten()) else {
        return Cart::default();
    };
    match serde_json::from_str(&json) {
        Ok(cart) => cart,
        Err(e) => {
            log::warn!("discarding stored cart: {}", e);
            Cart::default()
        }
    }
}

pub fn save_cart(cart: &Cart) {
    let Ok(json) = serde_json::to_string(cart) else {
        return;
    };
    if let Some(storage) = get_local_storage() {
        let _ = storage.set_item(CART_KEY, &json);
    }
}

/// Адрес, сохранённый на странице оформления до возврата с оплаты
pub fn load_shipping_address() -> Option<ShippingAddress> {
    let json = get_local_storage()?.get_item(SHIPPING_KEY).ok().flatten()?;
    serde_json::from_str(&json)
        .map_err(|e| log::warn!("discarding stored shipping address: {}", e))
        .ok()
}

pub fn save_shipping_address(address: &ShippingAddress) {
    let Ok(json) = serde_json::to_string(address) else {
        return;
    };
    if let Some(storage) = get_local_storage() {
        let _ = storage.set_item(SHIPPING_KEY, &json);
    }
}

pub fn clear_shipping_address() {
    if let Some(storage) = get_local_storage() {
        let _ = storage.remove_item(SHIPPING_KEY);
    }
}
