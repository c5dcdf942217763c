use contracts::domain::a001_product::Product;
use serde::{Deserialize, Serialize};

/// Строка корзины
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    pub product_id: i64,
    pub name: String,
    pub price: f64,
    #[serde(default)]
    pub img: String,
    pub quantity: u32,
}

impl CartItem {
    pub fn line_total(&self) -> f64 {
        self.price * self.quantity as f64
    }
}

/// Корзина покупателя. Totals are derived from the lines, never stored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    pub items: Vec<CartItem>,
}

impl Cart {
    /// Adds one unit; a product already in the cart gets its quantity bumped.
    pub fn add(&mut self, product: &Product) {
        match self.items.iter_mut().find(|i| i.product_id == product.id) {
            Some(item) => item.quantity += 1,
            None => self.items.push(CartItem {
                product_id: product.id,
                name: product.name.clone(),
                price: product.price,
                img: product.img.clone(),
                quantity: 1,
            }),
        }
    }

    pub fn remove(&mut self, product_id: i64) {
        self.items.retain(|i| i.product_id != product_id);
    }

    /// Quantity 0 or below removes the line.
    pub fn set_quantity(&mut self, product_id: i64, quantity: i64) {
        if quantity <= 0 {
            self.remove(product_id);
            return;
        }
        let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        if let Some(item) = self.items.iter_mut().find(|i| i.product_id == product_id) {
            item.quantity = quantity;
        }
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn total_items(&self) -> u32 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    pub fn total_price(&self) -> f64 {
        self.items.iter().map(CartItem::line_total).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: i64, price: f64) -> Product {
        Product {
            id,
            name: format!("Product {}", id),
            description: String::new(),
            img: String::new(),
            price,
            category: "accessories".to_string(),
            stock: 10,
        }
    }

    #[test]
    fn test_add_merges_same_product() {
        let mut cart = Cart::default();
        cart.add(&product(1, 10.0));
        cart.add(&product(1, 10.0));
        cart.add(&product(2, 2.5));

        assert_eq!(cart.items.len(), 2);
        assert_eq!(cart.total_items(), 3);
        assert_eq!(cart.total_price(), 22.5);
    }

    #[test]
    fn test_set_quantity() {
        let mut cart = Cart::default();
        cart.add(&product(1, 10.0));
        cart.set_quantity(1, 4);
        assert_eq!(cart.total_items(), 4);
        assert_eq!(cart.total_price(), 40.0);

        // Unknown product is a no-op.
        cart.set_quantity(99, 3);
        assert_eq!(cart.items.len(), 1);
    }

    #[test]
    fn test_non_positive_quantity_removes_line() {
        let mut cart = Cart::default();
        cart.add(&product(1, 10.0));
        cart.add(&product(2, 5.0));
        cart.set_quantity(1, 0);
        cart.set_quantity(2, -3);
        assert!(cart.is_empty());
        assert_eq!(cart.total_price(), 0.0);
    }

    #[test]
    fn test_remove_and_clear() {
        let mut cart = Cart::default();
        cart.add(&product(1, 1.0));
        cart.add(&product(2, 1.0));
        cart.remove(1);
        assert_eq!(cart.items[0].product_id, 2);
        cart.clear();
        assert!(cart.is_empty());
    }

    #[test]
    fn test_json_shape() {
        let mut cart = Cart::default();
        cart.add(&product(7, 3.0));
        let json = serde_json::to_string(&cart).unwrap();
        let restored: Cart = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, cart);
        assert!(json.contains("\"product_id\":7"));
    }
}
