use leptos::prelude::*;

use super::state::Cart;
use super::storage;

/// Корзина, доступная всему приложению
#[derive(Clone, Copy)]
pub struct CartContext {
    pub cart: RwSignal<Cart>,
}

impl CartContext {
    pub fn new() -> Self {
        let cart = RwSignal::new(storage::load_cart());

        // Каждое изменение корзины сохраняется в localStorage
        Effect::new(move |_| {
            cart.with(storage::save_cart);
        });

        Self { cart }
    }
}

impl Default for CartContext {
    fn default() -> Self {
        Self::new()
    }
}

pub fn use_cart() -> CartContext {
    use_context::<CartContext>().expect("CartContext not found in component tree")
}
