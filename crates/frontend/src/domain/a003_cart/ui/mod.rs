pub mod checkout;

use leptos::prelude::*;
use leptos_router::components::A;
use thaw::*;

use crate::domain::a003_cart::context::use_cart;
use crate::domain::a003_cart::state::CartItem;
use crate::shared::icons::icon;
use crate::shared::list_utils::format_price;

/// Пустое или нечисловое значение оставляет количество как есть
fn parse_quantity(raw: &str) -> Option<i64> {
    raw.trim().parse::<i64>().ok()
}

#[component]
fn CartLine(item: CartItem) -> impl IntoView {
    let ctx = use_cart();
    let line_total = item.line_total();
    let CartItem {
        product_id: id,
        name,
        price,
        img,
        quantity,
    } = item;
    let quantity = quantity as i64;

    view! {
        <div class="cart-line">
            <img class="cart-line__img" src=img alt=name.clone() />
            <A href=format!("/products/{}", id)>{name}</A>
            <span class="cart-line__price">{format_price(price)}</span>
            <div class="cart-line__qty">
                <button on:click=move |_| ctx.cart.update(|c| c.set_quantity(id, quantity - 1))>
                    {icon("minus")}
                </button>
                <input
                    type="number"
                    min="0"
                    prop:value=quantity.to_string()
                    on:change=move |ev| {
                        if let Some(q) = parse_quantity(&event_target_value(&ev)) {
                            ctx.cart.update(|c| c.set_quantity(id, q));
                        }
                    }
                />
                <button on:click=move |_| ctx.cart.update(|c| c.set_quantity(id, quantity + 1))>
                    {icon("plus")}
                </button>
            </div>
            <span class="cart-line__total">{format_price(line_total)}</span>
            <button
                class="cart-line__remove"
                title="Remove"
                on:click=move |_| ctx.cart.update(|c| c.remove(id))
            >
                {icon("trash")}
            </button>
        </div>
    }
}

#[component]
pub fn CartPage() -> impl IntoView {
    let ctx = use_cart();

    view! {
        <div class="page cart-page">
            <h1 class="page__title">"Shopping cart"</h1>
            <Show
                when=move || ctx.cart.with(|c| !c.is_empty())
                fallback=|| view! {
                    <div class="empty-state">
                        <p>"Your cart is empty."</p>
                        <A href="/products">"Continue shopping"</A>
                    </div>
                }
            >
                <div class="cart-lines">
                    <For
                        each=move || ctx.cart.get().items
                        key=|item| (item.product_id, item.quantity)
                        children=|item| view! { <CartLine item=item /> }
                    />
                </div>
                <div class="cart-summary">
                    <span>
                        {move || format!("{} item(s)", ctx.cart.with(|c| c.total_items()))}
                    </span>
                    <strong>{move || format_price(ctx.cart.with(|c| c.total_price()))}</strong>
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| ctx.cart.update(|c| c.clear())
                    >
                        "Clear cart"
                    </Button>
                    <A href="/checkout" attr:class="btn-primary">"Proceed to checkout"</A>
                </div>
            </Show>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_quantity() {
        assert_eq!(parse_quantity(" 3 "), Some(3));
        assert_eq!(parse_quantity("0"), Some(0));
        assert_eq!(parse_quantity(""), None);
        assert_eq!(parse_quantity("2.5"), None);
    }

    #[test]
    fn test_line_total_of_cart_line() {
        let item = CartItem {
            product_id: 4,
            name: "Case".to_string(),
            price: 12.5,
            img: String::new(),
            quantity: 3,
        };
        assert_eq!(format_price(item.line_total()), format_price(37.5));
    }
}
