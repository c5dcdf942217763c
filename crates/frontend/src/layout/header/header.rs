//! Header - верхняя панель магазина.
//!
//! Contains:
//! - Store title and navigation
//! - Cart link with item count
//! - Admin links (admins only)
//! - User info and login / logout

use crate::domain::a003_cart::context::use_cart;
use crate::shared::icons::icon;
use crate::system::auth::context::{do_logout, use_auth};
use leptos::prelude::*;
use leptos_router::components::A;

#[component]
pub fn Header() -> impl IntoView {
    let (auth_state, set_auth_state) = use_auth();
    let cart = use_cart();

    let cart_count = move || cart.cart.with(|c| c.total_items());
    let is_authenticated = move || auth_state.get().is_authenticated();
    let is_admin = move || auth_state.get().is_admin();
    let user_name = move || {
        auth_state
            .get()
            .user_info
            .map(|u| u.full_name())
            .unwrap_or_default()
    };

    // Защищённые страницы сами уведут на /login через guard
    let logout = move |_| do_logout(set_auth_state);

    view! {
        <header data-zone="header" class="header">
            <div class="header__content">
                <A href="/" attr:class="header__title">"Mobile Gear"</A>
                <nav class="header__nav">
                    <A href="/products">{icon("products")}" Products"</A>
                    <Show when=is_authenticated>
                        <A href="/orders">{icon("orders")}" My orders"</A>
                    </Show>
                    <Show when=is_admin>
                        <A href="/admin/products">"Manage products"</A>
                        <A href="/admin/orders">"Manage orders"</A>
                    </Show>
                </nav>
            </div>
            <div class="header__actions">
                <A href="/cart" attr:class="header__cart">
                    {icon("cart")}
                    <Show when=move || { cart_count() > 0 }>
                        <span class="header__cart-badge">{cart_count}</span>
                    </Show>
                </A>
                <Show
                    when=is_authenticated
                    fallback=|| view! {
                        <A href="/login">"Login"</A>
                        <A href="/register">"Register"</A>
                    }
                >
                    <span class="header__user">{icon("user")}" "{user_name}</span>
                    <button class="button button--ghost" on:click=logout>"Logout"</button>
                </Show>
            </div>
        </header>
    }
}
