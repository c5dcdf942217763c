use leptos::prelude::*;
use leptos_router::components::A;

use crate::domain::a001_product::ui::featured::{CategoryTiles, FeaturedProducts};
use crate::system::auth::context::use_auth;

/// Главная: приветствие, витрина и переход по категориям
#[component]
pub fn HomePage() -> impl IntoView {
    let (auth_state, _) = use_auth();

    let greeting = move || {
        let user = auth_state.get().user_info?;
        let hint = if user.is_admin() {
            "Manage your store and review orders"
        } else {
            "Explore our latest products and deals"
        };
        Some(view! {
            <div class="hero__greeting">
                <h2>{format!("Welcome back, {}!", user.full_name())}</h2>
                <p>{hint}</p>
            </div>
        })
    };

    view! {
        <div class="page home-page">
            <section class="hero">
                <h1>"Welcome to " <span class="hero__brand">"Mobile Gear"</span></h1>
                <p>"Your one-stop shop for the latest mobile devices and accessories"</p>
                <Show
                    when=move || auth_state.get().is_authenticated()
                    fallback=|| view! {
                        <div class="hero__actions">
                            <A href="/login" attr:class="btn-primary">"Login"</A>
                            <A href="/register" attr:class="button button--ghost">"Register"</A>
                        </div>
                    }
                >
                    {greeting}
                </Show>
            </section>

            <section class="home-section">
                <h2 class="home-section__title">"Featured products"</h2>
                <FeaturedProducts />
            </section>

            <section class="home-section">
                <h2 class="home-section__title">"Shop by category"</h2>
                <CategoryTiles />
            </section>
        </div>
    }
}
