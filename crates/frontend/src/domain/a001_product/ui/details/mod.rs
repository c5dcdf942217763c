use contracts::domain::a001_product::Product;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::A;
use leptos_router::hooks::use_params_map;
use thaw::*;

use crate::domain::a001_product::api::fetch_product;
use crate::domain::a001_product::category_caption;
use crate::domain::a003_cart::context::use_cart;
use crate::shared::list_utils::format_price;

#[component]
pub fn ProductDetails() -> impl IntoView {
    let params = use_params_map();
    let cart = use_cart();

    let (product, set_product) = signal(Option::<Product>::None);
    let (error, set_error) = signal(Option::<String>::None);
    let (is_loading, set_is_loading) = signal(false);

    Effect::new(move |_| {
        let raw_id = params.with(|p| p.get("id").unwrap_or_default());
        let Ok(id) = raw_id.parse::<i64>() else {
            set_error.set(Some(format!("Unknown product: {}", raw_id)));
            return;
        };

        set_is_loading.set(true);
        set_error.set(None);
        spawn_local(async move {
            match fetch_product(id).await {
                Ok(p) => set_product.set(Some(p)),
                Err(e) => {
                    leptos::logging::log!("failed to load product {}: {}", id, e);
                    set_error.set(Some(e));
                }
            }
            set_is_loading.set(false);
        });
    });

    view! {
        <div class="page product-details">
            <A href="/products">"← Back to products"</A>
            {move || {
                if let Some(message) = error.get() {
                    return view! { <div class="error-message">{message}</div> }.into_any();
                }
                if is_loading.get() {
                    return view! { <Spinner /> }.into_any();
                }
                let Some(p) = product.get() else {
                    return view! { <></> }.into_any();
                };
                let in_stock = p.stock > 0;
                let for_cart = p.clone();
                view! {
                    <div class="product-details__body">
                        <img class="product-details__img" src=p.img.clone() alt=p.name.clone() />
                        <div class="product-details__info">
                            <h1>{p.name.clone()}</h1>
                            <span class="product-details__category">{category_caption(&p.category)}</span>
                            <p>{p.description.clone()}</p>
                            <strong class="product-details__price">{format_price(p.price)}</strong>
                            <span class="product-details__stock">
                                {if in_stock { format!("{} in stock", p.stock) } else { "Out of stock".to_string() }}
                            </span>
                            <Button
                                appearance=ButtonAppearance::Primary
                                disabled=!in_stock
                                on_click=move |_| cart.cart.update(|c| c.add(&for_cart))
                            >
                                "Add to cart"
                            </Button>
                        </div>
                    </div>
                }
                .into_any()
            }}
        </div>
    }
}
