use contracts::domain::a001_product::Product;
use contracts::enums::product_category::ProductCategory;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::A;
use thaw::*;

use crate::domain::a001_product::api::fetch_featured;
use crate::domain::a001_product::ui::list::ProductCard;

/// Сколько товаров показывает витрина на главной
pub const FEATURED_COUNT: u32 = 8;

/// Catalogue link pre-filtered to one category
pub fn category_link(category: ProductCategory) -> String {
    format!("/products?category={}", urlencoding::encode(category.code()))
}

#[component]
pub fn FeaturedProducts() -> impl IntoView {
    let (products, set_products) = signal(Vec::<Product>::new());
    let (error, set_error) = signal(Option::<String>::None);
    let (is_loading, set_is_loading) = signal(true);

    Effect::new(move |_| {
        spawn_local(async move {
            match fetch_featured(FEATURED_COUNT).await {
                Ok(items) => set_products.set(items),
                Err(e) => {
                    leptos::logging::log!("failed to load featured products: {}", e);
                    set_error.set(Some(e));
                }
            }
            set_is_loading.set(false);
        });
    });

    move || {
        if is_loading.get() {
            return view! { <Spinner /> }.into_any();
        }
        if let Some(message) = error.get() {
            return view! { <p class="error-message">{message}</p> }.into_any();
        }
        view! {
            <div class="product-grid product-grid--featured">
                <For
                    each=move || products.get()
                    key=|p| p.id
                    children=|p| view! { <ProductCard product=p /> }
                />
            </div>
        }
        .into_any()
    }
}

/// Плитки "Shop by category"
#[component]
pub fn CategoryTiles() -> impl IntoView {
    view! {
        <div class="category-tiles">
            {ProductCategory::all()
                .into_iter()
                .map(|c| view! {
                    <div class="category-tile">
                        <h3>{c.display_name()}</h3>
                        <A href=category_link(c)>"Shop now"</A>
                    </div>
                })
                .collect_view()}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::listing::schema::PRODUCTS;

    #[test]
    fn test_category_links_hit_valid_filters() {
        for category in ProductCategory::all() {
            let link = category_link(category);
            let value = link.trim_start_matches("/products?category=");
            assert!(PRODUCTS.accepts_category(value), "{}", link);
        }
        assert_eq!(category_link(ProductCategory::Tablets), "/products?category=tablets");
    }
}
