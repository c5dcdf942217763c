use contracts::domain::a001_product::Product;
use leptos::prelude::*;
use leptos_router::components::A;
use thaw::*;

use crate::domain::a001_product::{category_caption, category_options, PRODUCTS_ENDPOINT};
use crate::domain::a003_cart::context::use_cart;
use crate::shared::components::draft_input::{CategorySelect, DraftInput};
use crate::shared::components::filter_panel::{FilterPanel, FilterTag};
use crate::shared::components::pagination_controls::PaginationControls;
use crate::shared::list_utils::{format_price, get_sort_indicator};
use crate::shared::listing::schema::PRODUCTS;
use crate::shared::listing::{use_listing, DraftField, FilterPatch, ListingHandle};

/// Карточка товара в сетке каталога
#[component]
pub fn ProductCard(product: Product) -> impl IntoView {
    let cart = use_cart();
    let in_stock = product.stock > 0;
    let for_cart = product.clone();

    view! {
        <div class="product-card">
            <A href=format!("/products/{}", product.id)>
                <img class="product-card__img" src=product.img.clone() alt=product.name.clone() />
                <h3 class="product-card__name">{product.name.clone()}</h3>
            </A>
            <span class="product-card__category">{category_caption(&product.category)}</span>
            <span class="product-card__price">{format_price(product.price)}</span>
            <Button
                appearance=ButtonAppearance::Primary
                disabled=!in_stock
                on_click=move |_| cart.cart.update(|c| c.add(&for_cart))
            >
                {if in_stock { "Add to cart" } else { "Out of stock" }}
            </Button>
        </div>
    }
}

/// Chips for the filters in effect, each removable on its own
#[component]
fn ActiveFilterTags(listing: ListingHandle<Product>) -> impl IntoView {
    let filters = listing.filters();

    move || {
        let f = filters.get();
        let mut tags = Vec::new();
        if let Some(search) = f.search_term {
            tags.push((format!("\"{}\"", search), FilterPatch {
                search_term: Some(None),
                ..FilterPatch::default()
            }));
        }
        if let Some(category) = f.category {
            tags.push((category_caption(&category), FilterPatch::category(None)));
        }
        if let Some(min) = f.min_price {
            tags.push((format!("from {}", format_price(min)), FilterPatch {
                min_price: Some(None),
                ..FilterPatch::default()
            }));
        }
        if let Some(max) = f.max_price {
            tags.push((format!("up to {}", format_price(max)), FilterPatch {
                max_price: Some(None),
                ..FilterPatch::default()
            }));
        }

        tags.into_iter()
            .map(|(label, patch)| {
                view! {
                    <FilterTag
                        label=label
                        on_remove=Callback::new(move |_| listing.apply_patch(patch.clone()))
                    />
                }
            })
            .collect_view()
    }
}

/// Витрина: поиск, категория, диапазон цен, сортировка по цене
#[component]
pub fn ProductList() -> impl IntoView {
    let listing = use_listing::<Product>(&PRODUCTS, PRODUCTS_ENDPOINT);
    let data = listing.data();
    let filters = listing.filters();
    let is_expanded = RwSignal::new(true);

    view! {
        <div class="page products-page">
            <div class="page__header">
                <h1 class="page__title">"Products"</h1>
                <Button
                    appearance=ButtonAppearance::Subtle
                    on_click=move |_| listing.toggle_sort("price")
                >
                    "Price"
                    {move || filters.with(|f| get_sort_indicator(f, "price"))}
                </Button>
            </div>

            <FilterPanel
                is_expanded=is_expanded
                active_filters_count=listing.active_filter_count()
                on_submit=Callback::new(move |_| listing.submit_draft())
                on_reset=Callback::new(move |_| listing.reset())
            >
                <DraftInput listing=listing field=DraftField::SearchTerm label="Search" placeholder="Name or description" />
                <CategorySelect listing=listing label="Category" options=category_options() />
                <DraftInput listing=listing field=DraftField::MinPrice label="Min price" input_type="number" />
                <DraftInput listing=listing field=DraftField::MaxPrice label="Max price" input_type="number" />
            </FilterPanel>

            <div class="filter-tags">
                <ActiveFilterTags listing=listing />
            </div>

            {move || {
                let (loading, error, empty) = data.with(|d| (d.loading, d.error.clone(), d.is_empty()));
                if let Some(message) = error {
                    view! { <div class="error-message">{message}</div> }.into_any()
                } else if loading && empty {
                    view! { <Spinner /> }.into_any()
                } else if empty {
                    view! { <div class="empty-state">"No products match these filters."</div> }.into_any()
                } else {
                    view! {
                        <div class=if loading { "product-grid product-grid--stale" } else { "product-grid" }>
                            {data.with(|d| d.items.clone())
                                .into_iter()
                                .map(|product| view! { <ProductCard product=product /> })
                                .collect_view()}
                        </div>
                    }
                    .into_any()
                }
            }}

            <PaginationControls
                pagination=listing.pagination_view()
                on_page_change=Callback::new(move |page| listing.go_to_page(page))
            />
        </div>
    }
}
