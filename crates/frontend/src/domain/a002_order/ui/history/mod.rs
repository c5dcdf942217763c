use contracts::domain::a002_order::{Order, OrderItem, ShippingAddress};
use leptos::prelude::*;
use thaw::*;

use crate::domain::a002_order::{status_class, MY_ORDERS_ENDPOINT};
use crate::shared::components::pagination_controls::PaginationControls;
use crate::shared::date_utils::format_datetime;
use crate::shared::list_utils::format_price;
use crate::shared::listing::schema::MY_ORDERS;
use crate::shared::listing::use_listing;

fn item_caption(item: &OrderItem) -> String {
    let name = item
        .product
        .as_ref()
        .map(|p| p.name.clone())
        .unwrap_or_else(|| format!("Product #{}", item.product_id));
    format!("{} x {}", name, item.quantity)
}

fn address_lines(address: &ShippingAddress) -> Vec<String> {
    vec![
        address.street.clone(),
        format!("{}, {} {}", address.city, address.state, address.zip_code),
        address.country.clone(),
    ]
}

#[component]
fn OrderCard(order: Order) -> impl IntoView {
    let address = order.shipping_address.as_ref().map(address_lines);

    view! {
        <div class="order-card">
            <div class="order-card__header">
                <div>
                    <p>{format!("Order #{}", order.id)}</p>
                    <p class="order-card__date">{format_datetime(&order.created_at)}</p>
                </div>
                <span class=status_class(order.status)>{order.status.display_name()}</span>
            </div>
            <div class="order-card__body">
                <div>
                    <h3>"Items"</h3>
                    {order
                        .items
                        .iter()
                        .map(|item| view! {
                            <div class="order-card__line">
                                <span>{item_caption(item)}</span>
                                <span>{format_price(item.price * item.quantity as f64)}</span>
                            </div>
                        })
                        .collect_view()}
                </div>
                {address.map(|lines| view! {
                    <div>
                        <h3>"Shipping Address"</h3>
                        {lines.into_iter().map(|line| view! { <p>{line}</p> }).collect_view()}
                    </div>
                })}
            </div>
            <div class="order-card__footer">
                <span>"Total"</span>
                <strong>{format_price(order.total)}</strong>
            </div>
        </div>
    }
}

/// История заказов текущего пользователя
#[component]
pub fn OrderHistory() -> impl IntoView {
    let listing = use_listing::<Order>(&MY_ORDERS, MY_ORDERS_ENDPOINT);
    let data = listing.data();

    view! {
        <div class="page order-history">
            <h1 class="page__title">"Order History"</h1>
            {move || {
                let (loading, error, empty) = data.with(|d| (d.loading, d.error.clone(), d.is_empty()));
                if let Some(message) = error {
                    view! { <div class="error-message">{message}</div> }.into_any()
                } else if loading && empty {
                    view! { <Spinner /> }.into_any()
                } else if empty {
                    view! { <div class="empty-state">"No orders found"</div> }.into_any()
                } else {
                    data.with(|d| d.items.clone())
                        .into_iter()
                        .map(|order| view! { <OrderCard order=order /> })
                        .collect_view()
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

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a002_order::OrderItemProduct;

    #[test]
    fn test_item_caption_falls_back_to_product_id() {
        let mut item = OrderItem {
            product_id: 7,
            quantity: 2,
            price: 5.0,
            product: None,
        };
        assert_eq!(item_caption(&item), "Product #7 x 2");

        item.product = Some(OrderItemProduct {
            id: 7,
            name: "Case".to_string(),
            price: 5.0,
            image: String::new(),
        });
        assert_eq!(item_caption(&item), "Case x 2");
    }

    #[test]
    fn test_address_lines() {
        let address = ShippingAddress {
            street: "1 Main St".to_string(),
            city: "Springfield".to_string(),
            state: "IL".to_string(),
            zip_code: "62701".to_string(),
            country: "USA".to_string(),
        };
        assert_eq!(
            address_lines(&address),
            vec!["1 Main St", "Springfield, IL 62701", "USA"]
        );
    }
}
