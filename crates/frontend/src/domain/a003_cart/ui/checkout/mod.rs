use contracts::domain::a003_checkout::CheckoutItem;
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::A;
use leptos_router::hooks::{use_location, use_navigate};
use leptos_router::NavigateOptions;
use thaw::*;

use crate::domain::a002_order::api::create_order;
use crate::domain::a003_cart::api::create_payment_intent;
use crate::domain::a003_cart::checkout::{
    order_request, payment_intent_id, payment_items, PaymentReturn, ShippingForm,
};
use crate::domain::a003_cart::context::use_cart;
use crate::domain::a003_cart::storage::{
    clear_shipping_address, load_shipping_address, save_shipping_address,
};
use crate::shared::list_utils::format_price;

/// Пауза перед переходом к заказам после успешного оформления
const REDIRECT_DELAY_MS: u32 = 5_000;

#[component]
fn OrderSummary() -> impl IntoView {
    let ctx = use_cart();

    view! {
        <div class="checkout-summary">
            <h2>"Order summary"</h2>
            {move || {
                ctx.cart.with(|c| {
                    c.items
                        .iter()
                        .map(|item| {
                            let caption = format!("{} x {}", item.name, item.quantity);
                            let total = format_price(item.line_total());
                            view! {
                                <div class="checkout-summary__line">
                                    <span>{caption}</span>
                                    <span>{total}</span>
                                </div>
                            }
                        })
                        .collect_view()
                })
            }}
            <div class="checkout-summary__total">
                <span>"Total"</span>
                <strong>{move || format_price(ctx.cart.with(|c| c.total_price()))}</strong>
            </div>
        </div>
    }
}

/// Оформление: адрес доставки, платёж, сводка заказа
#[component]
pub fn CheckoutPage() -> impl IntoView {
    let ctx = use_cart();
    let navigate = use_navigate();

    let stored = load_shipping_address();
    let form = RwSignal::new(stored.as_ref().map(ShippingForm::from_address).unwrap_or_default());
    let (address_saved, set_address_saved) = signal(stored.is_some());
    let (form_error, set_form_error) = signal(Option::<String>::None);
    let (client_secret, set_client_secret) = signal(Option::<String>::None);
    let (error, set_error) = signal(Option::<String>::None);
    let (is_loading, set_is_loading) = signal(false);

    let to_cart = navigate.clone();
    Effect::new(move |_| {
        if ctx.cart.with(|c| c.is_empty()) {
            to_cart("/cart", NavigateOptions { replace: true, ..Default::default() });
        }
    });

    // Платёж открывается один раз на входе; корзина здесь не меняется
    Effect::new(move |_| {
        let items: Vec<CheckoutItem> = ctx.cart.with_untracked(payment_items);
        if items.is_empty() {
            return;
        }
        set_is_loading.set(true);
        spawn_local(async move {
            match create_payment_intent(items).await {
                Ok(intent) => set_client_secret.set(Some(intent.client_secret)),
                Err(e) => {
                    leptos::logging::log!("create payment intent failed: {}", e);
                    set_error.set(Some(e));
                }
            }
            set_is_loading.set(false);
        });
    });

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        match form.with(|f| f.to_address()) {
            Ok(address) => {
                save_shipping_address(&address);
                set_form_error.set(None);
                set_address_saved.set(true);
            }
            Err(e) => set_form_error.set(Some(e)),
        }
    };

    // Карту подтверждает платёжный провайдер и возвращает на /checkout/success
    // с payment_intent и redirect_status; без виджета провайдера идём туда сразу
    let on_pay = move |_: leptos::ev::MouseEvent| {
        let Some(secret) = client_secret.get_untracked() else {
            return;
        };
        let query = payment_intent_id(&secret)
            .ok_or_else(|| "Malformed payment intent".to_string())
            .and_then(|id| PaymentReturn::succeeded(id).to_query());
        match query {
            Ok(query) => navigate(&format!("/checkout/success?{}", query), Default::default()),
            Err(e) => set_error.set(Some(e)),
        }
    };

    let text = move |id: &'static str, label: &'static str, get: fn(&ShippingForm) -> String, set: fn(&mut ShippingForm, String)| {
        view! {
            <div class="form-group">
                <label for=id>{label}</label>
                <input
                    type="text"
                    id=id
                    required
                    prop:value=move || form.with(get)
                    on:input=move |ev| {
                        form.update(|f| set(f, event_target_value(&ev)));
                        set_address_saved.set(false);
                    }
                />
            </div>
        }
    };

    view! {
        <div class="page checkout-page">
            <h1 class="page__title">"Checkout"</h1>
            <Show when=move || error.get().is_some()>
                <div class="error-message">{move || error.get().unwrap_or_default()}</div>
            </Show>

            <form class="checkout-form" on:submit=on_submit>
                <h2>"Shipping address"</h2>
                {text("street", "Street address", |f| f.street.clone(), |f, v| f.street = v)}
                {text("city", "City", |f| f.city.clone(), |f, v| f.city = v)}
                {text("state", "State", |f| f.state.clone(), |f, v| f.state = v)}
                {text("zipCode", "ZIP code", |f| f.zip_code.clone(), |f, v| f.zip_code = v)}
                {text("country", "Country", |f| f.country.clone(), |f, v| f.country = v)}
                <Show when=move || form_error.get().is_some()>
                    <div class="error-message">{move || form_error.get().unwrap_or_default()}</div>
                </Show>
                <button type="submit" class="btn-primary">
                    {move || if address_saved.get() { "Address saved" } else { "Save address" }}
                </button>
            </form>

            <div class="checkout-payment">
                <h2>"Payment"</h2>
                <Show when=move || is_loading.get()>
                    <Spinner />
                </Show>
                <button
                    class="btn-primary"
                    on:click=on_pay
                    disabled=move || !address_saved.get() || client_secret.with(|s| s.is_none())
                >
                    "Pay and place order"
                </button>
            </div>

            <OrderSummary />
        </div>
    }
}

/// Возврат с оплаты: заказ создаётся из корзины и сохранённого адреса
#[component]
pub fn CheckoutSuccess() -> impl IntoView {
    let ctx = use_cart();
    let location = use_location();
    let navigate = use_navigate();
    let (error, set_error) = signal(Option::<String>::None);
    let (placed, set_placed) = signal(false);

    Effect::new(move |_| {
        let payment = PaymentReturn::from_query(&location.search.get_untracked());
        let request = payment.confirmed_intent().and_then(|intent| {
            let address = load_shipping_address().ok_or_else(|| "Shipping address not found".to_string())?;
            ctx.cart.with_untracked(|cart| order_request(cart, address, intent))
        });
        let request = match request {
            Ok(request) => request,
            Err(e) => {
                set_error.set(Some(e));
                return;
            }
        };

        let navigate = navigate.clone();
        spawn_local(async move {
            match create_order(&request).await {
                Ok(order) => {
                    log::info!("order {} placed", order.id);
                    ctx.cart.update(|c| c.clear());
                    clear_shipping_address();
                    set_placed.set(true);
                    TimeoutFuture::new(REDIRECT_DELAY_MS).await;
                    navigate("/orders", Default::default());
                }
                Err(e) => {
                    log::error!("failed to create order: {}", e);
                    set_error.set(Some("Failed to create your order. Please contact support.".to_string()));
                }
            }
        });
    });

    view! {
        <div class="page checkout-result">
            {move || {
                if let Some(message) = error.get() {
                    return view! {
                        <div class="checkout-result__box">
                            <h2>"Payment error"</h2>
                            <p>{message}</p>
                            <A href="/cart">"Return to cart"</A>
                        </div>
                    }
                    .into_any();
                }
                if !placed.get() {
                    return view! { <Spinner /> }.into_any();
                }
                view! {
                    <div class="checkout-result__box">
                        <h2>"Payment successful!"</h2>
                        <p>"Thank you for your purchase. We're processing your order."</p>
                        <p class="checkout-result__hint">
                            "You will be redirected to your orders in a few seconds..."
                        </p>
                    </div>
                }
                .into_any()
            }}
        </div>
    }
}
