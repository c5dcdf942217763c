use contracts::domain::a002_order::Order;
use contracts::enums::order_status::OrderStatus;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::domain::a002_order::api::update_order_status;
use crate::domain::a002_order::{status_class, status_options, ORDERS_ENDPOINT};
use crate::shared::components::draft_input::{CategorySelect, DraftInput};
use crate::shared::components::filter_panel::FilterPanel;
use crate::shared::components::pagination_controls::PaginationControls;
use crate::shared::components::table::{SortableHeaderCell, TableCellMoney};
use crate::shared::date_utils::format_date;
use crate::shared::icons::icon;
use crate::shared::listing::schema::ORDERS;
use crate::shared::listing::{use_listing, DraftField, ListingData};

/// Подменяет строку заказа ответом сервера, не перезапрашивая страницу
fn replace_row(data: &mut ListingData<Order>, updated: Order) {
    if let Some(row) = data.items.iter_mut().find(|o| o.id == updated.id) {
        *row = updated;
    }
}

#[component]
fn StatusSelect(order_id: i64, status: OrderStatus, on_change: Callback<(i64, OrderStatus)>) -> impl IntoView {
    view! {
        <select
            class="status-select"
            prop:value=status.code()
            on:change=move |ev| {
                if let Some(next) = OrderStatus::from_code(&event_target_value(&ev)) {
                    on_change.run((order_id, next));
                }
            }
        >
            {OrderStatus::all()
                .into_iter()
                .map(|s| view! { <option value=s.code()>{s.display_name()}</option> })
                .collect_view()}
        </select>
    }
}

/// Управление заказами: фильтр статуса и суммы, сортировка, смена статуса
#[component]
pub fn AdminOrderList() -> impl IntoView {
    let listing = use_listing::<Order>(&ORDERS, ORDERS_ENDPOINT);
    let data = listing.data();
    let filters = listing.filters();
    let is_expanded = RwSignal::new(true);
    let (banner, set_banner) = signal(Option::<String>::None);

    let on_status_change = Callback::new(move |(id, status): (i64, OrderStatus)| {
        set_banner.set(None);
        spawn_local(async move {
            match update_order_status(id, status).await {
                Ok(updated) => data.update(|d| replace_row(d, updated)),
                Err(e) => {
                    leptos::logging::log!("order {} status update failed: {}", id, e);
                    set_banner.set(Some(format!("Failed to update order status: {}", e)));
                    // строка могла показать невыбранный статус
                    listing.refresh();
                }
            }
        });
    });

    let on_sort = Callback::new(move |field: String| listing.toggle_sort(&field));

    view! {
        <div class="page admin-orders">
            <div class="page__header">
                <div class="page__header-left">
                    {icon("orders")}
                    <h1 class="page__title">"Orders Management"</h1>
                </div>
                <div class="page__header-right">
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| listing.refresh()
                        disabled=Signal::derive(move || data.with(|d| d.loading))
                    >
                        {icon("refresh")}
                        " Refresh"
                    </Button>
                </div>
            </div>

            <Show when=move || banner.get().is_some()>
                <div class="error-message">{move || banner.get().unwrap_or_default()}</div>
            </Show>

            <FilterPanel
                is_expanded=is_expanded
                active_filters_count=listing.active_filter_count()
                on_submit=Callback::new(move |_| listing.submit_draft())
                on_reset=Callback::new(move |_| listing.reset())
            >
                <CategorySelect listing=listing label="Status" options=status_options() />
                <DraftInput listing=listing field=DraftField::MinPrice label="Min total" input_type="number" />
                <DraftInput listing=listing field=DraftField::MaxPrice label="Max total" input_type="number" />
            </FilterPanel>

            {move || data.with(|d| d.error.clone()).map(|message| view! {
                <div class="error-message">{message}</div>
            })}

            <Table attr:style="width: 100%;">
                <TableHeader>
                    <TableRow>
                        <SortableHeaderCell label="Order ID" sort_field="id" filters=filters on_sort=on_sort min_width=90.0 />
                        <SortableHeaderCell label="Date" sort_field="createdAt" filters=filters on_sort=on_sort min_width=140.0 />
                        <SortableHeaderCell label="Status" sort_field="status" filters=filters on_sort=on_sort />
                        <SortableHeaderCell label="Total" sort_field="total" filters=filters on_sort=on_sort />
                        <TableHeaderCell min_width=140.0>"Actions"</TableHeaderCell>
                    </TableRow>
                </TableHeader>
                <TableBody>
                    {move || {
                        let (loading, rows, failed) =
                            data.with(|d| (d.loading, d.items.clone(), d.error.is_some()));
                        // сообщение об ошибке уже выведено над таблицей
                        if failed {
                            return view! { <></> }.into_any();
                        }
                        if rows.is_empty() {
                            let placeholder = if loading {
                                view! { <Spinner /> }.into_any()
                            } else {
                                view! { "No orders found" }.into_any()
                            };
                            return view! {
                                <TableRow>
                                    <TableCell attr:colspan="5">
                                        <TableCellLayout>{placeholder}</TableCellLayout>
                                    </TableCell>
                                </TableRow>
                            }
                            .into_any();
                        }
                        rows.into_iter()
                            .map(|order| {
                                view! {
                                    <TableRow>
                                        <TableCell><TableCellLayout>{format!("#{}", order.id)}</TableCellLayout></TableCell>
                                        <TableCell><TableCellLayout>{format_date(&order.created_at)}</TableCellLayout></TableCell>
                                        <TableCell>
                                            <TableCellLayout>
                                                <span class=status_class(order.status)>{order.status.display_name()}</span>
                                            </TableCellLayout>
                                        </TableCell>
                                        <TableCellMoney value=order.total bold=true />
                                        <TableCell>
                                            <StatusSelect order_id=order.id status=order.status on_change=on_status_change />
                                        </TableCell>
                                    </TableRow>
                                }
                            })
                            .collect_view()
                            .into_any()
                    }}
                </TableBody>
            </Table>

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
    use chrono::{TimeZone, Utc};

    fn order(id: i64, status: OrderStatus) -> Order {
        Order {
            id,
            user_id: 1,
            items: Vec::new(),
            total: 10.0,
            payment_intent_id: String::new(),
            status,
            shipping_address: None,
            created_at: Utc.with_ymd_and_hms(2024, 3, 15, 14, 2, 26).unwrap(),
            updated_at: None,
        }
    }

    #[test]
    fn test_replace_row_updates_matching_order() {
        let mut data = ListingData::new();
        data.items = vec![order(1, OrderStatus::Pending), order(2, OrderStatus::Pending)];

        replace_row(&mut data, order(2, OrderStatus::Shipped));
        assert_eq!(data.items[0].status, OrderStatus::Pending);
        assert_eq!(data.items[1].status, OrderStatus::Shipped);

        replace_row(&mut data, order(9, OrderStatus::Cancelled));
        assert_eq!(data.items.len(), 2);
    }
}
