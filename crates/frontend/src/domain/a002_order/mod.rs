pub mod api;
pub mod ui;

use contracts::enums::order_status::OrderStatus;

/// Все заказы (админка)
pub const ORDERS_ENDPOINT: &str = "/api/orders";
/// Заказы текущего пользователя
pub const MY_ORDERS_ENDPOINT: &str = "/api/orders/my-orders";

/// Варианты фильтра статуса; `""` = любой статус
pub fn status_options() -> Vec<(&'static str, &'static str)> {
    std::iter::once(("", "All statuses"))
        .chain(OrderStatus::all().into_iter().map(|s| (s.code(), s.display_name())))
        .collect()
}

/// CSS modifier of a status badge
pub fn status_class(status: OrderStatus) -> &'static str {
    match status {
        OrderStatus::Pending => "status-badge status-badge--pending",
        OrderStatus::Processing => "status-badge status-badge--processing",
        OrderStatus::Shipped => "status-badge status-badge--shipped",
        OrderStatus::Delivered => "status-badge status-badge--delivered",
        OrderStatus::Cancelled => "status-badge status-badge--cancelled",
    }
}
