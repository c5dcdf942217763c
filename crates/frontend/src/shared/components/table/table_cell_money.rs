//! Компонент ячейки таблицы для денежных значений

use crate::shared::list_utils::format_price;
use leptos::prelude::*;
use thaw::*;

/// Цена или сумма, выровненная по правому краю
#[component]
pub fn TableCellMoney(
    /// Значение для отображения
    value: f64,

    /// Жирный шрифт
    #[prop(optional, default = false)]
    bold: bool,
) -> impl IntoView {
    let style = if bold { "font-weight: 600" } else { "" };

    view! {
        <TableCell class="text-right">
            <TableCellLayout>
                <span style=style>{format_price(value)}</span>
            </TableCellLayout>
        </TableCell>
    }
}
