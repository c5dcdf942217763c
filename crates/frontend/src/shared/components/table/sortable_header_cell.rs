//! Компонент сортируемой ячейки заголовка таблицы
//!
//! # Примеры
//!
//! ```ignore
//! <SortableHeaderCell
//!     label="Total"
//!     sort_field="total"
//!     filters=listing.filters()
//!     on_sort=Callback::new(move |field: String| listing.toggle_sort(&field))
//! />
//! ```

use crate::shared::list_utils::{get_sort_class, get_sort_indicator};
use crate::shared::listing::FilterState;
use leptos::prelude::*;
use thaw::*;

/// Заголовок колонки, кликом переключающий серверную сортировку.
///
/// Индикатор (▲▼⇅) берётся из канонических фильтров листинга.
#[component]
pub fn SortableHeaderCell(
    /// Текст заголовка
    #[prop(into)]
    label: String,

    /// Поле для сортировки (`sortBy`)
    #[prop(into)]
    sort_field: String,

    /// Фильтры листинга
    #[prop(into)]
    filters: Signal<FilterState>,

    /// Callback при клике на заголовок
    on_sort: Callback<String>,

    /// Минимальная ширина колонки
    #[prop(optional, default = 100.0)]
    min_width: f64,
) -> impl IntoView {
    let field_for_click = sort_field.clone();
    let field_for_indicator = sort_field.clone();
    let field_for_class = sort_field;

    view! {
        <TableHeaderCell min_width=min_width>
            <div
                class="table__sortable-header"
                style="cursor: pointer;"
                on:click=move |_| on_sort.run(field_for_click.clone())
            >
                {label}
                <span class=move || filters.with(|f| get_sort_class(f, &field_for_class))>
                    {move || filters.with(|f| get_sort_indicator(f, &field_for_indicator))}
                </span>
            </div>
        </TableHeaderCell>
    }
}
