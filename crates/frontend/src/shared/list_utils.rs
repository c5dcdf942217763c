/// Утилиты для списков: сортировка в заголовках, форматирование цен
use contracts::shared::listing::SortOrder;

use crate::shared::listing::FilterState;

/// Получить индикатор сортировки для заголовка
pub fn get_sort_indicator(filters: &FilterState, field: &str) -> &'static str {
    if filters.sort_by.as_deref() != Some(field) {
        return " ⇅";
    }
    match filters.effective_sort_order() {
        Some(SortOrder::Asc) => " ▲",
        Some(SortOrder::Desc) => " ▼",
        None => " ⇅",
    }
}

/// CSS-класс индикатора: активная колонка подсвечивается
pub fn get_sort_class(filters: &FilterState, field: &str) -> &'static str {
    if filters.sort_by.as_deref() == Some(field) {
        "sort-icon active"
    } else {
        "sort-icon"
    }
}

/// Цена с двумя знаками: `1234.5` -> `$1,234.50`
pub fn format_price(value: f64) -> String {
    let cents = (value.abs() * 100.0).round() as u64;
    let whole = (cents / 100).to_string();
    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    let sign = if value < 0.0 && cents > 0 { "-" } else { "" };
    format!("{}${}.{:02}", sign, grouped, cents % 100)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_indicator() {
        let filters = FilterState {
            sort_by: Some("price".to_string()),
            sort_order: Some(SortOrder::Desc),
            ..FilterState::default()
        };
        assert_eq!(get_sort_indicator(&filters, "price"), " ▼");
        assert_eq!(get_sort_indicator(&filters, "name"), " ⇅");
        assert_eq!(get_sort_class(&filters, "price"), "sort-icon active");
    }

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(0.0), "$0.00");
        assert_eq!(format_price(9.999), "$10.00");
        assert_eq!(format_price(1234.5), "$1,234.50");
        assert_eq!(format_price(1_000_000.0), "$1,000,000.00");
        assert_eq!(format_price(-42.1), "-$42.10");
    }
}
