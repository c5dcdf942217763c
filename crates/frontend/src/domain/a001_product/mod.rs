pub mod api;
pub mod ui;

use contracts::enums::product_category::ProductCategory;

/// Endpoint of the product listing
pub const PRODUCTS_ENDPOINT: &str = "/api/products";

/// Варианты фильтра категории; `""` = все категории
pub fn category_options() -> Vec<(&'static str, &'static str)> {
    std::iter::once(("", "All categories"))
        .chain(ProductCategory::all().into_iter().map(|c| (c.code(), c.display_name())))
        .collect()
}

/// Caption of a category code as stored on the product
pub fn category_caption(code: &str) -> String {
    ProductCategory::from_code(code)
        .map(|c| c.display_name().to_string())
        .unwrap_or_else(|| code.to_string())
}
