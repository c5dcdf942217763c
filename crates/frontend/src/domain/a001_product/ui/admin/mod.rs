use contracts::domain::a001_product::{NewProduct, Product};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::domain::a001_product::api::{create_product, delete_product, update_product};
use crate::domain::a001_product::{category_caption, category_options, PRODUCTS_ENDPOINT};
use crate::shared::components::draft_input::{CategorySelect, DraftInput};
use crate::shared::components::filter_panel::FilterPanel;
use crate::shared::components::pagination_controls::PaginationControls;
use crate::shared::components::table::{SortableHeaderCell, TableCellMoney};
use crate::shared::icons::icon;
use crate::shared::listing::schema::ADMIN_PRODUCTS;
use crate::shared::listing::{use_listing, DraftField};

/// Поля формы товара (сырые строки до отправки)
#[derive(Clone, Debug, Default)]
struct ProductForm {
    name: String,
    description: String,
    img: String,
    price: String,
    category: String,
    stock: String,
}

impl ProductForm {
    fn from_product(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            description: product.description.clone(),
            img: product.img.clone(),
            price: product.price.to_string(),
            category: product.category.clone(),
            stock: product.stock.to_string(),
        }
    }

    fn to_new_product(&self) -> Result<NewProduct, String> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err("Name is required".to_string());
        }
        let price = self
            .price
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|p| p.is_finite() && *p >= 0.0)
            .ok_or_else(|| format!("Invalid price: {}", self.price))?;
        let stock = self
            .stock
            .trim()
            .parse::<i64>()
            .ok()
            .filter(|s| *s >= 0)
            .ok_or_else(|| format!("Invalid stock: {}", self.stock))?;
        if !ADMIN_PRODUCTS.accepts_category(&self.category) {
            return Err("Choose a category".to_string());
        }
        Ok(NewProduct {
            name: name.to_string(),
            description: self.description.trim().to_string(),
            img: self.img.trim().to_string(),
            price,
            category: self.category.clone(),
            stock,
        })
    }
}

/// Создание товара, либо правка `editing`, когда он задан
#[component]
fn ProductEditor(
    editing: Option<Product>,
    on_saved: Callback<Product>,
    on_cancel: Callback<()>,
) -> impl IntoView {
    let editing_id = editing.as_ref().map(|p| p.id);
    let form = RwSignal::new(editing.as_ref().map(ProductForm::from_product).unwrap_or_default());
    let (error, set_error) = signal(Option::<String>::None);
    let (is_saving, set_is_saving) = signal(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let product = match form.with(|f| f.to_new_product()) {
            Ok(p) => p,
            Err(e) => {
                set_error.set(Some(e));
                return;
            }
        };
        set_error.set(None);
        set_is_saving.set(true);
        spawn_local(async move {
            let saved = match editing_id {
                Some(id) => update_product(id, &product).await,
                None => create_product(&product).await,
            };
            set_is_saving.set(false);
            match saved {
                Ok(saved) => {
                    form.set(ProductForm::default());
                    on_saved.run(saved);
                }
                Err(e) => set_error.set(Some(e)),
            }
        });
    };

    let text = move |label: &'static str, kind: &'static str, get: fn(&ProductForm) -> String, set: fn(&mut ProductForm, String)| {
        view! {
            <label class="form-group">
                <span>{label}</span>
                <input
                    type=kind
                    prop:value=move || form.with(get)
                    on:input=move |ev| form.update(|f| set(f, event_target_value(&ev)))
                />
            </label>
        }
    };

    view! {
        <form class="admin-form" on:submit=on_submit>
            <h3>{if editing_id.is_some() { "Edit product" } else { "New product" }}</h3>
            {text("Name", "text", |f| f.name.clone(), |f, v| f.name = v)}
            {text("Description", "text", |f| f.description.clone(), |f, v| f.description = v)}
            {text("Image URL", "url", |f| f.img.clone(), |f, v| f.img = v)}
            {text("Price", "number", |f| f.price.clone(), |f, v| f.price = v)}
            {text("Stock", "number", |f| f.stock.clone(), |f, v| f.stock = v)}
            <label class="form-group">
                <span>"Category"</span>
                <select
                    prop:value=move || form.with(|f| f.category.clone())
                    on:change=move |ev| form.update(|f| f.category = event_target_value(&ev))
                >
                    {category_options()
                        .into_iter()
                        .map(|(value, caption)| view! { <option value=value>{caption}</option> })
                        .collect_view()}
                </select>
            </label>
            <Show when=move || error.get().is_some()>
                <div class="error-message">{move || error.get().unwrap_or_default()}</div>
            </Show>
            <button type="submit" class="btn-primary" disabled=move || is_saving.get()>
                {icon(if editing_id.is_some() { "edit" } else { "plus" })}
                {move || match (is_saving.get(), editing_id.is_some()) {
                    (true, _) => " Saving...",
                    (false, true) => " Save",
                    (false, false) => " Create",
                }}
            </button>
            <Show when=move || editing_id.is_some()>
                <button type="button" class="button button--ghost" on:click=move |_| on_cancel.run(())>
                    "Cancel"
                </button>
            </Show>
        </form>
    }
}

/// Управление товарами: фильтры, сортировка по колонкам, создание, правка и удаление
#[component]
pub fn AdminProductList() -> impl IntoView {
    let listing = use_listing::<Product>(&ADMIN_PRODUCTS, PRODUCTS_ENDPOINT);
    let data = listing.data();
    let filters = listing.filters();
    let is_expanded = RwSignal::new(false);
    let (banner, set_banner) = signal(Option::<String>::None);
    let editing = RwSignal::new(Option::<Product>::None);

    let on_delete = move |id: i64| {
        set_banner.set(None);
        spawn_local(async move {
            match delete_product(id).await {
                Ok(()) => listing.refresh(),
                Err(e) => {
                    leptos::logging::log!("delete product {} failed: {}", id, e);
                    set_banner.set(Some(format!("Failed to delete product: {}", e)));
                }
            }
        });
    };

    let on_sort = Callback::new(move |field: String| listing.toggle_sort(&field));

    view! {
        <div class="page admin-products">
            <div class="page__header">
                <div class="page__header-left">
                    {icon("products")}
                    <h1 class="page__title">"Products"</h1>
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

            {move || {
                let current = editing.get();
                view! {
                    <ProductEditor
                        editing=current
                        on_saved=Callback::new(move |_| {
                            editing.set(None);
                            listing.refresh();
                        })
                        on_cancel=Callback::new(move |_| editing.set(None))
                    />
                }
            }}

            <FilterPanel
                is_expanded=is_expanded
                active_filters_count=listing.active_filter_count()
                on_submit=Callback::new(move |_| listing.submit_draft())
                on_reset=Callback::new(move |_| listing.reset())
            >
                <DraftInput listing=listing field=DraftField::SearchTerm label="Search" />
                <CategorySelect listing=listing label="Category" options=category_options() />
                <DraftInput listing=listing field=DraftField::MinPrice label="Min price" input_type="number" />
                <DraftInput listing=listing field=DraftField::MaxPrice label="Max price" input_type="number" />
            </FilterPanel>

            {move || data.with(|d| d.error.clone()).map(|message| view! {
                <div class="error-message">{message}</div>
            })}

            <Table attr:style="width: 100%;">
                <TableHeader>
                    <TableRow>
                        <SortableHeaderCell label="Name" sort_field="name" filters=filters on_sort=on_sort min_width=240.0 />
                        <TableHeaderCell>"Category"</TableHeaderCell>
                        <SortableHeaderCell label="Price" sort_field="price" filters=filters on_sort=on_sort />
                        <SortableHeaderCell label="Stock" sort_field="stock" filters=filters on_sort=on_sort />
                        <TableHeaderCell>""</TableHeaderCell>
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
                        if loading && rows.is_empty() {
                            return view! {
                                <TableRow>
                                    <TableCell attr:colspan="5">
                                        <TableCellLayout><Spinner /></TableCellLayout>
                                    </TableCell>
                                </TableRow>
                            }
                            .into_any();
                        }
                        rows.into_iter()
                            .map(|p| {
                                let id = p.id;
                                let for_edit = p.clone();
                                view! {
                                    <TableRow>
                                        <TableCell><TableCellLayout truncate=true>{p.name}</TableCellLayout></TableCell>
                                        <TableCell><TableCellLayout>{category_caption(&p.category)}</TableCellLayout></TableCell>
                                        <TableCellMoney value=p.price />
                                        <TableCell><TableCellLayout>{p.stock.to_string()}</TableCellLayout></TableCell>
                                        <TableCell>
                                            <Button
                                                appearance=ButtonAppearance::Subtle
                                                on_click=move |_| editing.set(Some(for_edit.clone()))
                                            >
                                                {icon("edit")}
                                            </Button>
                                            <Button
                                                appearance=ButtonAppearance::Subtle
                                                on_click=move |_| on_delete(id)
                                            >
                                                {icon("trash")}
                                            </Button>
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

    fn filled() -> ProductForm {
        ProductForm {
            name: " Pixel 9 ".to_string(),
            description: "Phone".to_string(),
            img: String::new(),
            price: "799.99".to_string(),
            category: "smartphone".to_string(),
            stock: "5".to_string(),
        }
    }

    #[test]
    fn test_form_builds_new_product() {
        let product = filled().to_new_product().unwrap();
        assert_eq!(product.name, "Pixel 9");
        assert_eq!(product.price, 799.99);
        assert_eq!(product.stock, 5);
    }

    #[test]
    fn test_form_prefilled_from_product() {
        let product = Product {
            id: 3,
            name: "iPad Air".to_string(),
            description: "Tablet".to_string(),
            img: "/img/ipad.png".to_string(),
            price: 599.5,
            category: "tablets".to_string(),
            stock: 12,
        };
        let form = ProductForm::from_product(&product);
        assert_eq!(form.price, "599.5");
        assert_eq!(form.stock, "12");

        let update = form.to_new_product().unwrap();
        assert_eq!(update.name, product.name);
        assert_eq!(update.price, product.price);
        assert_eq!(update.category, "tablets");
        assert_eq!(update.img, product.img);
    }

    #[test]
    fn test_form_rejects_bad_input() {
        let cases: Vec<fn(&mut ProductForm)> = vec![
            |f| f.name = "  ".to_string(),
            |f| f.price = "abc".to_string(),
            |f| f.price = "-1".to_string(),
            |f| f.stock = "1.5".to_string(),
            |f| f.category = String::new(),
        ];
        for mutate in cases {
            let mut form = filled();
            mutate(&mut form);
            assert!(form.to_new_product().is_err(), "{:?}", form);
        }
    }
}
