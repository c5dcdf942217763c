//! Form controls bound to the draft of a listing view.

use crate::shared::listing::{DraftField, ListingHandle};
use leptos::prelude::*;

/// Text/number input: every keystroke goes to the draft, nothing is
/// committed until the surrounding form is submitted.
#[component]
pub fn DraftInput<T>(
    listing: ListingHandle<T>,
    field: DraftField,
    #[prop(into)] label: String,
    #[prop(optional, default = "text")] input_type: &'static str,
    #[prop(optional, into)] placeholder: String,
) -> impl IntoView
where
    T: Send + Sync + 'static,
{
    let draft = listing.draft();

    view! {
        <label class="form-group">
            <span>{label}</span>
            <input
                type=input_type
                step=if input_type == "number" { "any" } else { "" }
                placeholder=placeholder
                prop:value=move || draft.with(|d| d.field(field).to_string())
                on:input=move |ev| listing.edit_draft(field, event_target_value(&ev))
            />
        </label>
    }
}

/// Select over the listing's category-like filter. Applies immediately.
#[component]
pub fn CategorySelect<T>(
    listing: ListingHandle<T>,
    #[prop(into)] label: String,
    /// `(value, caption)` pairs; `""` stands for "all"
    options: Vec<(&'static str, &'static str)>,
) -> impl IntoView
where
    T: Send + Sync + 'static,
{
    let draft = listing.draft();

    view! {
        <label class="form-group">
            <span>{label}</span>
            <select
                prop:value=move || draft.with(|d| d.category.clone())
                on:change=move |ev| listing.select_category(event_target_value(&ev))
            >
                {options
                    .into_iter()
                    .map(|(value, caption)| view! { <option value=value>{caption}</option> })
                    .collect_view()}
            </select>
        </label>
    }
}
