use crate::shared::icons::icon;
use leptos::prelude::*;

/// Collapsible filter form of a listing view.
///
/// The form submits the draft as a whole; discrete controls inside it apply
/// immediately on their own.
#[component]
pub fn FilterPanel(
    /// Whether the filter panel is expanded
    #[prop(into)]
    is_expanded: RwSignal<bool>,

    /// Number of active filters (for badge display)
    #[prop(into)]
    active_filters_count: Signal<usize>,

    /// Form submission (Apply button or Enter in a text field)
    on_submit: Callback<()>,

    /// Clears every filter
    on_reset: Callback<()>,

    /// Filter content (form fields)
    children: ChildrenFn,
) -> impl IntoView {
    let toggle_expanded = move |_| {
        is_expanded.update(|e| *e = !*e);
    };

    view! {
        <div class="filter-panel">
            <div class="filter-panel-header" on:click=toggle_expanded>
                <span class=move || {
                    if is_expanded.get() {
                        "filter-panel__chevron filter-panel__chevron--expanded"
                    } else {
                        "filter-panel__chevron"
                    }
                }>
                    {icon("chevron-down")}
                </span>
                {icon("filter")}
                <span class="filter-panel__title">"Filters"</span>
                {move || {
                    let count = active_filters_count.get();
                    if count > 0 {
                        view! { <span class="badge badge--primary">{count}</span> }.into_any()
                    } else {
                        view! { <></> }.into_any()
                    }
                }}
            </div>

            <Show when=move || is_expanded.get()>
                <form
                    class="filter-panel-content"
                    on:submit=move |ev: leptos::ev::SubmitEvent| {
                        ev.prevent_default();
                        on_submit.run(());
                    }
                >
                    {children()}
                    <div class="filter-panel__actions">
                        <button type="submit" class="btn-primary">
                            {icon("search")}
                            " Apply"
                        </button>
                        <button
                            type="button"
                            class="btn-secondary"
                            on:click=move |_| on_reset.run(())
                        >
                            {icon("x")}
                            " Reset"
                        </button>
                    </div>
                </form>
            </Show>
        </div>
    }
}

/// FilterTag component - individual filter tag/chip
#[component]
pub fn FilterTag(
    /// Tag label
    #[prop(into)]
    label: String,

    /// Callback when remove is clicked
    on_remove: Callback<()>,
) -> impl IntoView {
    view! {
        <div class="filter-tag">
            <span>{label}</span>
            <span
                class="filter-tag__remove"
                on:click=move |e| {
                    e.stop_propagation();
                    on_remove.run(());
                }
            >
                {icon("x")}
            </span>
        </div>
    }
}
