use crate::shared::icons::icon;
use crate::shared::listing::PaginationView;
use leptos::prelude::*;

/// Prev / page-window / next bar of a listing.
///
/// Renders nothing until the first response arrived, and nothing when the
/// listing fits on a single page.
#[component]
pub fn PaginationControls(
    /// View derived from the last response, `None` before it
    #[prop(into)]
    pagination: Signal<Option<PaginationView>>,

    /// Callback with the 1-based page to open
    on_page_change: Callback<u32>,
) -> impl IntoView {
    move || {
        let Some(p) = pagination.get().filter(|p| p.show_controls) else {
            return view! { <></> }.into_any();
        };
        let prev = p.current_page.saturating_sub(1).max(1);
        let next = p.current_page.saturating_add(1);
        let current = p.current_page;

        view! {
            <div class="pagination-controls">
                <button
                    class="pagination-btn"
                    on:click=move |_| on_page_change.run(prev)
                    disabled=p.is_prev_disabled
                    title="Previous page"
                >
                    {icon("chevron-left")}
                </button>
                {p.page_window
                    .into_iter()
                    .map(|page| {
                        let class = if page == current {
                            "pagination-btn pagination-btn--active"
                        } else {
                            "pagination-btn"
                        };
                        view! {
                            <button class=class on:click=move |_| on_page_change.run(page)>
                                {page.to_string()}
                            </button>
                        }
                    })
                    .collect_view()}
                <button
                    class="pagination-btn"
                    on:click=move |_| on_page_change.run(next)
                    disabled=p.is_next_disabled
                    title="Next page"
                >
                    {icon("chevron-right")}
                </button>
                <span class="pagination-info">
                    {format!("{} / {}", current, p.total_pages)}
                </span>
            </div>
        }
        .into_any()
    }
}
