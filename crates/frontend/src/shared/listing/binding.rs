//! Leptos glue for [`ListingController`].
//!
//! One [`use_listing`] call per listing view. The controller lives in a
//! `StoredValue` owned by the view; its filters and draft are mirrored into
//! signals for rendering. URL writes go straight to `window.history` and
//! URL changes are observed through the router location and `popstate`.

use leptos::ev;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_location;
use serde::de::DeserializeOwned;
use wasm_bindgen::JsValue;
use web_sys::AbortController;

use super::api::fetch_listing;
use super::controller::ListingController;
use super::debounce::use_debounced;
use super::draft::{DraftField, DraftState};
use super::error::ListingError;
use super::filter_state::{FilterPatch, FilterState};
use super::listing_data::ListingData;
use super::pagination::{compute_view, PaginationView};
use super::schema::{HistoryMode, ListingSchema};
use super::url_sync::Navigation;

/// Reactive handle of one listing view. Cheap to copy into closures.
pub struct ListingHandle<T: Send + Sync + 'static> {
    schema: &'static ListingSchema,
    controller: StoredValue<ListingController>,
    filters: ReadSignal<FilterState>,
    draft: ReadSignal<DraftState>,
    set_draft: WriteSignal<DraftState>,
    data: RwSignal<ListingData<T>>,
    refresh_tick: RwSignal<u64>,
    pathname: StoredValue<String>,
}

impl<T: Send + Sync + 'static> Clone for ListingHandle<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: Send + Sync + 'static> Copy for ListingHandle<T> {}

/// Creates the listing state of the current view and starts syncing it with
/// the address bar and `endpoint`.
pub fn use_listing<T>(schema: &'static ListingSchema, endpoint: &'static str) -> ListingHandle<T>
where
    T: DeserializeOwned + Clone + Send + Sync + 'static,
{
    let mut controller = ListingController::new(schema);

    // The URL is authoritative on load. Reconciling before any signal
    // exists means the first fetch already sees the URL filters.
    if let Some(nav) = controller.on_location_change(&current_search()) {
        apply_navigation(&nav);
    }

    let (filters, set_filters) = signal(controller.filters().clone());
    let (draft, set_draft) = signal(controller.draft().clone());
    controller.store_mut().subscribe(move |state| {
        set_filters.set(state.clone());
    });

    let handle = ListingHandle {
        schema,
        controller: StoredValue::new(controller),
        filters,
        draft,
        set_draft,
        data: RwSignal::new(ListingData::new()),
        refresh_tick: RwSignal::new(0),
        pathname: StoredValue::new(current_pathname()),
    };

    let location = use_location();
    Effect::new(move |prev: Option<()>| {
        location.search.track();
        if prev.is_some() {
            handle.on_location_change();
        }
    });
    let popstate = window_event_listener(ev::popstate, move |_| {
        handle.on_location_change();
    });

    let in_flight = StoredValue::new_local(None::<AbortController>);
    let debounced = use_debounced(filters.into(), schema.debounce_ms);
    Effect::new(move |_| {
        let state = debounced.get();
        handle.refresh_tick.track();
        start_fetch::<T>(handle.data, in_flight, endpoint, schema, state);
    });

    on_cleanup(move || {
        popstate.remove();
        in_flight.try_update_value(|slot| {
            if let Some(controller) = slot.take() {
                controller.abort();
            }
        });
        handle.data.try_update(|d| d.abandon());
    });

    handle
}

fn start_fetch<T>(
    data: RwSignal<ListingData<T>>,
    in_flight: StoredValue<Option<AbortController>, LocalStorage>,
    endpoint: &'static str,
    schema: &'static ListingSchema,
    state: FilterState,
) where
    T: DeserializeOwned + Send + Sync + 'static,
{
    let Some(token) = data.try_update(|d| d.begin_fetch()) else {
        return;
    };

    // A superseded request is useless; abort it instead of letting it finish.
    let abort = AbortController::new().ok();
    let signal = abort.as_ref().map(|c| c.signal());
    in_flight.try_update_value(|slot| {
        if let Some(previous) = std::mem::replace(slot, abort) {
            previous.abort();
        }
    });

    spawn_local(async move {
        let result = fetch_listing::<T>(endpoint, &state, schema, signal.as_ref()).await;
        if let Err(ListingError::RemoteFetch(message)) = &result {
            log::warn!("{}: {}", schema.name, message);
        }
        data.maybe_update(|d| d.complete(token, result));
    });
}

impl<T: Send + Sync + 'static> ListingHandle<T> {
    pub fn schema(&self) -> &'static ListingSchema {
        self.schema
    }

    pub fn filters(&self) -> ReadSignal<FilterState> {
        self.filters
    }

    pub fn draft(&self) -> ReadSignal<DraftState> {
        self.draft
    }

    pub fn data(&self) -> RwSignal<ListingData<T>> {
        self.data
    }

    pub fn edit_draft(&self, field: DraftField, raw: String) {
        self.dispatch(move |c| {
            c.edit_draft(field, raw);
            None
        });
    }

    pub fn submit_draft(&self) {
        self.dispatch(|c| c.submit_draft());
    }

    pub fn select_category(&self, value: String) {
        self.dispatch(move |c| c.select_category(&value));
    }

    pub fn toggle_sort(&self, field: &str) {
        self.dispatch(|c| c.toggle_sort(field));
    }

    pub fn go_to_page(&self, page: u32) {
        self.dispatch(move |c| c.go_to_page(page));
    }

    pub fn apply_patch(&self, patch: FilterPatch) {
        self.dispatch(move |c| c.apply_patch(patch));
    }

    pub fn reset(&self) {
        self.dispatch(|c| c.reset_filters());
    }

    /// Refetches the current page, e.g. after a row was deleted.
    pub fn refresh(&self) {
        self.refresh_tick.update(|n| *n += 1);
    }

    pub fn pagination_view(&self) -> Signal<Option<PaginationView>> {
        let data = self.data;
        let filters = self.filters;
        let page_size = self.schema.page_size;
        Signal::derive(move || {
            let pagination = data.with(|d| d.pagination)?;
            Some(compute_view(&pagination, filters.with(|f| f.page), page_size))
        })
    }

    pub fn active_filter_count(&self) -> Signal<usize> {
        let filters = self.filters;
        Signal::derive(move || filters.with(|f| f.active_filter_count()))
    }

    fn on_location_change(&self) {
        // The router may report the next route's URL before this view is
        // disposed; that URL belongs to someone else.
        let mounted_on = self.pathname.try_get_value().unwrap_or_default();
        if current_pathname() != mounted_on {
            return;
        }
        let search = current_search();
        self.dispatch(move |c| c.on_location_change(&search));
    }

    fn dispatch<F>(&self, f: F)
    where
        F: FnOnce(&mut ListingController) -> Option<Navigation>,
    {
        let outcome = self
            .controller
            .try_update_value(|c| (f(c), c.draft().clone()));
        let Some((navigation, draft)) = outcome else {
            return;
        };
        if self.draft.with_untracked(|current| *current != draft) {
            self.set_draft.set(draft);
        }
        if let Some(nav) = navigation {
            apply_navigation(&nav);
        }
    }
}

fn current_search() -> String {
    web_sys::window()
        .and_then(|w| w.location().search().ok())
        .unwrap_or_default()
}

fn current_pathname() -> String {
    web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_default()
}

fn apply_navigation(nav: &Navigation) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let href = nav.href(&current_pathname());
    let Ok(history) = window.history() else {
        return;
    };
    let result = match nav.mode {
        HistoryMode::Push => history.push_state_with_url(&JsValue::NULL, "", Some(&href)),
        HistoryMode::Replace => history.replace_state_with_url(&JsValue::NULL, "", Some(&href)),
    };
    if let Err(e) = result {
        log::warn!("failed to update history with {}: {:?}", href, e);
    }
}
