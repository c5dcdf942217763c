use super::draft::{DraftField, DraftState};
use super::filter_state::{FilterPatch, FilterState, FilterStore};
use super::schema::{HistoryMode, ListingSchema, SortCycle};
use super::url_sync::{Navigation, UrlSynchronizer};
use contracts::shared::listing::SortOrder;

/// State machine of one listing view.
///
/// Owns the canonical filters, the draft form and the URL synchroniser.
/// Every event that may move the address bar returns the [`Navigation`] to
/// apply; `None` means the URL already shows the current filters.
#[derive(Debug)]
pub struct ListingController {
    schema: &'static ListingSchema,
    store: FilterStore,
    draft: DraftState,
    sync: UrlSynchronizer,
}

impl ListingController {
    pub fn new(schema: &'static ListingSchema) -> Self {
        let store = FilterStore::new();
        let draft = DraftState::from_state(store.state());
        Self {
            schema,
            store,
            draft,
            sync: UrlSynchronizer::new(schema),
        }
    }

    pub fn schema(&self) -> &'static ListingSchema {
        self.schema
    }

    pub fn filters(&self) -> &FilterState {
        self.store.state()
    }

    pub fn draft(&self) -> &DraftState {
        &self.draft
    }

    pub fn store_mut(&mut self) -> &mut FilterStore {
        &mut self.store
    }

    /// Keystroke in a form input. Nothing is committed.
    pub fn edit_draft(&mut self, field: DraftField, raw: impl Into<String>) {
        self.draft.set_field(field, raw);
    }

    /// Form submission: the whole draft becomes the filter state.
    pub fn submit_draft(&mut self) -> Option<Navigation> {
        let patch = self.draft.commit(self.schema);
        self.store.merge_update(patch);
        self.commit(HistoryMode::Replace)
    }

    /// Category (or status) select; `""` selects everything.
    pub fn select_category(&mut self, value: &str) -> Option<Navigation> {
        self.draft.set_field(DraftField::Category, value);
        let patch = self.draft.commit_field(DraftField::Category, self.schema);
        self.store.merge_update(patch);
        self.commit(self.schema.discrete_history)
    }

    /// Click on a sort control. A new field starts ascending; the same field
    /// advances along the listing's [`SortCycle`].
    pub fn toggle_sort(&mut self, field: &str) -> Option<Navigation> {
        if !self.schema.accepts_sort_field(field) {
            log::debug!("{}: `{}` is not sortable", self.schema.name, field);
            return None;
        }
        let state = self.store.state();
        let same_field = state.sort_by.as_deref() == Some(field);
        let (sort_by, sort_order) = match (same_field, state.effective_sort_order()) {
            (true, Some(SortOrder::Asc)) => (Some(field), Some(SortOrder::Desc)),
            (true, Some(SortOrder::Desc)) => match self.schema.sort_cycle {
                SortCycle::Toggle => (Some(field), Some(SortOrder::Asc)),
                SortCycle::TriState => (None, None),
            },
            _ => (Some(field), Some(SortOrder::Asc)),
        };

        self.store
            .merge_update(FilterPatch::sort(sort_by.map(str::to_string), sort_order));
        self.commit(self.schema.discrete_history)
    }

    pub fn go_to_page(&mut self, page: u32) -> Option<Navigation> {
        self.store.merge_update(FilterPatch::page(page.max(1)));
        self.commit(self.schema.discrete_history)
    }

    /// Direct update from a control outside the form, e.g. removing one
    /// filter chip.
    pub fn apply_patch(&mut self, patch: FilterPatch) -> Option<Navigation> {
        if patch.is_empty() {
            return None;
        }
        self.store.merge_update(patch);
        self.commit(self.schema.discrete_history)
    }

    pub fn reset_filters(&mut self) -> Option<Navigation> {
        self.store.reset();
        self.commit(self.schema.discrete_history)
    }

    /// The address bar changed (initial load, back/forward, link, or one of
    /// our own writes). Returns the self-heal rewrite, if any.
    pub fn on_location_change(&mut self, search: &str) -> Option<Navigation> {
        self.sync
            .reconcile(search, &mut self.store, &mut self.draft)
            .write_back
    }

    fn commit(&mut self, mode: HistoryMode) -> Option<Navigation> {
        self.draft.mirror(self.store.state());
        self.sync.navigation_for(self.store.state(), mode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::listing::schema::{ORDERS, PRODUCTS};

    fn loaded(schema: &'static ListingSchema, search: &str) -> ListingController {
        let mut controller = ListingController::new(schema);
        controller.on_location_change(search);
        controller
    }

    #[test]
    fn test_initial_load_writes_page_once() {
        let mut controller = ListingController::new(&PRODUCTS);
        let nav = controller.on_location_change("").expect("write back");
        assert_eq!(nav.query, "page=1");
        assert_eq!(nav.mode, HistoryMode::Replace);
        assert_eq!(controller.on_location_change("?page=1"), None);
    }

    #[test]
    fn test_category_then_page_end_to_end() {
        let mut controller = loaded(&PRODUCTS, "?page=1");

        let nav = controller.select_category("tablets").expect("navigation");
        assert_eq!(nav.query, "category=tablets&page=1");
        assert_eq!(nav.mode, HistoryMode::Push);
        assert_eq!(controller.on_location_change(&nav.query), None);

        let nav = controller.go_to_page(2).expect("navigation");
        assert_eq!(nav.query, "category=tablets&page=2");
        assert_eq!(controller.filters().page, 2);
        assert_eq!(controller.draft().page, "2");
    }

    #[test]
    fn test_submit_draft_replaces_and_resets_page() {
        let mut controller = loaded(&PRODUCTS, "?page=4");
        controller.edit_draft(DraftField::SearchTerm, "galaxy");
        controller.edit_draft(DraftField::MinPrice, "-");
        assert_eq!(controller.filters().search_term, None);

        let nav = controller.submit_draft().expect("navigation");
        assert_eq!(nav.query, "searchTerm=galaxy&page=1");
        assert_eq!(nav.mode, HistoryMode::Replace);
        assert_eq!(controller.draft().min_price, "");
    }

    #[test]
    fn test_resubmitting_same_draft_resets_page_only() {
        let mut controller = loaded(&PRODUCTS, "?category=tablets&page=3");
        let nav = controller.submit_draft().expect("navigation");
        assert_eq!(nav.query, "category=tablets&page=1");
        assert_eq!(controller.submit_draft(), None);
    }

    #[test]
    fn test_tri_state_sort_cycle() {
        let mut controller = loaded(&PRODUCTS, "?page=2");
        let queries: Vec<String> = (0..3)
            .filter_map(|_| controller.toggle_sort("price"))
            .map(|nav| nav.query)
            .collect();
        assert_eq!(
            queries,
            vec![
                "sortBy=price&sortOrder=asc&page=1",
                "sortBy=price&sortOrder=desc&page=1",
                "page=1",
            ]
        );
    }

    #[test]
    fn test_toggle_sort_cycle() {
        let mut controller = loaded(&ORDERS, "?page=1");
        controller.toggle_sort("total");
        controller.toggle_sort("total");
        let nav = controller.toggle_sort("total").expect("navigation");
        assert_eq!(nav.query, "sortBy=total&sortOrder=asc&page=1");

        let nav = controller.toggle_sort("createdAt").expect("navigation");
        assert_eq!(nav.query, "sortBy=createdAt&sortOrder=asc&page=1");
    }

    #[test]
    fn test_sort_outside_allow_list_is_ignored() {
        let mut controller = loaded(&PRODUCTS, "?page=1");
        assert_eq!(controller.toggle_sort("stock"), None);
        assert_eq!(controller.filters().sort_by, None);
    }

    #[test]
    fn test_invalid_category_select_clears() {
        let mut controller = loaded(&PRODUCTS, "?category=tablets&page=1");
        let nav = controller.select_category("bogus").expect("navigation");
        assert_eq!(nav.query, "page=1");
        assert_eq!(controller.draft().category, "");
    }

    #[test]
    fn test_back_navigation_restores_filters() {
        let mut controller = loaded(&PRODUCTS, "?page=1");
        controller.select_category("accessories");
        controller.go_to_page(3);

        assert_eq!(controller.on_location_change("?category=accessories&page=1"), None);
        assert_eq!(controller.filters().page, 1);
        assert_eq!(controller.filters().category.as_deref(), Some("accessories"));
    }

    #[test]
    fn test_reset_filters() {
        let mut controller = loaded(&ORDERS, "?status=shipped&minTotal=10&page=5");
        let nav = controller.reset_filters().expect("navigation");
        assert_eq!(nav.query, "page=1");
        assert_eq!(controller.filters(), &FilterState::default());
        assert_eq!(controller.reset_filters(), None);
    }

    #[test]
    fn test_apply_patch_clears_single_filter() {
        let mut controller = loaded(&PRODUCTS, "?category=tablets&searchTerm=ipad&page=2");
        let nav = controller
            .apply_patch(FilterPatch::category(None))
            .expect("navigation");
        assert_eq!(nav.query, "searchTerm=ipad&page=1");
        assert_eq!(controller.draft().category, "");
        assert_eq!(controller.apply_patch(FilterPatch::default()), None);
    }

    #[test]
    fn test_go_to_page_zero_is_first_page() {
        let mut controller = loaded(&PRODUCTS, "?page=3");
        let nav = controller.go_to_page(0).expect("navigation");
        assert_eq!(nav.query, "page=1");
    }

    #[test]
    fn test_huge_url_page_renders_last_page() {
        use crate::shared::listing::pagination::compute_view;
        use contracts::shared::listing::PaginationInfo;

        let controller = loaded(&PRODUCTS, "?page=1e12");
        assert_eq!(controller.filters().page, u32::MAX);

        let view = compute_view(&PaginationInfo::RawCount { count: 200 }, controller.filters().page, 10);
        assert_eq!(view.current_page, 20);
        assert!(view.is_next_disabled);
    }
}
