use contracts::shared::listing::SortOrder;

/// Canonical query parameters of one listing view.
///
/// `category` holds the value of the listing's category-like filter (the
/// product category or the order status). `sort_order` has no meaning while
/// `sort_by` is absent and is ignored everywhere in that case.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterState {
    pub search_term: Option<String>,
    pub category: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub sort_by: Option<String>,
    pub sort_order: Option<SortOrder>,
    pub page: u32,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            search_term: None,
            category: None,
            min_price: None,
            max_price: None,
            sort_by: None,
            sort_order: None,
            page: 1,
        }
    }
}

impl FilterState {
    /// Sort direction that actually applies, `None` while unsorted.
    pub fn effective_sort_order(&self) -> Option<SortOrder> {
        self.sort_by.as_ref().and(self.sort_order)
    }

    /// Number of narrowing filters in effect (sorting and paging excluded),
    /// shown as a badge on the filter panel.
    pub fn active_filter_count(&self) -> usize {
        [
            self.search_term.is_some(),
            self.category.is_some(),
            self.min_price.is_some(),
            self.max_price.is_some(),
        ]
        .iter()
        .filter(|active| **active)
        .count()
    }
}

/// Partial update of a [`FilterState`].
///
/// The outer `Option` says whether the key is part of the update at all;
/// `Some(None)` explicitly clears the value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterPatch {
    pub search_term: Option<Option<String>>,
    pub category: Option<Option<String>>,
    pub min_price: Option<Option<f64>>,
    pub max_price: Option<Option<f64>>,
    pub sort_by: Option<Option<String>>,
    pub sort_order: Option<Option<SortOrder>>,
    pub page: Option<u32>,
}

impl FilterPatch {
    /// Patch that sets every key to the value it has in `state`.
    pub fn full(state: &FilterState) -> Self {
        Self {
            search_term: Some(state.search_term.clone()),
            category: Some(state.category.clone()),
            min_price: Some(state.min_price),
            max_price: Some(state.max_price),
            sort_by: Some(state.sort_by.clone()),
            sort_order: Some(state.sort_order),
            page: Some(state.page),
        }
    }

    pub fn page(page: u32) -> Self {
        Self {
            page: Some(page),
            ..Self::default()
        }
    }

    pub fn category(category: Option<String>) -> Self {
        Self {
            category: Some(category),
            ..Self::default()
        }
    }

    pub fn sort(sort_by: Option<String>, sort_order: Option<SortOrder>) -> Self {
        Self {
            sort_by: Some(sort_by),
            sort_order: Some(sort_order),
            ..Self::default()
        }
    }

    /// True when any key other than `page` is part of the update.
    pub fn touches_filters(&self) -> bool {
        self.search_term.is_some()
            || self.category.is_some()
            || self.min_price.is_some()
            || self.max_price.is_some()
            || self.sort_by.is_some()
            || self.sort_order.is_some()
    }

    pub fn is_empty(&self) -> bool {
        !self.touches_filters() && self.page.is_none()
    }

    /// Plain shallow merge, no page reset.
    pub fn apply_to(&self, state: &FilterState) -> FilterState {
        FilterState {
            search_term: pick(&self.search_term, &state.search_term),
            category: pick(&self.category, &state.category),
            min_price: pick(&self.min_price, &state.min_price),
            max_price: pick(&self.max_price, &state.max_price),
            sort_by: pick(&self.sort_by, &state.sort_by),
            sort_order: pick(&self.sort_order, &state.sort_order),
            page: self.page.unwrap_or(state.page).max(1),
        }
    }

    /// Field-wise comparison of the keys this patch carries.
    pub fn differs_from(&self, state: &FilterState) -> bool {
        self.apply_to(state) != *state
    }
}

fn pick<T: Clone>(update: &Option<T>, current: &T) -> T {
    match update {
        Some(value) => value.clone(),
        None => current.clone(),
    }
}

/// Handle returned by [`FilterStore::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubscriptionId(usize);

type Listener = Box<dyn Fn(&FilterState) + Send + Sync>;

/// Owner of the canonical [`FilterState`] of one listing view.
///
/// Created per view and passed explicitly; listeners are notified after
/// every update that changes the state.
#[derive(Default)]
pub struct FilterStore {
    state: FilterState,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_id: usize,
}

impl std::fmt::Debug for FilterStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FilterStore")
            .field("state", &self.state)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl FilterStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_state(state: FilterState) -> Self {
        Self {
            state,
            ..Self::default()
        }
    }

    pub fn state(&self) -> &FilterState {
        &self.state
    }

    pub fn subscribe(&mut self, listener: impl Fn(&FilterState) + Send + Sync + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) {
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
    }

    /// Shallow merge of a user-driven update.
    ///
    /// Keys present in `patch` overwrite, omitted keys are kept. Unless the
    /// patch touches only `page`, the resulting page is 1.
    pub fn merge_update(&mut self, patch: FilterPatch) -> FilterState {
        let mut next = patch.apply_to(&self.state);
        if patch.touches_filters() {
            next.page = 1;
        }
        self.replace(next)
    }

    /// Merge of a candidate parsed from the address bar: the page from the
    /// URL is kept verbatim.
    pub fn apply_url_candidate(&mut self, candidate: FilterPatch) -> FilterState {
        let next = candidate.apply_to(&self.state);
        self.replace(next)
    }

    pub fn reset(&mut self) -> FilterState {
        self.replace(FilterState::default())
    }

    /// Listeners hear about a state that actually changed; a no-op update
    /// is silent.
    fn replace(&mut self, next: FilterState) -> FilterState {
        if next != self.state {
            self.state = next;
            for (_, listener) in &self.listeners {
                listener(&self.state);
            }
        }
        self.state.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn sample() -> FilterState {
        FilterState {
            search_term: Some("phone".to_string()),
            category: Some("smartphone".to_string()),
            min_price: Some(100.0),
            max_price: Some(900.0),
            sort_by: Some("price".to_string()),
            sort_order: Some(SortOrder::Asc),
            page: 4,
        }
    }

    #[test]
    fn test_default_state() {
        let state = FilterState::default();
        assert_eq!(state.page, 1);
        assert_eq!(state.active_filter_count(), 0);
        assert_eq!(state.effective_sort_order(), None);
    }

    #[test]
    fn test_merge_preserves_untouched_fields() {
        let mut store = FilterStore::with_state(sample());
        let result = store.merge_update(FilterPatch {
            max_price: Some(Some(500.0)),
            ..FilterPatch::default()
        });

        let expected = FilterState {
            max_price: Some(500.0),
            page: 1,
            ..sample()
        };
        assert_eq!(result, expected);
    }

    #[test]
    fn test_explicit_clear_overwrites() {
        let mut store = FilterStore::with_state(sample());
        let result = store.merge_update(FilterPatch::category(None));
        assert_eq!(result.category, None);
        assert_eq!(result.search_term.as_deref(), Some("phone"));
        assert_eq!(result.page, 1);
    }

    #[test]
    fn test_page_reset_on_any_filter_touch() {
        let patches = vec![
            FilterPatch {
                search_term: Some(Some("tab".to_string())),
                ..FilterPatch::default()
            },
            FilterPatch::category(Some("tablets".to_string())),
            FilterPatch {
                min_price: Some(None),
                ..FilterPatch::default()
            },
            FilterPatch::sort(None, None),
            // Same value as before still counts as a filter update.
            FilterPatch::category(Some("smartphone".to_string())),
            FilterPatch {
                page: Some(7),
                ..FilterPatch::category(Some("tablets".to_string()))
            },
        ];

        for patch in patches {
            let mut store = FilterStore::with_state(sample());
            assert_eq!(store.merge_update(patch.clone()).page, 1, "{:?}", patch);
        }
    }

    #[test]
    fn test_page_only_update_keeps_page() {
        let mut store = FilterStore::with_state(sample());
        let result = store.merge_update(FilterPatch::page(2));
        assert_eq!(result, FilterState { page: 2, ..sample() });
    }

    #[test]
    fn test_page_is_at_least_one() {
        let mut store = FilterStore::with_state(sample());
        assert_eq!(store.merge_update(FilterPatch::page(0)).page, 1);
    }

    #[test]
    fn test_url_candidate_keeps_page() {
        let mut store = FilterStore::new();
        let candidate = FilterPatch {
            page: Some(3),
            ..FilterPatch::category(Some("tablets".to_string()))
        };
        let result = store.apply_url_candidate(candidate);
        assert_eq!(result.page, 3);
        assert_eq!(result.category.as_deref(), Some("tablets"));
    }

    #[test]
    fn test_sort_order_ignored_without_sort_by() {
        let state = FilterState {
            sort_order: Some(SortOrder::Desc),
            ..FilterState::default()
        };
        assert_eq!(state.effective_sort_order(), None);
    }

    #[test]
    fn test_differs_from() {
        let state = sample();
        assert!(!FilterPatch::full(&state).differs_from(&state));
        assert!(!FilterPatch::default().differs_from(&state));
        assert!(FilterPatch::page(1).differs_from(&state));
    }

    #[test]
    fn test_listeners_notified_on_change_only() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut store = FilterStore::new();
        let counter = calls.clone();
        let id = store.subscribe(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        store.merge_update(FilterPatch::category(Some("tablets".to_string())));
        store.merge_update(FilterPatch::category(Some("tablets".to_string())));
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        store.unsubscribe(id);
        store.merge_update(FilterPatch::page(2));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_noop_reset_is_silent() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut store = FilterStore::new();
        let counter = calls.clone();
        store.subscribe(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        store.reset();
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        store.merge_update(FilterPatch::page(3));
        store.reset();
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_active_filter_count() {
        assert_eq!(sample().active_filter_count(), 4);
    }
}
