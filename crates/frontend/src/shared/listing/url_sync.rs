//! Address bar <-> filter state translation.

use super::draft::DraftState;
use super::error::QueryParamError;
use super::filter_state::{FilterPatch, FilterState, FilterStore};
use super::schema::{
    HistoryMode, ListingSchema, PAGE_KEY, SEARCH_KEY, SORT_BY_KEY, SORT_ORDER_KEY,
};
use super::values::{absorb, format_number, non_empty, parse_finite, parse_page};
use contracts::shared::listing::SortOrder;

/// Result of parsing a query string
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedQuery {
    /// Every key is set: missing parameters mean "absent", not "unchanged".
    pub candidate: FilterPatch,
    /// Whether the query carried a `page` parameter at all
    pub has_page: bool,
}

/// Parses `location.search` (with or without the leading `?`).
///
/// Never fails. Unknown keys are ignored, each known key falls back on its
/// own: an unknown category keeps the category of `current`, a bad sort
/// order or number becomes absent, a bad or missing page becomes 1.
pub fn parse_query(query: &str, current: &FilterState, schema: &ListingSchema) -> ParsedQuery {
    let pairs = decode_pairs(query);
    let get = |key: &str| {
        pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    };

    let category = match get(schema.keys.category).and_then(non_empty) {
        None => None,
        Some(value) if schema.accepts_category(value) => Some(value.to_string()),
        Some(value) => {
            log::debug!(
                "{}; keeping {:?}",
                QueryParamError::NotAllowed {
                    key: schema.keys.category.to_string(),
                    raw: value.to_string(),
                },
                current.category
            );
            current.category.clone()
        }
    };

    let sort_by = get(SORT_BY_KEY)
        .and_then(non_empty)
        .filter(|value| {
            let allowed = schema.accepts_sort_field(value);
            if !allowed {
                log::debug!(
                    "{}",
                    QueryParamError::NotAllowed {
                        key: SORT_BY_KEY.to_string(),
                        raw: value.to_string(),
                    }
                );
            }
            allowed
        })
        .map(str::to_string);

    let sort_order = match (&sort_by, get(SORT_ORDER_KEY)) {
        (Some(_), Some(raw)) => SortOrder::from_code(raw),
        _ => None,
    };

    let number = |key: &str| get(key).and_then(|raw| absorb(parse_finite(key, raw), None));

    let page_raw = get(PAGE_KEY);
    let page = page_raw
        .map(|raw| absorb(parse_page(PAGE_KEY, raw), 1))
        .unwrap_or(1);

    ParsedQuery {
        candidate: FilterPatch {
            search_term: Some(get(SEARCH_KEY).and_then(non_empty).map(str::to_string)),
            category: Some(category),
            min_price: Some(number(schema.keys.min)),
            max_price: Some(number(schema.keys.max)),
            sort_by: Some(sort_by),
            sort_order: Some(sort_order),
            page: Some(page),
        },
        has_page: page_raw.is_some(),
    }
}

/// Serialises the state in the fixed key order
/// `category, searchTerm, min, max, sortBy, sortOrder, page`, skipping absent
/// values. `page` is always written.
pub fn serialize_query(state: &FilterState, schema: &ListingSchema) -> String {
    let mut pairs: Vec<(&str, String)> = Vec::with_capacity(7);

    if let Some(category) = state.category.as_deref().and_then(non_empty) {
        pairs.push((schema.keys.category, category.to_string()));
    }
    if let Some(search) = state.search_term.as_deref().and_then(non_empty) {
        pairs.push((SEARCH_KEY, search.to_string()));
    }
    if let Some(min) = state.min_price {
        pairs.push((schema.keys.min, format_number(min)));
    }
    if let Some(max) = state.max_price {
        pairs.push((schema.keys.max, format_number(max)));
    }
    if let Some(sort_by) = state.sort_by.as_deref().and_then(non_empty) {
        pairs.push((SORT_BY_KEY, sort_by.to_string()));
        if let Some(order) = state.sort_order {
            pairs.push((SORT_ORDER_KEY, order.code().to_string()));
        }
    }
    pairs.push((PAGE_KEY, state.page.max(1).to_string()));

    pairs
        .iter()
        .map(|(key, value)| format!("{}={}", key, urlencoding::encode(value)))
        .collect::<Vec<_>>()
        .join("&")
}

/// Two queries are equivalent when they are the same string once the
/// leading `?` is dropped.
pub fn equivalent(a: &str, b: &str) -> bool {
    strip_question_mark(a) == strip_question_mark(b)
}

fn strip_question_mark(query: &str) -> &str {
    query.strip_prefix('?').unwrap_or(query)
}

/// Splits `a=1&b=x+y` into decoded pairs. A pair whose encoding is broken is
/// dropped on its own; the rest of the query still counts.
fn decode_pairs(query: &str) -> Vec<(String, String)> {
    strip_question_mark(query)
        .split('&')
        .filter(|pair| !pair.is_empty())
        .filter_map(|pair| {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            match (decode_component(key), decode_component(value)) {
                (Some(key), Some(value)) => Some((key, value)),
                _ => {
                    log::debug!(
                        "{}",
                        QueryParamError::Malformed {
                            pair: pair.to_string()
                        }
                    );
                    None
                }
            }
        })
        .collect()
}

fn decode_component(raw: &str) -> Option<String> {
    urlencoding::decode(&raw.replace('+', " "))
        .ok()
        .map(|value| value.into_owned())
}

/// A URL rewrite requested by the state machine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation {
    /// Query string without the leading `?`
    pub query: String,
    pub mode: HistoryMode,
}

impl Navigation {
    pub fn href(&self, pathname: &str) -> String {
        format!("{}?{}", pathname, self.query)
    }
}

/// Outcome of [`UrlSynchronizer::reconcile`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reconciliation {
    /// The URL carried filters different from the canonical state
    pub filters_changed: bool,
    /// Self-heal rewrite when the URL lacked `page`
    pub write_back: Option<Navigation>,
}

/// Keeps the address bar and the [`FilterStore`] in step.
///
/// Remembers the last query it has seen or written, so writing a URL that
/// is already in the address bar is skipped.
#[derive(Debug, Clone)]
pub struct UrlSynchronizer {
    schema: &'static ListingSchema,
    current_query: Option<String>,
}

impl UrlSynchronizer {
    pub fn new(schema: &'static ListingSchema) -> Self {
        Self {
            schema,
            current_query: None,
        }
    }

    pub fn current_query(&self) -> Option<&str> {
        self.current_query.as_deref()
    }

    /// Filter state -> URL. Returns `None` when the serialised state is
    /// equivalent to what the address bar already shows.
    pub fn navigation_for(&mut self, state: &FilterState, mode: HistoryMode) -> Option<Navigation> {
        let query = serialize_query(state, self.schema);
        if self
            .current_query
            .as_deref()
            .is_some_and(|current| equivalent(current, &query))
        {
            return None;
        }
        self.current_query = Some(query.clone());
        Some(Navigation { query, mode })
    }

    /// URL -> filter state, run on every observed URL change.
    ///
    /// 1. parse the URL into a candidate;
    /// 2. compare it field-wise with the canonical state;
    /// 3. mirror the candidate into the draft unconditionally;
    /// 4. on difference, merge it with the URL page kept verbatim;
    /// 5. if the URL had no `page`, ask for a one-off replace write-back.
    ///
    /// Re-running this on a URL produced by [`Self::navigation_for`] or by a
    /// write-back is a no-op.
    pub fn reconcile(
        &mut self,
        search: &str,
        store: &mut FilterStore,
        draft: &mut DraftState,
    ) -> Reconciliation {
        let query = strip_question_mark(search);
        self.current_query = Some(query.to_string());

        let parsed = parse_query(query, store.state(), self.schema);
        let filters_changed = parsed.candidate.differs_from(store.state());

        draft.mirror(&parsed.candidate.apply_to(store.state()));

        if filters_changed {
            log::debug!("{}: filters taken from URL `{}`", self.schema.name, query);
            store.apply_url_candidate(parsed.candidate);
        }

        let write_back = if parsed.has_page {
            None
        } else {
            self.navigation_for(store.state(), HistoryMode::Replace)
        };

        Reconciliation {
            filters_changed,
            write_back,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::listing::schema::{ORDERS, PRODUCTS};

    fn tablets() -> FilterState {
        FilterState {
            category: Some("tablets".to_string()),
            ..FilterState::default()
        }
    }

    fn parse_state(query: &str, current: &FilterState) -> FilterState {
        parse_query(query, current, &PRODUCTS)
            .candidate
            .apply_to(current)
    }

    #[test]
    fn test_serialize_key_order() {
        let state = FilterState {
            search_term: Some("galaxy tab".to_string()),
            category: Some("tablets".to_string()),
            min_price: Some(100.0),
            max_price: Some(499.5),
            sort_by: Some("price".to_string()),
            sort_order: Some(SortOrder::Desc),
            page: 3,
        };
        assert_eq!(
            serialize_query(&state, &PRODUCTS),
            "category=tablets&searchTerm=galaxy%20tab&minPrice=100&maxPrice=499.5&sortBy=price&sortOrder=desc&page=3"
        );
    }

    #[test]
    fn test_serialize_default_only_has_page() {
        assert_eq!(serialize_query(&FilterState::default(), &PRODUCTS), "page=1");
    }

    #[test]
    fn test_serialize_skips_sort_order_without_sort_by() {
        let state = FilterState {
            sort_order: Some(SortOrder::Asc),
            ..FilterState::default()
        };
        assert_eq!(serialize_query(&state, &PRODUCTS), "page=1");
    }

    #[test]
    fn test_serialize_uses_listing_keys() {
        let state = FilterState {
            category: Some("shipped".to_string()),
            min_price: Some(50.0),
            sort_by: Some("createdAt".to_string()),
            sort_order: Some(SortOrder::Desc),
            ..FilterState::default()
        };
        assert_eq!(
            serialize_query(&state, &ORDERS),
            "status=shipped&minTotal=50&sortBy=createdAt&sortOrder=desc&page=1"
        );
    }

    #[test]
    fn test_round_trip() {
        let states = vec![
            FilterState::default(),
            tablets(),
            FilterState {
                search_term: Some("a&b=c ü+".to_string()),
                category: Some("accessories".to_string()),
                min_price: Some(-5.25),
                max_price: Some(1e6),
                sort_by: Some("price".to_string()),
                sort_order: Some(SortOrder::Asc),
                page: 12,
            },
            FilterState {
                min_price: Some(900.0),
                max_price: Some(100.0),
                ..FilterState::default()
            },
        ];
        for state in states {
            let query = serialize_query(&state, &PRODUCTS);
            assert_eq!(parse_state(&query, &FilterState::default()), state, "{}", query);
        }
    }

    #[test]
    fn test_invalid_category_keeps_current() {
        let parsed = parse_state("?category=bogus", &tablets());
        assert_eq!(parsed.category.as_deref(), Some("tablets"));
    }

    #[test]
    fn test_missing_category_clears() {
        let parsed = parse_state("?page=1", &tablets());
        assert_eq!(parsed.category, None);
    }

    #[test]
    fn test_sort_order_must_be_exact() {
        let parsed = parse_state("sortBy=price&sortOrder=DESC", &FilterState::default());
        assert_eq!(parsed.sort_by.as_deref(), Some("price"));
        assert_eq!(parsed.sort_order, None);

        let parsed = parse_state("sortOrder=desc", &FilterState::default());
        assert_eq!(parsed.sort_order, None);
    }

    #[test]
    fn test_sort_field_outside_allow_list() {
        let parsed = parse_state("sortBy=total&sortOrder=asc", &FilterState::default());
        assert_eq!(parsed.sort_by, None);
        assert_eq!(parsed.sort_order, None);
    }

    #[test]
    fn test_bad_values_fall_back_per_field() {
        let parsed = parse_state(
            "minPrice=abc&maxPrice=Infinity&page=-2&searchTerm=ok&bad=%zz&unknown=1",
            &FilterState::default(),
        );
        assert_eq!(parsed.min_price, None);
        assert_eq!(parsed.max_price, None);
        assert_eq!(parsed.page, 1);
        assert_eq!(parsed.search_term.as_deref(), Some("ok"));
    }

    #[test]
    fn test_page_parsing() {
        let page = |q: &str| parse_query(q, &FilterState::default(), &PRODUCTS);
        assert_eq!(page("page=4.9").candidate.page, Some(4));
        assert_eq!(page("page=0").candidate.page, Some(1));
        assert_eq!(page("page=x").candidate.page, Some(1));
        assert!(page("page=x").has_page);
        assert_eq!(page("").candidate.page, Some(1));
        assert!(!page("").has_page);
    }

    #[test]
    fn test_plus_decodes_to_space() {
        let parsed = parse_state("searchTerm=galaxy+tab", &FilterState::default());
        assert_eq!(parsed.search_term.as_deref(), Some("galaxy tab"));
    }

    #[test]
    fn test_equivalent() {
        assert!(equivalent("?page=1", "page=1"));
        assert!(!equivalent("page=1", "page=2"));
    }

    #[test]
    fn test_navigation_skipped_when_equivalent() {
        let mut sync = UrlSynchronizer::new(&PRODUCTS);
        let mut store = FilterStore::new();
        let mut draft = DraftState::default();
        sync.reconcile("?page=1", &mut store, &mut draft);

        assert_eq!(sync.navigation_for(store.state(), HistoryMode::Push), None);

        let nav = sync
            .navigation_for(&tablets(), HistoryMode::Push)
            .expect("navigation");
        assert_eq!(nav.query, "category=tablets&page=1");
        assert_eq!(nav.href("/products"), "/products?category=tablets&page=1");
        assert_eq!(sync.navigation_for(&tablets(), HistoryMode::Push), None);
    }

    #[test]
    fn test_reconcile_applies_url_page_verbatim() {
        let mut sync = UrlSynchronizer::new(&PRODUCTS);
        let mut store = FilterStore::new();
        let mut draft = DraftState::default();

        let outcome = sync.reconcile("?category=tablets&page=3", &mut store, &mut draft);
        assert!(outcome.filters_changed);
        assert_eq!(outcome.write_back, None);
        assert_eq!(store.state().page, 3);
        assert_eq!(store.state().category.as_deref(), Some("tablets"));
        assert_eq!(draft.category, "tablets");
        assert_eq!(draft.page, "3");
    }

    #[test]
    fn test_reconcile_self_heals_missing_page_once() {
        let mut sync = UrlSynchronizer::new(&PRODUCTS);
        let mut store = FilterStore::new();
        let mut draft = DraftState::default();

        let outcome = sync.reconcile("?category=tablets", &mut store, &mut draft);
        let write_back = outcome.write_back.expect("write back");
        assert_eq!(write_back.query, "category=tablets&page=1");
        assert_eq!(write_back.mode, HistoryMode::Replace);

        // The rewritten URL is observed again: nothing left to do.
        let again = sync.reconcile(&write_back.query, &mut store, &mut draft);
        assert!(!again.filters_changed);
        assert_eq!(again.write_back, None);
    }

    #[test]
    fn test_reconcile_without_changes_still_mirrors_draft() {
        let mut sync = UrlSynchronizer::new(&PRODUCTS);
        let mut store = FilterStore::with_state(tablets());
        let mut draft = DraftState::from_state(&tablets());
        draft.search_term = "half-typed".to_string();

        let outcome = sync.reconcile("category=tablets&page=1", &mut store, &mut draft);
        assert!(!outcome.filters_changed);
        assert_eq!(draft.search_term, "");
    }

    #[test]
    fn test_reconcile_own_write_is_noop() {
        let mut sync = UrlSynchronizer::new(&PRODUCTS);
        let mut store = FilterStore::new();
        let mut draft = DraftState::default();
        sync.reconcile("page=1", &mut store, &mut draft);

        store.merge_update(FilterPatch::category(Some("accessories".to_string())));
        let nav = sync
            .navigation_for(store.state(), HistoryMode::Replace)
            .expect("navigation");

        let before = store.state().clone();
        let outcome = sync.reconcile(&format!("?{}", nav.query), &mut store, &mut draft);
        assert!(!outcome.filters_changed);
        assert_eq!(outcome.write_back, None);
        assert_eq!(store.state(), &before);
    }
}
