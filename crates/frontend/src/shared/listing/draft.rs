use super::filter_state::{FilterPatch, FilterState};
use super::schema::{ListingSchema, PAGE_KEY, SEARCH_KEY, SORT_BY_KEY, SORT_ORDER_KEY};
use super::values::{absorb, format_number, non_empty, parse_finite, parse_page};
use super::error::QueryParamError;
use contracts::shared::listing::SortOrder;

/// Form inputs of a listing view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DraftField {
    SearchTerm,
    Category,
    MinPrice,
    MaxPrice,
    SortBy,
    SortOrder,
    Page,
}

impl DraftField {
    pub fn all() -> [DraftField; 7] {
        [
            DraftField::SearchTerm,
            DraftField::Category,
            DraftField::MinPrice,
            DraftField::MaxPrice,
            DraftField::SortBy,
            DraftField::SortOrder,
            DraftField::Page,
        ]
    }

    /// Query-string name of the field for the given listing
    pub fn key(&self, schema: &ListingSchema) -> &'static str {
        match self {
            DraftField::SearchTerm => SEARCH_KEY,
            DraftField::Category => schema.keys.category,
            DraftField::MinPrice => schema.keys.min,
            DraftField::MaxPrice => schema.keys.max,
            DraftField::SortBy => SORT_BY_KEY,
            DraftField::SortOrder => SORT_ORDER_KEY,
            DraftField::Page => PAGE_KEY,
        }
    }
}

/// Uncommitted, per-keystroke copy of the filter inputs.
///
/// Every value is raw text so half-typed input (`-`, `1e`) survives until
/// the form is submitted. Never sent over the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DraftState {
    pub search_term: String,
    pub category: String,
    pub min_price: String,
    pub max_price: String,
    pub sort_by: String,
    pub sort_order: String,
    pub page: String,
}

impl DraftState {
    pub fn from_state(state: &FilterState) -> Self {
        let mut draft = Self::default();
        draft.mirror(state);
        draft
    }

    /// Overwrites every field with the text form of `state`.
    pub fn mirror(&mut self, state: &FilterState) {
        self.search_term = state.search_term.clone().unwrap_or_default();
        self.category = state.category.clone().unwrap_or_default();
        self.min_price = state.min_price.map(format_number).unwrap_or_default();
        self.max_price = state.max_price.map(format_number).unwrap_or_default();
        self.sort_by = state.sort_by.clone().unwrap_or_default();
        self.sort_order = state
            .effective_sort_order()
            .map(|order| order.code().to_string())
            .unwrap_or_default();
        self.page = state.page.to_string();
    }

    /// Stores the text verbatim; nothing is parsed at keystroke time.
    pub fn set_field(&mut self, field: DraftField, raw: impl Into<String>) {
        *self.field_mut(field) = raw.into();
    }

    pub fn field(&self, field: DraftField) -> &str {
        match field {
            DraftField::SearchTerm => &self.search_term,
            DraftField::Category => &self.category,
            DraftField::MinPrice => &self.min_price,
            DraftField::MaxPrice => &self.max_price,
            DraftField::SortBy => &self.sort_by,
            DraftField::SortOrder => &self.sort_order,
            DraftField::Page => &self.page,
        }
    }

    fn field_mut(&mut self, field: DraftField) -> &mut String {
        match field {
            DraftField::SearchTerm => &mut self.search_term,
            DraftField::Category => &mut self.category,
            DraftField::MinPrice => &mut self.min_price,
            DraftField::MaxPrice => &mut self.max_price,
            DraftField::SortBy => &mut self.sort_by,
            DraftField::SortOrder => &mut self.sort_order,
            DraftField::Page => &mut self.page,
        }
    }

    /// Parses the whole form (form submission). `page` is not part of the
    /// result, so committing always lands on the first page.
    pub fn commit(&self, schema: &ListingSchema) -> FilterPatch {
        let mut patch = FilterPatch::default();
        for field in DraftField::all() {
            if field != DraftField::Page {
                self.commit_into(field, schema, &mut patch);
            }
        }
        patch
    }

    /// Parses a single field, used by discrete controls that apply
    /// immediately (category select, sort toggle, page buttons).
    pub fn commit_field(&self, field: DraftField, schema: &ListingSchema) -> FilterPatch {
        let mut patch = FilterPatch::default();
        self.commit_into(field, schema, &mut patch);
        patch
    }

    fn commit_into(&self, field: DraftField, schema: &ListingSchema, patch: &mut FilterPatch) {
        let key = field.key(schema);
        let raw = self.field(field);
        match field {
            DraftField::SearchTerm => {
                patch.search_term = Some(non_empty(raw).map(str::to_string));
            }
            DraftField::Category => {
                let value = non_empty(raw).and_then(|value| {
                    if schema.accepts_category(value) {
                        Some(value.to_string())
                    } else {
                        log::debug!("{}", not_allowed(key, value));
                        None
                    }
                });
                patch.category = Some(value);
            }
            DraftField::MinPrice => {
                patch.min_price = Some(absorb(parse_finite(key, raw), None));
            }
            DraftField::MaxPrice => {
                patch.max_price = Some(absorb(parse_finite(key, raw), None));
            }
            DraftField::SortBy => {
                let value = non_empty(raw).and_then(|value| {
                    if schema.accepts_sort_field(value) {
                        Some(value.to_string())
                    } else {
                        log::debug!("{}", not_allowed(key, value));
                        None
                    }
                });
                patch.sort_by = Some(value);
            }
            DraftField::SortOrder => {
                patch.sort_order = Some(SortOrder::from_code(raw.trim()));
            }
            DraftField::Page => {
                if let Some(page) = absorb(parse_page(key, raw).map(Some), None) {
                    patch.page = Some(page);
                }
            }
        }
    }
}

fn not_allowed(key: &str, raw: &str) -> QueryParamError {
    QueryParamError::NotAllowed {
        key: key.to_string(),
        raw: raw.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::listing::schema::{ORDERS, PRODUCTS};

    #[test]
    fn test_set_field_stores_verbatim() {
        let mut draft = DraftState::default();
        draft.set_field(DraftField::MinPrice, "-");
        draft.set_field(DraftField::SearchTerm, "  gal");
        assert_eq!(draft.field(DraftField::MinPrice), "-");
        assert_eq!(draft.field(DraftField::SearchTerm), "  gal");
    }

    #[test]
    fn test_commit_parses_fields() {
        let mut draft = DraftState::default();
        draft.set_field(DraftField::SearchTerm, "galaxy");
        draft.set_field(DraftField::Category, "tablets");
        draft.set_field(DraftField::MinPrice, "10.5");
        draft.set_field(DraftField::MaxPrice, "");
        draft.set_field(DraftField::SortBy, "price");
        draft.set_field(DraftField::SortOrder, "desc");

        let patch = draft.commit(&PRODUCTS);
        assert_eq!(patch.search_term, Some(Some("galaxy".to_string())));
        assert_eq!(patch.category, Some(Some("tablets".to_string())));
        assert_eq!(patch.min_price, Some(Some(10.5)));
        assert_eq!(patch.max_price, Some(None));
        assert_eq!(patch.sort_by, Some(Some("price".to_string())));
        assert_eq!(patch.sort_order, Some(Some(SortOrder::Desc)));
        assert_eq!(patch.page, None);
    }

    #[test]
    fn test_commit_coerces_bad_numbers_to_absent() {
        let mut draft = DraftState::default();
        draft.set_field(DraftField::MinPrice, "-");
        draft.set_field(DraftField::MaxPrice, "NaN");
        let patch = draft.commit(&PRODUCTS);
        assert_eq!(patch.min_price, Some(None));
        assert_eq!(patch.max_price, Some(None));
    }

    #[test]
    fn test_commit_respects_listing_allow_lists() {
        let mut draft = DraftState::default();
        draft.set_field(DraftField::Category, "tablets");
        draft.set_field(DraftField::SortBy, "price");
        let patch = draft.commit(&ORDERS);
        assert_eq!(patch.category, Some(None));
        assert_eq!(patch.sort_by, Some(None));

        draft.set_field(DraftField::Category, "shipped");
        draft.set_field(DraftField::SortBy, "total");
        let patch = draft.commit(&ORDERS);
        assert_eq!(patch.category, Some(Some("shipped".to_string())));
        assert_eq!(patch.sort_by, Some(Some("total".to_string())));
    }

    #[test]
    fn test_commit_field_only_touches_that_field() {
        let mut draft = DraftState::default();
        draft.set_field(DraftField::Page, "3");
        draft.set_field(DraftField::SearchTerm, "ignored");
        let patch = draft.commit_field(DraftField::Page, &PRODUCTS);
        assert_eq!(patch, FilterPatch::page(3));
    }

    #[test]
    fn test_mirror_round_trip() {
        let state = FilterState {
            search_term: Some("ipad".to_string()),
            category: Some("tablets".to_string()),
            min_price: Some(200.0),
            max_price: Some(999.99),
            sort_by: Some("price".to_string()),
            sort_order: Some(SortOrder::Asc),
            page: 1,
        };
        let draft = DraftState::from_state(&state);
        assert_eq!(draft.min_price, "200");
        assert_eq!(draft.page, "1");
        assert_eq!(draft.commit(&PRODUCTS).apply_to(&FilterState::default()), state);
    }
}
