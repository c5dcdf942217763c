//! Per-listing configuration of the filter synchroniser.
//!
//! Every listing view (storefront products, admin products, admin orders,
//! customer order history) shares the same state machine; what differs is
//! the allowed category values, the sort allow-list, the query-string names
//! of the bound fields and a couple of behavioural switches.

/// How a URL rewrite is recorded in browser history
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryMode {
    /// New history entry (back button returns to the previous filters)
    Push,
    /// Overwrite the current entry
    Replace,
}

/// Behaviour of repeated clicks on the same sort control
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortCycle {
    /// asc -> desc -> asc
    Toggle,
    /// asc -> desc -> unsorted
    TriState,
}

/// Query-string names of the listing-specific fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryKeys {
    pub category: &'static str,
    pub min: &'static str,
    pub max: &'static str,
}

pub const SEARCH_KEY: &str = "searchTerm";
pub const SORT_BY_KEY: &str = "sortBy";
pub const SORT_ORDER_KEY: &str = "sortOrder";
pub const PAGE_KEY: &str = "page";
pub const LIMIT_KEY: &str = "limit";

/// Quiet period before a filter change hits the network
pub const DEFAULT_DEBOUNCE_MS: u32 = 500;
/// Page size of raw-count listings and the `limit` sent to the API
pub const DEFAULT_PAGE_SIZE: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListingSchema {
    /// Used in log lines only
    pub name: &'static str,
    /// Allowed values of the category-like filter; `""` means "all"
    pub categories: &'static [&'static str],
    /// Sort allow-list
    pub sort_fields: &'static [&'static str],
    pub keys: QueryKeys,
    pub sort_cycle: SortCycle,
    pub page_size: u32,
    /// History policy for category / sort / page controls. Draft
    /// submissions always replace.
    pub discrete_history: HistoryMode,
    pub debounce_ms: u32,
}

impl ListingSchema {
    /// `""` is the "all" option and never counts as a concrete category.
    pub fn accepts_category(&self, value: &str) -> bool {
        !value.is_empty() && self.categories.contains(&value)
    }

    pub fn accepts_sort_field(&self, value: &str) -> bool {
        self.sort_fields.contains(&value)
    }
}

const PRODUCT_KEYS: QueryKeys = QueryKeys {
    category: "category",
    min: "minPrice",
    max: "maxPrice",
};

const ORDER_KEYS: QueryKeys = QueryKeys {
    category: "status",
    min: "minTotal",
    max: "maxTotal",
};

pub const PRODUCT_CATEGORIES: &[&str] = &["", "smartphone", "tablets", "accessories"];
pub const ORDER_STATUSES: &[&str] = &[
    "",
    "pending",
    "processing",
    "shipped",
    "delivered",
    "cancelled",
];

/// Storefront product listing
pub const PRODUCTS: ListingSchema = ListingSchema {
    name: "products",
    categories: PRODUCT_CATEGORIES,
    sort_fields: &["price"],
    keys: PRODUCT_KEYS,
    sort_cycle: SortCycle::TriState,
    page_size: DEFAULT_PAGE_SIZE,
    discrete_history: HistoryMode::Push,
    debounce_ms: DEFAULT_DEBOUNCE_MS,
};

/// Product management table in the admin area
pub const ADMIN_PRODUCTS: ListingSchema = ListingSchema {
    name: "admin_products",
    categories: PRODUCT_CATEGORIES,
    sort_fields: &["price", "name", "stock"],
    keys: PRODUCT_KEYS,
    sort_cycle: SortCycle::TriState,
    page_size: DEFAULT_PAGE_SIZE,
    discrete_history: HistoryMode::Push,
    debounce_ms: DEFAULT_DEBOUNCE_MS,
};

/// Order management table in the admin area
pub const ORDERS: ListingSchema = ListingSchema {
    name: "orders",
    categories: ORDER_STATUSES,
    sort_fields: &["id", "createdAt", "status", "total"],
    keys: ORDER_KEYS,
    sort_cycle: SortCycle::Toggle,
    page_size: DEFAULT_PAGE_SIZE,
    discrete_history: HistoryMode::Push,
    debounce_ms: DEFAULT_DEBOUNCE_MS,
};

/// Customer order history (raw-count pagination, no filters)
pub const MY_ORDERS: ListingSchema = ListingSchema {
    name: "my_orders",
    categories: &[""],
    sort_fields: &[],
    keys: ORDER_KEYS,
    sort_cycle: SortCycle::Toggle,
    page_size: DEFAULT_PAGE_SIZE,
    discrete_history: HistoryMode::Push,
    debounce_ms: DEFAULT_DEBOUNCE_MS,
};
