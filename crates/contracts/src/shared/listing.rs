//! Wire shapes of paginated list endpoints.
//!
//! The storefront API answers list requests in one of two forms:
//! `{ "products": [...], "pagination": { page, limit, total, totalPages } }`
//! or, for the customer order history, `{ "orders": [...], "count": N }`.

use serde::{Deserialize, Serialize};

/// Направление сортировки
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn code(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }

    /// Strict parse: only the exact lowercase codes are accepted.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "asc" => Some(SortOrder::Asc),
            "desc" => Some(SortOrder::Desc),
            _ => None,
        }
    }
}

/// Page-count pagination block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageCountPagination {
    pub page: u32,
    pub limit: u32,
    pub total: u64,
    #[serde(default)]
    pub total_pages: u32,
}

/// Pagination metadata in either of the two forms the API produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaginationInfo {
    PageCount(PageCountPagination),
    RawCount { count: u64 },
}

/// Raw response of a list endpoint. The item array is named after the
/// resource (`products`, `orders`) or plainly `items`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ListResponse<T> {
    Paged {
        #[serde(alias = "products", alias = "orders")]
        items: Vec<T>,
        pagination: PageCountPagination,
    },
    Counted {
        #[serde(alias = "products", alias = "orders")]
        items: Vec<T>,
        count: u64,
    },
}

/// Normalised page of results
#[derive(Debug, Clone, PartialEq)]
pub struct ListPage<T> {
    pub items: Vec<T>,
    pub pagination: PaginationInfo,
}

impl<T> From<ListResponse<T>> for ListPage<T> {
    fn from(response: ListResponse<T>) -> Self {
        match response {
            ListResponse::Paged { items, pagination } => ListPage {
                items,
                pagination: PaginationInfo::PageCount(pagination),
            },
            ListResponse::Counted { items, count } => ListPage {
                items,
                pagination: PaginationInfo::RawCount { count },
            },
        }
    }
}
