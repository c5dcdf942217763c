//! Listing fetch: filter state out as query parameters, one page of rows in.

use std::collections::BTreeMap;

use contracts::shared::listing::{ListPage, ListResponse};
use gloo_net::http::Request;
use serde::de::DeserializeOwned;
use web_sys::AbortSignal;

use super::error::ListingError;
use super::filter_state::FilterState;
use super::schema::{
    ListingSchema, LIMIT_KEY, PAGE_KEY, SEARCH_KEY, SORT_BY_KEY, SORT_ORDER_KEY,
};
use super::values::format_number;
use crate::shared::api_utils::{api_url, error_message, with_auth};

/// Request parameters for a listing fetch. Absent fields are omitted,
/// `page` and `limit` are always sent.
pub fn request_params(state: &FilterState, schema: &ListingSchema) -> BTreeMap<&'static str, String> {
    let mut params = BTreeMap::new();
    if let Some(search) = &state.search_term {
        params.insert(SEARCH_KEY, search.clone());
    }
    if let Some(category) = &state.category {
        params.insert(schema.keys.category, category.clone());
    }
    if let Some(min) = state.min_price {
        params.insert(schema.keys.min, format_number(min));
    }
    if let Some(max) = state.max_price {
        params.insert(schema.keys.max, format_number(max));
    }
    if let Some(sort_by) = &state.sort_by {
        params.insert(SORT_BY_KEY, sort_by.clone());
        if let Some(order) = state.sort_order {
            params.insert(SORT_ORDER_KEY, order.code().to_string());
        }
    }
    params.insert(PAGE_KEY, state.page.max(1).to_string());
    params.insert(LIMIT_KEY, schema.page_size.to_string());
    params
}

pub fn request_query(state: &FilterState, schema: &ListingSchema) -> Result<String, String> {
    serde_qs::to_string(&request_params(state, schema))
        .map_err(|e| format!("Failed to build query: {}", e))
}

/// GET `{endpoint}?{params}`.
///
/// `signal` aborts the request when the view goes away; an aborted request
/// resolves to [`ListingError::Aborted`].
pub async fn fetch_listing<T>(
    endpoint: &str,
    state: &FilterState,
    schema: &ListingSchema,
    signal: Option<&AbortSignal>,
) -> Result<ListPage<T>, ListingError>
where
    T: DeserializeOwned,
{
    let query = request_query(state, schema).map_err(ListingError::RemoteFetch)?;
    let url = format!("{}?{}", api_url(endpoint), query);
    let aborted = || signal.is_some_and(|s| s.aborted());

    let response = with_auth(Request::get(&url))
        .abort_signal(signal)
        .send()
        .await
        .map_err(|e| {
            if aborted() {
                ListingError::Aborted
            } else {
                ListingError::RemoteFetch(format!("Failed to fetch {}: {}", schema.name, e))
            }
        })?;

    if !response.ok() {
        return Err(ListingError::RemoteFetch(error_message(response).await));
    }

    let body = response.json::<ListResponse<T>>().await.map_err(|e| {
        if aborted() {
            ListingError::Aborted
        } else {
            ListingError::RemoteFetch(format!("Failed to parse response: {}", e))
        }
    })?;
    Ok(body.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::listing::schema::{MY_ORDERS, ORDERS, PRODUCTS};
    use contracts::shared::listing::SortOrder;

    #[test]
    fn test_default_sends_page_and_limit_only() {
        let params = request_params(&FilterState::default(), &PRODUCTS);
        assert_eq!(params.len(), 2);
        assert_eq!(params.get("page").map(String::as_str), Some("1"));
        assert_eq!(params.get("limit").map(String::as_str), Some("10"));
    }

    #[test]
    fn test_order_listing_uses_its_keys() {
        let state = FilterState {
            category: Some("pending".to_string()),
            min_price: Some(20.0),
            max_price: Some(80.5),
            sort_by: Some("total".to_string()),
            sort_order: Some(SortOrder::Desc),
            page: 2,
            ..FilterState::default()
        };
        let query = request_query(&state, &ORDERS).expect("query");
        assert_eq!(
            query,
            "limit=10&maxTotal=80.5&minTotal=20&page=2&sortBy=total&sortOrder=desc&status=pending"
        );
    }

    #[test]
    fn test_sort_order_dropped_without_sort_by() {
        let state = FilterState {
            sort_order: Some(SortOrder::Asc),
            ..FilterState::default()
        };
        assert!(!request_params(&state, &MY_ORDERS).contains_key("sortOrder"));
    }

    #[test]
    fn test_search_term_is_encoded() {
        let state = FilterState {
            search_term: Some("usb c&hub".to_string()),
            ..FilterState::default()
        };
        let query = request_query(&state, &PRODUCTS).expect("query");
        assert!(query.contains("searchTerm=usb"), "{}", query);
        assert!(query.contains("%26hub"), "{}", query);
        assert!(!query.contains("c&hub"), "{}", query);
    }
}
