//! Fetched rows of a listing view plus the request bookkeeping around them.

use super::error::ListingError;
use contracts::shared::listing::{ListPage, PaginationInfo};

/// Identifies one issued request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestToken(u64);

/// Monotonic request counter. Only the most recently issued token is
/// current; responses carrying an older token are stale.
#[derive(Debug, Clone, Default)]
pub struct RequestSequencer {
    issued: u64,
    in_flight: Option<RequestToken>,
}

impl RequestSequencer {
    pub fn begin(&mut self) -> RequestToken {
        self.issued += 1;
        let token = RequestToken(self.issued);
        self.in_flight = Some(token);
        token
    }

    pub fn is_current(&self, token: RequestToken) -> bool {
        self.in_flight == Some(token)
    }

    /// Marks the current request as settled.
    pub fn finish(&mut self, token: RequestToken) -> bool {
        if self.is_current(token) {
            self.in_flight = None;
            true
        } else {
            false
        }
    }

    /// Invalidates whatever is in flight.
    pub fn abandon(&mut self) {
        self.in_flight = None;
    }
}

/// Rows, pagination and loading/error flags of one listing view
#[derive(Debug, Clone)]
pub struct ListingData<T> {
    pub items: Vec<T>,
    pub pagination: Option<PaginationInfo>,
    pub loading: bool,
    pub error: Option<String>,
    sequencer: RequestSequencer,
}

impl<T> Default for ListingData<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            pagination: None,
            loading: false,
            error: None,
            sequencer: RequestSequencer::default(),
        }
    }
}

impl<T> ListingData<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a request. Rows stay visible until the response replaces them.
    pub fn begin_fetch(&mut self) -> RequestToken {
        self.loading = true;
        self.sequencer.begin()
    }

    pub fn is_current(&self, token: RequestToken) -> bool {
        self.sequencer.is_current(token)
    }

    /// Applies a response. Returns `false` when it was ignored: the token is
    /// stale, or the request was aborted.
    pub fn complete(&mut self, token: RequestToken, result: Result<ListPage<T>, ListingError>) -> bool {
        if !self.sequencer.is_current(token) {
            log::debug!("dropping stale listing response {:?}", token);
            return false;
        }
        if matches!(result, Err(ListingError::Aborted)) {
            return false;
        }
        self.sequencer.finish(token);
        self.loading = false;
        match result {
            Ok(page) => {
                self.items = page.items;
                self.pagination = Some(page.pagination);
                self.error = None;
            }
            Err(e) => {
                self.error = Some(e.to_string());
            }
        }
        true
    }

    /// Drops the request in flight (view unmounted or filters reset).
    pub fn abandon(&mut self) {
        self.sequencer.abandon();
        self.loading = false;
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::shared::listing::PageCountPagination;

    fn page(items: Vec<&'static str>, total: u64) -> ListPage<&'static str> {
        ListPage {
            items,
            pagination: PaginationInfo::PageCount(PageCountPagination {
                page: 1,
                limit: 10,
                total,
                total_pages: 0,
            }),
        }
    }

    #[test]
    fn test_out_of_order_responses_keep_latest() {
        let mut data = ListingData::new();
        let a = data.begin_fetch();
        let b = data.begin_fetch();

        assert!(data.complete(b, Ok(page(vec!["b"], 1))));
        assert!(!data.complete(a, Ok(page(vec!["a"], 1))));

        assert_eq!(data.items, vec!["b"]);
        assert!(!data.loading);
    }

    #[test]
    fn test_stale_response_does_not_clear_loading() {
        let mut data = ListingData::new();
        let a = data.begin_fetch();
        let _b = data.begin_fetch();

        assert!(!data.complete(a, Ok(page(vec!["a"], 1))));
        assert!(data.loading);
        assert!(data.items.is_empty());
    }

    #[test]
    fn test_error_keeps_rows_and_is_cleared_on_success() {
        let mut data = ListingData::new();
        let t = data.begin_fetch();
        data.complete(t, Ok(page(vec!["x", "y"], 2)));

        let t = data.begin_fetch();
        data.complete(t, Err(ListingError::RemoteFetch("Server down".to_string())));
        assert_eq!(data.error.as_deref(), Some("Server down"));
        assert_eq!(data.items.len(), 2);

        let t = data.begin_fetch();
        data.complete(t, Ok(page(vec![], 0)));
        assert_eq!(data.error, None);
        assert!(data.is_empty());
    }

    #[test]
    fn test_aborted_response_is_ignored() {
        let mut data = ListingData::<&str>::new();
        let t = data.begin_fetch();
        assert!(!data.complete(t, Err(ListingError::Aborted)));
        assert_eq!(data.error, None);
    }

    #[test]
    fn test_abandon_invalidates_in_flight() {
        let mut data = ListingData::new();
        let t = data.begin_fetch();
        data.abandon();
        assert!(!data.loading);
        assert!(!data.complete(t, Ok(page(vec!["late"], 1))));
        assert!(data.items.is_empty());
    }
}
