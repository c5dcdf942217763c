//! Filter / pagination / address-bar synchronisation for listing views.
//!
//! Three copies of the same query live side by side: the canonical
//! [`FilterState`](filter_state::FilterState), the text-only
//! [`DraftState`](draft::DraftState) behind the form inputs, and the URL
//! query string. [`ListingController`](controller::ListingController) keeps
//! them consistent; [`use_listing`](binding::use_listing) wires it to Leptos
//! signals, browser history and the remote API.

pub mod api;
pub mod binding;
pub mod controller;
pub mod debounce;
pub mod draft;
pub mod error;
pub mod filter_state;
pub mod listing_data;
pub mod pagination;
pub mod schema;
pub mod url_sync;
mod values;

pub use binding::{use_listing, ListingHandle};
pub use controller::ListingController;
pub use draft::{DraftField, DraftState};
pub use error::{ListingError, QueryParamError};
pub use filter_state::{FilterPatch, FilterState, FilterStore};
pub use listing_data::ListingData;
pub use pagination::{compute_view, PaginationView};
pub use schema::{HistoryMode, ListingSchema, SortCycle};
