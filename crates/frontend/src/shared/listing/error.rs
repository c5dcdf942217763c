use thiserror::Error;

/// A query or form value that could not be used as-is.
///
/// Never surfaced to the user: the affected field falls back to its previous
/// or default value and the issue is logged at debug level.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryParamError {
    #[error("`{key}`: `{raw}` is not a finite number")]
    InvalidNumber { key: String, raw: String },
    #[error("`{key}`: `{raw}` is not an allowed value")]
    NotAllowed { key: String, raw: String },
    #[error("`{key}`: `{raw}` is not a valid page number")]
    InvalidPage { key: String, raw: String },
    #[error("malformed percent-encoding in `{pair}`")]
    Malformed { pair: String },
}

/// Failure of a listing fetch
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ListingError {
    /// Message is rendered verbatim in place of the listing body.
    #[error("{0}")]
    RemoteFetch(String),
    /// The request was aborted because the view went away.
    #[error("request aborted")]
    Aborted,
}
