//! Scalar parsing shared by the draft form and the URL parser.

use super::error::QueryParamError;

/// Empty (or whitespace-only) text is treated as "not set".
pub(crate) fn non_empty(raw: &str) -> Option<&str> {
    if raw.trim().is_empty() {
        None
    } else {
        Some(raw)
    }
}

/// Strict finite-number parse: `Ok(None)` for empty input, an error for
/// anything that is not a finite `f64` (`NaN`, `inf`, `12abc`, `-`).
pub(crate) fn parse_finite(key: &str, raw: &str) -> Result<Option<f64>, QueryParamError> {
    let Some(text) = non_empty(raw) else {
        return Ok(None);
    };
    match text.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(Some(value)),
        _ => Err(QueryParamError::InvalidNumber {
            key: key.to_string(),
            raw: raw.to_string(),
        }),
    }
}

/// Page numbers are floored and clamped to at least 1.
pub(crate) fn parse_page(key: &str, raw: &str) -> Result<u32, QueryParamError> {
    let invalid = || QueryParamError::InvalidPage {
        key: key.to_string(),
        raw: raw.to_string(),
    };
    let value = parse_finite(key, raw)
        .map_err(|_| invalid())?
        .ok_or_else(invalid)?;
    let floored = value.floor();
    if floored < 1.0 {
        Ok(1)
    } else if floored >= u32::MAX as f64 {
        Ok(u32::MAX)
    } else {
        Ok(floored as u32)
    }
}

/// Logs a recoverable parse issue and substitutes the fallback.
pub(crate) fn absorb<T>(result: Result<T, QueryParamError>, fallback: T) -> T {
    match result {
        Ok(value) => value,
        Err(e) => {
            log::debug!("ignoring listing parameter: {}", e);
            fallback
        }
    }
}

/// `10.0` renders as `10`, `10.5` as `10.5`.
pub(crate) fn format_number(value: f64) -> String {
    value.to_string()
}
