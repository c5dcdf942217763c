//! API utilities for frontend-backend communication
//!
//! Provides helper functions for constructing API URLs, attaching the bearer
//! token and reading error bodies.

use contracts::shared::api_error::ApiErrorBody;
use gloo_net::http::{RequestBuilder, Response};

use crate::system::auth::storage;

/// Get the base URL for API requests
///
/// `STOREFRONT_API_URL` set at build time wins; otherwise the API is
/// expected on port 3000 of the host serving the page.
///
/// # Returns
/// - API base URL like "http://localhost:3000" or "https://example.com:3000"
/// - Empty string if window is not available
///
/// # Example
/// ```ignore
/// let url = format!("{}/api/products/{}", api_base(), id);
/// ```
pub fn api_base() -> String {
    if let Some(url) = option_env!("STOREFRONT_API_URL") {
        return url.trim_end_matches('/').to_string();
    }
    let window = match web_sys::window() {
        Some(w) => w,
        None => return String::new(),
    };
    let location = window.location();
    let protocol = location.protocol().unwrap_or_else(|_| "http:".to_string());
    let hostname = location
        .hostname()
        .unwrap_or_else(|_| "127.0.0.1".to_string());
    format!("{}//{}:3000", protocol, hostname)
}

/// Build a full API URL from a path
///
/// # Arguments
/// * `path` - The API path (should start with "/api/")
pub fn api_url(path: &str) -> String {
    format!("{}{}", api_base(), path)
}

/// Attaches `Authorization: Bearer <token>` when a token is stored.
pub fn with_auth(builder: RequestBuilder) -> RequestBuilder {
    match storage::get_access_token() {
        Some(token) => builder.header("Authorization", &format!("Bearer {}", token)),
        None => builder,
    }
}

/// Human-readable message of a failed response: the API's `message` field
/// when present, the HTTP status otherwise.
pub async fn error_message(response: Response) -> String {
    let status = response.status();
    match response.json::<ApiErrorBody>().await {
        Ok(body) if !body.message.is_empty() => body.message,
        _ => format!("Request failed: {}", status),
    }
}
