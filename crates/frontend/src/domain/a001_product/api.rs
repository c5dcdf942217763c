use contracts::domain::a001_product::{NewProduct, Product};
use contracts::shared::listing::{ListPage, ListResponse};
use gloo_net::http::Request;

use super::PRODUCTS_ENDPOINT;
use crate::shared::api_utils::{api_url, error_message, with_auth};

/// Get a single product
pub async fn fetch_product(id: i64) -> Result<Product, String> {
    let response = Request::get(&api_url(&format!("{}/{}", PRODUCTS_ENDPOINT, id)))
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;

    if !response.ok() {
        return Err(error_message(response).await);
    }

    response
        .json::<Product>()
        .await
        .map_err(|e| format!("Failed to parse response: {}", e))
}

/// First page of the catalogue, `limit` products in the API's default order
pub async fn fetch_featured(limit: u32) -> Result<Vec<Product>, String> {
    let url = format!("{}?page=1&limit={}", api_url(PRODUCTS_ENDPOINT), limit);
    let response = Request::get(&url)
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;

    if !response.ok() {
        return Err(error_message(response).await);
    }

    let page: ListPage<Product> = response
        .json::<ListResponse<Product>>()
        .await
        .map_err(|e| format!("Failed to parse response: {}", e))?
        .into();
    Ok(page.items)
}

/// Create a product (admin)
pub async fn create_product(product: &NewProduct) -> Result<Product, String> {
    let response = with_auth(Request::post(&api_url(PRODUCTS_ENDPOINT)))
        .json(product)
        .map_err(|e| format!("Failed to serialize request: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;

    if !response.ok() {
        return Err(error_message(response).await);
    }

    response
        .json::<Product>()
        .await
        .map_err(|e| format!("Failed to parse response: {}", e))
}

/// Replace the editable fields of a product (admin)
pub async fn update_product(id: i64, product: &NewProduct) -> Result<Product, String> {
    let url = api_url(&format!("{}/{}", PRODUCTS_ENDPOINT, id));
    let response = with_auth(Request::put(&url))
        .json(product)
        .map_err(|e| format!("Failed to serialize request: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;

    if !response.ok() {
        return Err(error_message(response).await);
    }

    response
        .json::<Product>()
        .await
        .map_err(|e| format!("Failed to parse response: {}", e))
}

/// Delete a product (admin)
pub async fn delete_product(id: i64) -> Result<(), String> {
    let response = with_auth(Request::delete(&api_url(&format!("{}/{}", PRODUCTS_ENDPOINT, id))))
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;

    if !response.ok() {
        return Err(error_message(response).await);
    }

    Ok(())
}
