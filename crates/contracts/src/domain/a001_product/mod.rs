use serde::{Deserialize, Serialize};

/// Товар витрины
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub img: String,
    pub price: f64,
    /// Код категории (`smartphone`, `tablets`, `accessories`)
    pub category: String,
    pub stock: i64,
}

/// DTO для создания и изменения товара из админки
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub img: String,
    pub price: f64,
    pub category: String,
    pub stock: i64,
}
