use serde::{Deserialize, Serialize};

/// Категории товаров витрины
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductCategory {
    Smartphone,
    Tablets,
    Accessories,
}

impl ProductCategory {
    /// Код категории в API и в адресной строке
    pub fn code(&self) -> &'static str {
        match self {
            ProductCategory::Smartphone => "smartphone",
            ProductCategory::Tablets => "tablets",
            ProductCategory::Accessories => "accessories",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ProductCategory::Smartphone => "Smartphones",
            ProductCategory::Tablets => "Tablets",
            ProductCategory::Accessories => "Accessories",
        }
    }

    pub fn all() -> Vec<ProductCategory> {
        vec![
            ProductCategory::Smartphone,
            ProductCategory::Tablets,
            ProductCategory::Accessories,
        ]
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "smartphone" => Some(ProductCategory::Smartphone),
            "tablets" => Some(ProductCategory::Tablets),
            "accessories" => Some(ProductCategory::Accessories),
            _ => None,
        }
    }
}

impl std::fmt::Display for ProductCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}
