use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Publication state of a product
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ProductStatus {
    #[default]
    Draft,
    Published,
    Archived,
}

impl ProductStatus {
    pub const ALL: [ProductStatus; 3] = [
        ProductStatus::Draft,
        ProductStatus::Published,
        ProductStatus::Archived,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProductStatus::Draft => "Draft",
            ProductStatus::Published => "Published",
            ProductStatus::Archived => "Archived",
        }
    }
}

impl fmt::Display for ProductStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProductStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "draft" => Ok(ProductStatus::Draft),
            "published" => Ok(ProductStatus::Published),
            "archived" => Ok(ProductStatus::Archived),
            other => Err(format!("Unknown product status: {other}")),
        }
    }
}
