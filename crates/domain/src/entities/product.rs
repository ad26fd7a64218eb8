//! Product - the single persisted entity of the catalog

use crate::value_objects::ProductStatus;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Opaque product identifier.
///
/// Generated products use UUID v4 strings, the sample catalog uses `prod_N`.
pub type ProductId = String;

pub const LIST_IMAGE_SIZE: (u32, u32) = (400, 300);
pub const DETAIL_IMAGE_SIZE: (u32, u32) = (800, 600);

/// A digital product record
///
/// `id` and `created_at` are fixed when the product is first saved and are
/// carried unchanged through every later edit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub category: String,
    /// A stored `null` (an unparsable price saved by older clients) reads as 0
    #[serde(default, deserialize_with = "null_as_zero")]
    pub price: f64,
    #[serde(default)]
    pub status: ProductStatus,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "blank_as_none"
    )]
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Product {
    /// Image to show for this product, falling back to a placeholder seeded by the id
    pub fn image_url_or_placeholder(&self, (width, height): (u32, u32)) -> String {
        match self.image_url.as_deref() {
            Some(url) if !url.trim().is_empty() => url.to_string(),
            _ => placeholder_image_url(&self.id, width, height),
        }
    }

    pub fn formatted_price(&self) -> String {
        format!("${:.2}", self.price)
    }
}

/// Deterministic placeholder image for a product id
pub fn placeholder_image_url(id: &str, width: u32, height: u32) -> String {
    format!("https://picsum.photos/seed/{id}/{width}/{height}")
}

fn null_as_zero<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or_default())
}

fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<String> = Option::deserialize(deserializer)?;
    Ok(value.filter(|url| !url.trim().is_empty()))
}
