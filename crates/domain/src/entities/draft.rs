//! ProductDraft - the editable working copy behind the product form

use crate::entities::product::{Product, ProductId};
use crate::errors::ValidationError;
use crate::value_objects::ProductStatus;
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Form state for creating or editing a product
///
/// A draft built from an existing product keeps that product's identity, so
/// saving it replaces the original instead of creating a new record.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProductDraft {
    pub id: Option<ProductId>,
    pub created_at: Option<DateTime<Utc>>,
    pub name: String,
    pub description: String,
    pub category: String,
    pub price: f64,
    pub status: ProductStatus,
    pub image_url: String,
}

impl ProductDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_product(product: &Product) -> Self {
        Self {
            id: Some(product.id.clone()),
            created_at: Some(product.created_at),
            name: product.name.clone(),
            description: product.description.clone(),
            category: product.category.clone(),
            price: product.price,
            status: product.status,
            image_url: product.image_url.clone().unwrap_or_default(),
        }
    }

    pub fn is_new(&self) -> bool {
        self.id.is_none()
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::MissingName);
        }
        if self.category.trim().is_empty() {
            return Err(ValidationError::MissingCategory);
        }
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(ValidationError::InvalidPrice(self.price));
        }
        Ok(())
    }

    /// Description generation needs both a name and a category to prompt with
    pub fn ensure_describable(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() || self.category.trim().is_empty() {
            return Err(ValidationError::DescriptionNeedsNameAndCategory);
        }
        Ok(())
    }

    /// Validate and convert, assigning a fresh id and the current time to new products
    pub fn into_product(self) -> Result<Product, ValidationError> {
        self.into_product_at(Utc::now(), || Uuid::new_v4().to_string())
    }

    pub fn into_product_at<F>(self, now: DateTime<Utc>, new_id: F) -> Result<Product, ValidationError>
    where
        F: FnOnce() -> ProductId,
    {
        self.validate()?;

        let image_url = Some(self.image_url.trim().to_string()).filter(|url| !url.is_empty());

        Ok(Product {
            id: self.id.unwrap_or_else(new_id),
            created_at: self.created_at.unwrap_or(now),
            name: self.name.trim().to_string(),
            description: self.description,
            category: self.category.trim().to_string(),
            price: self.price,
            status: self.status,
            image_url,
        })
    }
}
