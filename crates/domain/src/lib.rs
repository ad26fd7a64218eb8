//! Domain Layer - product catalog business logic
//!
//! Holds ONLY pure business types and rules:
//! - Entities: `Product`, `ProductDraft`
//! - Value objects: `ProductStatus`, `MarketingCopy`, `ContentAnalysis`
//! - Validation errors raised when a draft cannot become a product
//!
//! No storage, network or rendering concerns live here.

pub mod entities;
pub mod errors;
pub mod value_objects;

pub use entities::{Product, ProductDraft, ProductId};
pub use errors::{ContentError, ValidationError};
pub use value_objects::{ContentAnalysis, MarketingCopy, ProductStatus};
