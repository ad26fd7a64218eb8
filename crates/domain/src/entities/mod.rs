//! Domain Entities - objects with identity

pub mod draft;
pub mod product;

pub use draft::ProductDraft;
pub use product::{Product, ProductId};
