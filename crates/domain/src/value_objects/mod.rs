//! Domain Value Objects - immutable concepts without identity

pub mod content;
pub mod product_status;

pub use content::{ContentAnalysis, MarketingCopy};
pub use product_status::ProductStatus;
