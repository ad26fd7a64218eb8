//! Commands sent by the presentation layer and what they produced

use catalog::SaveOutcome;
use domain::{Product, ProductDraft, ProductId};

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Select(ProductId),
    Back,
    /// Open the form, editing the given product or creating a new one
    OpenForm(Option<ProductId>),
    CloseForm,
    Save(ProductDraft),
    /// Ask to delete; nothing is removed until `ConfirmDelete`
    Delete(ProductId),
    ConfirmDelete,
    CancelDelete,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Only view state changed
    Updated,
    Saved {
        product: Product,
        persistence: SaveOutcome,
    },
    ConfirmationRequired {
        product_id: ProductId,
    },
    Deleted {
        product_id: ProductId,
        persistence: SaveOutcome,
    },
    Cancelled,
}
