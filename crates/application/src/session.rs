//! Ephemeral AI results of the detail view
//!
//! A detail session starts each time a product is selected and ends when
//! the user leaves the detail view. Responses are applied only if the
//! session and the request that produced them are still current.

use domain::{ContentAnalysis, MarketingCopy, Product};

#[derive(Debug, Clone, PartialEq, Default)]
pub enum ResultSlot<T> {
    #[default]
    Empty,
    /// Waiting on the request with this id
    Pending(u64),
    Ready(T),
    Failed(String),
}

impl<T> ResultSlot<T> {
    pub fn is_pending(&self) -> bool {
        matches!(self, ResultSlot::Pending(_))
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            ResultSlot::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            ResultSlot::Failed(message) => Some(message),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SlotKind {
    MarketingCopy,
    Analysis,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct DetailSession {
    pub id: u64,
    pub product_id: String,
    pub marketing_copy: ResultSlot<MarketingCopy>,
    pub analysis: ResultSlot<ContentAnalysis>,
}

impl DetailSession {
    pub fn new(id: u64, product_id: String) -> Self {
        Self {
            id,
            product_id,
            marketing_copy: ResultSlot::Empty,
            analysis: ResultSlot::Empty,
        }
    }
}

/// Issued when a generation starts; hand it back with the result.
///
/// Carries a snapshot of the product as it was when the request started.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationTicket {
    pub(crate) session_id: u64,
    pub(crate) request_id: u64,
    pub(crate) kind: SlotKind,
    pub product: Product,
}

/// Whether a finished generation landed in the view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub enum Applied {
    Applied,
    /// The view moved on before the response arrived
    Discarded,
}
