//! View state and its pure transitions

use domain::{Product, ProductId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    List,
    Detail,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum FormModal {
    #[default]
    Closed,
    /// `editing` is `None` when creating a new product
    Open { editing: Option<Product> },
}

impl FormModal {
    pub fn is_open(&self) -> bool {
        matches!(self, FormModal::Open { .. })
    }

    pub fn editing(&self) -> Option<&Product> {
        match self {
            FormModal::Open { editing } => editing.as_ref(),
            FormModal::Closed => None,
        }
    }
}

/// Everything the presentation needs to decide what to render
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ViewState {
    pub view: View,
    pub selected_product_id: Option<ProductId>,
    pub form: FormModal,
}

impl ViewState {
    pub fn select(self, id: ProductId) -> Self {
        Self {
            view: View::Detail,
            selected_product_id: Some(id),
            ..self
        }
    }

    pub fn back(self) -> Self {
        Self {
            view: View::List,
            selected_product_id: None,
            ..self
        }
    }

    pub fn open_form(self, editing: Option<Product>) -> Self {
        Self {
            form: FormModal::Open { editing },
            ..self
        }
    }

    pub fn close_form(self) -> Self {
        Self {
            form: FormModal::Closed,
            ..self
        }
    }
}
