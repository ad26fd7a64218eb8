//! Application Layer - the catalog controller
//!
//! The controller owns the product store, the view state and the ephemeral
//! AI result slots of the detail view. Presentation code talks to it only
//! through [`Command`] values and read-only accessors, so it can be driven
//! and tested without any rendering framework.

pub mod commands;
pub mod controller;
pub mod errors;
pub mod session;
pub mod state;

pub use commands::{Command, Outcome};
pub use controller::{Controller, DetailView};
pub use errors::{ApplicationError, ApplicationResult};
pub use session::{Applied, GenerationTicket, ResultSlot};
pub use state::{FormModal, View, ViewState};
