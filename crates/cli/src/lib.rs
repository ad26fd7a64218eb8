//! Interactive terminal front end for the product catalog
//!
//! A line-oriented shell stands in for a graphical UI: it renders the list
//! and detail views, walks the user through the product form and drives the
//! AI actions through the application controller.

pub mod form;
pub mod input;
pub mod progress;
pub mod render;
pub mod shell;

pub use input::Input;
pub use shell::{parse_input, Intent, ParseError, Shell, ShellError, Target};
