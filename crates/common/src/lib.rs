//! Ambient infrastructure shared by every crate of the workspace:
//! configuration loading, configuration errors and structured logging.

pub mod config;
pub mod errors;
pub mod structured_logging;

pub use config::{AppConfig, DEFAULT_STORAGE_KEY};
pub use errors::{ConfigError, ConfigResult};
pub use structured_logging::{
    init_structured_logging, LoggingConfig, OperationTimer, StructuredLogEntry,
};
