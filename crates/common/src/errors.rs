use thiserror::Error;

/// Startup configuration failures
///
/// All of them are fatal: the application refuses to start rather than run
/// without a usable configuration.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("{0} environment variable not set")]
    MissingCredential(&'static str),

    #[error("Invalid value for {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

pub type ConfigResult<T> = Result<T, ConfigError>;
