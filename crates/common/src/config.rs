//! Application configuration
//!
//! Read once at startup from the process environment (a `.env` file is
//! honoured). The service credential is mandatory; everything else has a
//! default.

use crate::errors::{ConfigError, ConfigResult};
use std::env;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

/// Storage key under which the product collection is persisted
pub const DEFAULT_STORAGE_KEY: &str = "digital-products";

pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_TEXT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_STRUCTURED_MODEL: &str = "gemini-2.5-pro";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

const APP_DIR_NAME: &str = "product-ai-manager";

#[derive(Clone)]
pub struct AppConfig {
    pub api_key: String,
    pub gemini_base_url: String,
    /// Model used for free-text description generation
    pub text_model: String,
    /// Model used for schema-constrained copy and analysis requests
    pub structured_model: String,
    pub request_timeout: Duration,
    pub data_dir: PathBuf,
    pub storage_key: String,
    pub log_level: String,
    pub log_json: bool,
}

// The credential must never end up in logs.
impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("api_key", &"[REDACTED]")
            .field("gemini_base_url", &self.gemini_base_url)
            .field("text_model", &self.text_model)
            .field("structured_model", &self.structured_model)
            .field("request_timeout", &self.request_timeout)
            .field("data_dir", &self.data_dir)
            .field("storage_key", &self.storage_key)
            .field("log_level", &self.log_level)
            .field("log_json", &self.log_json)
            .finish()
    }
}

impl AppConfig {
    pub fn from_env() -> ConfigResult<Self> {
        dotenv::dotenv().ok(); // Load .env if present

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable source.
    ///
    /// Blank values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let api_key = get("API_KEY")
            .or_else(|| get("GEMINI_API_KEY"))
            .ok_or(ConfigError::MissingCredential("API_KEY"))?;

        let gemini_base_url = get("GEMINI_BASE_URL")
            .unwrap_or_else(|| DEFAULT_GEMINI_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        let text_model = get("GEMINI_TEXT_MODEL").unwrap_or_else(|| DEFAULT_TEXT_MODEL.to_string());
        let structured_model = get("GEMINI_STRUCTURED_MODEL")
            .unwrap_or_else(|| DEFAULT_STRUCTURED_MODEL.to_string());

        let timeout_secs = match get("AI_REQUEST_TIMEOUT_SECS") {
            Some(raw) => parse_timeout(&raw)?,
            None => DEFAULT_REQUEST_TIMEOUT_SECS,
        };

        let data_dir = get("CATALOG_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(default_data_dir);

        let log_level = get("LOG_LEVEL").unwrap_or_else(|| "info".to_string());
        let log_json = match get("LOG_JSON") {
            Some(raw) => parse_bool("LOG_JSON", &raw)?,
            None => false,
        };

        Ok(Self {
            api_key,
            gemini_base_url,
            text_model,
            structured_model,
            request_timeout: Duration::from_secs(timeout_secs),
            data_dir,
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            log_level,
            log_json,
        })
    }

    pub fn with_data_dir(mut self, data_dir: impl Into<PathBuf>) -> Self {
        self.data_dir = data_dir.into();
        self
    }

    pub fn with_log_json(mut self, log_json: bool) -> Self {
        self.log_json = log_json;
        self
    }
}

fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR_NAME)
}

fn parse_timeout(raw: &str) -> ConfigResult<u64> {
    let secs = raw
        .trim()
        .parse::<u64>()
        .map_err(|e| ConfigError::Invalid {
            key: "AI_REQUEST_TIMEOUT_SECS",
            reason: e.to_string(),
        })?;
    if secs == 0 {
        return Err(ConfigError::Invalid {
            key: "AI_REQUEST_TIMEOUT_SECS",
            reason: "must be greater than zero".to_string(),
        });
    }
    Ok(secs)
}

fn parse_bool(key: &'static str, raw: &str) -> ConfigResult<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(ConfigError::Invalid {
            key,
            reason: format!("expected a boolean, got '{other}'"),
        }),
    }
}
