//! Upstream connection settings.
//!
//! Credentials are read once at startup and moved into the client; nothing
//! else in the crate looks them up.

use std::env;
use std::fmt;
use std::time::Duration;

use miette::Diagnostic;
use thiserror::Error;

/// Default REST base URL of the Trello API.
pub const DEFAULT_BASE_URL: &str = "https://api.trello.com/1";

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

pub const KEY_VAR: &str = "TRELLO_KEY";
pub const TOKEN_VAR: &str = "TRELLO_TOKEN";
pub const BASE_URL_VAR: &str = "TRELLO_API_URL";
pub const TIMEOUT_VAR: &str = "TRELLO_TIMEOUT_SECS";

#[derive(Error, Diagnostic, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing required environment variable {name}")]
    #[diagnostic(
        code(trello_mcp::config::missing_credential),
        help("Set TRELLO_KEY and TRELLO_TOKEN (see https://trello.com/app-key) before starting the server.")
    )]
    MissingVar { name: &'static str },

    #[error("Invalid value for {name}: {message}")]
    #[diagnostic(code(trello_mcp::config::invalid_value))]
    InvalidValue { name: &'static str, message: String },
}

/// Credentials and connection settings for the Trello REST API.
#[derive(Clone)]
pub struct TrelloConfig {
    pub api_key: String,
    pub token: String,
    pub base_url: String,
    pub timeout: Duration,
}

// Keep secrets out of logs.
impl fmt::Debug for TrelloConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TrelloConfig")
            .field("api_key", &"<redacted>")
            .field("token", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl TrelloConfig {
    /// Create a config with default base URL and timeout.
    pub fn new(api_key: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            token: token.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Read the config from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build the config from an arbitrary variable lookup.
    ///
    /// Missing or blank credentials are rejected; the server must not start
    /// without them.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &'static str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .ok_or(ConfigError::MissingVar { name })
        };

        let mut config = Self::new(required(KEY_VAR)?, required(TOKEN_VAR)?);

        if let Some(url) = lookup(BASE_URL_VAR).filter(|v| !v.trim().is_empty()) {
            config = config.with_base_url(url);
        }

        if let Some(raw) = lookup(TIMEOUT_VAR).filter(|v| !v.trim().is_empty()) {
            let secs: u64 = raw
                .trim()
                .parse()
                .map_err(|e: std::num::ParseIntError| ConfigError::InvalidValue {
                    name: TIMEOUT_VAR,
                    message: e.to_string(),
                })?;
            if secs == 0 {
                return Err(ConfigError::InvalidValue {
                    name: TIMEOUT_VAR,
                    message: "timeout must be at least one second".to_string(),
                });
            }
            config.timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }

    /// Override the REST base URL (trailing slashes are dropped).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Override the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}
