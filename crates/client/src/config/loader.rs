use std::path::Path;
use thiserror::Error;
use url::Url;

use super::types::ClientConfigFile;

/// Path of a JSON config file to load instead of the embedded default
pub const CONFIG_PATH_ENV: &str = "MARQUEE_CONFIG";
/// Overrides `rest.base_url`
pub const BASE_URL_ENV: &str = "MARQUEE_BASE_URL";
/// Overrides `matching_engine.ws_url`
pub const WS_URL_ENV: &str = "MARQUEE_WS_URL";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] serde_json::Error),
    #[error("Invalid {field} '{value}': {reason}")]
    InvalidUrl {
        field: &'static str,
        value: String,
        reason: String,
    },
    #[error("fetch_concurrency must be at least 1")]
    ZeroConcurrency,
    #[error("{0} must be greater than zero")]
    ZeroTimeout(&'static str),
}

/// Load client configuration from a JSON file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<ClientConfigFile, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    load_config_from_str(&content)
}

/// Load configuration from a JSON string
pub fn load_config_from_str(json: &str) -> Result<ClientConfigFile, ConfigError> {
    let config: ClientConfigFile = serde_json::from_str(json)?;
    config.validate()?;
    Ok(config)
}

/// Load the default embedded configuration
pub fn load_default_config() -> Result<ClientConfigFile, ConfigError> {
    let default_config = include_str!("client_config.json");
    load_config_from_str(default_config)
}

impl ClientConfigFile {
    /// Replace the origins, keeping everything else
    pub fn with_overrides(mut self, base_url: Option<String>, ws_url: Option<String>) -> Self {
        if let Some(base_url) = base_url {
            self.rest.base_url = base_url;
        }
        if let Some(ws_url) = ws_url {
            self.matching_engine.ws_url = ws_url;
        }
        self
    }

    /// Apply `MARQUEE_BASE_URL` / `MARQUEE_WS_URL` and re-validate
    pub fn apply_env_overrides(self) -> Result<Self, ConfigError> {
        let config = self.with_overrides(
            std::env::var(BASE_URL_ENV).ok(),
            std::env::var(WS_URL_ENV).ok(),
        );
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_url("rest.base_url", &self.rest.base_url, &["http", "https"])?;
        check_url("matching_engine.ws_url", &self.matching_engine.ws_url, &["ws", "wss"])?;
        if self.rest.fetch_concurrency == 0 {
            return Err(ConfigError::ZeroConcurrency);
        }
        if self.rest.request_timeout_ms == 0 {
            return Err(ConfigError::ZeroTimeout("rest.request_timeout_ms"));
        }
        if self.matching_engine.ack_timeout_ms == 0 {
            return Err(ConfigError::ZeroTimeout("matching_engine.ack_timeout_ms"));
        }
        Ok(())
    }
}

fn check_url(field: &'static str, value: &str, schemes: &[&str]) -> Result<(), ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidUrl {
        field,
        value: value.to_string(),
        reason,
    };

    let url = Url::parse(value).map_err(|e| invalid(e.to_string()))?;
    if !schemes.contains(&url.scheme()) {
        return Err(invalid(format!("expected scheme {}", schemes.join(" or "))));
    }
    Ok(())
}
