use std::env;
use std::time::Duration;

use url::Url;

use crate::error::{AppError, Result};

pub const DEFAULT_API_BASE_URL: &str = "https://clausegaurd.onrender.com";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub api_base_url: String,
    /// Per-request timeout. `None` waits indefinitely.
    pub request_timeout: Option<Duration>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            request_timeout: None,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        // Load environment variables from .env file if it exists
        dotenv::dotenv().ok();

        let base_url = env::var("CLAUSEGUARD_API_URL").ok();
        let timeout = env::var("CLAUSEGUARD_TIMEOUT_SECS").ok();
        Self::from_values(base_url.as_deref(), timeout.as_deref())
    }

    /// Build a config from raw values, applying defaults for absent ones.
    pub fn from_values(base_url: Option<&str>, timeout_secs: Option<&str>) -> Result<Self> {
        let api_base_url = match base_url.map(str::trim).filter(|s| !s.is_empty()) {
            Some(raw) => normalize_base_url(raw)?,
            None => DEFAULT_API_BASE_URL.to_string(),
        };

        let request_timeout = match timeout_secs.map(str::trim).filter(|s| !s.is_empty()) {
            Some(raw) => Some(parse_timeout(raw)?),
            None => None,
        };

        Ok(Config {
            api_base_url,
            request_timeout,
        })
    }

    /// Full URL of an endpoint path such as `/analyze`.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.api_base_url, path.trim_start_matches('/'))
    }
}

fn normalize_base_url(raw: &str) -> Result<String> {
    let parsed = Url::parse(raw)
        .map_err(|e| AppError::ConfigError(format!("Invalid API URL {:?}: {}", raw, e)))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(AppError::ConfigError(format!(
            "Invalid API URL {:?}: scheme must be http or https",
            raw
        )));
    }
    Ok(raw.trim_end_matches('/').to_string())
}

fn parse_timeout(raw: &str) -> Result<Duration> {
    let secs = raw
        .parse::<u64>()
        .map_err(|e| AppError::ConfigError(format!("Invalid timeout: {}", e)))?;
    if secs == 0 {
        return Err(AppError::ConfigError(
            "Invalid timeout: must be at least 1 second".to_string(),
        ));
    }
    Ok(Duration::from_secs(secs))
}

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;
