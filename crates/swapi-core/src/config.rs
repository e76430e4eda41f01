//! Runtime settings.
//!
//! Resolution order: built-in defaults, then an optional `swapi.toml`, then
//! `SWAPI_*` environment variables. The CLI applies its flags last.

use crate::error::{SwapiError, SwapiResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default remote API root. Resource paths are appended to it.
pub const DEFAULT_SWAPI_URL: &str = "https://swapi.dev/api/";

/// Default per-request timeout for the remote API.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub database_path: PathBuf,
    pub swapi_base_url: String,
    pub request_timeout_secs: u64,
    /// Skip TLS certificate verification for the remote API. The public
    /// SWAPI deployment has shipped expired certificates, so this is on by
    /// default and logged as insecure whenever it is used.
    pub accept_invalid_certs: bool,
    pub host: String,
    pub port: u16,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from(".swapi/swapi.db"),
            swapi_base_url: DEFAULT_SWAPI_URL.to_string(),
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
            accept_invalid_certs: true,
            host: "127.0.0.1".to_string(),
            port: 3030,
        }
    }
}

pub fn default_config_path() -> PathBuf {
    PathBuf::from("swapi.toml")
}

impl Settings {
    /// Load settings from defaults, the config file (if present) and the
    /// process environment.
    pub fn load(config_path: Option<&Path>) -> SwapiResult<Self> {
        let path = config_path
            .map(Path::to_path_buf)
            .unwrap_or_else(default_config_path);

        let mut settings = if path.exists() {
            let contents = std::fs::read_to_string(&path)?;
            toml::from_str(&contents)
                .map_err(|e| SwapiError::Config(format!("{}: {}", path.display(), e)))?
        } else {
            Settings::default()
        };

        settings.apply_env(|key| std::env::var(key).ok())?;
        Ok(settings)
    }

    /// Override fields from environment variables looked up through `lookup`.
    pub fn apply_env<F>(&mut self, lookup: F) -> SwapiResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup("SWAPI_DB_PATH") {
            self.database_path = PathBuf::from(path);
        }
        if let Some(url) = lookup("SWAPI_BASE_URL") {
            self.swapi_base_url = url;
        }
        if let Some(secs) = lookup("SWAPI_TIMEOUT_SECS") {
            self.request_timeout_secs = secs
                .trim()
                .parse()
                .map_err(|_| SwapiError::Config(format!("SWAPI_TIMEOUT_SECS: '{}' is not a number", secs)))?;
        }
        if let Some(flag) = lookup("SWAPI_INSECURE_TLS") {
            self.accept_invalid_certs = parse_bool(&flag)
                .ok_or_else(|| SwapiError::Config(format!("SWAPI_INSECURE_TLS: '{}' is not a boolean", flag)))?;
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
