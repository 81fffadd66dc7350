//! Configuration loader for environment variables and `.env` files.
//!
//! Responsibilities:
//! - Load registry connection settings from environment variables.
//! - Provide a builder-pattern `ConfigLoader` for programmatic overrides.
//! - Enforce the `DOTENV_DISABLED` gate so tests never pick up a stray `.env`.
//!
//! Does NOT handle:
//! - Deciding whether missing credentials are fatal. Absent credentials
//!   produce `Config { credentials: None }`; the client surfaces a
//!   configuration error on first use, not at startup.

use secrecy::SecretString;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;
use url::Url;

use crate::constants::{
    DEFAULT_TIMEOUT_SECS, ENV_BASE_URL, ENV_PASSWORD, ENV_TIMEOUT_SECS, ENV_TOKEN_CACHE,
    ENV_USERNAME,
};

/// Errors that can occur during configuration loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid value for {var}: {message}")]
    InvalidValue { var: String, message: String },

    #[error("Registry base URL is required")]
    MissingBaseUrl,

    #[error("Failed to load .env file: {0}")]
    Dotenv(#[from] dotenvy::Error),
}

/// Service-account credentials for the upstream registry.
///
/// The password is secrecy-wrapped so it never appears in Debug output or
/// logs.
#[derive(Debug, Clone)]
pub struct RegistryCredentials {
    pub username: String,
    pub password: SecretString,
}

/// Resolved connection configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the upstream registry, without a trailing slash.
    pub base_url: String,
    /// Service credentials, when configured. `None` is not an error here;
    /// the client fails on first authenticated use.
    pub credentials: Option<RegistryCredentials>,
    /// Per-request HTTP timeout.
    pub timeout: Duration,
    /// Durable token side-cache file. `None` keeps auth state in memory only.
    pub token_cache: Option<PathBuf>,
}

/// Configuration loader that builds a [`Config`] from environment variables
/// with optional programmatic overrides.
#[derive(Default)]
pub struct ConfigLoader {
    base_url: Option<String>,
    username: Option<String>,
    password: Option<SecretString>,
    timeout: Option<Duration>,
    token_cache: Option<PathBuf>,
}

impl ConfigLoader {
    /// Create a new configuration loader.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a `.env` file from the current directory, if present.
    ///
    /// Honors the `DOTENV_DISABLED` environment variable so test runs can
    /// opt out of ambient `.env` files.
    pub fn load_dotenv(&self) -> Result<(), ConfigError> {
        if std::env::var("DOTENV_DISABLED").is_ok() {
            tracing::debug!("DOTENV_DISABLED set, skipping .env load");
            return Ok(());
        }
        match dotenvy::dotenv() {
            Ok(path) => {
                tracing::debug!(path = %path.display(), "loaded .env file");
                Ok(())
            }
            Err(e) if e.not_found() => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    /// Override the registry base URL.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Override the service username.
    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    /// Override the service password.
    pub fn password(mut self, password: SecretString) -> Self {
        self.password = Some(password);
        self
    }

    /// Override the HTTP timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Override the token side-cache path.
    pub fn token_cache(mut self, path: PathBuf) -> Self {
        self.token_cache = Some(path);
        self
    }

    /// Resolve the configuration, reading the environment for any value not
    /// set programmatically.
    pub fn load(self) -> Result<Config, ConfigError> {
        let base_url = self
            .base_url
            .or_else(|| env_non_empty(ENV_BASE_URL))
            .ok_or(ConfigError::MissingBaseUrl)?;
        let base_url = validate_base_url(base_url)?;

        let username = self.username.or_else(|| env_non_empty(ENV_USERNAME));
        let password = self
            .password
            .or_else(|| env_non_empty(ENV_PASSWORD).map(|p| SecretString::new(p.into())));

        // Credentials travel as a pair; a lone username or password counts
        // as unconfigured.
        let credentials = match (username, password) {
            (Some(username), Some(password)) => Some(RegistryCredentials { username, password }),
            _ => None,
        };

        let timeout = match self.timeout {
            Some(t) => t,
            None => match env_non_empty(ENV_TIMEOUT_SECS) {
                Some(raw) => {
                    let secs: u64 = raw.parse().map_err(|_| ConfigError::InvalidValue {
                        var: ENV_TIMEOUT_SECS.to_string(),
                        message: format!("expected integer seconds, got {raw:?}"),
                    })?;
                    Duration::from_secs(secs)
                }
                None => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            },
        };

        let token_cache = match self.token_cache {
            Some(path) => Some(path),
            None => match env_non_empty(ENV_TOKEN_CACHE) {
                Some(raw) if raw.eq_ignore_ascii_case("off") => None,
                Some(raw) => Some(PathBuf::from(raw)),
                None => None,
            },
        };

        Ok(Config {
            base_url,
            credentials,
            timeout,
            token_cache,
        })
    }
}

/// Default location for the durable token side-cache file.
///
/// Resolves to the platform cache directory (e.g. `~/.cache/marksearch` on
/// Linux). Returns `None` when the platform provides no cache directory.
pub fn default_token_cache_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "marksearch")
        .map(|dirs| dirs.cache_dir().join("token.json"))
}

fn env_non_empty(var: &str) -> Option<String> {
    std::env::var(var).ok().filter(|v| !v.trim().is_empty())
}

fn validate_base_url(raw: String) -> Result<String, ConfigError> {
    let trimmed = raw.trim_end_matches('/').to_string();
    let parsed = Url::parse(&trimmed).map_err(|e| ConfigError::InvalidValue {
        var: ENV_BASE_URL.to_string(),
        message: e.to_string(),
    })?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidValue {
            var: ENV_BASE_URL.to_string(),
            message: format!("unsupported scheme {:?}", parsed.scheme()),
        });
    }
    Ok(trimmed)
}
