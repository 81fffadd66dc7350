//! Client builder for constructing [`RegistryClient`] instances.
//!
//! Responsible for validating required configuration, normalizing the base
//! URL, and configuring the underlying HTTP client (cookie jar, timeout,
//! redirect limit, TLS verification). Missing credentials are deliberately
//! NOT an error here: per the configuration contract they fail at first
//! authenticated use.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crate::auth::TokenStore;
use crate::authenticator::Authenticator;
use crate::client::RegistryClient;
use crate::endpoints::RegistryRoutes;
use crate::error::{Error, Result};
use marksearch_config::{Config, RegistryCredentials};
use marksearch_config::constants::{DEFAULT_MAX_REDIRECTS, DEFAULT_TIMEOUT_SECS};

/// Builder for creating a new [`RegistryClient`].
///
/// # Example
///
/// ```rust,ignore
/// use marksearch_client::RegistryClient;
///
/// let client = RegistryClient::builder()
///     .base_url("https://registry.example")
///     .credentials(credentials)
///     .build()?;
/// ```
pub struct RegistryClientBuilder {
    base_url: Option<String>,
    credentials: Option<RegistryCredentials>,
    routes: RegistryRoutes,
    timeout: Duration,
    token_cache: Option<PathBuf>,
    skip_verify: bool,
}

impl Default for RegistryClientBuilder {
    fn default() -> Self {
        Self {
            base_url: None,
            credentials: None,
            routes: RegistryRoutes::default(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            token_cache: None,
            skip_verify: false,
        }
    }
}

impl RegistryClientBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the builder from a loaded [`Config`].
    pub fn from_config(config: Config) -> Self {
        let mut builder = Self::new()
            .base_url(config.base_url)
            .timeout(config.timeout);
        if let Some(credentials) = config.credentials {
            builder = builder.credentials(credentials);
        }
        if let Some(path) = config.token_cache {
            builder = builder.token_cache(path);
        }
        builder
    }

    /// Set the base URL of the registry. Trailing slashes are removed.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the service credentials.
    pub fn credentials(mut self, credentials: RegistryCredentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Override the upstream route layout.
    pub fn routes(mut self, routes: RegistryRoutes) -> Self {
        self.routes = routes;
        self
    }

    /// Set the per-request timeout. Default is 30 seconds.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Persist the token record to a durable side-cache file.
    pub fn token_cache(mut self, path: PathBuf) -> Self {
        self.token_cache = Some(path);
        self
    }

    /// Skip TLS certificate verification.
    ///
    /// # Security Warning
    /// Only for development and test environments.
    pub fn skip_verify(mut self, skip: bool) -> Self {
        self.skip_verify = skip;
        self
    }

    fn normalize_base_url(url: String) -> String {
        url.trim_end_matches('/').to_string()
    }

    /// Build the client.
    pub fn build(self) -> Result<RegistryClient> {
        let base_url = self
            .base_url
            .ok_or_else(|| Error::Configuration("base_url is required".to_string()))?;
        let base_url = Self::normalize_base_url(base_url);

        // The cookie jar carries the registry's session cookies between the
        // priming GET and the login POST.
        let mut http_builder = reqwest::Client::builder()
            .cookie_store(true)
            .timeout(self.timeout)
            .redirect(reqwest::redirect::Policy::limited(DEFAULT_MAX_REDIRECTS));

        if self.skip_verify && base_url.starts_with("https://") {
            http_builder = http_builder.danger_accept_invalid_certs(true);
        }

        let http = http_builder.build().map_err(Error::from)?;

        let store = Arc::new(match self.token_cache {
            Some(path) => TokenStore::with_cache_file(path),
            None => TokenStore::new(),
        });
        let auth = Authenticator::new(
            http.clone(),
            base_url.clone(),
            self.routes.clone(),
            self.credentials,
            Arc::clone(&store),
        );

        Ok(RegistryClient {
            http,
            base_url,
            routes: self.routes,
            auth,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::SecretString;

    fn test_credentials() -> RegistryCredentials {
        RegistryCredentials {
            username: "svc-account".to_string(),
            password: SecretString::new("pw".to_string().into()),
        }
    }

    #[test]
    fn builds_with_credentials() {
        let client = RegistryClient::builder()
            .base_url("https://registry.example")
            .credentials(test_credentials())
            .build()
            .unwrap();
        assert_eq!(client.base_url(), "https://registry.example");
    }

    #[test]
    fn builds_without_credentials() {
        // Absent credentials are a first-use error, not a build error.
        let client = RegistryClient::builder()
            .base_url("https://registry.example")
            .build();
        assert!(client.is_ok());
    }

    #[test]
    fn missing_base_url_fails() {
        let err = RegistryClient::builder().build().unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
    }

    #[test]
    fn base_url_is_normalized() {
        let client = RegistryClient::builder()
            .base_url("https://registry.example//")
            .build()
            .unwrap();
        assert_eq!(client.base_url(), "https://registry.example");
    }
}
