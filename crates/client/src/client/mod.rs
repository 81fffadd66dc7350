//! Registry client and the authenticated request executor.
//!
//! This module provides the primary [`RegistryClient`] for the upstream
//! trademark registry. It automatically handles authentication and token
//! lifecycle.
//!
//! # Submodules
//! - [`builder`]: client construction and configuration
//! - `search`: free-text search method
//! - `notice`: XML notice fetch and parse
//! - `image`: binary image proxying
//!
//! # What this module does NOT handle:
//! - Wire formats of individual routes (delegated to [`crate::endpoints`])
//! - Token storage and single-flight login (delegated to
//!   [`crate::Authenticator`] and [`crate::TokenStore`])
//!
//! # Invariants
//! - Every authenticated call handles 401/403 by clearing the token store,
//!   forcing one re-login, and retrying the request exactly once
//! - A failing retry surfaces both attempts; there is never a third

pub mod builder;

mod image;
mod notice;
mod search;

use reqwest::Response;
use std::sync::Arc;
use tracing::debug;

use crate::auth::{TokenRecord, TokenStore};
use crate::authenticator::Authenticator;
use crate::endpoints::{self, RegistryRoutes, RequestSpec};
use crate::error::{Error, Result};

/// Client for the upstream trademark registry.
///
/// Cheap to share: all authenticated calls take `&self`, and concurrent
/// calls coordinate through the shared token store.
#[derive(Debug)]
pub struct RegistryClient {
    http: reqwest::Client,
    base_url: String,
    routes: RegistryRoutes,
    auth: Authenticator,
}

impl RegistryClient {
    /// Create a new client builder.
    pub fn builder() -> builder::RegistryClientBuilder {
        builder::RegistryClientBuilder::new()
    }

    /// The registry base URL, without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The token store shared with the authenticator.
    pub fn token_store(&self) -> &Arc<TokenStore> {
        self.auth.store()
    }

    /// Produce a valid bearer token, logging in if necessary.
    pub async fn acquire_token(&self) -> Result<String> {
        Ok(self.auth.acquire().await?.access_token().to_string())
    }

    /// Drop all cached auth state (record, side cache). The next
    /// authenticated call starts a clean login.
    pub fn clear_auth_state(&self) {
        self.auth.store().clear();
    }

    /// Execute `spec` with current credentials, applying the
    /// single-retry-on-auth-failure policy.
    ///
    /// A 401/403 response clears the token store, forces one fresh login,
    /// and replays the request once. If the replay also fails, the surfaced
    /// error carries both attempts. Any other failure is surfaced directly.
    pub(crate) async fn execute_authenticated(&self, spec: RequestSpec) -> Result<Response> {
        let record = self.auth.acquire().await?;

        match self.dispatch(&spec, &record).await {
            Err(Error::UpstreamAuth {
                status,
                url,
                message,
                ..
            }) => {
                debug!(status, "upstream rejected bearer token, forcing re-authentication");
                self.auth.store().clear();
                let fresh = self.auth.acquire().await?;
                match self.dispatch(&spec, &fresh).await {
                    Ok(response) => Ok(response),
                    Err(retry_err) => Err(Error::UpstreamAuth {
                        status,
                        url,
                        message,
                        retry: Some(Box::new(retry_err)),
                    }),
                }
            }
            other => other,
        }
    }

    async fn dispatch(&self, spec: &RequestSpec, record: &TokenRecord) -> Result<Response> {
        let builder = spec
            .build(&self.http, &self.base_url)
            .bearer_auth(record.access_token())
            .header(self.routes.xsrf_header.as_str(), record.xsrf_token());
        endpoints::send(builder).await
    }
}
