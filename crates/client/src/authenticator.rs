//! Login orchestration with single-flight de-duplication.
//!
//! The [`Authenticator`] owns the decision tree for producing a valid bearer
//! token: reuse the cached record, join the login already in flight, or
//! start a new one. At most one login flow runs per process; every caller
//! that joins an attempt observes its exact outcome.

use chrono::Utc;
use futures::FutureExt;
use reqwest::Client;
use std::sync::Arc;
use tracing::debug;

use crate::auth::{LoginFuture, TokenRecord, TokenStore};
use crate::endpoints::{self, RegistryRoutes};
use crate::error::{Error, Result};
use marksearch_config::RegistryCredentials;
use marksearch_config::constants::{ENV_PASSWORD, ENV_USERNAME};

/// Produces valid bearer tokens, performing the full login flow when needed.
#[derive(Debug)]
pub struct Authenticator {
    http: Client,
    base_url: String,
    routes: RegistryRoutes,
    credentials: Option<RegistryCredentials>,
    store: Arc<TokenStore>,
}

impl Authenticator {
    pub(crate) fn new(
        http: Client,
        base_url: String,
        routes: RegistryRoutes,
        credentials: Option<RegistryCredentials>,
        store: Arc<TokenStore>,
    ) -> Self {
        Self {
            http,
            base_url,
            routes,
            credentials,
            store,
        }
    }

    /// The token store this authenticator updates.
    pub fn store(&self) -> &Arc<TokenStore> {
        &self.store
    }

    /// Produce a valid token record.
    ///
    /// Order of checks:
    /// 1. unconfigured credentials fail immediately and are never retried;
    /// 2. a cached record outside the expiry buffer is returned with no
    ///    network I/O;
    /// 3. an in-flight login is joined rather than duplicated;
    /// 4. otherwise a new login flow starts, registered in the in-flight
    ///    slot before the first await so no concurrent caller can miss it.
    pub async fn acquire(&self) -> Result<TokenRecord> {
        let credentials = self.credentials.clone().ok_or_else(|| {
            Error::Configuration(format!("{ENV_USERNAME} and {ENV_PASSWORD} must be set"))
        })?;

        if let Some(record) = self.store.get_valid() {
            return Ok(record);
        }

        let login = self
            .store
            .join_or_start_login(|| self.start_login(credentials));
        login.await
    }

    /// Build the shared login future. The store is updated from inside the
    /// future so the outcome is identical for the caller that started it and
    /// every caller that joined it.
    fn start_login(&self, credentials: RegistryCredentials) -> LoginFuture {
        let http = self.http.clone();
        let base_url = self.base_url.clone();
        let routes = self.routes.clone();
        let store = Arc::clone(&self.store);

        async move {
            let result = run_login_flow(&http, &base_url, &routes, &credentials).await;
            // The slot empties no matter how the attempt settled.
            store.clear_in_flight();
            match result {
                Ok(record) => {
                    store.replace(record.clone());
                    Ok(record)
                }
                Err(e) => {
                    // Partial state (stale record, side cache) must not leak
                    // into the next attempt.
                    store.clear();
                    Err(e)
                }
            }
        }
        .boxed()
        .shared()
    }
}

/// One login attempt: prime the session, exchange credentials, build the
/// record. No internal retry; failures propagate to [`Authenticator`].
async fn run_login_flow(
    http: &Client,
    base_url: &str,
    routes: &RegistryRoutes,
    credentials: &RegistryCredentials,
) -> Result<TokenRecord> {
    let xsrf_token = endpoints::prime_session(http, base_url, routes).await?;
    let grant =
        endpoints::exchange_credentials(http, base_url, routes, credentials, &xsrf_token).await?;

    let expires_at_ms = Utc::now().timestamp_millis() + grant.expires_in.saturating_mul(1000);
    debug!(expires_at_ms, "registry login succeeded");
    Ok(TokenRecord::new(grant.access_token, xsrf_token, expires_at_ms))
}
