//! Login-flow endpoints: session priming and credential exchange.

use reqwest::{Client, header};
use secrecy::ExposeSecret;
use tracing::debug;

use crate::endpoints::RegistryRoutes;
use crate::endpoints::request::send;
use crate::error::{AuthStage, Error, Result};
use marksearch_config::RegistryCredentials;
use marksearch_config::constants::{BROWSER_ACCEPT, BROWSER_USER_AGENT, DEFAULT_TOKEN_TTL_SECS};

/// Outcome of a successful credential exchange.
pub(crate) struct TokenGrant {
    pub access_token: String,
    /// Lifetime in seconds. Defaults to one hour when the upstream omits it.
    pub expires_in: i64,
}

/// GET the session-priming page and return the anti-forgery token.
///
/// The registry only issues the anti-forgery cookie to browser-looking
/// requests, hence the User-Agent/Accept headers. The token is returned as a
/// first-class value rather than recovered from jar state later; the jar
/// still records the session cookies for the login POST.
pub(crate) async fn prime_session(
    http: &Client,
    base_url: &str,
    routes: &RegistryRoutes,
) -> Result<String> {
    let url = format!("{}{}", base_url, routes.priming_path);
    debug!(%url, "priming registry session");

    let builder = http
        .get(&url)
        .header(header::USER_AGENT, BROWSER_USER_AGENT)
        .header(header::ACCEPT, BROWSER_ACCEPT);
    let response = send(builder).await?;

    response
        .cookies()
        .find(|cookie| cookie.name() == routes.xsrf_cookie)
        .map(|cookie| cookie.value().to_string())
        .filter(|value| !value.is_empty())
        .ok_or_else(|| Error::AuthProtocol {
            stage: AuthStage::XsrfExtraction,
            message: format!(
                "priming response set no {} cookie; the upstream login page contract may have changed",
                routes.xsrf_cookie
            ),
        })
}

/// POST credentials to the login endpoint and parse the token grant.
pub(crate) async fn exchange_credentials(
    http: &Client,
    base_url: &str,
    routes: &RegistryRoutes,
    credentials: &RegistryCredentials,
    xsrf_token: &str,
) -> Result<TokenGrant> {
    let url = format!("{}{}", base_url, routes.login_path);
    let referer = format!("{}{}", base_url, routes.priming_path);
    debug!(%url, username = %credentials.username, "exchanging credentials for access token");

    let body = serde_json::json!({
        "username": credentials.username,
        "password": credentials.password.expose_secret(),
        "rememberMe": false,
    });
    let builder = http
        .post(&url)
        .header(routes.xsrf_header.as_str(), xsrf_token)
        .header(header::ORIGIN, base_url)
        .header(header::REFERER, referer)
        .json(&body);
    let response = send(builder).await?;

    let payload: serde_json::Value = response.json().await?;
    let access_token = payload
        .get("access_token")
        .and_then(|v| v.as_str())
        .filter(|t| !t.is_empty())
        .ok_or_else(|| Error::AuthProtocol {
            stage: AuthStage::TokenExtraction,
            message: "login response carried no non-empty access_token".to_string(),
        })?
        .to_string();

    // Absent or non-numeric expires_in falls back to the default TTL.
    let expires_in = payload
        .get("expires_in")
        .and_then(|v| v.as_i64())
        .unwrap_or(DEFAULT_TOKEN_TTL_SECS);

    Ok(TokenGrant {
        access_token,
        expires_in,
    })
}
