//! Upstream registry endpoint implementations.
//!
//! Endpoint modules know the wire format of one upstream route: how to build
//! its [`RequestSpec`] and how to parse its response. Authentication and the
//! retry policy live in [`crate::client`]; nothing here touches the token
//! store.

mod auth;
mod image;
mod notice;
mod request;
mod search;

pub(crate) use auth::{TokenGrant, exchange_credentials, prime_session};
pub(crate) use image::image_spec;
pub(crate) use notice::{notice_spec, notice_to_value};
pub(crate) use request::send;
pub use request::RequestSpec;
pub(crate) use search::search_spec;

use marksearch_config::constants::{
    DEFAULT_IMAGE_PATH, DEFAULT_LOGIN_PATH, DEFAULT_NOTICE_PATH, DEFAULT_PRIMING_PATH,
    DEFAULT_SEARCH_PATH, XSRF_COOKIE_NAME, XSRF_HEADER_NAME,
};

/// Paths and anti-forgery names for one upstream registry deployment.
///
/// The defaults match the national registry this client was written against;
/// every field is overridable through the client builder because these are
/// deployment configuration, not part of the protocol design.
#[derive(Debug, Clone)]
pub struct RegistryRoutes {
    /// Session-priming page; a GET here sets the anti-forgery cookie.
    pub priming_path: String,
    /// Credential-exchange endpoint.
    pub login_path: String,
    /// Free-text search endpoint.
    pub search_path: String,
    /// XML notice endpoint (`<notice_path>/<id>`).
    pub notice_path: String,
    /// Binary image endpoint (`<image_path>/<id>/<variant>`).
    pub image_path: String,
    /// Name of the cookie carrying the anti-forgery token.
    pub xsrf_cookie: String,
    /// Header the anti-forgery token is echoed back in.
    pub xsrf_header: String,
}

impl Default for RegistryRoutes {
    fn default() -> Self {
        Self {
            priming_path: DEFAULT_PRIMING_PATH.to_string(),
            login_path: DEFAULT_LOGIN_PATH.to_string(),
            search_path: DEFAULT_SEARCH_PATH.to_string(),
            notice_path: DEFAULT_NOTICE_PATH.to_string(),
            image_path: DEFAULT_IMAGE_PATH.to_string(),
            xsrf_cookie: XSRF_COOKIE_NAME.to_string(),
            xsrf_header: XSRF_HEADER_NAME.to_string(),
        }
    }
}
