//! Centralized constants for the marksearch workspace.
//!
//! This module contains default values used across crates to avoid
//! magic number duplication and improve maintainability.

// =============================================================================
// Connection & Timeout Defaults
// =============================================================================

/// Default HTTP request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default access-token time-to-live in seconds (1 hour).
///
/// Used when the registry's login response omits `expires_in` or carries a
/// non-numeric value.
pub const DEFAULT_TOKEN_TTL_SECS: i64 = 3600;

/// Buffer before token expiry during which the token is treated as invalid.
///
/// A token within 5 minutes of its expiry is not reused; the next caller
/// triggers a fresh login instead of risking a mid-request expiry.
pub const TOKEN_EXPIRY_BUFFER_SECS: i64 = 300;

/// Default maximum number of HTTP redirects to follow.
pub const DEFAULT_MAX_REDIRECTS: usize = 5;

// =============================================================================
// Upstream Registry Routes
// =============================================================================

/// Session-priming page. A GET here sets the anti-forgery cookie.
pub const DEFAULT_PRIMING_PATH: &str = "/search";

/// Credential-exchange endpoint. Returns `{access_token, expires_in}`.
pub const DEFAULT_LOGIN_PATH: &str = "/api/auth/login";

/// Free-text trademark search endpoint.
pub const DEFAULT_SEARCH_PATH: &str = "/api/marks/search";

/// Per-record XML notice endpoint (`<path>/<id>`).
pub const DEFAULT_NOTICE_PATH: &str = "/api/notices";

/// Binary image endpoint (`<path>/<id>/<variant>`).
pub const DEFAULT_IMAGE_PATH: &str = "/api/images";

/// Name of the cookie carrying the anti-forgery token.
pub const XSRF_COOKIE_NAME: &str = "XSRF-TOKEN";

/// Header the anti-forgery token must be echoed back in.
pub const XSRF_HEADER_NAME: &str = "X-XSRF-TOKEN";

// =============================================================================
// Browser-Like Request Headers
// =============================================================================

/// User-Agent presented on the session-priming request.
///
/// The registry's login page only sets the anti-forgery cookie for requests
/// that look like a browser.
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64; rv:128.0) Gecko/20100101 Firefox/128.0";

/// Accept header presented on the session-priming request.
pub const BROWSER_ACCEPT: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";

// =============================================================================
// Environment Variables
// =============================================================================

/// Base URL of the upstream registry.
pub const ENV_BASE_URL: &str = "MARKSEARCH_BASE_URL";

/// Service account username.
pub const ENV_USERNAME: &str = "MARKSEARCH_USERNAME";

/// Service account password.
pub const ENV_PASSWORD: &str = "MARKSEARCH_PASSWORD";

/// HTTP timeout override in seconds.
pub const ENV_TIMEOUT_SECS: &str = "MARKSEARCH_TIMEOUT_SECS";

/// Path of the durable token side-cache file ("off" disables it).
pub const ENV_TOKEN_CACHE: &str = "MARKSEARCH_TOKEN_CACHE";

// =============================================================================
// Search Defaults
// =============================================================================

/// Default page size for search results.
pub const DEFAULT_SEARCH_PAGE_SIZE: u64 = 50;

/// Maximum accepted page size for search results.
pub const MAX_SEARCH_PAGE_SIZE: u64 = 500;
