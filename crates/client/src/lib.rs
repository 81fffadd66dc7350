//! Authenticated client for a national trademark registry API.
//!
//! This crate owns the registry's login protocol: it primes a cookie-based
//! web session, extracts the anti-forgery token, exchanges service
//! credentials for a bearer token, caches that token with expiry-aware
//! reuse, and de-duplicates concurrent logins so simultaneous requests
//! share one flow. Authenticated calls (search, notice, image) retry
//! exactly once on an upstream 401/403 after forcing a fresh login.

pub mod auth;
mod authenticator;
pub mod client;
pub mod endpoints;
pub mod error;
pub mod models;
pub mod testing;

pub use auth::{TokenRecord, TokenStore};
pub use authenticator::Authenticator;
pub use client::RegistryClient;
pub use client::builder::RegistryClientBuilder;
pub use endpoints::{RegistryRoutes, RequestSpec};
pub use error::{AuthStage, Error, ErrorEnvelope, Result};
pub use models::{ImageData, ImageVariant, SearchQuery, SearchResults, TrademarkHit};
