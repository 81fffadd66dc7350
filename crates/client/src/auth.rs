//! Token record and process-wide token store.
//!
//! The [`TokenStore`] owns the current [`TokenRecord`] and the in-flight
//! login handle. Both are guarded by synchronous mutexes; no lock is ever
//! held across an await point, so check-and-set on the in-flight slot is
//! atomic with respect to task interleaving.

use chrono::Utc;
use futures::future::{BoxFuture, Shared};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::{debug, warn};

use crate::error::Result;
use marksearch_config::constants::TOKEN_EXPIRY_BUFFER_SECS;

/// A login attempt shared by every caller that observes it in flight.
///
/// The output is cloned to each waiter, so success hands out the same token
/// and failure hands out the same error.
pub(crate) type LoginFuture = Shared<BoxFuture<'static, Result<TokenRecord>>>;

/// A bearer token obtained from a successful login exchange, together with
/// the anti-forgery value that accompanied it.
#[derive(Debug, Clone)]
pub struct TokenRecord {
    access_token: SecretString,
    xsrf_token: String,
    expires_at_ms: i64,
}

impl TokenRecord {
    /// Create a record. `access_token` must be non-empty; the login flow
    /// enforces that before constructing one.
    pub fn new(access_token: String, xsrf_token: String, expires_at_ms: i64) -> Self {
        Self {
            access_token: SecretString::new(access_token.into()),
            xsrf_token,
            expires_at_ms,
        }
    }

    /// The bearer token value.
    pub fn access_token(&self) -> &str {
        self.access_token.expose_secret()
    }

    /// The anti-forgery token echoed back on authenticated requests.
    pub fn xsrf_token(&self) -> &str {
        &self.xsrf_token
    }

    /// Wall-clock expiry in epoch milliseconds.
    pub fn expires_at_ms(&self) -> i64 {
        self.expires_at_ms
    }

    /// Valid means strictly inside the expiry buffer: `now < expiry - 5min`.
    pub fn is_valid_at(&self, now_ms: i64) -> bool {
        now_ms < self.expires_at_ms - TOKEN_EXPIRY_BUFFER_SECS * 1000
    }

    fn is_valid(&self) -> bool {
        self.is_valid_at(Utc::now().timestamp_millis())
    }
}

/// Durable form of a token record for the optional side-cache file.
///
/// Session cookies are not persisted; a resumed record carries the
/// anti-forgery value it was issued with, and a later re-login always starts
/// with a fresh priming call.
#[derive(Serialize, Deserialize)]
struct CachedToken {
    access_token: String,
    xsrf_token: String,
    expires_at_ms: i64,
}

/// Process-wide holder for the current token record and the in-flight login
/// handle.
#[derive(Default)]
pub struct TokenStore {
    record: Mutex<Option<TokenRecord>>,
    in_flight: Mutex<Option<LoginFuture>>,
    cache_file: Option<PathBuf>,
}

impl std::fmt::Debug for TokenStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenStore")
            .field("record", &lock(&self.record))
            .field("in_flight", &lock(&self.in_flight).is_some())
            .field("cache_file", &self.cache_file)
            .finish()
    }
}

impl TokenStore {
    /// Create an in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store backed by a durable side-cache file.
    ///
    /// A still-valid cached record is loaded immediately, so a restarted
    /// process can resume without a fresh login.
    pub fn with_cache_file(path: PathBuf) -> Self {
        let record = load_cached_record(&path);
        Self {
            record: Mutex::new(record),
            in_flight: Mutex::new(None),
            cache_file: Some(path),
        }
    }

    /// Return the current record only if it is outside the expiry buffer.
    pub fn get_valid(&self) -> Option<TokenRecord> {
        lock(&self.record).as_ref().filter(|r| r.is_valid()).cloned()
    }

    /// Atomically overwrite the record, persisting it when a side cache is
    /// configured.
    pub fn replace(&self, record: TokenRecord) {
        if let Some(path) = &self.cache_file {
            persist_record(path, &record);
        }
        *lock(&self.record) = Some(record);
    }

    /// Atomically drop the record and delete any side cache backing it.
    pub fn clear(&self) {
        *lock(&self.record) = None;
        if let Some(path) = &self.cache_file
            && let Err(e) = std::fs::remove_file(path)
            && e.kind() != std::io::ErrorKind::NotFound
        {
            warn!(path = %path.display(), error = %e, "failed to remove token side cache");
        }
    }

    /// Join the login already in flight, or register the one produced by
    /// `start`. The check and the set happen under one synchronous lock, so
    /// two callers can never both observe an empty slot.
    pub(crate) fn join_or_start_login<F>(&self, start: F) -> LoginFuture
    where
        F: FnOnce() -> LoginFuture,
    {
        let mut slot = lock(&self.in_flight);
        if let Some(login) = slot.as_ref() {
            return login.clone();
        }
        let login = start();
        *slot = Some(login.clone());
        login
    }

    /// Empty the in-flight slot. Called when the attempt settles, success or
    /// failure.
    pub(crate) fn clear_in_flight(&self) {
        *lock(&self.in_flight) = None;
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

fn load_cached_record(path: &PathBuf) -> Option<TokenRecord> {
    let raw = std::fs::read_to_string(path).ok()?;
    let cached: CachedToken = match serde_json::from_str(&raw) {
        Ok(c) => c,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "ignoring unreadable token side cache");
            return None;
        }
    };
    let record = TokenRecord::new(cached.access_token, cached.xsrf_token, cached.expires_at_ms);
    if record.is_valid() && !record.access_token().is_empty() {
        debug!(path = %path.display(), "resumed token record from side cache");
        Some(record)
    } else {
        None
    }
}

fn persist_record(path: &PathBuf, record: &TokenRecord) {
    let cached = CachedToken {
        access_token: record.access_token().to_string(),
        xsrf_token: record.xsrf_token().to_string(),
        expires_at_ms: record.expires_at_ms(),
    };
    let write = || -> std::io::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string(&cached).map_err(std::io::Error::other)?;
        std::fs::write(path, json)
    };
    // A cache write failure degrades to in-memory auth, it never fails a
    // login that already succeeded.
    if let Err(e) = write() {
        warn!(path = %path.display(), error = %e, "failed to persist token side cache");
    }
}
