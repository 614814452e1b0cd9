// src/auth/mod.rs — Session token persistence
//
// The token lives in two places: durable storage (storage.json) and a
// same-named cookie (cookies.json). Writes go to both; reads prefer durable
// storage and fall back to the cookie, so a token dropped into the cookie
// jar by the OAuth redirect is picked up before anything else was written.

pub mod oauth;
pub mod service;
pub mod storage;

use anyhow::Result;
use std::sync::Arc;

pub use service::{AuthService, TokenResponse};
pub use storage::{CookieJar, FileStorage, MemoryStorage, Storage};

use crate::infra::paths;

/// Storage key and cookie name for the session token.
pub const TOKEN_KEY: &str = "codeme_jwt";

/// Storage key for the cached user profile JSON.
pub const USER_KEY: &str = "codeme_user";

pub const DEFAULT_COOKIE_DAYS: i64 = 7;

/// Single owner of the session token's two persistence layers.
#[derive(Clone)]
pub struct TokenStore {
    durable: Arc<dyn Storage>,
    cookies: CookieJar,
    cookie_days: i64,
}

impl TokenStore {
    pub fn new(durable: Arc<dyn Storage>, cookies: CookieJar, cookie_days: i64) -> Self {
        Self {
            durable,
            cookies,
            cookie_days,
        }
    }

    /// Store backed by the files under the config dir.
    pub fn open_default(cookie_days: i64) -> Self {
        let durable: Arc<dyn Storage> = Arc::new(FileStorage::new(paths::storage_path()));
        let cookies = CookieJar::new(Arc::new(FileStorage::new(paths::cookies_path())));
        Self::new(durable, cookies, cookie_days)
    }

    /// Store that forgets everything when dropped.
    pub fn in_memory() -> Self {
        Self::new(
            Arc::new(MemoryStorage::new()),
            CookieJar::new(Arc::new(MemoryStorage::new())),
            DEFAULT_COOKIE_DAYS,
        )
    }

    /// Durable storage, shared with the profile cache.
    pub fn durable(&self) -> Arc<dyn Storage> {
        Arc::clone(&self.durable)
    }

    /// Current token: durable storage, then cookie, else empty.
    ///
    /// A storage layer that cannot be read counts as empty.
    pub fn token(&self) -> String {
        match self.durable.get(TOKEN_KEY) {
            Ok(Some(t)) if !t.is_empty() => return t,
            Ok(_) => {}
            Err(e) => tracing::warn!("Could not read token from storage: {e}"),
        }
        match self.cookies.get(TOKEN_KEY) {
            Ok(Some(t)) => t,
            Ok(None) => String::new(),
            Err(e) => {
                tracing::warn!("Could not read token cookie: {e}");
                String::new()
            }
        }
    }

    /// Write the token to durable storage and the cookie.
    pub fn set_token(&self, token: &str) -> Result<()> {
        self.durable.set(TOKEN_KEY, token)?;
        self.cookies.set(TOKEN_KEY, token, self.cookie_days)
    }

    /// Place the token in the cookie only, the way the OAuth callback does.
    pub fn set_cookie_token(&self, token: &str) -> Result<()> {
        self.cookies.set(TOKEN_KEY, token, self.cookie_days)
    }

    /// Remove the token from both layers.
    pub fn clear_token(&self) -> Result<()> {
        self.durable.remove(TOKEN_KEY)?;
        self.cookies.clear(TOKEN_KEY)
    }
}
