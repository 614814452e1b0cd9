// src/session.rs — Process-wide authentication state
//
// One `SessionContext` is built at startup, initialized once, and shared by
// `Arc` with everything that needs to know who is logged in. Nothing else
// inspects the token to answer that question.
//
// Resolution is two-phase: `init` trusts a cached profile if one exists
// (possibly stale; profile fields rarely change) and `verify` reconciles it
// with the backend when the caller asks.

use std::sync::{Arc, Mutex, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::auth::{oauth, AuthService, Storage, USER_KEY};
use crate::infra::errors::ClientError;
use crate::types::User;

/// Owner of per-identity in-memory state that must not outlive a logout.
pub trait SessionListener: Send + Sync {
    fn reset(&self);
}

#[derive(Debug, Clone)]
struct SessionState {
    user: Option<User>,
    is_loading: bool,
}

pub struct SessionContext {
    auth: AuthService,
    cache: Arc<dyn Storage>,
    state: RwLock<SessionState>,
    listeners: Mutex<Vec<Arc<dyn SessionListener>>>,
}

impl SessionContext {
    /// The profile cache shares durable storage with the token.
    pub fn new(auth: AuthService) -> Self {
        let cache = auth.client().tokens().durable();
        Self {
            auth,
            cache,
            state: RwLock::new(SessionState {
                user: None,
                is_loading: true,
            }),
            listeners: Mutex::new(Vec::new()),
        }
    }

    pub fn auth(&self) -> &AuthService {
        &self.auth
    }

    fn read_state(&self) -> RwLockReadGuard<'_, SessionState> {
        self.state.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write_state(&self) -> RwLockWriteGuard<'_, SessionState> {
        self.state.write().unwrap_or_else(|e| e.into_inner())
    }

    pub fn user(&self) -> Option<User> {
        self.read_state().user.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.read_state().is_loading
    }

    pub fn is_authenticated(&self) -> bool {
        self.read_state().user.is_some()
    }

    /// Restore the session from local state. Never fails: anything that
    /// prevents resolving an identity ends in the logged-out state.
    pub async fn init(&self) -> Option<User> {
        let token = self.auth.client().token();
        if token.is_empty() {
            tracing::debug!("No session token; starting logged out");
            self.finish(None);
            return None;
        }

        if let Some(cached) = self.read_cache() {
            tracing::debug!("Restored cached profile for {}", cached.email);
            self.finish(Some(cached.clone()));
            return Some(cached);
        }

        match self.auth.me().await {
            Ok(user) => {
                tracing::info!("Session restored from token for {}", user.email);
                self.write_cache(&user);
                self.finish(Some(user.clone()));
                Some(user)
            }
            Err(e) => {
                tracing::warn!("Stored token rejected, logging out: {e}");
                self.discard_credentials();
                self.finish(None);
                None
            }
        }
    }

    fn finish(&self, user: Option<User>) {
        let mut state = self.write_state();
        state.user = user;
        state.is_loading = false;
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<User, ClientError> {
        let previous = self.auth.client().token();
        let result = self.auth.login(email, password).await;
        self.settle(&previous, result)
    }

    pub async fn signup(&self, email: &str, password: &str, name: &str) -> Result<User, ClientError> {
        let previous = self.auth.client().token();
        let result = self.auth.signup(email, password, name).await;
        self.settle(&previous, result)
    }

    /// Start the Google flow. Returns the URL the user was sent to.
    pub fn login_with_google(&self) -> String {
        self.auth.login_with_google()
    }

    /// Finish the Google flow from the pasted redirect, resolving the new
    /// identity. A paste without a token changes nothing; otherwise the
    /// previous session is dropped before the new token is stored.
    pub async fn complete_redirect(&self, redirect: &str) -> Result<User, ClientError> {
        let token = oauth::token_from_redirect(redirect)
            .map_err(|e| ClientError::Redirect(e.to_string()))?;

        self.discard_credentials();
        self.finish(None);

        let result = match self.auth.accept_redirect_token(&token) {
            Ok(()) => self.auth.me().await,
            Err(e) => Err(e),
        };
        match result {
            Ok(user) => {
                self.adopt(&user);
                Ok(user)
            }
            Err(e) => {
                self.discard_credentials();
                Err(e)
            }
        }
    }

    /// Outcome of a credential exchange. When the exchange stored a new
    /// token but the identity behind it could not be resolved, the token and
    /// the previous profile are both dropped.
    fn settle(
        &self,
        previous_token: &str,
        result: Result<User, ClientError>,
    ) -> Result<User, ClientError> {
        match result {
            Ok(user) => {
                self.adopt(&user);
                Ok(user)
            }
            Err(e) => {
                if self.auth.client().token() != previous_token {
                    tracing::warn!("New token could not be resolved to a profile: {e}");
                    self.discard_credentials();
                    self.finish(None);
                }
                Err(e)
            }
        }
    }

    fn adopt(&self, user: &User) {
        self.write_cache(user);
        self.finish(Some(user.clone()));
        tracing::info!("Logged in as {}", user.email);
    }

    /// End the session and reset every registered listener. Safe to call
    /// when already logged out.
    pub fn logout(&self) -> Result<(), ClientError> {
        let token_result = self.auth.logout();
        let cache_result = self.cache.remove(USER_KEY).map_err(ClientError::Storage);
        self.finish(None);

        let listeners: Vec<_> = self
            .listeners
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone();
        for listener in &listeners {
            listener.reset();
        }
        tracing::info!("Logged out");

        token_result.and(cache_result)
    }

    /// Replace the profile after an out-of-band change. The cache follows.
    pub fn set_user(&self, user: Option<User>) -> Result<(), ClientError> {
        match &user {
            Some(u) => {
                let json = serde_json::to_string(u).map_err(|e| ClientError::Storage(e.into()))?;
                self.cache.set(USER_KEY, &json).map_err(ClientError::Storage)?;
            }
            None => self.cache.remove(USER_KEY).map_err(ClientError::Storage)?,
        }
        self.write_state().user = user;
        Ok(())
    }

    /// Reconcile the cached profile with the backend.
    ///
    /// A 401/403 means the session is gone and triggers logout cleanup;
    /// any other failure is returned and the current state is kept.
    pub async fn verify(&self) -> Result<Option<User>, ClientError> {
        if self.auth.client().token().is_empty() {
            return Ok(None);
        }
        match self.auth.me().await {
            Ok(user) => {
                self.adopt(&user);
                Ok(Some(user))
            }
            Err(e) if e.is_unauthorized() => {
                tracing::warn!("Session no longer valid: {e}");
                self.logout()?;
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    /// Register state that `logout` must reset.
    pub fn register(&self, listener: Arc<dyn SessionListener>) {
        self.listeners
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(listener);
    }

    fn read_cache(&self) -> Option<User> {
        let raw = match self.cache.get(USER_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!("Could not read cached profile: {e}");
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(user) => Some(user),
            Err(e) => {
                tracing::warn!("Discarding malformed cached profile: {e}");
                if let Err(e) = self.cache.remove(USER_KEY) {
                    tracing::warn!("Could not remove cached profile: {e}");
                }
                None
            }
        }
    }

    fn write_cache(&self, user: &User) {
        let result = serde_json::to_string(user)
            .map_err(anyhow::Error::from)
            .and_then(|json| self.cache.set(USER_KEY, &json));
        if let Err(e) = result {
            tracing::warn!("Could not cache profile: {e}");
        }
    }

    fn discard_credentials(&self) {
        if let Err(e) = self.auth.logout() {
            tracing::warn!("Could not clear token: {e}");
        }
        if let Err(e) = self.cache.remove(USER_KEY) {
            tracing::warn!("Could not clear cached profile: {e}");
        }
    }
}
