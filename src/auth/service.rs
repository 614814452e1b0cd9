// src/auth/service.rs — Login, signup, identity and OAuth handoff

use serde::Deserialize;
use std::sync::Arc;

use super::oauth::{self, Navigator, SystemBrowser};
use crate::client::ApiClient;
use crate::infra::errors::ClientError;
use crate::types::User;

#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
}

/// Stateless auth operations over [`ApiClient`]. The only state they touch
/// is the token store behind the client.
#[derive(Clone)]
pub struct AuthService {
    client: ApiClient,
    navigator: Arc<dyn Navigator>,
}

impl AuthService {
    pub fn new(client: ApiClient) -> Self {
        Self::with_navigator(client, Arc::new(SystemBrowser))
    }

    pub fn with_navigator(client: ApiClient, navigator: Arc<dyn Navigator>) -> Self {
        Self { client, navigator }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    /// Exchange credentials for a token, store it, then resolve the profile.
    pub async fn login(&self, email: &str, password: &str) -> Result<User, ClientError> {
        let resp: TokenResponse = self
            .client
            .post_json(
                "/api/v1/auth/login",
                serde_json::json!({ "email": email, "password": password }),
            )
            .await?;
        self.client.set_token(&resp.access_token)?;
        self.me().await
    }

    pub async fn signup(&self, email: &str, password: &str, name: &str) -> Result<User, ClientError> {
        let resp: TokenResponse = self
            .client
            .post_json(
                "/api/v1/auth/signup",
                serde_json::json!({ "email": email, "password": password, "name": name }),
            )
            .await?;
        self.client.set_token(&resp.access_token)?;
        self.me().await
    }

    /// Identity behind the stored token.
    pub async fn me(&self) -> Result<User, ClientError> {
        self.client.get("/api/v1/auth/me").await
    }

    /// Hand the user off to the backend's Google OAuth entry point.
    ///
    /// No request is made and nothing comes back: the backend finishes the
    /// flow and redirects with the token. Returns the URL navigated to.
    pub fn login_with_google(&self) -> String {
        let url = oauth::google_login_url(self.client.api_base());
        tracing::info!("Handing off to Google login at {url}");
        self.navigator.navigate(&url);
        url
    }

    /// Take the token out of the post-OAuth redirect and drop it into the
    /// cookie jar, where session init will find it.
    pub fn complete_redirect(&self, redirect: &str) -> Result<(), ClientError> {
        let token =
            oauth::token_from_redirect(redirect).map_err(|e| ClientError::Redirect(e.to_string()))?;
        self.accept_redirect_token(&token)
    }

    /// Cookie-only write of a token already taken out of a redirect.
    pub fn accept_redirect_token(&self, token: &str) -> Result<(), ClientError> {
        self.client
            .tokens()
            .set_cookie_token(token)
            .map_err(ClientError::Storage)
    }

    /// Local only; the backend keeps no session to end.
    pub fn logout(&self) -> Result<(), ClientError> {
        self.client.clear_token()
    }

    pub fn restore_token(&self) -> Option<String> {
        Some(self.client.token()).filter(|t| !t.is_empty())
    }
}
