// src/client.rs — HTTP client for the Hey Me backend
//
// Every service call goes through `ApiClient::request`: base URL resolution,
// bearer injection, JSON decoding and status-to-error mapping live here and
// nowhere else.

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;

use crate::auth::TokenStore;
use crate::infra::errors::ClientError;

/// Request payload.
pub enum RequestBody {
    Empty,
    Json(serde_json::Value),
    Multipart(reqwest::multipart::Form),
}

#[derive(Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
    tokens: TokenStore,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, tokens: TokenStore) -> Self {
        Self::with_client(reqwest::Client::new(), base_url, tokens)
    }

    pub fn with_client(
        client: reqwest::Client,
        base_url: impl Into<String>,
        tokens: TokenStore,
    ) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client,
            base_url,
            tokens,
        }
    }

    /// Backend origin every path is resolved against.
    pub fn api_base(&self) -> &str {
        &self.base_url
    }

    pub fn tokens(&self) -> &TokenStore {
        &self.tokens
    }

    /// Current bearer token, or empty.
    pub fn token(&self) -> String {
        self.tokens.token()
    }

    pub fn set_token(&self, token: &str) -> Result<(), ClientError> {
        self.tokens.set_token(token).map_err(ClientError::Storage)
    }

    pub fn clear_token(&self) -> Result<(), ClientError> {
        self.tokens.clear_token().map_err(ClientError::Storage)
    }

    pub async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: RequestBody,
    ) -> Result<T, ClientError> {
        self.request_with(method, path, body, HeaderMap::new()).await
    }

    /// Send a request with caller headers merged over `Accept: application/json`.
    ///
    /// The bearer header is applied last whenever a token is present. A 204
    /// decodes `T` from JSON `null` without touching the body, so `()` and
    /// `Option<_>` are the natural targets for no-content endpoints.
    pub async fn request_with<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: RequestBody,
        headers: HeaderMap,
    ) -> Result<T, ClientError> {
        let url = format!("{}{}", self.base_url, path);

        let mut merged = HeaderMap::new();
        merged.insert(ACCEPT, HeaderValue::from_static("application/json"));
        merged.extend(headers);
        let token = self.token();
        if !token.is_empty() {
            if let Ok(value) = HeaderValue::from_str(&format!("Bearer {token}")) {
                merged.insert(AUTHORIZATION, value);
            } else {
                tracing::warn!("Stored token is not a valid header value; sending without it");
            }
        }

        let mut builder = self.client.request(method.clone(), &url).headers(merged);
        builder = match body {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => builder.json(&value),
            RequestBody::Multipart(form) => builder.multipart(form),
        };

        let response = builder.send().await?;
        let status = response.status();
        tracing::debug!("{} {} -> {}", method, path, status.as_u16());

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::Status {
                status: status.as_u16(),
                body,
            });
        }

        if status == StatusCode::NO_CONTENT {
            return serde_json::from_value(serde_json::Value::Null).map_err(|source| {
                ClientError::Decode {
                    path: path.to_string(),
                    source,
                }
            });
        }

        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|source| ClientError::Decode {
            path: path.to_string(),
            source,
        })
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        self.request(Method::GET, path, RequestBody::Empty).await
    }

    pub async fn post_json<T: DeserializeOwned>(
        &self,
        path: &str,
        body: serde_json::Value,
    ) -> Result<T, ClientError> {
        self.request(Method::POST, path, RequestBody::Json(body)).await
    }

    pub async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        self.request(Method::POST, path, RequestBody::Empty).await
    }

    pub async fn patch_json<T: DeserializeOwned>(
        &self,
        path: &str,
        body: serde_json::Value,
    ) -> Result<T, ClientError> {
        self.request(Method::PATCH, path, RequestBody::Json(body)).await
    }

    pub async fn delete(&self, path: &str) -> Result<(), ClientError> {
        self.request(Method::DELETE, path, RequestBody::Empty).await
    }
}
