// src/infra/config.rs — Configuration loading (TOML)

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::infra::paths;

/// Environment variable that overrides the API origin.
pub const API_BASE_ENV: &str = "HEYME_API_BASE";

pub const DEFAULT_API_BASE: &str = "http://localhost:9000";
pub const DEFAULT_PUBLIC_ORIGIN: &str = "http://localhost:3000";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub session: SessionConfig,

    #[serde(default)]
    pub documents: DocumentsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Backend origin; `/api/v1/...` paths are appended to it.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Origin of the web front end, used to build public share URLs.
    #[serde(default = "default_public_origin")]
    pub public_origin: String,
}

fn default_base_url() -> String {
    DEFAULT_API_BASE.into()
}

fn default_public_origin() -> String {
    DEFAULT_PUBLIC_ORIGIN.into()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            public_origin: default_public_origin(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Lifetime of the token cookie.
    pub cookie_days: i64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self { cookie_days: 7 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentsConfig {
    pub poll_interval_secs: u64,
    pub default_top_k: u32,
}

impl Default for DocumentsConfig {
    fn default() -> Self {
        Self {
            poll_interval_secs: 4,
            default_top_k: 5,
        }
    }
}

impl Config {
    /// Load config from file, falling back to defaults.
    pub fn load() -> anyhow::Result<Self> {
        let path = paths::config_file_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// API origin after applying the `HEYME_API_BASE` override.
    pub fn resolved_base_url(&self) -> String {
        self.base_url_with_override(std::env::var(API_BASE_ENV).ok())
    }

    fn base_url_with_override(&self, env_value: Option<String>) -> String {
        let raw = env_value
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| self.api.base_url.clone());
        raw.trim().trim_end_matches('/').to_string()
    }
}
