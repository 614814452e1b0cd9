// src/auth/storage.rs — Durable key/value storage and the cookie jar
//
// `Storage` is the local equivalent of a browser profile's localStorage: a
// flat string map that survives restarts. `CookieJar` layers expiring
// cookies on top of any `Storage`.

use anyhow::Result;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// A flat, durable string map.
pub trait Storage: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
}

// ─── File-backed storage ────────────────────────────────────────────────────

/// JSON map on disk. Every write rewrites the file atomically.
///
/// Values (including the bearer token) are plaintext, chmod 600 on Unix.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<HashMap<String, String>> {
        if !self.path.exists() {
            return Ok(HashMap::new());
        }
        let content = std::fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(HashMap::new());
        }
        Ok(serde_json::from_str(&content)?)
    }

    fn save(&self, map: &HashMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(map)?;

        let tmp_path = self.path.with_extension("json.tmp");
        std::fs::write(&tmp_path, &json)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&tmp_path, std::fs::Permissions::from_mode(0o600))?;
        }

        std::fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.load()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut map = self.load()?;
        map.insert(key.to_string(), value.to_string());
        self.save(&map)
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut map = self.load()?;
        if map.remove(key).is_some() {
            self.save(&map)?;
        }
        Ok(())
    }
}

// ─── In-memory storage ──────────────────────────────────────────────────────

/// Process-local storage; nothing survives the process.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.entries().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.entries().remove(key);
        Ok(())
    }
}

// ─── Cookies ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Cookie {
    value: String,
    expires_at: DateTime<Utc>,
}

/// Named cookies with an expiry. Expired cookies read as absent.
#[derive(Clone)]
pub struct CookieJar {
    storage: Arc<dyn Storage>,
}

impl CookieJar {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    pub fn get(&self, name: &str) -> Result<Option<String>> {
        self.get_at(name, Utc::now())
    }

    fn get_at(&self, name: &str, now: DateTime<Utc>) -> Result<Option<String>> {
        let Some(raw) = self.storage.get(name)? else {
            return Ok(None);
        };
        // A cookie we cannot read is as good as no cookie.
        let Ok(cookie) = serde_json::from_str::<Cookie>(&raw) else {
            tracing::debug!("Ignoring unreadable cookie '{}'", name);
            return Ok(None);
        };
        if cookie.expires_at <= now || cookie.value.is_empty() {
            return Ok(None);
        }
        Ok(Some(cookie.value))
    }

    /// Set a cookie that expires `days` from now.
    pub fn set(&self, name: &str, value: &str, days: i64) -> Result<()> {
        let cookie = Cookie {
            value: value.to_string(),
            expires_at: Utc::now() + Duration::days(days),
        };
        self.storage.set(name, &serde_json::to_string(&cookie)?)
    }

    pub fn clear(&self, name: &str) -> Result<()> {
        self.storage.remove(name)
    }
}
